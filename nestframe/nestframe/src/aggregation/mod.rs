//! Aggregators: named reductions over value columns.
//!
//! Three strategies cover the built-ins:
//! - [`TwoStepAggregator`] reduces every column and then the partial results
//!   (`min`, `max`).
//! - [`NumbersAggregator`] does the same for numbers, unifying the partial
//!   results' types first (`sum`, `mean`).
//! - [`FlatteningAggregator`] pools all values and reduces once (`median`,
//!   `percentile`, `std`).
//!
//! [`AggregatorOptionSwitch`] memoizes aggregators that take options.

mod aggregator;
mod builtin;
mod flattening;
mod math;
mod numbers;
mod switch;
mod two_step;

pub use aggregator::{Aggregator, Reducer};
pub use builtin::Aggregators;
pub use flattening::FlatteningAggregator;
pub use numbers::NumbersAggregator;
pub use switch::AggregatorOptionSwitch;
pub use two_step::TwoStepAggregator;
