use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, PoisonError},
};

use super::aggregator::Aggregator;

/// Memoizing factory of aggregators parameterized by an option value.
///
/// Equal options always yield the same shared aggregator instance.
pub struct AggregatorOptionSwitch<P> {
    factory: fn(P) -> Arc<dyn Aggregator>,
    cache: Mutex<HashMap<P, Arc<dyn Aggregator>>>,
}

impl<P: Copy + Eq + Hash> AggregatorOptionSwitch<P> {
    pub fn new(factory: fn(P) -> Arc<dyn Aggregator>) -> Self {
        Self {
            factory,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, option: P) -> Arc<dyn Aggregator> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            cache
                .entry(option)
                .or_insert_with(|| (self.factory)(option)),
        )
    }

    /// Number of distinct options seen so far.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
