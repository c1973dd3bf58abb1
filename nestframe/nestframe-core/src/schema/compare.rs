/// Outcome of comparing schema A against schema B.
///
/// `IsSuper` means A is the wider side (B has extra columns or narrower
/// types); `IsDerived` is the converse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareResult {
    Matches,
    IsSuper,
    IsDerived,
    None,
}

impl CompareResult {
    /// Associative combination with `Matches` as identity. Mixing `IsSuper`
    /// and `IsDerived` collapses to `None`, and `None` absorbs everything.
    pub fn combine(self, other: CompareResult) -> CompareResult {
        match (self, other) {
            (CompareResult::Matches, other) => other,
            (this, CompareResult::Matches) => this,
            (CompareResult::IsSuper, CompareResult::IsSuper) => CompareResult::IsSuper,
            (CompareResult::IsDerived, CompareResult::IsDerived) => CompareResult::IsDerived,
            _ => CompareResult::None,
        }
    }

    /// Result of comparing in the opposite direction.
    pub fn inverse(self) -> CompareResult {
        match self {
            CompareResult::IsSuper => CompareResult::IsDerived,
            CompareResult::IsDerived => CompareResult::IsSuper,
            other => other,
        }
    }

    pub fn matches(self) -> bool {
        self == CompareResult::Matches
    }

    pub fn is_super_or_matches(self) -> bool {
        matches!(self, CompareResult::Matches | CompareResult::IsSuper)
    }

    pub fn is_derived_or_matches(self) -> bool {
        matches!(self, CompareResult::Matches | CompareResult::IsDerived)
    }
}

/// How value column types are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareMode {
    /// Value types must be identical; any difference is `None`.
    Strict,
    /// Subtype relationships register as `IsDerived` / `IsSuper`.
    #[default]
    Lenient,
}
