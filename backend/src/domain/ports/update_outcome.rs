//! Result of a single-document update as reported by the store.

/// Counts reported by the store for an update filtered by identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matched by the identifier filter (0 or 1).
    pub matched: u64,
    /// Documents whose stored fields actually changed.
    pub modified: u64,
}

impl UpdateOutcome {
    /// Outcome for an identifier that matched nothing.
    pub const NOT_FOUND: Self = Self {
        matched: 0,
        modified: 0,
    };

    /// True when the identifier matched a stored record, whether or not
    /// any field changed.
    pub fn found(self) -> bool {
        self.matched > 0
    }
}
