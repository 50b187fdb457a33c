//! Identifier generation for stores that assign keys

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of fresh identifiers
pub trait IdGenerator<Id>: Send + Sync {
    /// Produce an identifier not handed out before
    fn next_id(&self) -> Id;

    /// Record an externally chosen identifier so it is never generated
    fn observe(&self, id: &Id);
}

/// Monotonic `i64` sequence
#[derive(Debug)]
pub struct SequenceGenerator {
    next: AtomicI64,
}

impl SequenceGenerator {
    /// Create a sequence whose first value is `start`
    pub fn starting_at(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator<i64> for SequenceGenerator {
    fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    fn observe(&self, id: &i64) {
        self.next.fetch_max(id.saturating_add(1), Ordering::SeqCst);
    }
}
