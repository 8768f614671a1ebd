use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Ticket handed out for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Guard that lets only the most recently started request apply its result.
///
/// Each filter rebuild calls [`LatestOnly::begin`]; when its response arrives the caller checks
/// [`LatestOnly::is_current`] and drops the result if a newer build has started meanwhile.
#[derive(Debug, Clone, Default)]
pub struct LatestOnly {
    generation: Arc<AtomicU64>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, invalidating every ticket issued before
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}
