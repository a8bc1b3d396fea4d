//! Latest-request-wins sequencing for lookups that can overlap

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Ticket handed out for one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Monotonic counter shared by every caller of one kind of lookup.
///
/// A response may only be applied while its ticket is still the latest one
/// issued; anything older is stale and dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Make every outstanding ticket stale
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(first < second);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_clones_share_counter() {
        let seq = RequestSequencer::new();
        let other = seq.clone();
        let ticket = seq.issue();
        other.issue();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn test_invalidate() {
        let seq = RequestSequencer::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
    }
}
