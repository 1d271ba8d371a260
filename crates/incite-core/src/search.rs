//! Debounced search sequencing
//!
//! Search-as-you-type races search completions against newer keystrokes.
//! The rule is last-request-wins: a completed search whose request id is no
//! longer current must be discarded, never applied out of order. The
//! sequencer is the bookkeeping for that check; everything runs on one
//! logical thread of control, so a plain counter suffices.

/// Id handed out for one search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Monotonic request counter for last-request-wins search
#[derive(Debug, Default)]
pub struct SearchSequencer {
    counter: u64,
    current: Option<u64>,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request id, superseding any request still pending.
    pub fn next_request(&mut self) -> RequestId {
        self.counter += 1;
        self.current = Some(self.counter);
        RequestId(self.counter)
    }

    /// True when `id` is the most recent request and has not been canceled.
    /// Apply results only when this holds.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.current == Some(id.0)
    }

    /// Cancel the pending request outright; its results, if they ever
    /// arrive, are stale.
    pub fn cancel_pending(&mut self) {
        self.current = None;
    }

    /// Whether any request is pending
    pub fn has_pending(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_wins() {
        let mut seq = SearchSequencer::new();
        let first = seq.next_request();
        let second = seq.next_request();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let mut seq = SearchSequencer::new();
        let id = seq.next_request();
        assert!(seq.has_pending());
        seq.cancel_pending();
        assert!(!seq.is_current(id));
        assert!(!seq.has_pending());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut seq = SearchSequencer::new();
        let first = seq.next_request();
        seq.cancel_pending();
        let second = seq.next_request();
        assert_ne!(first, second);
        assert!(seq.is_current(second));
        assert!(!seq.is_current(first));
    }
}
