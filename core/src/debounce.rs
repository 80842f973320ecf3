//! Trailing debounce
//!
//! [`Debounce`] is the pending/idle state machine behind every submission
//! slot. It owns no timer: the caller starts one per [`Ticket`] (a tokio
//! sleep natively, a `TimeoutFuture` in the browser) and calls
//! [`Debounce::fire`] when it elapses. Only the ticket of the latest
//! [`Debounce::schedule`] call yields a value, so a burst of edits produces a
//! single submission carrying the last one.
//!
//! [`SlotSequence`] numbers the requests a slot sends. Requests are never
//! cancelled, so responses may arrive out of order; a response older than one
//! already settled must not overwrite it.

use std::fmt;

/// Handle returned by [`Debounce::schedule`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug)]
pub struct Debounce<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debounce<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> Debounce<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer `value`, invalidating every earlier ticket
    pub fn schedule(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Timer for `ticket` elapsed. Yields the buffered value only if no later
    /// schedule, flush or cancel happened in between.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Take the buffered value immediately (confirmation key). Outstanding
    /// timers become no-ops.
    pub fn flush(&mut self) -> Option<T> {
        self.generation += 1;
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }
}

/// Request numbering for one slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotSequence {
    dispatched: u64,
    settled: u64,
}

impl SlotSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next request. Sequences start at 1.
    pub fn begin(&mut self) -> u64 {
        self.dispatched += 1;
        self.dispatched
    }

    /// Response for `sequence` arrived. Returns `false` (and changes
    /// nothing) when a newer response was already settled.
    pub fn settle(&mut self, sequence: u64) -> bool {
        if sequence < self.settled {
            return false;
        }
        self.settled = sequence;
        true
    }

    pub fn last_dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn last_settled(&self) -> u64 {
        self.settled
    }
}

/// What a submission slot carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKind {
    Value,
    Comment,
}

/// One debounce slot per section, field and kind
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub section: String,
    pub field: String,
    pub kind: SlotKind,
}

impl SlotKey {
    pub fn value(section: &str, field: &str) -> Self {
        Self {
            section: section.to_string(),
            field: field.to_string(),
            kind: SlotKind::Value,
        }
    }

    /// Comment slots are keyed by the lowercase field name
    pub fn comment(section: &str, field: &str) -> Self {
        Self {
            section: section.to_string(),
            field: field.to_lowercase(),
            kind: SlotKind::Comment,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SlotKind::Value => write!(f, "{}.{}", self.section, self.field),
            SlotKind::Comment => write!(f, "{}.{}#comment", self.section, self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_yields_only_last_value() {
        let mut debounce = Debounce::new();
        let tickets: Vec<Ticket> = (1..=5).map(|v| debounce.schedule(v)).collect();

        let fired: Vec<Option<i32>> = tickets.into_iter().map(|t| debounce.fire(t)).collect();

        assert_eq!(fired, vec![None, None, None, None, Some(5)]);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_flush_cancels_outstanding_timer() {
        let mut debounce = Debounce::new();
        let ticket = debounce.schedule("a");

        assert_eq!(debounce.flush(), Some("a"));
        assert_eq!(debounce.fire(ticket), None);
        assert_eq!(debounce.flush(), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debounce = Debounce::new();
        let ticket = debounce.schedule(1);
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert_eq!(debounce.fire(ticket), None);
    }

    #[test]
    fn test_fire_twice_yields_once() {
        let mut debounce = Debounce::new();
        let ticket = debounce.schedule(7);
        assert_eq!(debounce.pending(), Some(&7));
        assert_eq!(debounce.fire(ticket), Some(7));
        assert_eq!(debounce.fire(ticket), None);
    }

    #[test]
    fn test_sequence_settles_in_order() {
        let mut sequence = SlotSequence::new();
        let first = sequence.begin();
        let second = sequence.begin();
        assert_eq!((first, second), (1, 2));

        assert!(sequence.settle(first));
        assert!(sequence.settle(second));
        assert_eq!(sequence.last_settled(), 2);
    }

    #[test]
    fn test_older_response_after_newer_is_rejected() {
        let mut sequence = SlotSequence::new();
        let slow = sequence.begin();
        let fast = sequence.begin();

        assert!(sequence.settle(fast));
        assert!(!sequence.settle(slow));
        assert_eq!(sequence.last_settled(), fast);
        assert_eq!(sequence.last_dispatched(), 2);
    }

    #[test]
    fn test_failed_request_does_not_block_later_ones() {
        let mut sequence = SlotSequence::new();
        let _failed = sequence.begin();
        let retry = sequence.begin();
        assert!(sequence.settle(retry));
    }

    #[test]
    fn test_comment_slot_lowercases_field() {
        let key = SlotKey::comment("general", "AutoStart");
        assert_eq!(key.field, "autostart");
        assert_eq!(key.to_string(), "general.autostart#comment");
        assert_ne!(key, SlotKey::value("general", "autostart"));
    }
}
