//! Per-descriptor in-flight bookkeeping.
//!
//! Every invocation gets a generation number. Cancellation and supersession
//! never touch the running future: they move the slot's watermarks, and a
//! settling invocation checks its captured generation against them.

/// Generation number of one invocation.
pub type Generation = u64;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct InFlightSlot {
    /// Highest generation issued so far.
    issued: Generation,
    /// Every generation at or below this one was cancelled.
    cancelled_through: Generation,
    /// Invocations started but not yet settled.
    running: usize,
}

/// Outcome of settling an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settlement {
    Emit,
    Cancelled,
    Superseded,
}

impl InFlightSlot {
    /// Start a new invocation and return its generation.
    ///
    /// For `latest` descriptors this implicitly supersedes every lower
    /// generation still running.
    pub fn start(&mut self) -> Generation {
        self.issued += 1;
        self.running += 1;
        self.issued
    }

    /// Cancel everything issued so far. Returns how many invocations were
    /// still running.
    pub fn cancel(&mut self) -> usize {
        self.cancelled_through = self.issued;
        self.running
    }

    /// Settle `generation` and decide whether it may emit.
    pub fn settle(&mut self, generation: Generation, latest: bool) -> Settlement {
        self.running = self.running.saturating_sub(1);
        if generation <= self.cancelled_through {
            Settlement::Cancelled
        } else if latest && generation != self.issued {
            Settlement::Superseded
        } else {
            Settlement::Emit
        }
    }

    pub fn running(&self) -> usize {
        self.running
    }

    pub fn is_idle(&self) -> bool {
        self.running == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_invocation_emits() {
        let mut slot = InFlightSlot::default();
        let generation = slot.start();
        assert_eq!(slot.running(), 1);
        assert_eq!(slot.settle(generation, true), Settlement::Emit);
        assert!(slot.is_idle());
    }

    #[test]
    fn latest_suppresses_older_even_when_it_settles_first() {
        let mut slot = InFlightSlot::default();
        let first = slot.start();
        let second = slot.start();
        assert_eq!(slot.settle(first, true), Settlement::Superseded);
        assert_eq!(slot.settle(second, true), Settlement::Emit);
    }

    #[test]
    fn latest_suppresses_older_settling_last() {
        let mut slot = InFlightSlot::default();
        let first = slot.start();
        let second = slot.start();
        assert_eq!(slot.settle(second, true), Settlement::Emit);
        assert_eq!(slot.settle(first, true), Settlement::Superseded);
    }

    #[test]
    fn without_latest_every_invocation_emits() {
        let mut slot = InFlightSlot::default();
        let first = slot.start();
        let second = slot.start();
        assert_eq!(slot.settle(first, false), Settlement::Emit);
        assert_eq!(slot.settle(second, false), Settlement::Emit);
    }

    #[test]
    fn cancel_suppresses_all_running() {
        let mut slot = InFlightSlot::default();
        let first = slot.start();
        let second = slot.start();
        assert_eq!(slot.cancel(), 2);
        assert_eq!(slot.settle(first, false), Settlement::Cancelled);
        assert_eq!(slot.settle(second, false), Settlement::Cancelled);
        assert!(slot.is_idle());
    }

    #[test]
    fn trigger_after_cancel_runs_normally() {
        let mut slot = InFlightSlot::default();
        let stale = slot.start();
        slot.cancel();
        let fresh = slot.start();
        assert_eq!(slot.settle(fresh, true), Settlement::Emit);
        assert_eq!(slot.settle(stale, true), Settlement::Cancelled);
    }

    #[test]
    fn cancel_on_idle_slot_is_harmless() {
        let mut slot = InFlightSlot::default();
        assert_eq!(slot.cancel(), 0);
        let generation = slot.start();
        assert_eq!(slot.settle(generation, false), Settlement::Emit);
    }
}
