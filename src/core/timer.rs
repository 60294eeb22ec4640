//! Cancellable one-shot timers, polled by the event loop.
//!
//! Nothing here sleeps.  Callers schedule payloads at an [`Instant`], ask for
//! the [`TimerQueue::next_deadline`] to know how long the loop may wait, and
//! drain due payloads one at a time with [`TimerQueue::pop_due`].  A handler
//! may schedule follow-up timers; those are picked up by the same drain when
//! they are already due.  Time is always passed in,
//! which keeps every timer-driven behaviour testable without a clock.

use std::collections::BTreeMap;
use std::time::Instant;

/// Handle returned by [`TimerQueue::schedule`], used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Delayed work the page controller knows how to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTimer {
    /// Fade-out finished: show `text` in `slot` and start fading in.
    MarqueeSwap { slot: usize, text: String },
    /// Fade-in finished for `slot`.
    MarqueeSettle { slot: usize },
    /// No scroll for the whole countdown: hide the footer.
    FooterHide,
}

/// A timer taken off the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<T> {
    /// When it was scheduled to fire; follow-ups chain from here, not from
    /// the time the queue was polled.
    pub at: Instant,
    pub id: TimerId,
    pub payload: T,
}

/// Deadline-ordered timer set.  Timers sharing a deadline fire in the order
/// they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: BTreeMap<(Instant, TimerId), T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Instant, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((at, id), payload);
        id
    }

    /// Drop a pending timer.  Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, tid)| *tid == id).copied();
        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(|(at, _)| *at)
    }

    /// Remove the earliest timer due at or before `now`, together with the
    /// deadline it was scheduled for.
    pub fn pop_due(&mut self, now: Instant) -> Option<Due<T>> {
        let entry = self.pending.first_entry()?;
        if entry.key().0 > now {
            return None;
        }
        let ((at, id), payload) = entry.remove_entry();
        Some(Due { at, id, payload })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain<T>(queue: &mut TimerQueue<T>, now: Instant) -> Vec<T> {
        std::iter::from_fn(|| queue.pop_due(now).map(|due| due.payload)).collect()
    }

    #[test]
    fn pops_in_deadline_then_schedule_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(t0 + ms(30), "late");
        queue.schedule(t0 + ms(10), "first");
        queue.schedule(t0 + ms(10), "second");

        assert_eq!(queue.next_deadline(), Some(t0 + ms(10)));
        assert_eq!(drain(&mut queue, t0 + ms(10)), vec!["first", "second"]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn nothing_fires_early() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(t0 + ms(100), ());
        assert!(queue.pop_due(t0 + ms(99)).is_none());
        assert_eq!(drain(&mut queue, t0 + ms(100)).len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let id = queue.schedule(t0 + ms(5), 1);
        queue.schedule(t0 + ms(6), 2);
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));

        assert_eq!(drain(&mut queue, t0 + ms(10)), vec![2]);
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn late_poll_reports_scheduled_deadline() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let id = queue.schedule(t0 + ms(500), "swap");

        let due = queue.pop_due(t0 + ms(2000));
        assert_eq!(
            due,
            Some(Due {
                at: t0 + ms(500),
                id,
                payload: "swap",
            })
        );
    }

    #[test]
    fn follow_up_already_due_fires_in_same_drain() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(t0 + ms(500), 1);

        let now = t0 + ms(2000);
        let mut fired = Vec::new();
        while let Some(due) = queue.pop_due(now) {
            fired.push(due.payload);
            if due.payload == 1 {
                queue.schedule(due.at + ms(1000), 2);
            }
        }
        assert_eq!(fired, vec![1, 2]);
        assert!(queue.is_empty());
    }
}
