//! Deferred callbacks on the session clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Work the session postpones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Score the finished word once the settle delay is over.
    CompleteTask,
    /// Pick the next word and spawn its tiles.
    NextTask,
    /// Clear the completion flash.
    EndFlash,
}

/// A deferred action tagged with the round it was scheduled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled {
    pub due: Duration,
    pub epoch: u64,
    pub action: Deferred,
    seq: u64,
}

/// Pending deferred actions, released in due order.
///
/// Actions due at the same instant come out in the order they were
/// scheduled. The scheduler does not judge staleness; the caller compares
/// [`Scheduled::epoch`] against its current round when an action fires.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire at `due`.
    pub fn schedule(&mut self, due: Duration, epoch: u64, action: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due,
            epoch,
            action,
            seq,
        });
    }

    /// Remove and return the earliest action due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Scheduled> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= now)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(index))
    }

    /// Drop everything pending.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Check if `action` is waiting to fire.
    #[must_use]
    pub fn contains(&self, action: Deferred) -> bool {
        self.pending.iter().any(|s| s.action == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_nothing_due_early() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(secs(1.0), 1, Deferred::CompleteTask);

        assert!(scheduler.pop_due(secs(0.5)).is_none());
        assert_eq!(scheduler.len(), 1);

        let fired = scheduler.pop_due(secs(1.0)).unwrap();
        assert_eq!(fired.action, Deferred::CompleteTask);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(secs(0.8), 1, Deferred::NextTask);
        scheduler.schedule(secs(0.35), 1, Deferred::EndFlash);

        let order: Vec<Deferred> = std::iter::from_fn(|| scheduler.pop_due(secs(2.0)))
            .map(|s| s.action)
            .collect();
        assert_eq!(order, vec![Deferred::EndFlash, Deferred::NextTask]);
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(secs(1.0), 1, Deferred::NextTask);
        scheduler.schedule(secs(1.0), 1, Deferred::EndFlash);
        scheduler.schedule(secs(1.0), 1, Deferred::CompleteTask);

        let order: Vec<Deferred> = std::iter::from_fn(|| scheduler.pop_due(secs(1.0)))
            .map(|s| s.action)
            .collect();
        assert_eq!(
            order,
            vec![Deferred::NextTask, Deferred::EndFlash, Deferred::CompleteTask]
        );
    }

    #[test]
    fn test_clear() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(secs(0.1), 3, Deferred::EndFlash);
        assert!(scheduler.contains(Deferred::EndFlash));

        scheduler.clear();
        assert!(scheduler.pop_due(secs(10.0)).is_none());
        assert!(!scheduler.contains(Deferred::EndFlash));
    }

    #[test]
    fn test_epoch_carried() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::ZERO, 7, Deferred::NextTask);
        assert_eq!(scheduler.pop_due(Duration::ZERO).unwrap().epoch, 7);
    }
}
