//! Deterministic task queue on a virtual clock
//!
//! Delayed and repeating callbacks are plain data (`Task`) stamped with a
//! due tick. Tasks due on the same tick fire in the order they were
//! scheduled. Nothing can be cancelled; handlers must tolerate targets
//! that are already gone.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::bonus::BonusHandle;

/// Work scheduled for a future tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Re-enable a popped balloon
    RespawnBalloon(usize),
    /// Periodic bonus sphere spawn
    SpawnBonus,
    /// Drift tween finished; start escaping
    BonusDriftComplete(BonusHandle),
    /// Escape time ran out
    BonusExpire(BonusHandle),
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: u64,
    seq: u64,
    /// Re-queue interval for repeating tasks
    every: Option<u64>,
    task: Task,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed: BinaryHeap is a max-heap, we want the earliest first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual-clock task queue
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, due: u64, every: Option<u64>, task: Task) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due,
            seq,
            every,
            task,
        });
        seq
    }

    /// Run `task` once, `delay` ticks after `now`
    pub fn schedule(&mut self, now: u64, delay: u64, task: Task) -> u64 {
        self.push(now + delay, None, task)
    }

    /// Run `task` every `interval` ticks, first at `now + interval`
    pub fn schedule_repeating(&mut self, now: u64, interval: u64, task: Task) -> u64 {
        // A zero interval would re-fire forever within one tick
        let interval = interval.max(1);
        self.push(now + interval, Some(interval), task)
    }

    /// Pop the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Option<Task> {
        if self.queue.peek().is_none_or(|next| next.due > now) {
            return None;
        }
        let next = self.queue.pop()?;
        if let Some(every) = next.every {
            self.push(next.due + every, Some(every), next.task);
        }
        Some(next.task)
    }

    /// Number of pending tasks (repeating tasks count once)
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Count pending tasks matching a predicate
    pub fn count_pending(&self, pred: impl Fn(&Task) -> bool) -> usize {
        self.queue.iter().filter(|s| pred(&s.task)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, now: u64) -> Vec<Task> {
        std::iter::from_fn(|| s.pop_due(now)).collect()
    }

    #[test]
    fn test_nothing_due_before_time() {
        let mut s = Scheduler::new();
        s.schedule(0, 10, Task::RespawnBalloon(0));
        assert!(drain(&mut s, 9).is_empty());
        assert_eq!(drain(&mut s, 10), vec![Task::RespawnBalloon(0)]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_same_tick_fires_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 5, Task::RespawnBalloon(3));
        s.schedule(0, 5, Task::RespawnBalloon(1));
        s.schedule(2, 3, Task::RespawnBalloon(2));
        assert_eq!(
            drain(&mut s, 5),
            vec![
                Task::RespawnBalloon(3),
                Task::RespawnBalloon(1),
                Task::RespawnBalloon(2)
            ]
        );
    }

    #[test]
    fn test_earlier_due_wins_over_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 8, Task::RespawnBalloon(0));
        s.schedule(0, 4, Task::RespawnBalloon(1));
        assert_eq!(
            drain(&mut s, 10),
            vec![Task::RespawnBalloon(1), Task::RespawnBalloon(0)]
        );
    }

    #[test]
    fn test_repeating_recurs_at_exact_interval() {
        let mut s = Scheduler::new();
        s.schedule_repeating(0, 600, Task::SpawnBonus);

        let mut fired_at = Vec::new();
        for now in 0..=1800 {
            if s.pop_due(now).is_some() {
                fired_at.push(now);
            }
        }
        assert_eq!(fired_at, vec![600, 1200, 1800]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_late_poll_catches_up_in_order() {
        let mut s = Scheduler::new();
        s.schedule_repeating(0, 10, Task::SpawnBonus);
        s.schedule(0, 15, Task::RespawnBalloon(7));
        assert_eq!(
            drain(&mut s, 20),
            vec![Task::SpawnBonus, Task::RespawnBalloon(7), Task::SpawnBonus]
        );
    }

    #[test]
    fn test_count_pending() {
        let mut s = Scheduler::new();
        s.schedule(0, 1, Task::RespawnBalloon(0));
        s.schedule(0, 1, Task::RespawnBalloon(0));
        s.schedule_repeating(0, 1, Task::SpawnBonus);
        assert_eq!(s.count_pending(|t| *t == Task::RespawnBalloon(0)), 2);
        assert_eq!(s.count_pending(|t| *t == Task::SpawnBonus), 1);
    }
}
