//! Scheduled-task queue for deferred simulation work.
//!
//! Cooldown-style countdowns live on the data they affect; everything that
//! needs a *callback on a future tick* (finish a dodge, activate i-frames,
//! revert a crowd-control effect) goes through this scheduler. Tasks are
//! addressed by [`TimerHandle`]s stored on the owning record: scheduling
//! through a handle replaces whatever that handle pointed at, and
//! cancelling an already-fired or never-set handle is a no-op.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::state::{CharacterId, CrowdControlEffect};

/// Deferred simulation work. Tasks carry data, not closures, so firing
/// order and effects stay deterministic and replayable.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerTask {
    FinishDodge(CharacterId),
    EnableIFrames {
        character: CharacterId,
        duration: f32,
    },
    DisableIFrames(CharacterId),
    EnableDamageBlocking(CharacterId),
    FinishNormalAttack(CharacterId),
    FinishSkill(CharacterId),
    FinishWeaponSwitch(CharacterId),
    RevertCrowdControl {
        character: CharacterId,
        effect: CrowdControlEffect,
    },
}

/// Handle to one scheduled task. `Default` is the invalid handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerHandle(Option<u64>);

impl TimerHandle {
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

struct Entry {
    fire_at: f64,
    id: u64,
    task: TimerTask,
}

// Min-heap ordering by (fire_at, id); id breaks ties so same-tick tasks
// fire in scheduling order.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entry {}

/// Priority queue of scheduled tasks owned by the simulation loop.
#[derive(Default)]
pub struct TaskScheduler {
    now: f64,
    next_id: u64,
    queue: BinaryHeap<Entry>,
    cancelled: HashSet<u64>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedules `task` to fire after `delay` seconds, replacing whatever
    /// `handle` previously pointed at.
    pub fn schedule(&mut self, handle: &mut TimerHandle, delay: f32, task: TimerTask) {
        self.cancel(handle);

        self.next_id += 1;
        let id = self.next_id;
        self.queue.push(Entry {
            fire_at: self.now + delay.max(0.0) as f64,
            id,
            task,
        });
        *handle = TimerHandle(Some(id));
    }

    /// Invalidates the task behind `handle`. No-op for unset handles and
    /// for tasks that already fired.
    pub fn cancel(&mut self, handle: &mut TimerHandle) {
        if let Some(id) = handle.0.take() {
            self.cancelled.insert(id);
        }
    }

    /// Advances the clock and returns the tasks due by the new time, in
    /// firing order. Cancelled entries are skipped.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerTask> {
        self.now += dt.max(0.0) as f64;

        let mut due = Vec::new();
        while let Some(entry) = self.queue.peek() {
            if entry.fire_at > self.now {
                break;
            }
            let entry = self.queue.pop().expect("peeked entry");
            if !self.cancelled.remove(&entry.id) {
                due.push(entry.task);
            }
        }

        if self.queue.is_empty() {
            // Tombstones for already-fired handles have nothing left to
            // suppress.
            self.cancelled.clear();
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: CharacterId = CharacterId(1);

    #[test]
    fn fires_in_time_then_schedule_order() {
        let mut scheduler = TaskScheduler::new();
        let mut a = TimerHandle::default();
        let mut b = TimerHandle::default();
        let mut c = TimerHandle::default();
        scheduler.schedule(&mut a, 1.0, TimerTask::FinishDodge(HERO));
        scheduler.schedule(&mut b, 0.5, TimerTask::DisableIFrames(HERO));
        scheduler.schedule(&mut c, 0.5, TimerTask::EnableDamageBlocking(HERO));

        let due = scheduler.advance(2.0);
        assert_eq!(
            due,
            vec![
                TimerTask::DisableIFrames(HERO),
                TimerTask::EnableDamageBlocking(HERO),
                TimerTask::FinishDodge(HERO),
            ]
        );
    }

    #[test]
    fn rescheduling_through_a_handle_replaces_the_task() {
        let mut scheduler = TaskScheduler::new();
        let mut handle = TimerHandle::default();
        scheduler.schedule(
            &mut handle,
            1.0,
            TimerTask::RevertCrowdControl {
                character: HERO,
                effect: CrowdControlEffect::Stun,
            },
        );
        // Refresh with a longer duration; the first entry must not fire.
        scheduler.schedule(
            &mut handle,
            3.0,
            TimerTask::RevertCrowdControl {
                character: HERO,
                effect: CrowdControlEffect::Stun,
            },
        );

        assert!(scheduler.advance(1.5).is_empty());
        assert_eq!(scheduler.advance(2.0).len(), 1);
    }

    #[test]
    fn cancel_is_reentrant() {
        let mut scheduler = TaskScheduler::new();
        let mut handle = TimerHandle::default();
        scheduler.schedule(&mut handle, 1.0, TimerTask::FinishDodge(HERO));
        scheduler.cancel(&mut handle);
        scheduler.cancel(&mut handle);
        assert!(!handle.is_set());
        assert!(scheduler.advance(2.0).is_empty());

        // Cancelling a never-set handle is also a no-op.
        let mut fresh = TimerHandle::default();
        scheduler.cancel(&mut fresh);
    }

    #[test]
    fn cancel_after_fire_is_a_noop() {
        let mut scheduler = TaskScheduler::new();
        let mut handle = TimerHandle::default();
        scheduler.schedule(&mut handle, 0.5, TimerTask::FinishDodge(HERO));
        assert_eq!(scheduler.advance(1.0).len(), 1);

        // Handle is stale now; cancelling must not disturb later tasks.
        scheduler.cancel(&mut handle);
        let mut other = TimerHandle::default();
        scheduler.schedule(&mut other, 0.5, TimerTask::FinishSkill(HERO));
        assert_eq!(scheduler.advance(1.0).len(), 1);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut scheduler = TaskScheduler::new();
        let mut handle = TimerHandle::default();
        scheduler.schedule(&mut handle, 0.0, TimerTask::FinishDodge(HERO));
        assert_eq!(scheduler.advance(0.0).len(), 1);
    }
}
