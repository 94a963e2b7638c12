//! Cancellable scheduled tasks
//!
//! The session never leaves timer callbacks floating around. Every periodic
//! or delayed job is a task with a handle, and at most one task per
//! [`TaskKind`] is live: scheduling a kind cancels its previous handle first.

/// What a scheduled task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Materialize the previewed object
    Spawn,
    /// Refresh the round clock
    ClockTick,
    /// End of the post-reset grace period
    Restart,
}

/// Opaque id of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask {
    handle: TaskHandle,
    kind: TaskKind,
    due_ms: u64,
    /// `Some` for repeating tasks
    period_ms: Option<u64>,
}

/// A task that has come due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TaskHandle,
    pub kind: TaskKind,
    /// Scheduled time of this firing
    pub due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_handle: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `kind` every `period_ms`, first firing at `now_ms + period_ms`
    pub fn every(&mut self, kind: TaskKind, period_ms: u64, now_ms: u64) -> TaskHandle {
        let period_ms = period_ms.max(1);
        self.insert(kind, now_ms + period_ms, Some(period_ms))
    }

    /// Run `kind` once at `now_ms + delay_ms`
    pub fn after(&mut self, kind: TaskKind, delay_ms: u64, now_ms: u64) -> TaskHandle {
        self.insert(kind, now_ms + delay_ms, None)
    }

    fn insert(&mut self, kind: TaskKind, due_ms: u64, period_ms: Option<u64>) -> TaskHandle {
        if let Some(old) = self.cancel_kind(kind) {
            log::debug!("Replacing {:?} task {:?}", kind, old);
        }
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ScheduledTask {
            handle,
            kind,
            due_ms,
            period_ms,
        });
        handle
    }

    /// Cancel the live task of `kind`, if any
    pub fn cancel_kind(&mut self, kind: TaskKind) -> Option<TaskHandle> {
        let idx = self.tasks.iter().position(|t| t.kind == kind)?;
        Some(self.tasks.swap_remove(idx).handle)
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Handle of the live task of `kind`
    pub fn handle_of(&self, kind: TaskKind) -> Option<TaskHandle> {
        self.tasks.iter().find(|t| t.kind == kind).map(|t| t.handle)
    }

    /// Period of the live repeating task of `kind`
    pub fn period_of(&self, kind: TaskKind) -> Option<u64> {
        self.tasks
            .iter()
            .find(|t| t.kind == kind)
            .and_then(|t| t.period_ms)
    }

    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }

    /// Pop the earliest task due at or before `now_ms`.
    ///
    /// Ties go to the task scheduled first. Repeating tasks are re-armed on
    /// their next period boundary after `now_ms`, so a late poll fires them
    /// once rather than once per missed period; one-shot tasks are removed.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, _)| i)?;

        let task = &self.tasks[idx];
        let fired = Fired {
            handle: task.handle,
            kind: task.kind,
            due_ms: task.due_ms,
        };
        let period = task.period_ms;
        match period {
            Some(period) => {
                let missed = (now_ms - fired.due_ms) / period;
                self.tasks[idx].due_ms += (missed + 1) * period;
            }
            None => {
                self.tasks.swap_remove(idx);
            }
        }
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_task_fires_each_period() {
        let mut sched = Scheduler::new();
        sched.every(TaskKind::ClockTick, 1_000, 0);

        assert_eq!(sched.pop_due(999), None);
        let mut fired = Vec::new();
        for now in [1_000, 2_010, 3_500] {
            while let Some(f) = sched.pop_due(now) {
                fired.push(f.due_ms);
            }
        }
        assert_eq!(fired, vec![1_000, 2_000, 3_000]);
    }

    #[test]
    fn test_late_poll_fires_repeating_task_once() {
        let mut sched = Scheduler::new();
        sched.every(TaskKind::Spawn, 1_500, 0);

        let fired: Vec<_> = std::iter::from_fn(|| sched.pop_due(9_000))
            .map(|f| f.due_ms)
            .collect();
        assert_eq!(fired, vec![1_500]);
        // Stays on the original grid
        assert_eq!(sched.pop_due(10_499), None);
        assert_eq!(sched.pop_due(10_500).map(|f| f.due_ms), Some(10_500));
    }

    #[test]
    fn test_one_shot_task_fires_once() {
        let mut sched = Scheduler::new();
        let h = sched.after(TaskKind::Restart, 1_000, 500);
        assert_eq!(sched.handle_of(TaskKind::Restart), Some(h));
        assert_eq!(sched.pop_due(1_500).map(|f| f.kind), Some(TaskKind::Restart));
        assert_eq!(sched.pop_due(10_000), None);
        assert_eq!(sched.handle_of(TaskKind::Restart), None);
    }

    #[test]
    fn test_rescheduling_a_kind_leaves_one_live_handle() {
        let mut sched = Scheduler::new();
        let old = sched.every(TaskKind::Spawn, 1_500, 0);
        let new = sched.every(TaskKind::Spawn, 1_450, 700);

        assert_ne!(old, new);
        assert_eq!(sched.handle_of(TaskKind::Spawn), Some(new));
        assert_eq!(sched.live_count(), 1);
        assert_eq!(sched.period_of(TaskKind::Spawn), Some(1_450));
        // Outstanding wait discarded: next firing is a full new period from 700
        assert_eq!(sched.pop_due(1_500), None);
        assert_eq!(sched.pop_due(2_150).map(|f| f.due_ms), Some(2_150));
    }

    #[test]
    fn test_due_order_across_kinds() {
        let mut sched = Scheduler::new();
        sched.every(TaskKind::Spawn, 1_500, 0);
        sched.every(TaskKind::ClockTick, 1_000, 0);

        let mut order = Vec::new();
        for now in [1_000, 1_500, 2_000, 3_000] {
            while let Some(f) = sched.pop_due(now) {
                order.push((f.kind, f.due_ms));
            }
        }
        assert_eq!(
            order,
            vec![
                (TaskKind::ClockTick, 1_000),
                (TaskKind::Spawn, 1_500),
                (TaskKind::ClockTick, 2_000),
                (TaskKind::Spawn, 3_000),
                (TaskKind::ClockTick, 3_000),
            ]
        );
    }

    #[test]
    fn test_cancel() {
        let mut sched = Scheduler::new();
        let h = sched.every(TaskKind::Spawn, 100, 0);
        assert_eq!(sched.cancel_kind(TaskKind::Spawn), Some(h));
        assert_eq!(sched.cancel_kind(TaskKind::Spawn), None);
        assert_eq!(sched.pop_due(1_000), None);

        sched.every(TaskKind::Spawn, 100, 0);
        sched.every(TaskKind::ClockTick, 100, 0);
        sched.cancel_all();
        assert_eq!(sched.live_count(), 0);
    }
}
