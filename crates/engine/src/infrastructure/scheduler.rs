//! In-process tick scheduler.
//!
//! Stands in for the host's task queue: whoever drives the game loop calls
//! [`TickScheduler::advance`] once per tick and runs the returned tasks.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use bossbar_domain::BarTask;

use super::ports::{SchedulerPort, TaskHandle};

#[derive(Debug)]
struct Scheduled {
    due_tick: u64,
    period: Option<u64>,
    task: BarTask,
}

/// Deterministic scheduler counting ticks from zero.
#[derive(Debug, Default)]
pub struct TickScheduler {
    tick: AtomicU64,
    next_handle: AtomicU64,
    tasks: DashMap<TaskHandle, Scheduled>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tick(&self) -> u64 {
        self.tick.load(Ordering::SeqCst)
    }

    /// Number of tasks still waiting to fire (periodic tasks included).
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Move to the next tick and return the tasks due on it, oldest first.
    pub fn advance(&self) -> Vec<BarTask> {
        let now = self.tick.fetch_add(1, Ordering::SeqCst) + 1;

        let mut due: Vec<TaskHandle> = self
            .tasks
            .iter()
            .filter(|entry| entry.due_tick <= now)
            .map(|entry| *entry.key())
            .collect();
        due.sort();

        let mut fired = Vec::with_capacity(due.len());
        for handle in due {
            let rescheduled = self.tasks.get_mut(&handle).and_then(|mut entry| {
                let period = entry.period?;
                entry.due_tick = now + period;
                Some(entry.task.clone())
            });

            match rescheduled {
                Some(task) => fired.push(task),
                None => {
                    if let Some((_, entry)) = self.tasks.remove(&handle) {
                        fired.push(entry.task);
                    }
                }
            }
        }
        fired
    }

    /// Advance `ticks` times, collecting everything that fired.
    pub fn advance_by(&self, ticks: u32) -> Vec<BarTask> {
        (0..ticks).flat_map(|_| self.advance()).collect()
    }

    fn insert(&self, delay: u64, period: Option<u64>, task: BarTask) -> TaskHandle {
        let handle = TaskHandle::new(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let due_tick = self.current_tick() + delay;
        self.tasks.insert(
            handle,
            Scheduled {
                due_tick,
                period,
                task,
            },
        );
        handle
    }
}

impl SchedulerPort for TickScheduler {
    fn run_after(&self, delay_ticks: u32, task: BarTask) -> TaskHandle {
        self.insert(u64::from(delay_ticks), None, task)
    }

    fn run_periodic(&self, period_ticks: u32, task: BarTask) -> TaskHandle {
        let period = u64::from(period_ticks.max(1));
        self.insert(period, Some(period), task)
    }

    fn cancel(&self, handle: TaskHandle) {
        if self.tasks.remove(&handle).is_some() {
            tracing::trace!(handle = %handle, "Scheduled task cancelled");
        }
    }
}
