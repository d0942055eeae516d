//! Tick-based scheduling of bar tasks.

use std::fmt;
use std::sync::Arc;

use bossbar_domain::BarTask;

/// Identifies a scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// The host's task queue.
///
/// Tasks run on the same queue that delivers viewer events; the host hands
/// each fired [`BarTask`] back to `BarLifecycle::run_task`.
pub trait SchedulerPort: Send + Sync {
    fn run_after(&self, delay_ticks: u32, task: BarTask) -> TaskHandle;
    fn run_periodic(&self, period_ticks: u32, task: BarTask) -> TaskHandle;
    /// Cancelling an unknown or already-fired handle does nothing.
    fn cancel(&self, handle: TaskHandle);
}

/// A scheduled task owned by whoever holds this value.
///
/// Dropping it cancels the task.
pub struct PendingTask {
    handle: TaskHandle,
    scheduler: Arc<dyn SchedulerPort>,
}

impl PendingTask {
    pub fn new(handle: TaskHandle, scheduler: Arc<dyn SchedulerPort>) -> Self {
        Self { handle, scheduler }
    }
}

impl Drop for PendingTask {
    fn drop(&mut self) {
        self.scheduler.cancel(self.handle);
    }
}

impl fmt::Debug for PendingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTask")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
