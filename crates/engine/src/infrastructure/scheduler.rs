//! Scheduler implementations for timed wheel transitions.

#[cfg(test)]
use std::sync::Mutex;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::infrastructure::ports::{CancelHandle, ScheduledTask, SchedulerPort};

/// Runs scheduled tasks on a tokio runtime.
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Capture the runtime the caller is running on.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn from_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl SchedulerPort for TokioScheduler {
    fn after(&self, delay: Duration, task: ScheduledTask) -> CancelHandle {
        let handle = CancelHandle::new();
        let cancel = handle.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if cancel.is_cancelled() {
                tracing::trace!("Scheduled task cancelled before it fired");
                return;
            }
            task();
        });
        handle
    }
}

#[cfg(test)]
struct Entry {
    due: Duration,
    seq: u64,
    cancel: CancelHandle,
    task: ScheduledTask,
}

#[cfg(test)]
#[derive(Default)]
struct Timeline {
    now: Duration,
    next_seq: u64,
    entries: Vec<Entry>,
}

/// Virtual-time scheduler for tests. Nothing runs until [`ManualScheduler::advance`].
#[cfg(test)]
#[derive(Default)]
pub struct ManualScheduler {
    timeline: Mutex<Timeline>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of tasks waiting to fire, cancelled ones included.
    pub fn pending(&self) -> usize {
        self.lock().entries.len()
    }

    /// Move virtual time forward, running every task that falls due in due-time
    /// order. Tasks scheduled by a running task fire in the same call when
    /// their due time is within the window. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut ran = 0;

        loop {
            // Tasks run without the lock held so they may schedule more work.
            let next = {
                let mut timeline = self.lock();
                let position = timeline
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(_, entry)| (entry.due, entry.seq))
                    .map(|(position, _)| position);
                match position {
                    Some(position) => {
                        let entry = timeline.entries.swap_remove(position);
                        timeline.now = entry.due;
                        Some(entry)
                    }
                    None => {
                        timeline.now = target;
                        None
                    }
                }
            };

            let Some(entry) = next else {
                return ran;
            };
            if entry.cancel.is_cancelled() {
                continue;
            }
            (entry.task)();
            ran += 1;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Timeline> {
        self.timeline.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
impl SchedulerPort for ManualScheduler {
    fn after(&self, delay: Duration, task: ScheduledTask) -> CancelHandle {
        let cancel = CancelHandle::new();
        let mut timeline = self.lock();
        let due = timeline.now + delay;
        let seq = timeline.next_seq;
        timeline.next_seq += 1;
        timeline.entries.push(Entry {
            due,
            seq,
            cancel: cancel.clone(),
            task,
        });
        cancel
    }
}
