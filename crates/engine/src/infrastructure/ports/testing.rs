//! Testability ports for injecting time, randomness and delays.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn gen_index(&self, len: usize) -> usize;

    /// Uniform integer in `[min, max]` (inclusive).
    fn gen_range(&self, min: u32, max: u32) -> u32;
}

/// Work to run once a delay has elapsed.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Delayed execution of fire-and-forget callbacks.
pub trait SchedulerPort: Send + Sync {
    /// Run `task` after `delay` unless the returned handle is cancelled first.
    fn after(&self, delay: Duration, task: ScheduledTask) -> CancelHandle;
}

/// Cancellation flag shared between a scheduler and whoever scheduled a task.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
