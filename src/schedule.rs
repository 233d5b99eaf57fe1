//! Delayed-task scheduling.
//!
//! Confirmation deadlines run on the host's scheduler, asynchronously to
//! the dispatch path. The trait keeps the confirmation registry testable;
//! [`TokioScheduler`] is the default implementation and spawns a
//! sleep-then-callback task on the current runtime.

use std::time::Duration;

/// A generic delayed-task scheduler.
pub trait Scheduler: Send + Sync {
    /// Run `task` after `delay`.
    ///
    /// Cancellation through the returned handle is best-effort: a callback
    /// that already started running is not interrupted.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> ScheduledTask;
}

/// Cancellable handle to one scheduled task.
///
/// Cancel consumes the handle. Dropping the handle without cancelling
/// leaves the task scheduled.
pub struct ScheduledTask {
    cancel: Box<dyn FnOnce() + Send + Sync>,
}

impl ScheduledTask {
    /// Build a handle around an implementation-specific cancel action.
    pub fn from_cancel_fn<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self { cancel: Box::new(cancel) }
    }

    /// Cancel the task if it has not fired yet.
    pub fn cancel(self) {
        (self.cancel)();
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask").finish_non_exhaustive()
    }
}

/// Scheduler backed by `tokio::spawn` + `tokio::time::sleep`.
///
/// Must be used from within a tokio runtime; cancelling aborts the spawned
/// task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> ScheduledTask {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        ScheduledTask::from_cancel_fn(move || handle.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let _task = TokioScheduler.schedule(
            Duration::from_secs(30),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let task = TokioScheduler.schedule(
            Duration::from_secs(30),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        task.cancel();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
