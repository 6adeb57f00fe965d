//! Debounced scheduling for watch mode.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Schedules at most one pending run.
///
/// Every trigger cancels the previously scheduled task and schedules a
/// fresh one after the configured delay, so rapid query changes collapse
/// into a single appraisal of the latest query.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Cancel any pending run and schedule `task` after the delay.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Abort the pending run, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Let the pending run complete instead of cancelling it. Used on
    /// shutdown so the final scheduled appraisal still fires.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
