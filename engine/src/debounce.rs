//! Cancellable scheduled recomputation.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancel-and-reschedule timer.
///
/// Each `schedule` aborts any pending task before arming a new one, so
/// only the most recently scheduled run ever fires (last-write-wins, no
/// queuing).
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, canceling any task still pending.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancel the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
