//! Coalesces bursts of focus events into a single delayed scan.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// At most one armed timer exists per trigger; arming again aborts the
/// previous timer outright, so a burst of qualifying events dispatches a
/// single scan once the delay elapses.
#[derive(Debug, Default)]
pub struct DebounceTrigger {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DebounceTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer: after `delay`, `action` runs. Supersedes any timer
    /// armed earlier, whether or not it already fired.
    pub async fn arm<F>(&self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Cancels the pending timer, if any.
    pub async fn cancel(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.abort();
        }
    }
}
