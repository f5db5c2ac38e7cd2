//! Fetches scoped to a view's lifetime
//!
//! A `ViewTask` owns a spawned task and aborts it when dropped, so a result
//! can never land after the view that asked for it is gone.

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct ViewTask<T> {
    label: &'static str,
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> ViewTask<T> {
    /// Spawn `future` on the runtime, tied to this handle
    pub fn spawn<F>(label: &'static str, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        debug!("View task '{}' started", label);
        Self {
            label,
            handle: Some(tokio::spawn(future)),
        }
    }

    /// Abort the task if it is still running
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!("View task '{}' cancelled", self.label);
            }
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the result; `None` if the task was cancelled or panicked
    pub async fn join(mut self) -> Option<T> {
        let handle = self.handle.take()?;
        handle.await.ok()
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
