//! Owned handle to a spawned session task.

use tokio::task::{JoinError, JoinHandle};

/// A spawned task that is aborted when its handle is dropped.
///
/// Owners release the task's timers by dropping the handle, whatever state
/// the task is in.
#[derive(Debug)]
pub struct ScheduledTask<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> ScheduledTask<T> {
    /// Spawns `future` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, like `tokio::spawn`.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the task's result.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] if the task panicked or was aborted.
    pub async fn join(mut self) -> Result<T, JoinError> {
        // Aborting a finished task in Drop is a no-op.
        (&mut self.handle).await
    }
}

impl<T> Drop for ScheduledTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
