//! # Task
//!
//! Cancellable unit of asynchronous work. A task spawns its future onto the
//! tokio runtime as soon as it is created and pairs it with a
//! [`CancellationToken`]; once the token is cancelled the spawned future is
//! dropped and the task resolves to [`Error::Cancelled`].

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Error, Result};

/// Shared cancellation flag. Clones observe the same state.
#[derive(Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state: Arc::new(state) }
    }

    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once the token has been cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // the sender lives as long as `self`, so this only returns on cancel
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken").field("cancelled", &self.is_cancelled()).finish()
    }
}

/// A spawned future that can be cancelled before it completes. Dropping the
/// task aborts the future.
pub struct Task<T> {
    label: String,
    handle: JoinHandle<Option<T>>,
    token: CancellationToken,
}

impl<T: Send + 'static> Task<T> {
    /// Spawn `future` on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(
        label: impl Into<String>, future: impl Future<Output = T> + Send + 'static,
    ) -> Self {
        let token = CancellationToken::new();
        let guard = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = guard.cancelled() => None,
                value = future => Some(value),
            }
        });
        Self { label: label.into(), handle, token }
    }
}

impl<T> Task<T> {
    /// Handle used to cancel the task from elsewhere.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The spawned future has resolved or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the spawned future.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] when the token is cancelled before the
    /// result is taken, even if the future had already resolved, and
    /// [`Error::Internal`] when the future panicked.
    pub async fn run(mut self) -> Result<T> {
        let output = (&mut self.handle)
            .await
            .map_err(|err| Error::Internal(format!("task {} failed: {err}", self.label)))?;

        match output {
            Some(value) if !self.token.is_cancelled() => Ok(value),
            Some(_) => {
                debug!(task = %self.label, "discarding result of cancelled task");
                Err(Error::Cancelled(self.label.clone()))
            }
            None => {
                debug!(task = %self.label, "task cancelled");
                Err(Error::Cancelled(self.label.clone()))
            }
        }
    }
}

impl<T> Drop for Task<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl<T> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("label", &self.label).field("token", &self.token).finish()
    }
}
