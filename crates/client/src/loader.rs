//! # Loader
//!
//! One-shot fetch bound to a view's lifetime. `mount` spawns the request so
//! it runs while the view is on screen, `settle` collects the result and
//! `dispose` cancels it. A disposed loader never yields a value, even when
//! the request had already completed.

use platform::task::{CancellationToken, Task};
use platform::{Error, Result};
use tracing::debug;

pub struct Loader<T> {
    task: Option<Task<Result<T>>>,
    token: CancellationToken,
}

impl<T: Send + 'static> Loader<T> {
    /// Start loading `label` in the background.
    pub fn mount(
        label: impl Into<String>, fetch: impl Future<Output = Result<T>> + Send + 'static,
    ) -> Self {
        let task = Task::spawn(label, fetch);
        let token = task.token();
        debug!(task = %task.label(), "mounted");
        Self { task: Some(task), token }
    }
}

impl<T> Loader<T> {
    /// Handle that disposes the loader from another task.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn dispose(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A fetch is still outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Wait for the fetch. `None` when disposed or already settled.
    ///
    /// # Errors
    ///
    /// Returns the fetch's own error.
    pub async fn settle(&mut self) -> Result<Option<T>> {
        let Some(task) = self.task.take() else {
            return Ok(None);
        };
        match task.run().await {
            Ok(result) => result.map(Some),
            Err(Error::Cancelled(label)) => {
                debug!(task = %label, "disposed before settling");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
