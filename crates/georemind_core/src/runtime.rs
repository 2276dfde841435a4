//! Process-wide execution scope for background work.
//!
//! # Responsibility
//! - Run blocking storage calls off the caller's task.
//! - Launch detached jobs that outlive the screen or call that started them.
//!
//! # Invariants
//! - Jobs launched here are never cancelled by dropping their `JoinHandle`.

use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};

/// Handle to the runtime that owns background persistence and geofence jobs.
#[derive(Debug, Clone)]
pub struct AppScope {
    handle: Handle,
}

impl AppScope {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Captures the runtime the caller is currently running on.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Spawns a detached job.
    ///
    /// Dropping the returned handle detaches the job; awaiting it waits for
    /// completion.
    pub fn launch<F>(&self, job: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(job)
    }

    /// Runs `f` on the blocking pool and waits for its result.
    pub async fn run_blocking<F, T>(&self, f: F) -> Result<T, JoinError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.handle.spawn_blocking(f).await
    }
}
