// src/controller/debounce.rs
//! Trailing-edge debounce for bursty event sources.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

type Handler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Builds [`Debounced`] triggers.
pub struct Debouncer;

impl Debouncer {
    /// Wraps `handler` so that a burst of calls runs it once, `quiet` after
    /// the last call of the burst.
    pub fn new<F>(quiet: Duration, handler: F) -> Debounced
    where
        F: Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Debounced {
            quiet,
            handler: Arc::new(handler),
            pending: Mutex::new(None),
        }
    }
}

/// A debounced trigger. Must be called from within a tokio runtime.
pub struct Debounced {
    quiet: Duration,
    handler: Handler,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debounced {
    /// Restarts the quiet period. Any evaluation still waiting is dropped.
    pub fn call(&self) {
        let handler = Arc::clone(&self.handler);
        let quiet = self.quiet;
        let mut pending = self.pending.lock();
        if let Some(timer) = pending.take() {
            timer.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // Detached so a later call cannot abort a handler already running.
            tokio::spawn(handler());
        }));
    }

    /// Drops the waiting evaluation, if any. Handlers already running finish.
    pub fn cancel(&self) {
        if let Some(timer) = self.pending.lock().take() {
            timer.abort();
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

impl Drop for Debounced {
    fn drop(&mut self) {
        self.cancel();
    }
}
