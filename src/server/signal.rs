// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM both stop the server; there is no reload
// signal because configuration is fixed for the process lifetime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Signal handler state
pub struct SignalHandler {
    /// Woken when shutdown is requested
    pub shutdown: Arc<Notify>,
    /// Set before `shutdown` is notified, for waiters that were not parked
    /// at notification time
    shutdown_requested: Arc<AtomicBool>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag shutdown and wake anyone parked on the notification
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown.notify_waiters();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the interrupt listener (Unix)
///
/// Spawns a background task that waits for SIGINT or SIGTERM and requests
/// shutdown on the first one received.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
        handler.request_shutdown();
    });
}

/// Fallback for non-Unix targets - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handler.request_shutdown();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_shutdown_sets_flag() {
        let handler = SignalHandler::new();
        assert!(!handler.is_shutdown_requested());
        handler.request_shutdown();
        assert!(handler.is_shutdown_requested());
    }

    #[tokio::test]
    async fn test_parked_waiter_is_woken() {
        let handler = Arc::new(SignalHandler::new());
        let waiter = Arc::clone(&handler);

        let task = tokio::spawn(async move { waiter.shutdown.notified().await });
        // Let the waiter park before notifying
        tokio::task::yield_now().await;
        handler.request_shutdown();

        task.await.unwrap();
    }
}
