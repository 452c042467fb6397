// Accept loop module
// Synchronous accept-serve cycle: one connection at a time until shutdown

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;
use crate::server::connection;
use crate::server::signal::SignalHandler;

/// Accept and serve connections until shutdown is requested.
///
/// Each accepted connection is served to completion before the next accept;
/// there is no concurrency between exchanges. The shutdown notification
/// interrupts both the accept wait and an in-flight connection.
pub async fn run_until_shutdown(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) {
    loop {
        // Catches a shutdown that fired while a connection was being served
        if signals.is_shutdown_requested() {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::serve(stream, peer_addr, &state, &signals.shutdown).await;
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = signals.shutdown.notified() => {
                break;
            }
        }
    }
}
