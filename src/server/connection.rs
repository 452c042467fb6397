// Connection handling module
// Serves one connection to completion, inline on the accept loop

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a single connection.
///
/// The caller awaits this directly: one exchange is in flight at a time and
/// a slow client holds the loop. Keep-alive follows the HTTP version, so the
/// connection is held until the client closes it or shutdown is requested.
pub async fn serve(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    shutdown: &Arc<Notify>,
) {
    let io = TokioIo::new(stream);
    let service_state = Arc::clone(state);

    let conn = http1::Builder::new().keep_alive(true).serve_connection(
        io,
        service_fn(move |req| {
            let state = Arc::clone(&service_state);
            async move { handler::handle_request(req, state, peer_addr).await }
        }),
    );

    tokio::select! {
        result = conn => {
            if let Err(err) = result {
                logger::log_connection_error(&err);
            }
        }
        // Interrupt arrived mid-connection: drop it so the loop can exit
        _ = shutdown.notified() => {}
    }
}
