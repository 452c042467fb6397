// Server module entry point
// Listener construction, accept loop, connection serving and signals

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), use server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::bind_listener;
pub use server_loop::run_until_shutdown;

use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::http::HeaderPreset;
use crate::logger;
use signal::SignalHandler;

/// Entry point shared by the preset binaries.
///
/// Loads configuration, builds a current-thread runtime and serves until
/// interrupted. Every failure path reports to the operator before returning,
/// so callers only translate `Err` into a non-zero exit.
pub fn start(preset: HeaderPreset) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match Config::load_from("viewserve") {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_error(&format!("Failed to load configuration: {e}"));
            return Err(e.into());
        }
    };

    // One request at a time: a current-thread runtime and an accept loop
    // that serves each connection inline
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            logger::log_error(&format!("Failed to start runtime: {e}"));
            return Err(e.into());
        }
    };

    runtime.block_on(serve(cfg, preset))
}

async fn serve(cfg: Config, preset: HeaderPreset) -> Result<(), Box<dyn std::error::Error>> {
    let addr = match cfg.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            logger::log_error(&e);
            return Err(e.into());
        }
    };

    let root = match cfg.resolved_root() {
        Ok(root) => root,
        Err(e) => {
            logger::log_error(&format!(
                "Cannot resolve serving root '{}': {e}",
                cfg.serving.root
            ));
            return Err(e.into());
        }
    };

    let listener = match listener::bind_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(cfg, root.clone(), preset));
    let signals = Arc::new(SignalHandler::new());
    signal::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &root, preset.name);

    run_until_shutdown(listener, state, signals).await;
    logger::log_shutdown();
    Ok(())
}
