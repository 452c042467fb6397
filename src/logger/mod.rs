//! Logger module
//!
//! Operator-facing output for the server: startup banner, per-request access
//! lines, warnings and errors. Access lines and the banner go to stdout,
//! everything else to stderr.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

pub fn log_server_start(addr: &SocketAddr, root: &Path, preset_name: &str) {
    println!("======================================");
    println!("Static file server started ({preset_name} preset)");
    println!("Serving {} at http://{addr}/", root.display());
    println!("Open your browser and go to: http://{addr}/index.html");
    println!("Press Ctrl+C to stop the server");
    println!("======================================\n");
}

pub fn log_shutdown() {
    println!("\nServer stopped.");
}

/// Report a listener bind failure, naming the port when another process
/// already holds it
pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    if err.kind() == std::io::ErrorKind::AddrInUse {
        eprintln!("Error: port {} is already in use.", addr.port());
        eprintln!("Please stop any other servers running on this port and try again.");
    } else {
        eprintln!("Error starting server on {addr}: {err}");
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Write one formatted access log line
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}
