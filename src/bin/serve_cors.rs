//! CORS-enabling static file server
//!
//! Serves the configured root (current directory by default) on port 8000
//! with `Access-Control-Allow-*` headers on every response, so a viewer
//! loaded from disk or another origin can fetch local assets. `OPTIONS`
//! preflights get an empty 200.

use viewserve::http::HeaderPreset;
use viewserve::server;

fn main() {
    // Failures are reported inside start(); only the exit code is left
    if server::start(HeaderPreset::cors()).is_err() {
        std::process::exit(1);
    }
}
