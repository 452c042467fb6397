//! Cache-disabling static file server
//!
//! Serves the configured root (current directory by default) on port 8000
//! with `Cache-Control: no-cache, no-store, must-revalidate`, `Pragma` and
//! `Expires` on every response, so edits to a viewer app show up on plain
//! reload. Requests are logged as `[<client-address>] <message>`.

use viewserve::http::HeaderPreset;
use viewserve::server;

fn main() {
    // Failures are reported inside start(); only the exit code is left
    if server::start(HeaderPreset::no_cache()).is_err() {
        std::process::exit(1);
    }
}
