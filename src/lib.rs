//! viewserve - local static-file server presets for browser viewer apps
//!
//! One server, two operator-facing presets: a CORS-enabling variant for
//! viewers that fetch local assets cross-origin, and a cache-disabling
//! variant for viewers under active edit. Each preset is a thin binary over
//! the shared server in this crate.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
