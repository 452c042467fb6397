//! Request handler module
//!
//! Method gating, path resolution against the serving root, and the header
//! injection that distinguishes the two presets.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
