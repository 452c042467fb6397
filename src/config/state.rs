// Application state module
// Everything a request handler needs, fixed at process start

use std::path::PathBuf;

use super::types::Config;
use crate::http::HeaderPreset;

/// Application state
///
/// No locks, no runtime mutation: the serving root, the preset and the
/// configuration are all established once at startup.
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root; resolved request paths never escape it
    pub root: PathBuf,
    pub preset: HeaderPreset,
}

impl AppState {
    pub const fn new(config: Config, root: PathBuf, preset: HeaderPreset) -> Self {
        Self {
            config,
            root,
            preset,
        }
    }

    /// Access log format: explicit configuration wins, then the preset default
    pub fn log_format(&self) -> &str {
        self.config
            .logging
            .format
            .as_deref()
            .unwrap_or(self.preset.default_log_format)
    }
}
