// Configuration module entry point
// Layers code defaults, an optional config file and environment overrides

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig, ServingConfig};

impl Config {
    /// Load configuration from the specified file path (without extension)
    ///
    /// The defaults reproduce the original viewer scripts: port 8000, all
    /// interfaces, serve the current directory, log every request.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("VIEWSERVE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("serving.root", ".")?
            .set_default("serving.directory_listing", true)?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve the serving root once at startup
    ///
    /// Request paths are resolved against the returned directory; the
    /// process working directory is never consulted after this point.
    pub fn resolved_root(&self) -> std::io::Result<PathBuf> {
        std::fs::canonicalize(&self.serving.root)
    }
}
