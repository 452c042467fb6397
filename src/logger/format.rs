//! Access log format module
//!
//! One line per request, in one of three shapes:
//! - `common` (Common Log Format, the base-server default)
//! - `bracket` (`[<client-address>] <message>`, the edit-loop variant)
//! - `json` (structured, one object per line)

use chrono::Local;

/// Access log entry for one request/response exchange
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
}

impl AccessLogEntry {
    /// Create a new access log entry with the current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
        }
    }

    /// Format the entry according to the configured format name
    ///
    /// Unknown names fall back to `common`.
    pub fn format(&self, format: &str) -> String {
        match format {
            "bracket" => self.format_bracket(),
            "json" => self.format_json(),
            _ => self.format_common(),
        }
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// Bracketed client-address format
    /// `[$remote_addr] "$request" $status $body_bytes_sent`
    fn format_bracket(&self) -> String {
        format!(
            "[{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr, self.method, self.path, self.http_version, self.status, self.body_bytes,
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
        })
        .to_string()
    }
}
