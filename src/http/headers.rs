//! Injected header presets
//!
//! The customization point of the whole server: a preset is a fixed set of
//! header pairs appended to every response plus a policy for the `OPTIONS`
//! method. Presets are plain values handed to the server at construction
//! time; nothing about them can change at runtime.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

/// How the server answers `OPTIONS` requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsPolicy {
    /// Reply 200 with an empty body (plus the injected headers)
    EmptyOk,
    /// Treat like any other unsupported method (405)
    MethodNotAllowed,
}

/// A named set of response headers injected on every response
#[derive(Debug, Clone, Copy)]
pub struct HeaderPreset {
    /// Short name shown in the startup banner
    pub name: &'static str,
    /// Header pairs appended to every response, any status, any method.
    /// Names must be lowercase so they can be built with `from_static`.
    pub extra_headers: &'static [(&'static str, &'static str)],
    /// `OPTIONS` handling
    pub options_policy: OptionsPolicy,
    /// Access log format used when the configuration does not pick one
    pub default_log_format: &'static str,
}

impl HeaderPreset {
    /// Preset for viewers that load assets cross-origin
    pub const fn cors() -> Self {
        Self {
            name: "cors",
            extra_headers: &[
                ("access-control-allow-origin", "*"),
                ("access-control-allow-methods", "GET, POST, OPTIONS"),
                ("access-control-allow-headers", "Content-Type"),
            ],
            options_policy: OptionsPolicy::EmptyOk,
            default_log_format: "common",
        }
    }

    /// Preset for viewers under active edit, where stale assets are worse
    /// than the extra disk reads
    pub const fn no_cache() -> Self {
        Self {
            name: "no-cache",
            extra_headers: &[
                ("cache-control", "no-cache, no-store, must-revalidate"),
                ("pragma", "no-cache"),
                ("expires", "0"),
            ],
            options_policy: OptionsPolicy::MethodNotAllowed,
            default_log_format: "bracket",
        }
    }

    /// Append the preset's header pairs to an already-built response
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in self.extra_headers {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_preset_headers() {
        let preset = HeaderPreset::cors();
        let mut headers = HeaderMap::new();
        preset.apply(&mut headers);

        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(
            headers.get("access-control-allow-methods").unwrap(),
            "GET, POST, OPTIONS"
        );
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap(),
            "Content-Type"
        );
        assert_eq!(preset.options_policy, OptionsPolicy::EmptyOk);
    }

    #[test]
    fn test_no_cache_preset_headers() {
        let preset = HeaderPreset::no_cache();
        let mut headers = HeaderMap::new();
        preset.apply(&mut headers);

        assert_eq!(
            headers.get("cache-control").unwrap(),
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(headers.get("pragma").unwrap(), "no-cache");
        assert_eq!(headers.get("expires").unwrap(), "0");
        assert_eq!(preset.options_policy, OptionsPolicy::MethodNotAllowed);
    }

    #[test]
    fn test_apply_preserves_existing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("text/html"),
        );
        HeaderPreset::no_cache().apply(&mut headers);

        assert_eq!(headers.get("content-type").unwrap(), "text/html");
        assert_eq!(headers.get("pragma").unwrap(), "no-cache");
    }
}
