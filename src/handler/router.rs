//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: validates the method, hands the
//! path to the static file resolver, then appends the preset headers so they
//! reach every response regardless of status.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, OptionsPolicy};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context handed to the static file resolver
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) URI path
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let version = req.version();
    let is_head = method == Method::HEAD;

    let ctx = RequestContext {
        path: &path,
        is_head,
    };

    let mut response = match check_http_method(&method, state.preset.options_policy) {
        Some(resp) => resp,
        None => static_files::serve(&ctx, &state).await,
    };

    // Preset headers land on every response: any status, any method
    state.preset.apply(response.headers_mut());

    if state.config.logging.access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.to_string(), method.to_string(), path.clone());
        entry.http_version = version_label(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        logger::log_access(&entry, state.log_format());
    }

    Ok(response)
}

/// Check HTTP method; `None` means "proceed to file serving"
fn check_http_method(
    method: &Method,
    options_policy: OptionsPolicy,
) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => match options_policy {
            OptionsPolicy::EmptyOk => Some(http::build_options_ok_response()),
            OptionsPolicy::MethodNotAllowed => Some(http::build_405_response()),
        },
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_head_pass_through() {
        assert!(check_http_method(&Method::GET, OptionsPolicy::EmptyOk).is_none());
        assert!(check_http_method(&Method::HEAD, OptionsPolicy::MethodNotAllowed).is_none());
    }

    #[test]
    fn test_options_policy_empty_ok() {
        let resp = check_http_method(&Method::OPTIONS, OptionsPolicy::EmptyOk).unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_options_policy_rejected() {
        let resp = check_http_method(&Method::OPTIONS, OptionsPolicy::MethodNotAllowed).unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[test]
    fn test_post_is_rejected() {
        let resp = check_http_method(&Method::POST, OptionsPolicy::EmptyOk).unwrap();
        assert_eq!(resp.status(), 405);
    }
}
