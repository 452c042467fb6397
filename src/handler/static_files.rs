//! Static file serving module
//!
//! Resolves URL paths against the serving root, with index file support and
//! a generated HTML listing for directories that have none.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Outcome of resolving a request path against the serving root
enum Resolved {
    File(PathBuf),
    /// Directory with no index file; second field is the decoded URL path
    /// shown in the listing heading
    Directory(PathBuf, String),
    /// Directory requested without its trailing slash
    RedirectToSlash,
    NotFound,
}

/// Serve a request path from the configured root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve(state, ctx.path) {
        Resolved::File(file_path) => serve_file(ctx, &file_path).await,
        Resolved::Directory(dir_path, display_path) => {
            serve_listing(ctx, &dir_path, &display_path).await
        }
        Resolved::RedirectToSlash => http::build_redirect_response(&format!("{}/", ctx.path)),
        Resolved::NotFound => http::build_404_response(),
    }
}

/// Map a URL path to a file or directory under the root
///
/// Decodes percent escapes, refuses traversal components, then confirms the
/// canonicalized result is still inside the root. Directories resolve to an
/// index file when one exists.
fn resolve(state: &AppState, raw_path: &str) -> Resolved {
    let Some(decoded) = percent_decode(raw_path) else {
        return Resolved::NotFound;
    };
    if decoded.contains('\0') {
        return Resolved::NotFound;
    }

    let relative = decoded.trim_start_matches('/');
    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        logger::log_warning(&format!("Path traversal attempt blocked: {raw_path}"));
        return Resolved::NotFound;
    }

    let candidate = state.root.join(relative);

    // Missing files are the ordinary 404 case, no logging needed
    let Ok(canonical) = candidate.canonicalize() else {
        return Resolved::NotFound;
    };
    if !canonical.starts_with(&state.root) {
        logger::log_warning(&format!(
            "Path escapes serving root, blocked: {raw_path} -> {}",
            canonical.display()
        ));
        return Resolved::NotFound;
    }

    if canonical.is_dir() {
        if !decoded.ends_with('/') {
            return Resolved::RedirectToSlash;
        }
        for index_file in &state.config.serving.index_files {
            let index_path = canonical.join(index_file);
            if index_path.is_file() {
                return Resolved::File(index_path);
            }
        }
        if state.config.serving.directory_listing {
            return Resolved::Directory(canonical, decoded);
        }
        return Resolved::NotFound;
    }

    if canonical.is_file() {
        Resolved::File(canonical)
    } else {
        Resolved::NotFound
    }
}

/// Read a resolved file and build its response
async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            // Resolved a moment ago; the file vanished or became unreadable
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));
    http::build_file_response(content, content_type, ctx.is_head)
}

/// Generate and serve an HTML directory listing
async fn serve_listing(
    ctx: &RequestContext<'_>,
    dir_path: &Path,
    display_path: &str,
) -> Response<Full<Bytes>> {
    let mut entries = Vec::new();
    let mut read_dir = match fs::read_dir(dir_path).await {
        Ok(rd) => rd,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir_path.display()
            ));
            return http::build_404_response();
        }
    };

    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    http::build_listing_response(render_listing(display_path, &entries), ctx.is_head)
}

/// Render the listing page for a directory
fn render_listing(display_path: &str, entries: &[String]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut items = String::new();
    for name in entries {
        items.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_href(name),
            escape_html(name)
        ));
    }

    format!(
        "<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         </head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n{items}</ul>\n<hr>\n</body>\n</html>\n"
    )
}

/// Decode percent escapes in a URL path
///
/// Returns `None` for malformed escapes or non-UTF-8 results. `+` is left
/// alone; it only means space in query strings.
pub fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Escape text for inclusion in HTML
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Percent-encode a listing entry name for use as an href
fn encode_href(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::http::HeaderPreset;
    use std::fs as std_fs;

    fn test_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("viewserve-static-{}-{tag}", std::process::id()));
        let _ = std_fs::remove_dir_all(&dir);
        std_fs::create_dir_all(dir.join("assets")).unwrap();
        std_fs::write(dir.join("index.html"), "<!doctype html><html></html>").unwrap();
        std_fs::write(dir.join("assets/app.js"), "console.log(1);").unwrap();
        std_fs::write(dir.join("a b.txt"), "spaced").unwrap();
        dir
    }

    fn test_state(root: &Path) -> AppState {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.serving.root = root.to_string_lossy().into_owned();
        let canonical = cfg.resolved_root().unwrap();
        AppState::new(cfg, canonical, HeaderPreset::cors())
    }

    #[test]
    fn test_resolve_existing_file() {
        let root = test_root("file");
        let state = test_state(&root);
        match resolve(&state, "/assets/app.js") {
            Resolved::File(p) => assert!(p.ends_with("assets/app.js")),
            _ => panic!("expected file"),
        }
        let _ = std_fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_root_uses_index() {
        let root = test_root("index");
        let state = test_state(&root);
        match resolve(&state, "/") {
            Resolved::File(p) => assert!(p.ends_with("index.html")),
            _ => panic!("expected index file"),
        }
        let _ = std_fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_directory_without_index_lists() {
        let root = test_root("listing");
        let state = test_state(&root);
        match resolve(&state, "/assets/") {
            Resolved::Directory(_, display) => assert_eq!(display, "/assets/"),
            _ => panic!("expected directory listing"),
        }
        let _ = std_fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_directory_redirects_without_slash() {
        let root = test_root("redirect");
        let state = test_state(&root);
        assert!(matches!(
            resolve(&state, "/assets"),
            Resolved::RedirectToSlash
        ));
        let _ = std_fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_missing_is_not_found() {
        let root = test_root("missing");
        let state = test_state(&root);
        assert!(matches!(
            resolve(&state, "/nope.html"),
            Resolved::NotFound
        ));
        let _ = std_fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_blocks_traversal() {
        let root = test_root("traversal");
        let state = test_state(&root);
        assert!(matches!(
            resolve(&state, "/../secret.txt"),
            Resolved::NotFound
        ));
        assert!(matches!(
            resolve(&state, "/%2e%2e/secret.txt"),
            Resolved::NotFound
        ));
        let _ = std_fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_decodes_spaces() {
        let root = test_root("spaces");
        let state = test_state(&root);
        match resolve(&state, "/a%20b.txt") {
            Resolved::File(p) => assert!(p.ends_with("a b.txt")),
            _ => panic!("expected decoded file"),
        }
        let _ = std_fs::remove_dir_all(&root);
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("/plain").as_deref(), Some("/plain"));
        assert_eq!(percent_decode("/a%20b").as_deref(), Some("/a b"));
        assert_eq!(percent_decode("/a+b").as_deref(), Some("/a+b"));
        assert_eq!(percent_decode("/bad%zz"), None);
        assert_eq!(percent_decode("/trunc%2"), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("a b.txt"), "a%20b.txt");
        assert_eq!(encode_href("sub/"), "sub/");
        assert_eq!(encode_href("100%.md"), "100%25.md");
    }

    #[test]
    fn test_render_listing_contains_entries() {
        let html = render_listing("/assets/", &["app.js".to_string(), "sub/".to_string()]);
        assert!(html.contains("Directory listing for /assets/"));
        assert!(html.contains("<a href=\"app.js\">app.js</a>"));
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
    }
}
