//! Path resolution module
//!
//! Maps a raw request path to a filesystem target under the configured
//! document root.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::logger;

const INDEX_FILE: &str = "index.html";

/// Outcome of resolving a request path against the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Directory requested without a trailing slash; the client should
    /// retry at `location`
    Redirect { location: String },
    /// Nothing servable behind the path, or a filesystem error along the way
    NotFound,
    /// A regular file to serve
    File { path: PathBuf },
}

/// Resolve a raw (still percent-encoded) request path to a target under `root`
///
/// `..` and `.` segments are collapsed before the path is joined, then the
/// joined path is canonicalized and prefix-checked against the canonical
/// root, so no request can escape the root through traversal or symlinks.
/// Every filesystem error collapses to `NotFound`; the client never sees a
/// 5xx for one.
pub async fn resolve(root: &Path, raw_path: &str) -> ResolvedTarget {
    let Ok(decoded) = percent_decode_str(raw_path).decode_utf8() else {
        return ResolvedTarget::NotFound;
    };
    let had_trailing_slash = decoded.ends_with('/');

    let clean = normalize(&decoded);
    let candidate = root.join(&clean);

    let Ok(root_canonical) = fs::canonicalize(root).await else {
        logger::log_warning(&format!(
            "Document root not accessible: {}",
            root.display()
        ));
        return ResolvedTarget::NotFound;
    };

    // Missing files are common (404), no need to log them
    let Ok(canonical) = fs::canonicalize(&candidate).await else {
        return ResolvedTarget::NotFound;
    };
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {raw_path} -> {}",
            canonical.display()
        ));
        return ResolvedTarget::NotFound;
    }

    let Ok(meta) = fs::metadata(&canonical).await else {
        return ResolvedTarget::NotFound;
    };

    if meta.is_dir() {
        if !had_trailing_slash {
            return ResolvedTarget::Redirect {
                location: redirect_location(&clean),
            };
        }
        let index = canonical.join(INDEX_FILE);
        return match fs::metadata(&index).await {
            Ok(m) if m.is_file() => ResolvedTarget::File { path: index },
            _ => ResolvedTarget::NotFound,
        };
    }
    if meta.is_file() {
        return ResolvedTarget::File { path: canonical };
    }
    ResolvedTarget::NotFound
}

/// Collapse `.`, `..`, and doubled separators into a clean relative path
fn normalize(decoded: &str) -> PathBuf {
    let mut clean = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::ParentDir => {
                clean.pop();
            }
            _ => {}
        }
    }
    clean
}

/// Build the redirect target from the request-side path, never the
/// filesystem path
fn redirect_location(clean: &Path) -> String {
    let joined = clean
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    format!("/{joined}/")
}
