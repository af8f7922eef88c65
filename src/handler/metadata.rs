//! File metadata inspection
//!
//! Size, modification time, and content type for a resolved file, read
//! fresh for every request so the response always reflects the current
//! filesystem state.

use std::path::Path;

use tokio::fs;

use crate::http::{cache, mime};

/// Metadata for a single response; never cached across requests
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    /// HTTP-date of the filesystem mtime; also the value the client's
    /// `If-Modified-Since` is compared against, byte for byte
    pub last_modified: String,
    pub content_type: &'static str,
    /// Lowercased file extension; drives the cache and compression policies
    pub extension: Option<String>,
}

/// Inspect `path`, or `None` if it vanished since resolution
///
/// The resolution-to-inspection race is tolerated, not retried: a file that
/// disappeared in between reads as missing.
pub async fn inspect(path: &Path) -> Option<FileMetadata> {
    let meta = fs::metadata(path).await.ok()?;
    if !meta.is_file() {
        return None;
    }
    let modified = meta.modified().ok()?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    Some(FileMetadata {
        size: meta.len(),
        last_modified: cache::http_date(modified),
        content_type: mime::content_type(extension.as_deref()),
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_inspect_regular_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("style.CSS");
        std_fs::write(&path, b"body {}").unwrap();

        let meta = inspect(&path).await.expect("file exists");
        assert_eq!(meta.size, 7);
        assert_eq!(meta.extension.as_deref(), Some("css"));
        assert_eq!(meta.content_type, "text/css");
        assert!(meta.last_modified.ends_with("GMT"));
    }

    #[tokio::test]
    async fn test_inspect_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.weird");
        std_fs::write(&path, b"\x00\x01").unwrap();

        let meta = inspect(&path).await.unwrap();
        assert_eq!(meta.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_inspect_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(inspect(&dir.path().join("gone.txt")).await.is_none());
    }

    #[tokio::test]
    async fn test_inspect_directory_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(inspect(dir.path()).await.is_none());
    }
}
