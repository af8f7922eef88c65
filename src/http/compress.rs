//! Transit compression
//!
//! Negotiates a content encoding from the compressible-extension set and the
//! client's Accept-Encoding header, and encodes payloads with flate2.

use std::io::Write;

use flate2::write::{DeflateEncoder, GzEncoder};
use flate2::Compression;

use crate::config::CompressConfig;

/// Negotiated transit encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
    Deflate,
}

impl Encoding {
    /// Value advertised in the Content-Encoding header
    #[must_use]
    pub const fn header_value(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Deflate => "deflate",
        }
    }
}

/// Pick an encoding for a file extension and the client's Accept-Encoding
///
/// Only extensions in the configured compressible set are eligible; gzip
/// wins over deflate when the client advertises both.
pub fn negotiate(
    extension: Option<&str>,
    accept_encoding: Option<&str>,
    config: &CompressConfig,
) -> Option<Encoding> {
    let ext = extension?;
    if !config
        .extensions
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    {
        return None;
    }

    let accepted = accept_encoding?;
    if accepted.contains("gzip") {
        Some(Encoding::Gzip)
    } else if accepted.contains("deflate") {
        Some(Encoding::Deflate)
    } else {
        None
    }
}

/// Encode `data` with the negotiated encoding
pub fn encode(data: &[u8], encoding: Encoding) -> std::io::Result<Vec<u8>> {
    match encoding {
        Encoding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()
        }
        Encoding::Deflate => {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::{DeflateDecoder, GzDecoder};
    use std::io::Read;

    fn compress_config() -> CompressConfig {
        CompressConfig {
            extensions: vec!["css".to_string(), "html".to_string(), "js".to_string()],
        }
    }

    #[test]
    fn test_negotiate_prefers_gzip() {
        let config = compress_config();
        assert_eq!(
            negotiate(Some("css"), Some("gzip, deflate, br"), &config),
            Some(Encoding::Gzip)
        );
        assert_eq!(
            negotiate(Some("css"), Some("deflate"), &config),
            Some(Encoding::Deflate)
        );
    }

    #[test]
    fn test_negotiate_skips_binary_types() {
        let config = compress_config();
        assert_eq!(negotiate(Some("png"), Some("gzip"), &config), None);
        assert_eq!(negotiate(Some("mp4"), Some("gzip, deflate"), &config), None);
        assert_eq!(negotiate(None, Some("gzip"), &config), None);
    }

    #[test]
    fn test_negotiate_requires_client_support() {
        let config = compress_config();
        assert_eq!(negotiate(Some("css"), None, &config), None);
        assert_eq!(negotiate(Some("css"), Some("br"), &config), None);
    }

    #[test]
    fn test_gzip_round_trip() {
        let original = b"body { color: #333; } /* a stylesheet, repeated enough to shrink */"
            .repeat(16);
        let encoded = encode(&original, Encoding::Gzip).unwrap();
        assert!(encoded.len() < original.len());

        let mut decoded = Vec::new();
        GzDecoder::new(encoded.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_deflate_round_trip() {
        let original = b"<html><body>hello</body></html>".repeat(16);
        let encoded = encode(&original, Encoding::Deflate).unwrap();

        let mut decoded = Vec::new();
        DeflateDecoder::new(encoded.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, original);
    }
}
