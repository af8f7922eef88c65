//! HTTP response building module
//!
//! One builder per status the server produces; build failures degrade to an
//! empty response and an error log line instead of tearing down the request.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http::cache::CachePolicy;

/// Headers stamped onto the 200/206 responses that carry a file payload
#[derive(Debug)]
pub struct FileResponseHeaders<'a> {
    pub content_type: &'static str,
    pub last_modified: &'a str,
    pub cache_policy: Option<&'a CachePolicy>,
    /// Set when the payload was compressed in transit
    pub content_encoding: Option<&'static str>,
}

/// Build 404 Not Found response
pub fn build_not_found_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 301 redirect response
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Redirecting...")))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::from("Redirecting...")))
        })
}

/// Build 304 Not Modified response
///
/// No body and no Content-Type; `Last-Modified` is still emitted, and the
/// cache policy headers ride along when the file's type is long-lived.
pub fn build_not_modified_response(
    last_modified: &str,
    cache_policy: Option<&CachePolicy>,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(304)
        .header("Last-Modified", last_modified);
    if let Some(policy) = cache_policy {
        builder = builder
            .header("Expires", policy.expires.as_str())
            .header("Cache-Control", policy.cache_control.as_str());
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("304", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 416 Range Not Satisfiable response (no body)
pub fn build_range_not_satisfiable_response(file_size: u64) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Accept-Range", "bytes")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying the whole file
pub fn build_file_response(
    body: Bytes,
    headers: &FileResponseHeaders<'_>,
) -> Response<Full<Bytes>> {
    apply_file_headers(Response::builder().status(200), &body, headers)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 206 Partial Content response for a resolved byte range
pub fn build_partial_response(
    body: Bytes,
    headers: &FileResponseHeaders<'_>,
    start: u64,
    end: u64,
    total_size: u64,
) -> Response<Full<Bytes>> {
    apply_file_headers(Response::builder().status(206), &body, headers)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Headers common to every response that serves a file payload
///
/// Content-Length reflects the body as sent, the encoded length when the
/// payload was compressed.
fn apply_file_headers(
    builder: hyper::http::response::Builder,
    body: &Bytes,
    headers: &FileResponseHeaders<'_>,
) -> hyper::http::response::Builder {
    let mut builder = builder
        .header("Content-Type", headers.content_type)
        .header("Content-Length", body.len())
        .header("Accept-Range", "bytes")
        .header("Last-Modified", headers.last_modified);
    if let Some(policy) = headers.cache_policy {
        builder = builder
            .header("Expires", policy.expires.as_str())
            .header("Cache-Control", policy.cache_control.as_str());
    }
    if let Some(encoding) = headers.content_encoding {
        builder = builder.header("Content-Encoding", encoding);
    }
    builder
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
