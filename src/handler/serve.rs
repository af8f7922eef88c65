//! Request pipeline
//!
//! Entry point wiring path resolution, metadata inspection, conditional
//! evaluation, range selection, compression, and response building
//! together. Every branch produces a complete, well-formed response and an
//! access log line; no request failure escapes the handler.

use std::convert::Infallible;
use std::io::{self, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::handler::metadata::{self, FileMetadata};
use crate::handler::resolve::{self, ResolvedTarget};
use crate::http::range::{ByteRange, RangeOutcome};
use crate::http::response::FileResponseHeaders;
use crate::http::{self, cache, compress, response};
use crate::logger;
use crate::server::AppState;

/// Per-request view of the headers the pipeline cares about
///
/// The method and body are ignored; every request is answered with GET
/// semantics.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub if_modified_since: Option<String>,
    pub range: Option<String>,
    pub accept_encoding: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let ctx = RequestContext {
        path: req.uri().path(),
        if_modified_since: header_string(&req, "if-modified-since"),
        range: header_string(&req, "range"),
        accept_encoding: header_string(&req, "accept-encoding"),
    };
    Ok(respond(&ctx, &state).await)
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

/// Run the pipeline for one request and log the outcome
pub async fn respond(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let response = match resolve::resolve(&state.root, ctx.path).await {
        ResolvedTarget::Redirect { location } => http::build_redirect_response(&location),
        ResolvedTarget::NotFound => http::build_not_found_response(),
        ResolvedTarget::File { path } => match metadata::inspect(&path).await {
            // The file can vanish between resolution and inspection; the
            // race collapses to 404 like every other filesystem failure.
            None => http::build_not_found_response(),
            Some(meta) => serve_file(ctx, &path, &meta, state).await,
        },
    };

    if state.config.logging.access_log {
        logger::log_response(response.status().as_u16(), ctx.path);
    }
    response
}

/// Serve a resolved file: conditional check, range selection, compression
async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
    meta: &FileMetadata,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let cache_policy = cache::policy_for(meta.extension.as_deref(), &state.config.cache);

    if cache::is_not_modified(ctx.if_modified_since.as_deref(), &meta.last_modified) {
        return http::build_not_modified_response(&meta.last_modified, cache_policy.as_ref());
    }

    let (range, payload) = match http::resolve_range(ctx.range.as_deref(), meta.size) {
        RangeOutcome::Unsatisfiable => {
            return http::build_range_not_satisfiable_response(meta.size);
        }
        RangeOutcome::Whole => match tokio::fs::read(path).await {
            Ok(data) => (None, data),
            Err(_) => return http::build_not_found_response(),
        },
        RangeOutcome::Partial(range) => match read_range(path, range).await {
            Ok(data) => (Some(range), data),
            Err(_) => return http::build_not_found_response(),
        },
    };

    let negotiated = compress::negotiate(
        meta.extension.as_deref(),
        ctx.accept_encoding.as_deref(),
        &state.config.compress,
    );
    let (body, content_encoding) = match negotiated {
        Some(encoding) => match compress::encode(&payload, encoding) {
            Ok(encoded) => (encoded, Some(encoding.header_value())),
            Err(e) => {
                // Fall back to the identity payload rather than failing the request
                logger::log_error(&format!("{} encoding failed: {e}", encoding.header_value()));
                (payload, None)
            }
        },
        None => (payload, None),
    };

    let headers = FileResponseHeaders {
        content_type: meta.content_type,
        last_modified: &meta.last_modified,
        cache_policy: cache_policy.as_ref(),
        content_encoding,
    };
    match range {
        Some(range) => response::build_partial_response(
            Bytes::from(body),
            &headers,
            range.start,
            range.end,
            meta.size,
        ),
        None => response::build_file_response(Bytes::from(body), &headers),
    }
}

/// Read only the requested window of the file
///
/// The handle is scoped to this function, so it is released on every exit
/// path, a mid-read failure included.
async fn read_range(path: &Path, range: ByteRange) -> io::Result<Vec<u8>> {
    let expected = usize::try_from(range.content_length())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "range too large"))?;

    let mut file = File::open(path).await?;
    file.seek(SeekFrom::Start(range.start)).await?;

    let mut buffer = Vec::with_capacity(expected);
    file.take(range.content_length())
        .read_to_end(&mut buffer)
        .await?;

    // The file shrank between inspection and the read; treat it like any
    // other vanished-file race.
    if buffer.len() != expected {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "file truncated during range read",
        ));
    }
    Ok(buffer)
}
