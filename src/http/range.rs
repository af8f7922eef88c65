//! HTTP Range request handling
//!
//! Resolves the Range header against a known file size into the concrete
//! byte interval to serve. Only single ranges are honored.

/// Inclusive byte interval within a file
///
/// Resolved against a concrete file size; holds `start <= end < size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position
    pub start: u64,
    /// Last byte position, inclusive
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes the range covers (the Content-Length of a 206)
    #[must_use]
    pub const fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Outcome of resolving the Range header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header; serve the whole file with 200
    Whole,
    /// A single satisfiable range; serve 206
    Partial(ByteRange),
    /// Malformed, multi-range, or out of bounds; respond 416
    Unsatisfiable,
}

/// Resolve a Range header value against the file size
///
/// Supported forms:
/// - `bytes=start-end` - Specific range
/// - `bytes=start-` - From start to end of file
/// - `bytes=-suffix` - Last suffix bytes
///
/// One unparseable bound falls back to the form implied by the other
/// (`abc-100` behaves as `-100`, `100-abc` as `100-`). Multi-range requests,
/// inverted pairs, and ranges that do not fit inside the file are
/// unsatisfiable, as is any range against an empty file.
///
/// # Examples
/// ```
/// use staticd::http::range::{resolve_range, ByteRange, RangeOutcome};
///
/// assert_eq!(
///     resolve_range(Some("bytes=0-99"), 500),
///     RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
/// );
/// assert_eq!(resolve_range(None, 500), RangeOutcome::Whole);
/// ```
pub fn resolve_range(header: Option<&str>, size: u64) -> RangeOutcome {
    let Some(value) = header else {
        return RangeOutcome::Whole;
    };

    // "bytes=0-99" -> "0-99"; a missing unit prefix is tolerated
    let spec = value.split_once('=').map_or(value, |(_, rest)| rest);

    // Only single ranges are honored
    if spec.contains(',') {
        return RangeOutcome::Unsatisfiable;
    }

    let parts: Vec<&str> = spec.split('-').collect();
    if parts.len() != 2 {
        return RangeOutcome::Unsatisfiable;
    }

    // No byte of an empty file is addressable
    if size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    let start = parts[0].trim().parse::<u64>().ok();
    let end = parts[1].trim().parse::<u64>().ok();

    let (start, end) = match (start, end) {
        // "-suffix": the last `suffix` bytes
        (None, Some(suffix)) => (size.saturating_sub(suffix), size - 1),
        // "start-": through the end of the file
        (Some(start), None) => (start, size - 1),
        (Some(start), Some(end)) => (start, end),
        (None, None) => return RangeOutcome::Unsatisfiable,
    };

    if start > end || end >= size {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Partial(ByteRange { start, end })
}
