//! # Trace parent codec
//!
//! RocketMQ messages carry the identity of the producing span in a single
//! property, using the W3C `traceparent` layout:
//!
//! ```text
//! 00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01
//! ^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^ ^^
//! |  trace-id                         span-id          trace-flags
//! version
//! ```
//!
//! Every field has a fixed width and every delimiter a fixed offset. Versions
//! other than `00` may be followed by `-` and vendor specific data, which is
//! ignored.
//!
//! Neither direction ever fails loudly: [`encode`] returns an empty string for
//! an invalid context and [`decode`] returns [`SpanContext::empty_context`]
//! for anything it cannot read. A missing or broken trace parent must never
//! abort the send or receive it is attached to.
use opentelemetry::otel_debug;
use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};
use std::collections::HashSet;
use std::sync::OnceLock;

const VERSION: &str = "00";
const VERSION_00: &str = "00";
const VERSION_SIZE: usize = 2;
const TRACE_PARENT_DELIMITER: u8 = b'-';
const TRACE_PARENT_DELIMITER_SIZE: usize = 1;
const TRACE_ID_HEX_SIZE: usize = 2 * 16;
const SPAN_ID_HEX_SIZE: usize = 2 * 8;
const TRACE_FLAGS_HEX_SIZE: usize = 2;
const TRACE_ID_OFFSET: usize = VERSION_SIZE + TRACE_PARENT_DELIMITER_SIZE;
const SPAN_ID_OFFSET: usize = TRACE_ID_OFFSET + TRACE_ID_HEX_SIZE + TRACE_PARENT_DELIMITER_SIZE;
const TRACE_FLAGS_OFFSET: usize =
    SPAN_ID_OFFSET + SPAN_ID_HEX_SIZE + TRACE_PARENT_DELIMITER_SIZE;

/// Length of a version `00` trace parent.
pub const TRACE_PARENT_HEADER_SIZE: usize = TRACE_FLAGS_OFFSET + TRACE_FLAGS_HEX_SIZE;

// TODO Replace this with LazyLock once the MSRV reaches 1.80.
static VALID_VERSIONS: OnceLock<HashSet<String>> = OnceLock::new();

/// Versions `00` through `fe`. `ff` is reserved and never valid.
fn valid_versions() -> &'static HashSet<String> {
    VALID_VERSIONS.get_or_init(|| {
        (0..u8::MAX)
            .map(|version| format!("{version:02x}"))
            .collect()
    })
}

fn is_lower_hex(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
}

/// Serializes `span_context` into a version `00` trace parent.
///
/// Returns an empty string when the context is not valid, which callers
/// should treat as "do not set the property".
///
/// # Examples
///
/// ```
/// use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};
/// use opentelemetry_rocketmq::trace::encode;
///
/// let span_context = SpanContext::new(
///     TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
///     SpanId::from_hex("00f067aa0ba902b7").unwrap(),
///     TraceFlags::SAMPLED,
///     false,
///     TraceState::default(),
/// );
///
/// assert_eq!(
///     encode(&span_context),
///     "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
/// );
/// assert_eq!(encode(&SpanContext::empty_context()), "");
/// ```
pub fn encode(span_context: &SpanContext) -> String {
    if !span_context.is_valid() {
        return String::new();
    }

    let delimiter = char::from(TRACE_PARENT_DELIMITER);
    let header = format!(
        "{VERSION}{delimiter}{}{delimiter}{}{delimiter}{:02x}",
        span_context.trace_id(),
        span_context.span_id(),
        span_context.trace_flags(),
    );
    debug_assert_eq!(header.len(), TRACE_PARENT_HEADER_SIZE);
    header
}

/// Reads a trace parent back into a remote [`SpanContext`].
///
/// `None`, and any value that does not follow the layout, yields
/// [`SpanContext::empty_context`]. A well formed value with all-zero ids
/// yields a remote context that is not valid. The trace state of a decoded
/// context is always empty.
///
/// # Examples
///
/// ```
/// use opentelemetry::trace::SpanContext;
/// use opentelemetry_rocketmq::trace::decode;
///
/// let span_context = decode(Some("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"));
/// assert!(span_context.is_valid());
/// assert!(span_context.is_remote());
/// assert!(span_context.is_sampled());
///
/// assert_eq!(decode(Some("ff-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01")), SpanContext::empty_context());
/// assert_eq!(decode(None), SpanContext::empty_context());
/// ```
pub fn decode(trace_parent: Option<&str>) -> SpanContext {
    let Some(trace_parent) = trace_parent else {
        return SpanContext::empty_context();
    };

    match extract_span_context(trace_parent) {
        Ok(span_context) => span_context,
        Err(reason) => {
            otel_debug!(name: "TraceParent.DecodeFailed", reason = reason);
            SpanContext::empty_context()
        }
    }
}

fn extract_span_context(trace_parent: &str) -> Result<SpanContext, &'static str> {
    let bytes = trace_parent.as_bytes();
    let has_valid_length = bytes.len() == TRACE_PARENT_HEADER_SIZE
        || (bytes.len() > TRACE_PARENT_HEADER_SIZE
            && bytes[TRACE_PARENT_HEADER_SIZE] == TRACE_PARENT_DELIMITER);
    if !has_valid_length {
        return Err("invalid length");
    }

    if bytes[TRACE_ID_OFFSET - 1] != TRACE_PARENT_DELIMITER
        || bytes[SPAN_ID_OFFSET - 1] != TRACE_PARENT_DELIMITER
        || bytes[TRACE_FLAGS_OFFSET - 1] != TRACE_PARENT_DELIMITER
    {
        return Err("misplaced delimiter");
    }

    // Every slice boundary below sits next to an ASCII delimiter, so slicing
    // the str cannot split a character.
    let version = &trace_parent[..VERSION_SIZE];
    if !valid_versions().contains(version) {
        return Err("unsupported version");
    }
    if version == VERSION_00 && bytes.len() > TRACE_PARENT_HEADER_SIZE {
        return Err("trailing data on version 00");
    }

    let trace_id_hex = &trace_parent[TRACE_ID_OFFSET..TRACE_ID_OFFSET + TRACE_ID_HEX_SIZE];
    let span_id_hex = &trace_parent[SPAN_ID_OFFSET..SPAN_ID_OFFSET + SPAN_ID_HEX_SIZE];
    let trace_flags_hex =
        &trace_parent[TRACE_FLAGS_OFFSET..TRACE_FLAGS_OFFSET + TRACE_FLAGS_HEX_SIZE];

    if !is_lower_hex(trace_flags_hex.as_bytes()) {
        return Err("invalid trace flags");
    }
    if !is_lower_hex(trace_id_hex.as_bytes()) || !is_lower_hex(span_id_hex.as_bytes()) {
        return Err("invalid id");
    }

    let trace_flags = u8::from_str_radix(trace_flags_hex, 16)
        .map(TraceFlags::new)
        .map_err(|_| "invalid trace flags")?;
    let trace_id = TraceId::from_hex(trace_id_hex).map_err(|_| "invalid trace id")?;
    let span_id = SpanId::from_hex(span_id_hex).map_err(|_| "invalid span id")?;

    // Either id being unset invalidates both.
    let (trace_id, span_id) = if trace_id == TraceId::INVALID || span_id == SpanId::INVALID {
        (TraceId::INVALID, SpanId::INVALID)
    } else {
        (trace_id, span_id)
    };

    Ok(SpanContext::new(
        trace_id,
        span_id,
        trace_flags,
        true,
        TraceState::default(),
    ))
}
