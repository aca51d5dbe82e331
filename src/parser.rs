//! Flow log line parsing.
//!
//! Consumes one UTF-8 text line in the fixed 18-field space-separated VPC
//! flow log layout and produces either a typed [`LogLine`] or a rejection.
//! Any other field ordering is a parser change, not a configuration change.
//!
//! Three non-data cases are handled before field extraction:
//!
//! - Lines containing `VERSION`, `SKIPDATA` or `NODATA` are log-rotation /
//!   no-data markers and are skipped silently
//! - Lines delivered through a forwarding pipeline may arrive wrapped as
//!   `{"message":"<raw line>"}`; the wrapper is stripped, not parsed as JSON
//! - Surrounding whitespace is trimmed
//!
//! Everything else that fails to match the expected shape is a
//! [`MalformedLine`](crate::ExportError::MalformedLine): wrong field count,
//! a numeric field that is not an integer, or an address field that is not
//! dotted-quad IPv4.

use std::net::Ipv4Addr;

use tracing::trace;

use crate::error::{ExportError, Result};
use crate::record::LogLine;

/// Tokens that mark a non-data line anywhere in its text.
const MARKER_TOKENS: [&str; 3] = ["VERSION", "SKIPDATA", "NODATA"];

/// Delivery-pipeline wrapper around the raw log line.
const WRAPPER_PREFIX: &str = "{\"message\":\"";
const WRAPPER_SUFFIX: &str = "\"}";

/// Positional fields in the flow log custom format.
pub const FIELD_COUNT: usize = 18;

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Recognized non-data marker line; skipped without error.
    Marker,
    /// A data line with all 18 fields extracted.
    Record(LogLine),
}

/// Parse one flow log line.
///
/// `line_no` is the 1-based position in the input stream and is carried into
/// the produced [`LogLine`] and into any error.
pub fn parse_line(raw: &str, line_no: u64) -> Result<ParsedLine> {
    if MARKER_TOKENS.iter().any(|token| raw.contains(token)) {
        trace!(line_no, "marker line skipped");
        return Ok(ParsedLine::Marker);
    }

    let line = strip_wrapper(raw.trim());
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != FIELD_COUNT {
        return Err(ExportError::malformed(
            line_no,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    }

    let parsed = LogLine {
        line_no,
        version: parse_int(line_no, "version", fields[0])?,
        account_id: fields[1].to_string(),
        interface_id: fields[2].to_string(),
        src_addr: parse_addr(line_no, "src_addr", fields[3])?,
        dst_addr: parse_addr(line_no, "dst_addr", fields[4])?,
        src_port: parse_int(line_no, "src_port", fields[5])?,
        dst_port: parse_int(line_no, "dst_port", fields[6])?,
        protocol: parse_int(line_no, "protocol", fields[7])?,
        packets: parse_int(line_no, "packets", fields[8])?,
        bytes: parse_int(line_no, "bytes", fields[9])?,
        start: parse_int(line_no, "start", fields[10])?,
        end: parse_int(line_no, "end", fields[11])?,
        action: fields[12].to_string(),
        log_status: fields[13].to_string(),
        tcp_flags: parse_int(line_no, "tcp_flags", fields[14])?,
        pkt_srcaddr: parse_addr(line_no, "pkt_srcaddr", fields[15])?,
        pkt_dstaddr: parse_addr(line_no, "pkt_dstaddr", fields[16])?,
        flow_direction: fields[17].to_string(),
    };

    trace!(
        line_no,
        src = %parsed.pkt_srcaddr,
        dst = %parsed.pkt_dstaddr,
        protocol = parsed.protocol,
        "parsed flow log line"
    );
    Ok(ParsedLine::Record(parsed))
}

/// Strip the forwarding wrapper if present, then trim again.
fn strip_wrapper(line: &str) -> &str {
    line.strip_prefix(WRAPPER_PREFIX)
        .and_then(|rest| rest.strip_suffix(WRAPPER_SUFFIX))
        .unwrap_or(line)
        .trim()
}

fn parse_int(line_no: u64, field: &'static str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        ExportError::malformed(line_no, format!("field '{field}' is not an integer: '{value}'"))
    })
}

fn parse_addr(line_no: u64, field: &'static str, value: &str) -> Result<Ipv4Addr> {
    value.parse::<Ipv4Addr>().map_err(|_| {
        ExportError::malformed(line_no, format!("field '{field}' is not an IPv4 address: '{value}'"))
    })
}
