//! Error types for flow log export.
//!
//! All errors implement the `std::error::Error` trait and carry enough
//! structured context (line numbers, field names, endpoints) to diagnose a
//! failed or lossy run from the logs alone.
//!
//! ## Error Categories
//!
//! - **Transport Errors**: the collector socket cannot be established or a
//!   send fails; fatal for the run
//! - **Source Errors**: the line stream itself fails mid-read; fatal
//! - **Config Errors**: invalid exporter configuration; fatal before the run
//! - **Malformed Lines**: a line does not match the 18-field flow log shape;
//!   recovered by skipping the line
//! - **Field Overflows**: a parsed value does not fit its NetFlow v5 wire
//!   width; recovered by dropping the record
//!
//! Use [`ExportError::is_fatal`] to tell the two groups apart:
//!
//! ```rust
//! use flowcast::ExportError;
//!
//! let error = ExportError::malformed(7, "expected 18 fields, found 3");
//! assert!(!error.is_fatal());
//! ```

use std::io;
use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T, E = ExportError> = std::result::Result<T, E>;

/// Main error type for flow log export operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportError {
    #[error("cannot reach NetFlow collector at {endpoint}")]
    Transport {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("failed reading flow log stream at line {line_no}")]
    Source {
        line_no: u64,
        #[source]
        source: io::Error,
    },

    #[error("invalid exporter configuration: {reason}")]
    Config { reason: String },

    #[error("malformed flow log line {line_no}: {reason}")]
    MalformedLine { line_no: u64, reason: String },

    #[error("line {line_no}: field '{field}' value {value} exceeds wire maximum {max}")]
    FieldOverflow {
        line_no: u64,
        field: &'static str,
        value: u64,
        max: u64,
    },
}

impl ExportError {
    /// Returns whether this error terminates the run.
    ///
    /// Per-line failures are isolated so one bad record cannot block
    /// delivery of the rest of the file; everything else aborts.
    pub fn is_fatal(&self) -> bool {
        match self {
            ExportError::Transport { .. } => true,
            ExportError::Source { .. } => true,
            ExportError::Config { .. } => true,
            ExportError::MalformedLine { .. } => false,
            ExportError::FieldOverflow { .. } => false,
        }
    }

    /// Helper constructor for transport errors with endpoint context.
    pub fn transport(endpoint: impl Into<String>, source: io::Error) -> Self {
        ExportError::Transport { endpoint: endpoint.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        ExportError::Config { reason: reason.into() }
    }

    /// Helper constructor for malformed line errors.
    pub fn malformed(line_no: u64, reason: impl Into<String>) -> Self {
        ExportError::MalformedLine { line_no, reason: reason.into() }
    }

    /// Helper constructor for field overflow errors.
    pub fn overflow(line_no: u64, field: &'static str, value: u64, max: u64) -> Self {
        ExportError::FieldOverflow { line_no, field, value, max }
    }
}
