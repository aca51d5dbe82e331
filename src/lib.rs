//! Streams VPC flow log records to a NetFlow v5 collector.
//!
//! Flowcast consumes textual flow log lines (the fixed 18-field
//! space-separated custom format), reconstructs each flow from its
//! packet-level addresses, and emits byte-exact NetFlow v5 UDP datagrams,
//! batching up to the protocol's 30-record ceiling per packet.
//!
//! # Features
//!
//! - **Typed parsing**: schema-driven tokenizer, marker-line filtering,
//!   per-field validation with typed errors
//! - **Exact wire layout**: big-endian 24-byte header + 48-byte records,
//!   assembled only when complete
//! - **Resilient runs**: malformed lines and out-of-range records are
//!   counted and skipped, never abort a run
//! - **Fire-and-forget transport**: one connected UDP socket per run, no
//!   acknowledgment, no retry
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use flowcast::{Exporter, ExporterConfig, LineReader};
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> flowcast::Result<()> {
//!     let config = ExporterConfig {
//!         collector_address: "192.0.2.10".to_string(),
//!         collector_port: 2055,
//!         ..ExporterConfig::default()
//!     };
//!
//!     let file = tokio::fs::File::open("flows.log").await.map_err(|e| {
//!         flowcast::ExportError::config(format!("cannot open input: {e}"))
//!     })?;
//!
//!     let mut exporter = Exporter::connect(&config).await?;
//!     let summary = exporter.export(LineReader::new(BufReader::new(file))).await?;
//!     println!("sent {} datagrams", summary.datagrams_sent);
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod config;
mod error;
mod record;
#[cfg(test)]
pub mod test_utils;

// Pipeline stages
pub mod batch;
pub mod exporter;
pub mod parser;
pub mod source;
pub mod transport;
pub mod wire;

// Core exports
pub use config::{ExporterConfig, SequenceMode};
pub use error::{ExportError, Result};
pub use record::{FlowRecord, LogLine};

// Pipeline exports
pub use batch::BatchEncoder;
pub use exporter::{Exporter, RunSummary};
pub use parser::{ParsedLine, parse_line};
pub use source::{LineReader, LineSource};
pub use transport::{Transport, UdpTransport};
pub use wire::{Datagram, HEADER_LEN, MAX_RECORDS_PER_DATAGRAM, RECORD_LEN};
