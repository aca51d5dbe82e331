//! The export pipeline.
//!
//! Strictly sequential, single pass: read line → parse → narrow → batch →
//! possibly send → next line. There is no shared mutable state beyond the
//! one in-flight accumulator, which the exporter owns exclusively for the
//! duration of a run.
//!
//! Per-line failures are isolated: a malformed line or an out-of-range
//! record is logged, counted in the [`RunSummary`], and skipped, so one bad
//! record never blocks delivery of the rest of a large log file. Only
//! transport setup failure, a transport send failure, or a failure of the
//! line stream itself terminates the run. No partial datagram is ever sent.

use tracing::{debug, info, warn};

use crate::batch::BatchEncoder;
use crate::config::ExporterConfig;
use crate::error::Result;
use crate::parser::{ParsedLine, parse_line};
use crate::record::FlowRecord;
use crate::source::LineSource;
use crate::transport::{Transport, UdpTransport};
use crate::wire::Datagram;

/// Counters for one completed export run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Total lines consumed from the source.
    pub lines_read: u64,
    /// Recognized non-data marker lines, silently skipped.
    pub markers_skipped: u64,
    /// Lines rejected for not matching the 18-field shape.
    pub malformed_lines: u64,
    /// Records dropped because a value exceeded its wire width.
    pub overflowed_records: u64,
    /// Flow records delivered inside sent datagrams.
    pub records_sent: u64,
    /// Complete datagrams handed to the transport.
    pub datagrams_sent: u64,
}

/// Streams flow log lines to a NetFlow v5 collector.
#[derive(Debug)]
pub struct Exporter<T> {
    transport: T,
    encoder: BatchEncoder,
}

impl Exporter<UdpTransport> {
    /// Validate the configuration and connect the UDP transport.
    ///
    /// Connection setup failure aborts the run before any line is read.
    pub async fn connect(config: &ExporterConfig) -> Result<Self> {
        config.validate()?;
        let transport = UdpTransport::connect(config).await?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Exporter<T> {
    /// Build an exporter over an already-established transport.
    pub fn with_transport(config: &ExporterConfig, transport: T) -> Self {
        Exporter { transport, encoder: BatchEncoder::new(config) }
    }

    /// Consume the source and export every valid record.
    ///
    /// Returns the run's counters; callers inspect them for dropped and
    /// skipped line counts alongside what was sent.
    pub async fn export<S: LineSource>(&mut self, mut source: S) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        while let Some(line) = source.next_line().await? {
            summary.lines_read += 1;
            let line_no = summary.lines_read;

            let log_line = match parse_line(&line, line_no) {
                Ok(ParsedLine::Marker) => {
                    summary.markers_skipped += 1;
                    continue;
                }
                Ok(ParsedLine::Record(log_line)) => log_line,
                Err(err) => {
                    warn!(%err, "skipping line");
                    summary.malformed_lines += 1;
                    continue;
                }
            };

            let record = match FlowRecord::try_from(&log_line) {
                Ok(record) => record,
                Err(err) => {
                    warn!(%err, "dropping record");
                    summary.overflowed_records += 1;
                    continue;
                }
            };

            if let Some(datagram) = self.encoder.push(&record) {
                self.send(&datagram, &mut summary).await?;
            }
        }

        if let Some(datagram) = self.encoder.flush() {
            self.send(&datagram, &mut summary).await?;
        }

        info!(
            lines = summary.lines_read,
            markers = summary.markers_skipped,
            malformed = summary.malformed_lines,
            overflowed = summary.overflowed_records,
            records = summary.records_sent,
            datagrams = summary.datagrams_sent,
            "flow export finished"
        );
        Ok(summary)
    }

    async fn send(&mut self, datagram: &Datagram, summary: &mut RunSummary) -> Result<()> {
        self.transport.send(datagram).await?;
        summary.datagrams_sent += 1;
        summary.records_sent += u64::from(datagram.record_count());
        debug!(
            records = datagram.record_count(),
            bytes = datagram.len(),
            "datagram sent"
        );
        Ok(())
    }

    /// Tear down, handing back the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
