//! Record batching under the 30-record datagram ceiling.
//!
//! [`BatchEncoder`] owns the one in-flight accumulator of encoded record
//! bodies. The capacity boundary is a property of the type: [`push`] hands
//! back a [`Datagram`] exactly when the accumulator reaches 30 records, and
//! [`flush`] drains a non-empty remainder at end-of-input. Header timestamp
//! fields are computed at the moment a datagram is assembled, so a batch
//! that took a long time to fill never carries a stale timestamp.
//!
//! [`push`]: BatchEncoder::push
//! [`flush`]: BatchEncoder::flush

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::trace;

use crate::config::{ExporterConfig, SequenceMode};
use crate::record::FlowRecord;
use crate::wire::{self, Datagram, HEADER_LEN, MAX_RECORDS_PER_DATAGRAM, RECORD_LEN};

/// Accumulates encoded flow records and assembles complete datagrams.
#[derive(Debug)]
pub struct BatchEncoder {
    engine_type: u8,
    engine_id: u8,
    sequence: SequenceMode,
    /// Running record count for `SequenceMode::Cumulative`.
    records_sent: u32,
    /// Baseline for the header's `sys_uptime` field, fixed per run.
    started: Instant,
    bodies: Vec<u8>,
    count: u16,
}

impl BatchEncoder {
    /// Create an empty encoder; the uptime baseline starts now.
    pub fn new(config: &ExporterConfig) -> Self {
        BatchEncoder {
            engine_type: config.engine_type,
            engine_id: config.engine_id,
            sequence: config.sequence,
            records_sent: 0,
            started: Instant::now(),
            bodies: Vec::with_capacity(MAX_RECORDS_PER_DATAGRAM * RECORD_LEN),
            count: 0,
        }
    }

    /// Append one record; returns a complete datagram when the accumulator
    /// reaches the 30-record capacity.
    pub fn push(&mut self, record: &FlowRecord) -> Option<Datagram> {
        self.bodies.extend_from_slice(&wire::encode_record(record));
        self.count += 1;
        trace!(pending = self.count, "record batched");

        if usize::from(self.count) == MAX_RECORDS_PER_DATAGRAM {
            Some(self.assemble())
        } else {
            None
        }
    }

    /// Drain the remainder at end-of-input, if any.
    pub fn flush(&mut self) -> Option<Datagram> {
        if self.count == 0 { None } else { Some(self.assemble()) }
    }

    /// Records currently accumulated, `0..30`.
    pub fn pending(&self) -> usize {
        usize::from(self.count)
    }

    /// Build header ‖ bodies for the current accumulator and reset it.
    fn assemble(&mut self) -> Datagram {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        let uptime = self.started.elapsed().as_millis();
        let flow_sequence = match self.sequence {
            SequenceMode::Fixed(n) => n,
            SequenceMode::Cumulative => self.records_sent,
        };

        let header = wire::HeaderV5 {
            count: self.count,
            sys_uptime_ms: u32::try_from(uptime).unwrap_or(u32::MAX),
            unix_secs: now.as_secs() as u32,
            unix_nsecs: now.subsec_nanos(),
            flow_sequence,
            engine_type: self.engine_type,
            engine_id: self.engine_id,
        };

        let mut bytes = Vec::with_capacity(HEADER_LEN + self.bodies.len());
        header.encode_into(&mut bytes);
        bytes.extend_from_slice(&self.bodies);

        let records = self.count;
        self.records_sent = self.records_sent.wrapping_add(u32::from(records));
        self.bodies.clear();
        self.count = 0;
        Datagram::new(bytes, records)
    }
}
