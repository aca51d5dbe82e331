//! NetFlow v5 wire layout.
//!
//! Fixed-width big-endian encoding of the 24-byte packet header and the
//! 48-byte flow record body, plus the [`Datagram`] that carries one header
//! and 1..=30 bodies to the transport.
//!
//! # Header Layout (24 bytes)
//!
//! | field             | width | value                                  |
//! |-------------------|-------|----------------------------------------|
//! | version           | u16   | 5                                      |
//! | count             | u16   | records in this datagram, 1..=30       |
//! | sys_uptime        | u32   | ms since the run's baseline instant    |
//! | unix_secs         | u32   | wall clock seconds at assembly         |
//! | unix_nsecs        | u32   | sub-second nanoseconds at assembly     |
//! | flow_sequence     | u32   | per [`SequenceMode`](crate::SequenceMode) |
//! | engine_type       | u8    | configured, default 188                |
//! | engine_id         | u8    | configured, default 0                  |
//! | sampling_interval | u16   | 1 (no sampling)                        |
//!
//! # Record Layout (48 bytes)
//!
//! Addresses are the packet-level endpoints. `next_hop`, `tos`, the AS
//! numbers and both pads are zero; input/output interface indices are 1 and
//! the prefix masks are 32 (host routes).

use crate::record::FlowRecord;

/// NetFlow export format version.
pub const VERSION: u16 = 5;

/// Encoded header size in bytes.
pub const HEADER_LEN: usize = 24;

/// Encoded flow record body size in bytes.
pub const RECORD_LEN: usize = 48;

/// Hard per-datagram record capacity mandated by the v5 format.
pub const MAX_RECORDS_PER_DATAGRAM: usize = 30;

/// Largest datagram this exporter produces.
pub const MAX_DATAGRAM_LEN: usize = HEADER_LEN + MAX_RECORDS_PER_DATAGRAM * RECORD_LEN;

const NEXT_HOP: u32 = 0;
const INPUT_IFACE: u16 = 1;
const OUTPUT_IFACE: u16 = 1;
const TOS: u8 = 0;
const SRC_AS: u16 = 0;
const DST_AS: u16 = 0;
/// Host-route prefix masks; the log carries endpoint addresses, not subnets.
const SRC_MASK: u8 = 32;
const DST_MASK: u8 = 32;
const SAMPLING_INTERVAL: u16 = 1;

/// Header field values for one datagram, encoded at assembly time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeaderV5 {
    pub count: u16,
    pub sys_uptime_ms: u32,
    pub unix_secs: u32,
    pub unix_nsecs: u32,
    pub flow_sequence: u32,
    pub engine_type: u8,
    pub engine_id: u8,
}

impl HeaderV5 {
    /// Append the 24-byte big-endian header to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&VERSION.to_be_bytes());
        buf.extend_from_slice(&self.count.to_be_bytes());
        buf.extend_from_slice(&self.sys_uptime_ms.to_be_bytes());
        buf.extend_from_slice(&self.unix_secs.to_be_bytes());
        buf.extend_from_slice(&self.unix_nsecs.to_be_bytes());
        buf.extend_from_slice(&self.flow_sequence.to_be_bytes());
        buf.push(self.engine_type);
        buf.push(self.engine_id);
        buf.extend_from_slice(&SAMPLING_INTERVAL.to_be_bytes());
    }
}

/// Encode one flow record into its fixed 48-byte body.
pub(crate) fn encode_record(record: &FlowRecord) -> [u8; RECORD_LEN] {
    let mut buf = [0u8; RECORD_LEN];
    buf[0..4].copy_from_slice(&record.inner_src_addr.octets());
    buf[4..8].copy_from_slice(&record.inner_dst_addr.octets());
    buf[8..12].copy_from_slice(&NEXT_HOP.to_be_bytes());
    buf[12..14].copy_from_slice(&INPUT_IFACE.to_be_bytes());
    buf[14..16].copy_from_slice(&OUTPUT_IFACE.to_be_bytes());
    buf[16..20].copy_from_slice(&record.packet_count.to_be_bytes());
    buf[20..24].copy_from_slice(&record.byte_count.to_be_bytes());
    buf[24..28].copy_from_slice(&record.start_epoch.to_be_bytes());
    buf[28..32].copy_from_slice(&record.end_epoch.to_be_bytes());
    buf[32..34].copy_from_slice(&record.src_port.to_be_bytes());
    buf[34..36].copy_from_slice(&record.dst_port.to_be_bytes());
    buf[36] = 0; // pad1
    buf[37] = record.tcp_flags;
    buf[38] = record.protocol;
    buf[39] = TOS;
    buf[40..42].copy_from_slice(&SRC_AS.to_be_bytes());
    buf[42..44].copy_from_slice(&DST_AS.to_be_bytes());
    buf[44] = SRC_MASK;
    buf[45] = DST_MASK;
    // pad2 at 46..48 stays zero
    buf
}

/// One fully assembled NetFlow v5 packet.
///
/// A datagram only exists complete: header plus 1..=30 record bodies. It is
/// handed to the transport and dropped; nothing survives past the send call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    bytes: Vec<u8>,
    records: u16,
}

impl Datagram {
    pub(crate) fn new(bytes: Vec<u8>, records: u16) -> Self {
        debug_assert_eq!(bytes.len(), HEADER_LEN + records as usize * RECORD_LEN);
        Self { bytes, records }
    }

    /// Wire bytes, ready to send.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of flow records carried, 1..=30.
    pub fn record_count(&self) -> u16 {
        self.records
    }

    /// Total encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
