//! Flow record types.
//!
//! Two representations separate "is it an integer" from "does it fit on the
//! wire": [`LogLine`] keeps every numeric field wide (`u64`) exactly as the
//! tokenizer produced it, and [`FlowRecord`] holds the NetFlow v5 wire
//! widths. The narrowing conversion rejects out-of-range values instead of
//! truncating them.

use std::net::Ipv4Addr;

use crate::error::{ExportError, Result};

/// One tokenized flow log line, all 18 positional fields.
///
/// Only the packet-level addresses, ports, protocol, TCP flags, counters and
/// timestamps feed the encoder; the remaining fields are validated and kept
/// for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// 1-based position of this line in the input stream
    pub line_no: u64,
    pub version: u64,
    pub account_id: String,
    pub interface_id: String,
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    pub src_port: u64,
    pub dst_port: u64,
    pub protocol: u64,
    pub packets: u64,
    pub bytes: u64,
    pub start: u64,
    pub end: u64,
    pub action: String,
    pub log_status: String,
    pub tcp_flags: u64,
    pub pkt_srcaddr: Ipv4Addr,
    pub pkt_dstaddr: Ipv4Addr,
    pub flow_direction: String,
}

/// One flow ready for NetFlow v5 encoding, every field at wire width.
///
/// The addresses are the *packet*-level `pkt_srcaddr`/`pkt_dstaddr`, not the
/// logical flow addresses. When a flow log is captured on a gateway
/// attachment interface the logical `src_addr`/`dst_addr` carry the
/// attachment's own address; only the packet-level fields hold the true
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord {
    pub inner_src_addr: Ipv4Addr,
    pub inner_dst_addr: Ipv4Addr,
    pub src_port: u16,
    pub dst_port: u16,
    pub protocol: u8,
    pub tcp_flags: u8,
    pub packet_count: u32,
    pub byte_count: u32,
    /// UNIX seconds; `end_epoch >= start_epoch` is expected but not enforced
    pub start_epoch: u32,
    pub end_epoch: u32,
}

fn narrow<T>(line_no: u64, field: &'static str, value: u64) -> Result<T>
where
    T: TryFrom<u64> + num_max::Max,
{
    T::try_from(value).map_err(|_| ExportError::overflow(line_no, field, value, T::MAX_VALUE))
}

/// Minimal "what is this type's maximum" helper for the narrowing above.
mod num_max {
    pub trait Max {
        const MAX_VALUE: u64;
    }
    impl Max for u8 {
        const MAX_VALUE: u64 = u8::MAX as u64;
    }
    impl Max for u16 {
        const MAX_VALUE: u64 = u16::MAX as u64;
    }
    impl Max for u32 {
        const MAX_VALUE: u64 = u32::MAX as u64;
    }
}

impl TryFrom<&LogLine> for FlowRecord {
    type Error = ExportError;

    /// Narrows a parsed line to wire widths.
    ///
    /// Fails with [`ExportError::FieldOverflow`] naming the first field that
    /// does not fit; the caller drops the record and continues.
    fn try_from(line: &LogLine) -> Result<Self> {
        let n = line.line_no;
        Ok(FlowRecord {
            inner_src_addr: line.pkt_srcaddr,
            inner_dst_addr: line.pkt_dstaddr,
            src_port: narrow(n, "src_port", line.src_port)?,
            dst_port: narrow(n, "dst_port", line.dst_port)?,
            protocol: narrow(n, "protocol", line.protocol)?,
            tcp_flags: narrow(n, "tcp_flags", line.tcp_flags)?,
            packet_count: narrow(n, "packets", line.packets)?,
            byte_count: narrow(n, "bytes", line.bytes)?,
            start_epoch: narrow(n, "start", line.start)?,
            end_epoch: narrow(n, "end", line.end)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_log_line;

    #[test]
    fn narrows_sample_line() {
        let line = sample_log_line();
        let record = FlowRecord::try_from(&line).unwrap();
        assert_eq!(record.inner_src_addr, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(record.inner_dst_addr, Ipv4Addr::new(10, 0, 0, 9));
        assert_eq!(record.src_port, 443);
        assert_eq!(record.dst_port, 51_000);
        assert_eq!(record.protocol, 6);
        assert_eq!(record.packet_count, 10);
        assert_eq!(record.byte_count, 1500);
        assert_eq!(record.start_epoch, 1_690_000_000);
        assert_eq!(record.end_epoch, 1_690_000_060);
    }

    #[test]
    fn uses_packet_level_addresses() {
        let mut line = sample_log_line();
        line.src_addr = Ipv4Addr::new(172, 16, 0, 1);
        line.dst_addr = Ipv4Addr::new(172, 16, 0, 2);
        line.pkt_srcaddr = Ipv4Addr::new(192, 168, 9, 9);
        line.pkt_dstaddr = Ipv4Addr::new(192, 168, 9, 10);

        let record = FlowRecord::try_from(&line).unwrap();
        assert_eq!(record.inner_src_addr, Ipv4Addr::new(192, 168, 9, 9));
        assert_eq!(record.inner_dst_addr, Ipv4Addr::new(192, 168, 9, 10));
    }

    #[test]
    fn rejects_port_beyond_u16() {
        let mut line = sample_log_line();
        line.src_port = 70_000;
        let err = FlowRecord::try_from(&line).unwrap_err();
        match err {
            ExportError::FieldOverflow { field, value, max, .. } => {
                assert_eq!(field, "src_port");
                assert_eq!(value, 70_000);
                assert_eq!(max, u16::MAX as u64);
            }
            other => panic!("expected FieldOverflow, got {other:?}"),
        }
    }

    #[test]
    fn rejects_protocol_beyond_u8() {
        let mut line = sample_log_line();
        line.protocol = 300;
        assert!(matches!(
            FlowRecord::try_from(&line),
            Err(ExportError::FieldOverflow { field: "protocol", .. })
        ));
    }

    #[test]
    fn rejects_counter_beyond_u32() {
        let mut line = sample_log_line();
        line.bytes = u64::from(u32::MAX) + 1;
        assert!(matches!(
            FlowRecord::try_from(&line),
            Err(ExportError::FieldOverflow { field: "bytes", .. })
        ));
    }
}
