//! Shared test fixtures: sample lines, in-memory sources, a capturing
//! transport, and wire decoders for asserting on produced datagrams.

use std::collections::VecDeque;
use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{FlowRecord, LogLine};
use crate::source::LineSource;
use crate::transport::Transport;
use crate::wire::Datagram;

/// A representative valid flow log line.
pub const SAMPLE_LINE: &str = "2 111122223333 eni-abc 10.0.0.5 10.0.0.9 443 51000 6 10 1500 1690000000 1690000060 ACCEPT OK 0 10.0.0.5 10.0.0.9 ingress";

/// The [`SAMPLE_LINE`] as a parsed `LogLine`.
pub fn sample_log_line() -> LogLine {
    LogLine {
        line_no: 1,
        version: 2,
        account_id: "111122223333".to_string(),
        interface_id: "eni-abc".to_string(),
        src_addr: Ipv4Addr::new(10, 0, 0, 5),
        dst_addr: Ipv4Addr::new(10, 0, 0, 9),
        src_port: 443,
        dst_port: 51_000,
        protocol: 6,
        packets: 10,
        bytes: 1500,
        start: 1_690_000_000,
        end: 1_690_000_060,
        action: "ACCEPT".to_string(),
        log_status: "OK".to_string(),
        tcp_flags: 0,
        pkt_srcaddr: Ipv4Addr::new(10, 0, 0, 5),
        pkt_dstaddr: Ipv4Addr::new(10, 0, 0, 9),
        flow_direction: "ingress".to_string(),
    }
}

/// The [`SAMPLE_LINE`] at wire widths.
pub fn sample_record() -> FlowRecord {
    FlowRecord {
        inner_src_addr: Ipv4Addr::new(10, 0, 0, 5),
        inner_dst_addr: Ipv4Addr::new(10, 0, 0, 9),
        src_port: 443,
        dst_port: 51_000,
        protocol: 6,
        tcp_flags: 0,
        packet_count: 10,
        byte_count: 1500,
        start_epoch: 1_690_000_000,
        end_epoch: 1_690_000_060,
    }
}

/// Build a valid 18-field line with the given flow values.
#[allow(clippy::too_many_arguments)]
pub fn flow_line(
    pkt_src: Ipv4Addr,
    pkt_dst: Ipv4Addr,
    src_port: u64,
    dst_port: u64,
    protocol: u64,
    tcp_flags: u64,
    packets: u64,
    bytes: u64,
) -> String {
    format!(
        "2 111122223333 eni-abc 10.1.1.1 10.1.1.2 {src_port} {dst_port} {protocol} \
         {packets} {bytes} 1690000000 1690000060 ACCEPT OK {tcp_flags} {pkt_src} {pkt_dst} ingress"
    )
}

/// In-memory line source.
pub struct VecSource {
    lines: VecDeque<String>,
}

impl VecSource {
    pub fn new(lines: Vec<String>) -> Self {
        VecSource { lines: lines.into() }
    }
}

#[async_trait]
impl LineSource for VecSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Transport that records every datagram's bytes instead of sending them.
#[derive(Default)]
pub struct CapturingTransport {
    pub datagrams: Vec<Vec<u8>>,
}

#[async_trait]
impl Transport for CapturingTransport {
    async fn send(&mut self, datagram: &Datagram) -> Result<()> {
        self.datagrams.push(datagram.as_bytes().to_vec());
        Ok(())
    }
}

/// Decoded 24-byte NetFlow v5 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedHeader {
    pub version: u16,
    pub count: u16,
    pub sys_uptime_ms: u32,
    pub unix_secs: u32,
    pub unix_nsecs: u32,
    pub flow_sequence: u32,
    pub engine_type: u8,
    pub engine_id: u8,
    pub sampling_interval: u16,
}

impl DecodedHeader {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= 24, "datagram shorter than a v5 header");
        DecodedHeader {
            version: be_u16(&bytes[0..2]),
            count: be_u16(&bytes[2..4]),
            sys_uptime_ms: be_u32(&bytes[4..8]),
            unix_secs: be_u32(&bytes[8..12]),
            unix_nsecs: be_u32(&bytes[12..16]),
            flow_sequence: be_u32(&bytes[16..20]),
            engine_type: bytes[20],
            engine_id: bytes[21],
            sampling_interval: be_u16(&bytes[22..24]),
        }
    }
}

/// Decoded 48-byte NetFlow v5 record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedRecord {
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    pub next_hop: Ipv4Addr,
    pub input_iface: u16,
    pub output_iface: u16,
    pub packet_count: u32,
    pub byte_count: u32,
    pub start: u32,
    pub end: u32,
    pub src_port: u16,
    pub dst_port: u16,
    pub tcp_flags: u8,
    pub protocol: u8,
    pub tos: u8,
    pub src_as: u16,
    pub dst_as: u16,
    pub src_mask: u8,
    pub dst_mask: u8,
}

impl DecodedRecord {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= 48, "body shorter than a v5 record");
        DecodedRecord {
            src_addr: Ipv4Addr::from(be_u32(&bytes[0..4])),
            dst_addr: Ipv4Addr::from(be_u32(&bytes[4..8])),
            next_hop: Ipv4Addr::from(be_u32(&bytes[8..12])),
            input_iface: be_u16(&bytes[12..14]),
            output_iface: be_u16(&bytes[14..16]),
            packet_count: be_u32(&bytes[16..20]),
            byte_count: be_u32(&bytes[20..24]),
            start: be_u32(&bytes[24..28]),
            end: be_u32(&bytes[28..32]),
            src_port: be_u16(&bytes[32..34]),
            dst_port: be_u16(&bytes[34..36]),
            tcp_flags: bytes[37],
            protocol: bytes[38],
            tos: bytes[39],
            src_as: be_u16(&bytes[40..42]),
            dst_as: be_u16(&bytes[42..44]),
            src_mask: bytes[44],
            dst_mask: bytes[45],
        }
    }
}

fn be_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
