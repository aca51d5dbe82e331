//! UDP transport to the collector.
//!
//! Transmission is connectionless and fire-and-forget: no response is read,
//! no retry is attempted. The socket is acquired once per run and released
//! when the owning exporter drops, including on early failure paths. The
//! only failure the run-level contract cares about is setup: if the
//! collector endpoint cannot be resolved or the socket cannot be
//! established, the run aborts before any line is read.

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::info;

use crate::config::ExporterConfig;
use crate::error::{ExportError, Result};
use crate::wire::Datagram;

/// Sink for completed datagrams.
#[async_trait]
pub trait Transport: Send {
    /// Send one complete datagram. No acknowledgment is awaited.
    async fn send(&mut self, datagram: &Datagram) -> Result<()>;
}

/// Connected UDP socket to the configured collector.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    endpoint: String,
}

impl UdpTransport {
    /// Bind an ephemeral local port and connect it to the collector.
    ///
    /// Fails with a typed [`ExportError::Transport`] naming the endpoint;
    /// the caller decides whether to retry or abort.
    pub async fn connect(config: &ExporterConfig) -> Result<Self> {
        let endpoint = config.collector_endpoint();
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| ExportError::transport(endpoint.clone(), e))?;
        socket
            .connect(&endpoint)
            .await
            .map_err(|e| ExportError::transport(endpoint.clone(), e))?;

        info!(collector = %endpoint, "connected to NetFlow collector");
        Ok(UdpTransport { socket, endpoint })
    }

    /// The collector endpoint this transport was connected to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&mut self, datagram: &Datagram) -> Result<()> {
        self.socket
            .send(datagram.as_bytes())
            .await
            .map_err(|e| ExportError::transport(self.endpoint.clone(), e))?;
        Ok(())
    }
}
