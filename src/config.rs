//! Exporter configuration.
//!
//! Everything the original exporter hardcoded lives here: the collector
//! destination, the engine identity written into every header, and the
//! `flow_sequence` policy. The 30-record datagram capacity is mandated by
//! the v5 wire format and is a [`wire`](crate::wire) constant, not
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Policy for the `flow_sequence` header field.
///
/// The default is `Fixed(1)`: every datagram carries sequence 1, matching
/// the exporter this crate replaces so collectors that already consume its
/// traffic see identical packets. Collectors that use the sequence number
/// for loss detection expect `Cumulative`, a wrapping running count of
/// records sent so far in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceMode {
    /// Every header carries this constant.
    Fixed(u32),
    /// Running count of records sent, wrapping at `u32::MAX`.
    Cumulative,
}

impl Default for SequenceMode {
    fn default() -> Self {
        SequenceMode::Fixed(1)
    }
}

/// Configuration for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ExporterConfig {
    /// Collector host name or IP address.
    pub collector_address: String,

    /// Collector UDP port.
    pub collector_port: u16,

    /// `engine_type` header constant identifying this exporter.
    pub engine_type: u8,

    /// `engine_id` header constant.
    pub engine_id: u8,

    /// `flow_sequence` policy, see [`SequenceMode`].
    pub sequence: SequenceMode,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            collector_address: "127.0.0.1".to_string(),
            collector_port: 2055,
            engine_type: 188,
            engine_id: 0,
            sequence: SequenceMode::default(),
        }
    }
}

impl ExporterConfig {
    /// Validate the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.collector_address.trim().is_empty() {
            return Err(ExportError::config("collector_address must not be empty"));
        }
        if self.collector_port == 0 {
            return Err(ExportError::config("collector_port must not be 0"));
        }
        Ok(())
    }

    /// The `host:port` endpoint string used for socket setup and logging.
    pub fn collector_endpoint(&self) -> String {
        format!("{}:{}", self.collector_address, self.collector_port)
    }

    /// Load and validate a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExportError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: ExporterConfig = serde_yaml_ng::from_str(&text).map_err(|e| {
            ExportError::config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}
