//! Flowcast CLI: export a flow log file (or stdin) to a NetFlow collector.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use flowcast::{Exporter, ExporterConfig, LineReader, SequenceMode};

#[derive(Parser, Debug)]
#[command(version, about = "Stream VPC flow log records to a NetFlow v5 collector")]
struct Cli {
    /// Set the path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE", env = "FLOWCAST_CONFIG")]
    config: Option<PathBuf>,

    /// Collector host name or IP address (overrides the config file).
    #[arg(long, value_name = "HOST", env = "FLOWCAST_COLLECTOR")]
    collector: Option<String>,

    /// Collector UDP port (overrides the config file).
    #[arg(long, value_name = "PORT", env = "FLOWCAST_PORT")]
    port: Option<u16>,

    /// Engine type written into every datagram header.
    #[arg(long, value_name = "N")]
    engine_type: Option<u8>,

    /// Engine id written into every datagram header.
    #[arg(long, value_name = "N")]
    engine_id: Option<u8>,

    /// Emit a cumulative flow_sequence instead of the fixed default.
    #[arg(long)]
    cumulative_sequence: bool,

    /// Flow log file to export; `-` reads stdin.
    #[arg(value_name = "FILE", default_value = "-")]
    input: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ExporterConfig::from_yaml_file(path)?,
        None => ExporterConfig::default(),
    };
    if let Some(collector) = cli.collector {
        config.collector_address = collector;
    }
    if let Some(port) = cli.port {
        config.collector_port = port;
    }
    if let Some(engine_type) = cli.engine_type {
        config.engine_type = engine_type;
    }
    if let Some(engine_id) = cli.engine_id {
        config.engine_id = engine_id;
    }
    if cli.cumulative_sequence {
        config.sequence = SequenceMode::Cumulative;
    }

    let mut exporter = Exporter::connect(&config).await?;

    let summary = if cli.input == "-" {
        exporter.export(LineReader::new(BufReader::new(tokio::io::stdin()))).await?
    } else {
        let file = tokio::fs::File::open(&cli.input)
            .await
            .with_context(|| format!("cannot open flow log {}", cli.input))?;
        exporter.export(LineReader::new(BufReader::new(file))).await?
    };

    if summary.malformed_lines > 0 || summary.overflowed_records > 0 {
        eprintln!(
            "warning: {} malformed lines skipped, {} records dropped",
            summary.malformed_lines, summary.overflowed_records
        );
    }
    Ok(())
}
