//! Collation Graph CLI
//!
//! Reads a delimited collation table, builds the graph model, and writes the
//! renderer export as JSON.
//!
//! ## Configuration
//!
//! - `--config PATH`: JSON build config (all fields optional)
//! - `--delimiter` / `COLLATION_DELIMITER`: field delimiter (default `,`)
//! - `--identity` / `COLLATION_IDENTITY`: `xxh64`, `polynomial31`, or `interned`
//! - `RUST_LOG`: log level filter (default: `collation_graph=info`)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! Logs go to stderr; the export goes to `--output` or stdout.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin collation-graph -- collation.csv --output graph.json
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use collation_graph::{GraphConfig, GraphExport, IdentityScheme, Pipeline};

#[derive(Parser)]
#[command(
    name = "collation-graph",
    version,
    about = "Build a variant graph from a collation table"
)]
struct Cli {
    /// Collation table, one witness per row, siglum first
    input: PathBuf,
    /// Write the export here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// JSON build config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Field delimiter
    #[arg(long, env = "COLLATION_DELIMITER")]
    delimiter: Option<char>,
    /// Node identity scheme
    #[arg(long, env = "COLLATION_IDENTITY", value_parser = parse_identity)]
    identity: Option<IdentityScheme>,
}

fn parse_identity(s: &str) -> Result<IdentityScheme, String> {
    IdentityScheme::from_str(s)
        .ok_or_else(|| format!("unknown identity scheme {s:?} (expected xxh64, polynomial31, interned)"))
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "collation_graph=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => GraphConfig::from_file(path)?,
        None => GraphConfig::default(),
    };
    if let Some(delimiter) = cli.delimiter {
        config = config.with_delimiter(delimiter);
    }
    if let Some(identity) = cli.identity {
        config = config.with_identity(identity);
    }

    let config_hash = config.config_hash()?;
    info!(
        input = %cli.input.display(),
        identity = %config.identity,
        config_hash = %config_hash,
        "Building collation graph"
    );

    let pipeline = Pipeline::new(config)?;
    let model = pipeline.build_file(&cli.input)?;
    let export = GraphExport::new(&model, pipeline.config())?;
    let json = export.to_json_pretty()?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(
                output = %path.display(),
                fingerprint = %export.fingerprint,
                "Export written"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Failed to build collation graph");
            ExitCode::FAILURE
        }
    }
}
