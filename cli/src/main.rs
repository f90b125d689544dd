mod config;
mod logging;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::{KindTag, ResultEnvelope, ResultError, ResultKind, VersionInfo};
use config::Config;
use render::TableStyle;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (.yaml, .yml or .toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a job query result and print it
    Render {
        /// Result kind of a raw payload; without it the input is a {kind, payload} envelope
        #[arg(short, long)]
        kind: Option<String>,
        /// Table style
        #[arg(long, value_enum)]
        style: Option<TableStyle>,
        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Show which result shape a kind decodes into
    Shape {
        /// Kind name or numeric code
        kind: String,
    },
    /// Show the service version
    Version,
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path)),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn parse_input(input: &str, kind: Option<&str>) -> anyhow::Result<ResultEnvelope> {
    match kind {
        Some(kind) => {
            let payload = if input.trim().is_empty() {
                None
            } else {
                Some(serde_json::from_str(input).context("Payload is not valid JSON")?)
            };
            Ok(ResultEnvelope { kind: KindTag::Name(kind.to_string()), payload })
        }
        None => serde_json::from_str(input).context("Input is not a valid result envelope"),
    }
}

/// `name (code) -> shape` line for a kind tag given by name or code.
fn describe_shape(raw: &str) -> Result<String, ResultError> {
    let kind: ResultKind = raw.parse()?;
    Ok(format!("{} ({}) -> {}", kind, kind.code(), kind.shape()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    logging::setup_logging(&config.logging, cli.verbose)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Render { kind, style, file } => {
            let input = read_input(file.as_ref())?;
            let envelope = parse_input(&input, kind.as_deref())?;
            let (kind, result) = common::decode_envelope(&envelope)?;
            log::info!("decoded {} result as {}", kind, result.shape());
            let style = style.unwrap_or_else(|| config.output.style());
            render::render_to(kind, &result, &mut out, style)?;
        }
        Commands::Shape { kind } => {
            writeln!(out, "{}", describe_shape(&kind)?)?;
        }
        Commands::Version => {
            let info = VersionInfo::current();
            writeln!(out, "{}", serde_json::to_string(&info)?)?;
        }
    }

    out.flush()?;
    Ok(())
}
