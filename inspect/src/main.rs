mod lines;

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use finne_line_parser::{ParserConfig, RequestLineParser};

use crate::lines::LineBuffers;

const BUF_EXPANSION: usize = 1024;

/// Parses HTTP request lines (one per input line) and prints them as JSON.
#[derive(Parser)]
#[command(name = "finne-line-inspect", version)]
struct Cli {
    /// Input file; reads stdin when absent.
    input: Option<PathBuf>,
    /// JSON file with parser settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Longest accepted request line in bytes.
    #[arg(long, conflicts_with = "unbounded")]
    max_line_len: Option<usize>,
    /// Accept request lines of any length.
    #[arg(long)]
    unbounded: bool,
    /// Pretty-print each JSON result.
    #[arg(long)]
    pretty: bool,
}

fn load_config(args: &Cli) -> Result<ParserConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => ParserConfig::default(),
    };
    if let Some(max) = args.max_line_len {
        config = config.with_max_line_len(max);
    }
    if args.unbounded {
        config.max_line_len = None;
    }
    return Ok(config);
}

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    return match path {
        Some(path) => Ok(Box::new(File::open(path)?)),
        None => Ok(Box::new(io::stdin().lock())),
    };
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    let config = load_config(&args)?;
    tracing::debug!(?config, "parser configured");

    let parser = RequestLineParser::new(config);
    let mut input = open_input(args.input.as_deref())?;
    let mut out = io::stdout().lock();
    let mut buffers = LineBuffers::new(args.pretty);
    let mut buffer = [0_u8; BUF_EXPANSION];

    loop {
        match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                buffers.put(&buffer[0..n]);
                buffers.drain(&parser, &mut out)?;
            }
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    if buffers.pending() > 0 {
        tracing::debug!(bytes = buffers.pending(), "input ended without a newline");
    }
    buffers.finish(&parser, &mut out)?;
    return Ok(());
}
