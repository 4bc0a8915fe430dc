//! CLI tool to run a request through a handler chain.
//!
//! Usage:
//!   request-chain
//!   request-chain --data "payload" --digest sha256
//!   request-chain --chain "request | transaction" -o out.xml
//!
//! With no arguments, runs "New request" through the common pipeline and
//! writes the resulting payload to stdout.

use clap::Parser;
use request_chain::{
    Chain, DEFAULT_CHAIN, DigestAlgorithm, Handler, Request, SEED_DATA,
    common_request_handler_with,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Wrap a request payload in transaction, digest, and request tags.
#[derive(Parser)]
#[command(name = "request-chain")]
struct Cli {
    /// Payload of the seed request
    #[arg(long, default_value = SEED_DATA)]
    data: String,

    /// Digest algorithm: fixed or sha256
    #[arg(long, default_value = "fixed")]
    digest: DigestAlgorithm,

    /// Chain of handlers, e.g. "transaction | digest | request"
    #[arg(long)]
    chain: Option<String>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show the request at every pipe point on stderr
    #[arg(long)]
    trace: bool,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let seed = Request::new(cli.data.as_str());
    tracing::debug!(%seed, digest = %cli.digest, "running chain");

    let output = if cli.chain.is_none() && !cli.trace {
        common_request_handler_with(cli.digest).handle(&seed)
    } else {
        let text = cli.chain.as_deref().unwrap_or(DEFAULT_CHAIN);
        let chain = match Chain::from_text(text, cli.digest) {
            Ok(chain) => chain,
            Err(e) => {
                eprintln!("Chain error: {e}");
                process::exit(1);
            }
        };
        if cli.trace {
            let (output, trace) = chain.handle_traced(&seed);
            eprintln!("input: {:?}", seed.data());
            for (name, _, after) in trace.steps() {
                eprintln!("{name}: {:?}", after.data());
            }
            output
        } else {
            chain.handle(&seed)
        }
    };

    let written = match &cli.output {
        Some(path) => write_file(path, output.data()),
        None => write_stdout(output.data()),
    };
    if let Err(msg) = written {
        eprintln!("{msg}");
        process::exit(1);
    }
}

/// Write the payload to `path`, creating missing parent directories.
fn write_file(path: &Path, payload: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            format!(
                "Error creating output directory for '{}': {e}",
                path.display()
            )
        })?;
    }
    fs::write(path, payload)
        .map_err(|e| format!("Error writing output file '{}': {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote output");
    Ok(())
}

/// Write the payload to stdout, ending with exactly one newline.
fn write_stdout(payload: &str) -> Result<(), String> {
    let mut out = io::stdout().lock();
    let newline = if payload.ends_with('\n') { "" } else { "\n" };
    write!(out, "{payload}{newline}")
        .and_then(|()| out.flush())
        .map_err(|e| format!("Error writing output: {e}"))
}
