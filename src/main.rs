use std::io::{self, BufWriter, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use reqplot::{cli::Cli, config::ConverterConfig, converter};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; diagnostics always go to stderr
///
/// Warnings are always shown. `RUST_LOG` is only honored with `--debug`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = ConverterConfig::for_variant(args.variant);
    tracing::debug!(?config, "starting conversion");

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    let rows = converter::convert(&config, stdin, stdout)
        .with_context(|| format!("failed to convert summary ({:?})", args.variant))?;

    tracing::debug!(rows, "conversion finished");
    Ok(())
}
