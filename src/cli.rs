//! CLI argument parsing for reqplot

use clap::Parser;

use crate::config::Variant;

#[derive(Parser, Debug)]
#[command(name = "reqplot")]
#[command(version)]
#[command(
    about = "Convert an HTTP test server summary (stdin) into gnuplot data (stdout)",
    long_about = None
)]
pub struct Cli {
    /// Data file to produce
    #[arg(value_enum, value_name = "VARIANT")]
    pub variant: Variant,

    /// Enable debug tracing on stderr
    #[arg(short, long)]
    pub debug: bool,
}
