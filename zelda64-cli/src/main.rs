//! zelda64 CLI
//!
//! Command-line interface for inflating, patching, and deflating
//! Zelda64-family N64 ROMs.

mod cli_types;
mod commands;
mod error;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = match cli.command {
        Commands::Inflate { rom, out } => commands::inflate::run_inflate(&rom, &out),
        Commands::Deflate { rom, out, exclusions } => {
            commands::deflate::run_deflate(&rom, &out, &exclusions)
        }
        Commands::Patch { patch, rom, out } => commands::patch::run_patch(&patch, &rom, &out),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Format a byte count as a human-readable MiB/bytes string.
pub(crate) fn format_bytes(n: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if n >= MIB {
        format!("{:.1} MiB", n as f64 / MIB as f64)
    } else {
        format!("{n} bytes")
    }
}
