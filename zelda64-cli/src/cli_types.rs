//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zelda64")]
#[command(about = "Inflate, patch, and deflate Zelda64-family N64 ROMs", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Expand a compressed ROM into a fully decompressed 64 MiB image
    Inflate {
        /// Path to the compressed input ROM
        #[arg(long)]
        rom: PathBuf,

        /// Path to write the decompressed ROM
        #[arg(long)]
        out: PathBuf,
    },

    /// Recompress a decompressed ROM back down to a 32 MiB image
    Deflate {
        /// Path to the decompressed input ROM
        #[arg(long)]
        rom: PathBuf,

        /// Path to write the recompressed ROM
        #[arg(long)]
        out: PathBuf,

        /// DMA record index to store uncompressed (repeatable); negate the
        /// index (e.g. -4 for index 4) to erase a record entirely
        #[arg(long = "exclude")]
        exclusions: Vec<i32>,
    },

    /// Apply a ZPFv1 differential patch to a decompressed ROM
    Patch {
        /// Path to the ZPFv1 patch file
        #[arg(long)]
        patch: PathBuf,

        /// Path to the decompressed input ROM the patch targets
        #[arg(long)]
        rom: PathBuf,

        /// Path to write the patched ROM
        #[arg(long)]
        out: PathBuf,
    },
}
