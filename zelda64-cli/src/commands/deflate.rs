use std::fs;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Run the `deflate` command: recompress a decompressed ROM to 32 MiB.
pub(crate) fn run_deflate(rom: &Path, out: &Path, exclusions: &[i32]) -> Result<(), CliError> {
    log::info!("Reading {}", rom.display());
    let input = fs::read(rom)?;

    if !exclusions.is_empty() {
        log::info!("Excluding records: {exclusions:?}");
    }

    let output = zelda64_core::deflate(&input, exclusions)?;
    log::info!(
        "  {} recompressed to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        crate::format_bytes(output.len()),
    );

    fs::write(out, &output)?;
    log::info!("Wrote {}", out.display());
    Ok(())
}
