use std::fs;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Run the `inflate` command: expand a compressed ROM to 64 MiB.
pub(crate) fn run_inflate(rom: &Path, out: &Path) -> Result<(), CliError> {
    log::info!("Reading {}", rom.display());
    let input = fs::read(rom)?;

    let result = zelda64_core::inflate(&input)?;
    log::info!(
        "  {} decompressed to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        crate::format_bytes(result.rom.len()),
    );
    if !result.exclusions.is_empty() {
        log::debug!(
            "  {} records were already stored raw: {:?}",
            result.exclusions.len(),
            result.exclusions,
        );
    }

    fs::write(out, &result.rom)?;
    log::info!("Wrote {}", out.display());
    Ok(())
}
