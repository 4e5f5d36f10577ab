use std::fs;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Run the `patch` command: apply a ZPFv1 patch to a decompressed ROM.
pub(crate) fn run_patch(patch: &Path, rom: &Path, out: &Path) -> Result<(), CliError> {
    log::info!("Reading {}", rom.display());
    let input = fs::read(rom)?;

    log::info!("Reading patch {}", patch.display());
    let zpf = fs::read(patch)?;

    let output = zelda64_core::patch(&zpf, &input)?;
    log::info!(
        "  {} patch applied, {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        crate::format_bytes(output.len()),
    );

    fs::write(out, &output)?;
    log::info!("Wrote {}", out.display());
    Ok(())
}
