use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error reading or writing a file.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A `zelda64-core` transformation failed.
    #[error("{0}")]
    Transform(#[from] zelda64_core::Zelda64Error),
}
