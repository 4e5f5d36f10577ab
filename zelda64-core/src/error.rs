use thiserror::Error;

/// Errors surfaced by any `zelda64-core` transformation.
#[derive(Debug, Error)]
pub enum Zelda64Error {
    #[error("bounds error: offset {offset} + len {len} out of range")]
    Bounds { offset: usize, len: usize },

    #[error("DMA table signature not found")]
    DmaMissing,

    #[error("DMA overlap: record ending at {a:#x} overlaps record starting at {b:#x}")]
    DmaOverlap { a: u32, b: u32 },

    #[error("unknown CIC boot-block CRC: {0:#010x}")]
    CicUnknown(u32),

    #[error("malformed Yaz0 stream: {0}")]
    Yaz0Malformed(String),

    #[error("patch has bad magic, expected \"ZPFv1\"")]
    PatchBadMagic,

    #[error("patch is truncated")]
    PatchTruncated,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Zelda64Error {
    pub(crate) fn bounds(offset: usize, len: usize) -> Self {
        Zelda64Error::Bounds { offset, len }
    }
}
