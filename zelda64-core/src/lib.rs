//! Core transformations for the Zelda64 ROM family: inflate a compressed ROM
//! to its full decompressed size, apply a differential ZPF patch, and
//! deflate a decompressed ROM back down via Yaz0.

pub mod buffer;
pub mod byteorder;
pub mod crc;
pub mod deflate;
pub mod dma;
pub mod error;
pub mod inflate;
pub mod patch;
pub mod yaz0;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
#[path = "tests/roundtrip_tests.rs"]
mod roundtrip_tests;

pub use deflate::deflate;
pub use error::Zelda64Error;
pub use inflate::{inflate, InflateResult};
pub use patch::apply as patch;
