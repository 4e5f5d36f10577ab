//! ZPF patcher (C8): parse a ZPFv1 patch and apply it to a decompressed ROM.

use std::io::Read;

use crate::dma::{self, DmaRecord};
use crate::error::Zelda64Error;

const MAGIC: &[u8; 5] = b"ZPFv1";
const CONFIG_OFFSET: usize = 5;
const DMA_TABLE_OFFSET: usize = 21;
const NULL_FILE: u32 = 0xFFFF_FFFF;
const END_OF_DMA_UPDATES: u16 = 0xFFFF;
const CONTINUATION_MARKER: u8 = 0xFF;

struct Config {
    dma_offset: u32,
    xor_range_lo: u32,
    xor_range_hi: u32,
    xor_address: u32,
}

fn read_u16(buf: &[u8], offset: usize) -> Result<u16, Zelda64Error> {
    let b = buf.get(offset..offset + 2).ok_or(Zelda64Error::PatchTruncated)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

fn read_u24(buf: &[u8], offset: usize) -> Result<u32, Zelda64Error> {
    let b = buf.get(offset..offset + 3).ok_or(Zelda64Error::PatchTruncated)?;
    Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
}

fn read_u32(buf: &[u8], offset: usize) -> Result<u32, Zelda64Error> {
    let b = buf.get(offset..offset + 4).ok_or(Zelda64Error::PatchTruncated)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn bytes_at<'a>(buf: &'a [u8], start: usize, len: usize) -> Result<&'a [u8], Zelda64Error> {
    buf.get(start..start + len)
        .ok_or_else(|| Zelda64Error::bounds(start, len))
}

fn bytes_at_mut<'a>(
    buf: &'a mut [u8],
    start: usize,
    len: usize,
) -> Result<&'a mut [u8], Zelda64Error> {
    buf.get_mut(start..start + len)
        .ok_or_else(|| Zelda64Error::bounds(start, len))
}

fn zlib_decompress(data: &[u8]) -> Result<Vec<u8>, Zelda64Error> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

fn parse_header(patch: &[u8]) -> Result<Config, Zelda64Error> {
    if patch.get(0..5) != Some(MAGIC.as_slice()) {
        return Err(Zelda64Error::PatchBadMagic);
    }
    Ok(Config {
        dma_offset: read_u32(patch, CONFIG_OFFSET)?,
        xor_range_lo: read_u32(patch, CONFIG_OFFSET + 4)?,
        xor_range_hi: read_u32(patch, CONFIG_OFFSET + 8)?,
        xor_address: read_u32(patch, CONFIG_OFFSET + 12)?,
    })
}

/// XOR keystream: a deterministic sequence of non-zero bytes drawn by
/// cyclically scanning `[range_lo, range_hi]` of the *input* ROM.
struct Keystream<'a> {
    rom: &'a [u8],
    range_lo: u32,
    range_hi: u32,
    address: u32,
}

impl<'a> Keystream<'a> {
    fn new(rom: &'a [u8], range_lo: u32, range_hi: u32, address: u32) -> Self {
        Self {
            rom,
            range_lo,
            range_hi,
            address,
        }
    }

    fn next_key(&mut self) -> Result<u8, Zelda64Error> {
        loop {
            self.address = self.address.wrapping_add(1);
            if self.address > self.range_hi {
                self.address = self.range_lo;
            }
            let k = *self
                .rom
                .get(self.address as usize)
                .ok_or_else(|| Zelda64Error::bounds(self.address as usize, 1))?;
            if k != 0 {
                return Ok(k);
            }
        }
    }

    fn skip(&mut self, n: u8) -> Result<(), Zelda64Error> {
        for _ in 0..n {
            self.next_key()?;
        }
        Ok(())
    }
}

/// Apply Phase A: read DMA-update records until the `0xFFFF` terminator,
/// rewriting the output's DMA table and importing bytes from `fromFile`.
fn apply_dma_updates(
    patch: &[u8],
    cursor: &mut usize,
    rom: &[u8],
    output: &mut [u8],
    dma_offset: usize,
) -> Result<(), Zelda64Error> {
    loop {
        let dma_index = read_u16(patch, *cursor)?;
        *cursor += 2;
        if dma_index == END_OF_DMA_UPDATES {
            return Ok(());
        }

        let from_file = read_u32(patch, *cursor)?;
        *cursor += 4;
        let start = read_u32(patch, *cursor)?;
        *cursor += 4;
        let size = read_u24(patch, *cursor)?;
        *cursor += 3;

        dma::write_record(
            output,
            dma_offset,
            dma_index as usize,
            DmaRecord {
                v_start: start,
                v_end: start + size,
                p_start: start,
                p_end: 0,
            },
        )?;

        if from_file != NULL_FILE {
            let record = dma::find_record_by_key(rom, dma_offset, from_file)?
                .ok_or(Zelda64Error::PatchTruncated)?;
            let copy_len = (size as usize).min(record.p_start as usize);
            let src = bytes_at(rom, from_file as usize, copy_len)?;
            bytes_at_mut(output, start as usize, copy_len)?.copy_from_slice(src);
            let remainder = size as usize - copy_len;
            if remainder > 0 {
                bytes_at_mut(output, start as usize + copy_len, remainder)?.fill(0);
            }
        } else {
            bytes_at_mut(output, start as usize, size as usize)?.fill(0);
        }
    }
}

/// Apply Phase B: decode XOR-keyed data blocks until end of patch.
fn apply_data_blocks(
    patch: &[u8],
    cursor: &mut usize,
    mut keys: Keystream<'_>,
    output: &mut [u8],
) -> Result<(), Zelda64Error> {
    let mut block_start = 0u32;

    while *cursor < patch.len() {
        let marker = patch[*cursor];
        let block_size;
        if marker != CONTINUATION_MARKER {
            block_start = read_u32(patch, *cursor)?;
            *cursor += 4;
            block_size = read_u16(patch, *cursor)? as usize;
            *cursor += 2;
        } else {
            *cursor += 1;
            let key_skip = *patch.get(*cursor).ok_or(Zelda64Error::PatchTruncated)?;
            *cursor += 1;
            block_size = read_u16(patch, *cursor)? as usize;
            *cursor += 2;
            keys.skip(key_skip)?;
        }

        let source = patch
            .get(*cursor..*cursor + block_size)
            .ok_or(Zelda64Error::PatchTruncated)?;
        *cursor += block_size;

        let mut emitted = Vec::with_capacity(block_size);
        for &s in source {
            if s == 0 {
                emitted.push(0);
            } else {
                let k = keys.next_key()?;
                emitted.push(s ^ k);
            }
        }

        bytes_at_mut(output, block_start as usize, block_size)?.copy_from_slice(&emitted);
        block_start += block_size as u32;
    }

    Ok(())
}

/// Apply a ZPFv1 patch to a decompressed ROM, without touching the header
/// checksums. Split out from [`apply`] so the DMA/XOR logic can be exercised
/// without needing a ROM whose boot block matches a known CIC.
pub(crate) fn apply_without_crc_refresh(zpf: &[u8], rom: &[u8]) -> Result<Vec<u8>, Zelda64Error> {
    let patch = zlib_decompress(zpf)?;
    let config = parse_header(&patch)?;

    let mut output = rom.to_vec();
    let dma_offset = config.dma_offset as usize;

    let mut cursor = DMA_TABLE_OFFSET;
    apply_dma_updates(&patch, &mut cursor, rom, &mut output, dma_offset)?;

    let keys = Keystream::new(
        rom,
        config.xor_range_lo,
        config.xor_range_hi,
        config.xor_address,
    );
    apply_data_blocks(&patch, &mut cursor, keys, &mut output)?;

    Ok(output)
}

/// Apply a ZPFv1 patch to a decompressed ROM, producing a new ROM of
/// identical size. `zpf` is the raw (zlib-compressed) patch bytes.
pub fn apply(zpf: &[u8], rom: &[u8]) -> Result<Vec<u8>, Zelda64Error> {
    let mut output = apply_without_crc_refresh(zpf, rom)?;
    crate::crc::recalculate(&mut output)?;
    Ok(output)
}

#[cfg(test)]
#[path = "tests/patch_tests.rs"]
mod tests;
