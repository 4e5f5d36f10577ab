//! Deflater (C7): recompress a decompressed ROM into a 32 MiB image.

use crate::crc;
use crate::dma::{self, DmaRecord};
use crate::error::Zelda64Error;
use crate::yaz0;

const OUTPUT_SIZE: usize = 32 * 1024 * 1024;
const FIRST_FILE_RECORD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Compress,
    Copy,
    Null,
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

/// Build the per-record operation table from the deflater's default
/// (compress everything from index 3 on) plus the caller's exclusions list.
///
/// A non-negative entry `e` means "record `e` was already raw, just copy
/// it." A negative entry encodes, via bitwise complement, "erase record
/// `~e + 1` entirely."
fn build_ops(dma_count: usize, exclusions: &[i32]) -> Vec<Op> {
    let mut ops = vec![Op::Compress; dma_count];
    for &e in exclusions {
        if e >= 0 {
            let idx = e as usize;
            if idx < dma_count {
                ops[idx] = Op::Copy;
            } else {
                log::warn!("deflate: exclusion index {idx} out of range, ignoring");
            }
        } else {
            let idx = (!e + 1) as usize;
            if idx < dma_count {
                ops[idx] = Op::Null;
            } else {
                log::warn!("deflate: exclusion index {idx} out of range, ignoring");
            }
        }
    }
    ops
}

/// Rebuild the compressed image and DMA table without touching the header
/// checksums. Split out from [`deflate`] so the DMA/payload logic can be
/// exercised without needing a ROM whose boot block matches a known CIC.
pub(crate) fn deflate_without_crc_refresh(
    input: &[u8],
    exclusions: &[i32],
) -> Result<Vec<u8>, Zelda64Error> {
    let dma_offset = dma::find_dma_table_offset(input)?;
    let (dma_size, dma_count) = dma::read_dma_info(input, dma_offset)?;
    let dma_count = dma_count as usize;

    let ops = build_ops(dma_count, exclusions);

    let mut output = vec![0u8; OUTPUT_SIZE];
    let prefix_len = dma_offset + dma_size as usize;
    bytes_at_mut(&mut output, 0, prefix_len)?.copy_from_slice(bytes_at(input, 0, prefix_len)?);

    let mut prev = prefix_len;
    for i in FIRST_FILE_RECORD..dma_count {
        let mut record = dma::read_record(input, dma_offset, i)?;
        if record.v_start == record.v_end {
            continue;
        }

        let op = ops[i];
        let payload: Vec<u8> = match op {
            Op::Copy => bytes_at(input, record.v_start as usize, record.span() as usize)?.to_vec(),
            Op::Compress => {
                let src = bytes_at(input, record.v_start as usize, record.span() as usize)?;
                yaz0::encode(src)
            }
            Op::Null => Vec::new(),
        };

        match op {
            Op::Null => {
                record.p_start = DmaRecord::NULL;
                record.p_end = DmaRecord::NULL;
            }
            Op::Copy => {
                record.p_start = prev as u32;
                record.p_end = 0;
            }
            Op::Compress => {
                record.p_start = prev as u32;
                record.p_end = (prev + payload.len()) as u32;
            }
        }

        if op != Op::Null {
            bytes_at_mut(&mut output, prev, payload.len())?.copy_from_slice(&payload);
        }

        dma::write_record(&mut output, dma_offset, i, record)?;
        prev += payload.len();
    }

    Ok(output)
}

/// Recompress a decompressed ROM into a 32 MiB image, given the list of DMA
/// indices to leave uncompressed or erase (see [`build_ops`]).
pub fn deflate(input: &[u8], exclusions: &[i32]) -> Result<Vec<u8>, Zelda64Error> {
    let mut output = deflate_without_crc_refresh(input, exclusions)?;
    crc::recalculate(&mut output)?;
    Ok(output)
}

#[cfg(test)]
#[path = "tests/deflate_tests.rs"]
mod tests;
