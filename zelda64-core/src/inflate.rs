//! Inflater (C6): expand a compressed ROM into a fully decompressed image.

use crate::crc;
use crate::dma::{self, DmaRecord};
use crate::error::Zelda64Error;
use crate::yaz0;

const OUTPUT_SIZE: usize = 64 * 1024 * 1024;
const FIRST_FILE_RECORD: usize = 3;

/// Result of an inflate transformation: the decompressed ROM plus the list
/// of DMA indices that were already stored uncompressed in the source (and
/// so should be skipped, not re-compressed, by a later deflate).
pub struct InflateResult {
    pub rom: Vec<u8>,
    pub exclusions: Vec<i32>,
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

/// Rebuild the decompressed image and DMA table without touching the header
/// checksums. Split out from [`inflate`] so the DMA/payload logic can be
/// exercised without needing a ROM whose boot block matches a known CIC.
pub(crate) fn inflate_without_crc_refresh(input: &[u8]) -> Result<InflateResult, Zelda64Error> {
    let mut rom = input.to_vec();
    dma::normalize(&mut rom)?;

    let dma_offset = dma::find_dma_table_offset(&rom)?;
    let (_dma_size, dma_count) = dma::read_dma_info(&rom, dma_offset)?;
    let info = dma::read_record(&rom, dma_offset, 2)?;

    let mut output = vec![0u8; OUTPUT_SIZE];
    let copy_len = rom.len().min(OUTPUT_SIZE);
    output[..copy_len].copy_from_slice(&rom[..copy_len]);

    let tail_start = (info.v_end as usize).min(output.len());
    output[tail_start..].fill(0);

    let mut exclusions = Vec::new();

    for i in FIRST_FILE_RECORD..dma_count as usize {
        let mut record = dma::read_record(&rom, dma_offset, i)?;
        if record.p_start as usize >= OUTPUT_SIZE || record.p_end == DmaRecord::NULL {
            continue;
        }

        let dst_start = record.v_start as usize;
        let len = record.span() as usize;

        if record.is_raw() {
            log::debug!("record {i}: already raw in source, marking exclusion");
            exclusions.push(i as i32);
            let src = bytes_at(&rom, record.p_start as usize, len)?;
            bytes_at_mut(&mut output, dst_start, len)?.copy_from_slice(src);
        } else {
            let src_start = record.p_start as usize + yaz0::HEADER_SIZE;
            let encoded = rom
                .get(src_start..)
                .ok_or_else(|| Zelda64Error::bounds(src_start, 0))?;
            let dst = bytes_at_mut(&mut output, dst_start, len)?;
            yaz0::decode(encoded, dst)?;
        }

        record.p_start = record.v_start;
        record.p_end = 0;
        dma::write_record(&mut output, dma_offset, i, record)?;
    }

    Ok(InflateResult {
        rom: output,
        exclusions,
    })
}

/// Inflate a compressed ROM into a 64 MiB decompressed image.
pub fn inflate(input: &[u8]) -> Result<InflateResult, Zelda64Error> {
    let mut result = inflate_without_crc_refresh(input)?;
    crc::recalculate(&mut result.rom)?;
    Ok(result)
}

#[cfg(test)]
#[path = "tests/inflate_tests.rs"]
mod tests;
