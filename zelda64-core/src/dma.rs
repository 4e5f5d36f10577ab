//! ROM/DMA model (C3): locating the DMA table and reading/writing its records.

use crate::byteorder::{detect_format, normalize_to_big_endian};
use crate::error::Zelda64Error;

const RECORD_SIZE: usize = 16;
const SCAN_START_WORD: usize = 1048;
const SCAN_END_BYTE: usize = 0x0100_0000;
const DMA_INFO_RECORD_INDEX: usize = 2;

/// One 16-byte DMA record: a file's virtual (decompressed) and physical
/// (on-ROM) address range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaRecord {
    pub v_start: u32,
    pub v_end: u32,
    pub p_start: u32,
    pub p_end: u32,
}

impl DmaRecord {
    pub const NULL: u32 = 0xFFFF_FFFF;

    /// `true` for a record marking the table's end-of-iteration sentinel.
    pub fn is_terminator(&self) -> bool {
        self.v_start == 0 && self.v_end == 0
    }

    /// `true` for a logically absent file.
    pub fn is_null(&self) -> bool {
        self.p_end == Self::NULL
    }

    /// `true` when the file is stored uncompressed on the ROM.
    pub fn is_raw(&self) -> bool {
        self.p_end == 0
    }

    /// Virtual span, `vEnd - vStart`.
    pub fn span(&self) -> u32 {
        self.v_end.saturating_sub(self.v_start)
    }
}

/// Normalize a ROM buffer's byte order to big-endian in place, if detected.
pub fn normalize(rom: &mut [u8]) -> Result<(), Zelda64Error> {
    let first = *rom.first().ok_or_else(|| Zelda64Error::bounds(0, 1))?;
    if let Some(format) = detect_format(first) {
        normalize_to_big_endian(rom, format);
    }
    Ok(())
}

/// Scan for the DMA table's byte offset: the first 4-byte-aligned word at or
/// after word index 1048 whose value, paired with the next word, equals
/// `(0x00000000, 0x60100000)`.
pub fn find_dma_table_offset(rom: &[u8]) -> Result<usize, Zelda64Error> {
    let mut offset = SCAN_START_WORD * 4;
    let limit = SCAN_END_BYTE.min(rom.len().saturating_sub(8));
    while offset <= limit {
        let a = read_u32(rom, offset)?;
        let b = read_u32(rom, offset + 4)?;
        if a == 0x0000_0000 && b == 0x6010_0000 {
            return Ok(offset);
        }
        offset += 4;
    }
    Err(Zelda64Error::DmaMissing)
}

fn read_u32(rom: &[u8], offset: usize) -> Result<u32, Zelda64Error> {
    let b = rom
        .get(offset..offset + 4)
        .ok_or_else(|| Zelda64Error::bounds(offset, 4))?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn record_offset(dma_offset: usize, index: usize) -> usize {
    dma_offset + index * RECORD_SIZE
}

fn decode_record(bytes: &[u8]) -> DmaRecord {
    DmaRecord {
        v_start: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        v_end: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        p_start: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        p_end: u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
    }
}

fn encode_record(record: DmaRecord) -> [u8; RECORD_SIZE] {
    let mut out = [0u8; RECORD_SIZE];
    out[0..4].copy_from_slice(&record.v_start.to_be_bytes());
    out[4..8].copy_from_slice(&record.v_end.to_be_bytes());
    out[8..12].copy_from_slice(&record.p_start.to_be_bytes());
    out[12..16].copy_from_slice(&record.p_end.to_be_bytes());
    out
}

/// Read DMA record `index`, failing with a bounds error if it falls outside
/// the buffer.
pub fn read_record(rom: &[u8], dma_offset: usize, index: usize) -> Result<DmaRecord, Zelda64Error> {
    let offset = record_offset(dma_offset, index);
    let bytes = rom
        .get(offset..offset + RECORD_SIZE)
        .ok_or_else(|| Zelda64Error::bounds(offset, RECORD_SIZE))?;
    Ok(decode_record(bytes))
}

/// Write DMA record `index` in place at `dmaOffset + i*16`.
pub fn write_record(
    rom: &mut [u8],
    dma_offset: usize,
    index: usize,
    record: DmaRecord,
) -> Result<(), Zelda64Error> {
    let offset = record_offset(dma_offset, index);
    let dst = rom
        .get_mut(offset..offset + RECORD_SIZE)
        .ok_or_else(|| Zelda64Error::bounds(offset, RECORD_SIZE))?;
    dst.copy_from_slice(&encode_record(record));
    Ok(())
}

/// Scan records in order for the first whose `vStart == key`, stopping at the
/// `(0,0)` terminator.
pub fn find_record_by_key(
    rom: &[u8],
    dma_offset: usize,
    key: u32,
) -> Result<Option<DmaRecord>, Zelda64Error> {
    let mut index = 0;
    loop {
        let record = read_record(rom, dma_offset, index)?;
        if record.is_terminator() {
            return Ok(None);
        }
        if record.v_start == key {
            return Ok(Some(record));
        }
        index += 1;
    }
}

/// Derive `(dmaSize, dmaCount)` from the DMA info record (index 2).
pub fn read_dma_info(rom: &[u8], dma_offset: usize) -> Result<(u32, u32), Zelda64Error> {
    let info = read_record(rom, dma_offset, DMA_INFO_RECORD_INDEX)?;
    let dma_size = info.span();
    let dma_count = dma_size / RECORD_SIZE as u32;
    Ok((dma_size, dma_count))
}

/// Collect all live records up to the `(0,0)` terminator, sorted by
/// `vStart`, and fail with `dma-overlap` if any adjacent pair overlaps.
pub fn verify_non_overlapping(rom: &[u8], dma_offset: usize) -> Result<(), Zelda64Error> {
    let mut records = Vec::new();
    let mut index = 0;
    loop {
        let record = read_record(rom, dma_offset, index)?;
        if record.is_terminator() {
            break;
        }
        records.push(record);
        index += 1;
    }

    records.sort_by_key(|r| r.v_start);
    for pair in records.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.v_end > b.v_start {
            return Err(Zelda64Error::DmaOverlap {
                a: a.v_end,
                b: b.v_start,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/dma_tests.rs"]
mod tests;
