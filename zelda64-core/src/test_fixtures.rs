//! Synthetic ROM builders shared by the inflate/deflate/patch test suites.
//!
//! Building 4032 bytes of boot code that hash to one of the five known CIC
//! CRC-32 values isn't practical by hand, so these fixtures exercise the
//! DMA/payload logic through the `*_without_crc_refresh` seams rather than
//! the public, checksum-refreshing entry points. CRC correctness itself is
//! covered directly in `crc.rs`'s tests against the spec's worked example.

use crate::dma::{self, DmaRecord};
use crate::yaz0;

pub(crate) const DMA_OFFSET: usize = 0x1060;

/// Build a minimal ROM: z64-ordered, with the DMA discovery signature at
/// `DMA_OFFSET` and a DMA info record (index 2) sized for `record_count`
/// total records.
pub(crate) fn base_rom(total_len: usize, record_count: u32) -> Vec<u8> {
    let min_len = DMA_OFFSET + 16 * 8;
    let mut rom = vec![0u8; total_len.max(min_len)];
    rom[0] = 0x80; // z64 marker

    set_record(
        &mut rom,
        0,
        DmaRecord {
            v_start: 0,
            v_end: 0x6010_0000,
            p_start: 0,
            p_end: 0,
        },
    );
    set_record(
        &mut rom,
        2,
        DmaRecord {
            v_start: 0,
            v_end: record_count * 16,
            p_start: 0,
            p_end: 0,
        },
    );
    rom
}

pub(crate) fn set_record(rom: &mut [u8], index: usize, record: DmaRecord) {
    dma::write_record(rom, DMA_OFFSET, index, record).unwrap();
}

/// Place a raw (uncompressed) file at DMA index `index`.
pub(crate) fn place_raw_file(rom: &mut Vec<u8>, index: usize, v_start: u32, p_start: u32, payload: &[u8]) {
    let end = p_start as usize + payload.len();
    if rom.len() < end {
        rom.resize(end, 0);
    }
    rom[p_start as usize..end].copy_from_slice(payload);
    set_record(
        rom,
        index,
        DmaRecord {
            v_start,
            v_end: v_start + payload.len() as u32,
            p_start,
            p_end: 0,
        },
    );
}

/// Place a Yaz0-compressed file at DMA index `index`.
pub(crate) fn place_compressed_file(
    rom: &mut Vec<u8>,
    index: usize,
    v_start: u32,
    p_start: u32,
    payload: &[u8],
) {
    let frame = yaz0::encode(payload);
    let end = p_start as usize + frame.len();
    if rom.len() < end {
        rom.resize(end, 0);
    }
    rom[p_start as usize..end].copy_from_slice(&frame);
    set_record(
        rom,
        index,
        DmaRecord {
            v_start,
            v_end: v_start + payload.len() as u32,
            p_start,
            p_end: p_start + frame.len() as u32,
        },
    );
}

/// Place a null (logically absent) file at DMA index `index`.
pub(crate) fn place_null_file(rom: &mut [u8], index: usize) {
    set_record(
        rom,
        index,
        DmaRecord {
            v_start: 0,
            v_end: 0,
            p_start: DmaRecord::NULL,
            p_end: DmaRecord::NULL,
        },
    );
}
