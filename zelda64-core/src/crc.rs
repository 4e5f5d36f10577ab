//! N64 header CRC engine (C2): CIC identification and the rolling checksum.

use crate::error::Zelda64Error;

const BOOT_BLOCK_OFFSET: usize = 0x40;
const BOOT_BLOCK_SIZE: usize = 0xFC0;
const CHECKSUM_START: usize = 0x1000;
const CHECKSUM_SIZE: usize = 0x100000;
const CRC1_OFFSET: usize = 0x10;
const CRC2_OFFSET: usize = 0x14;

/// CIC lockout-chip variant, identified by the CRC-32 of the boot block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CicVariant {
    Cic6101,
    Cic6102,
    Cic6103,
    Cic6105,
    Cic6106,
}

impl CicVariant {
    fn seed(self) -> u32 {
        match self {
            CicVariant::Cic6101 | CicVariant::Cic6102 => 0xF8CA4DDC,
            CicVariant::Cic6103 => 0xA3886759,
            CicVariant::Cic6105 => 0xDF26F436,
            CicVariant::Cic6106 => 0x1FEA617A,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CicVariant::Cic6101 => "6101",
            CicVariant::Cic6102 => "6102",
            CicVariant::Cic6103 => "6103",
            CicVariant::Cic6105 => "6105",
            CicVariant::Cic6106 => "6106",
        }
    }

    fn from_boot_crc(crc: u32) -> Option<Self> {
        match crc {
            0x6170A4A1 => Some(CicVariant::Cic6101),
            0x90BB6CB5 => Some(CicVariant::Cic6102),
            0x0B050EE0 => Some(CicVariant::Cic6103),
            0x98BC2C86 => Some(CicVariant::Cic6105),
            0xACC8580A => Some(CicVariant::Cic6106),
            _ => None,
        }
    }
}

/// Identify the CIC variant of an already big-endian-normalized ROM buffer.
pub fn detect_cic(rom: &[u8]) -> Result<CicVariant, Zelda64Error> {
    let boot = rom
        .get(BOOT_BLOCK_OFFSET..BOOT_BLOCK_OFFSET + BOOT_BLOCK_SIZE)
        .ok_or_else(|| Zelda64Error::bounds(BOOT_BLOCK_OFFSET, BOOT_BLOCK_SIZE))?;
    let crc = crc32fast::hash(boot);
    let cic = CicVariant::from_boot_crc(crc).ok_or(Zelda64Error::CicUnknown(crc))?;
    log::debug!("detected CIC-{} (boot CRC {crc:#010x})", cic.name());
    Ok(cic)
}

/// Compute the rolling `(crc1, crc2)` checksum pair for an already
/// big-endian-normalized ROM buffer, given its CIC variant.
pub fn compute_checksum(rom: &[u8], cic: CicVariant) -> Result<(u32, u32), Zelda64Error> {
    let region = rom
        .get(CHECKSUM_START..CHECKSUM_START + CHECKSUM_SIZE)
        .ok_or_else(|| Zelda64Error::bounds(CHECKSUM_START, CHECKSUM_SIZE))?;
    let boot = rom
        .get(BOOT_BLOCK_OFFSET..BOOT_BLOCK_OFFSET + BOOT_BLOCK_SIZE)
        .ok_or_else(|| Zelda64Error::bounds(BOOT_BLOCK_OFFSET, BOOT_BLOCK_SIZE))?;

    let seed = cic.seed();
    let mut t1 = seed;
    let mut t2 = seed;
    let mut t3 = seed;
    let mut t4 = seed;
    let mut t5 = seed;
    let mut t6 = seed;

    for (i, chunk) in region.chunks_exact(4).enumerate() {
        let d = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

        let sum = t6.wrapping_add(d);
        if sum < t6 {
            t4 = t4.wrapping_add(1);
        }
        t6 = sum;

        t3 ^= d;

        let r = d.rotate_left(d & 0x1F);
        t5 = t5.wrapping_add(r);

        if d < t2 {
            t2 ^= r;
        } else {
            t2 ^= t6 ^ d;
        }

        if cic == CicVariant::Cic6105 {
            let boot_offset = 0x0710 + ((i * 4) & 0xFF);
            let e = u32::from_be_bytes([
                boot[boot_offset],
                boot[boot_offset + 1],
                boot[boot_offset + 2],
                boot[boot_offset + 3],
            ]);
            t1 = t1.wrapping_add(e ^ d);
        } else {
            t1 = t1.wrapping_add(t5 ^ d);
        }
    }

    let (crc1, crc2) = match cic {
        CicVariant::Cic6103 => ((t6 ^ t4).wrapping_add(t3), (t5 ^ t2).wrapping_add(t1)),
        CicVariant::Cic6106 => (
            t6.wrapping_mul(t4).wrapping_add(t3),
            t5.wrapping_mul(t2).wrapping_add(t1),
        ),
        _ => (t6 ^ t4 ^ t3, t5 ^ t2 ^ t1),
    };

    Ok((crc1, crc2))
}

/// Recompute and write both header checksums into `rom` in place.
///
/// `rom` must already be normalized to big-endian.
pub fn recalculate(rom: &mut [u8]) -> Result<(), Zelda64Error> {
    let cic = detect_cic(rom)?;
    let (crc1, crc2) = compute_checksum(rom, cic)?;
    rom.get_mut(CRC1_OFFSET..CRC1_OFFSET + 4)
        .ok_or_else(|| Zelda64Error::bounds(CRC1_OFFSET, 4))?
        .copy_from_slice(&crc1.to_be_bytes());
    rom.get_mut(CRC2_OFFSET..CRC2_OFFSET + 4)
        .ok_or_else(|| Zelda64Error::bounds(CRC2_OFFSET, 4))?
        .copy_from_slice(&crc2.to_be_bytes());
    Ok(())
}

#[cfg(test)]
#[path = "tests/crc_tests.rs"]
mod tests;
