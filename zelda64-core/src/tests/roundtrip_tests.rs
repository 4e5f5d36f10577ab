use crate::deflate::deflate_without_crc_refresh;
use crate::inflate::inflate_without_crc_refresh;
use crate::test_fixtures::*;
use crate::{dma, yaz0};

/// P1 (round trip): inflating a compressed ROM and deflating the result back
/// down reproduces every file's original payload bytes, whether the source
/// stored that file raw or Yaz0-compressed.
#[test]
fn inflate_then_deflate_round_trips_payload_bytes() {
    let mut rom = base_rom(0x5000, 5);

    let raw_payload = b"this file was already stored uncompressed".to_vec();
    place_raw_file(&mut rom, 3, 0x3000, 0x3100, &raw_payload);

    let compressed_payload: Vec<u8> = (0u8..80).cycle().take(300).collect();
    place_compressed_file(&mut rom, 4, 0x4000, 0x4100, &compressed_payload);

    let inflated = inflate_without_crc_refresh(&rom).unwrap();
    assert_eq!(inflated.exclusions, vec![3]);

    let deflated = deflate_without_crc_refresh(&inflated.rom, &inflated.exclusions).unwrap();

    let record3 = dma::read_record(&deflated, DMA_OFFSET, 3).unwrap();
    assert_eq!(record3.p_end, 0);
    let start = record3.p_start as usize;
    assert_eq!(
        &deflated[start..start + raw_payload.len()],
        raw_payload.as_slice()
    );

    let record4 = dma::read_record(&deflated, DMA_OFFSET, 4).unwrap();
    assert!(record4.p_end > record4.p_start);
    let frame_start = record4.p_start as usize + yaz0::HEADER_SIZE;
    let frame_end = record4.p_end as usize;
    let mut decoded = vec![0u8; compressed_payload.len()];
    yaz0::decode(&deflated[frame_start..frame_end], &mut decoded).unwrap();
    assert_eq!(decoded, compressed_payload);
}
