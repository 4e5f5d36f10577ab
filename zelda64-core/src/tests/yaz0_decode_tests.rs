use super::*;
use crate::yaz0::encode;

/// Scenario S1: decoding the trivial repeated-byte encoding reconstructs the
/// original 17 bytes.
#[test]
fn decode_repeated_byte_round_trips() {
    let src = [0x41u8; 17];
    let frame = encode(&src);
    let mut out = vec![0u8; 17];
    decode(&frame[16..], &mut out).unwrap();
    assert_eq!(out, src);
}

/// P2 (Yaz0 idempotence): decode(encode(b)) == b, for a variety of inputs.
#[test]
fn round_trip_mixed_content() {
    let mut src = Vec::new();
    src.extend_from_slice(b"The quick brown fox jumps over the lazy dog. ");
    src.extend(std::iter::repeat(0x00u8).take(64));
    src.extend_from_slice(b"The quick brown fox jumps over the lazy dog. ");
    src.extend((0u8..=255).cycle().take(300));

    let frame = encode(&src);
    let mut out = vec![0u8; src.len()];
    decode(&frame[16..], &mut out).unwrap();
    assert_eq!(out, src);
}

#[test]
fn round_trip_empty_input() {
    let frame = encode(&[]);
    let mut out: Vec<u8> = Vec::new();
    decode(&frame[16..], &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn decode_fails_on_truncated_stream() {
    let mut out = vec![0u8; 4];
    // code byte claims a literal but no payload byte follows.
    assert!(decode(&[0x80], &mut out).is_err());
}

#[test]
fn decode_fails_on_backref_before_start() {
    let mut out = vec![0u8; 4];
    // code byte 0 = back-reference with a distance that precedes dst_pos 0.
    assert!(decode(&[0x00, 0xE0, 0x00], &mut out).is_err());
}
