use super::*;

/// Scenario S1: encoding 17 identical bytes should produce one literal
/// followed by a distance-0, length-16 back-reference.
#[test]
fn encode_repeated_byte_emits_literal_then_distance_zero_backref() {
    let src = [0x41u8; 17];
    let frame = encode(&src);

    assert_eq!(&frame[0..4], b"Yaz0");
    assert_eq!(u32::from_be_bytes([frame[4], frame[5], frame[6], frame[7]]), 17);
    assert_eq!(&frame[8..16], &[0u8; 8]);

    let stream = &frame[16..];
    assert_eq!(stream[0], 0x80); // one literal token, rest back-references
    assert_eq!(stream[1], 0x41);
    assert_eq!(stream[2], 0xE0); // (16-2)<<4 | (0>>8)
    assert_eq!(stream[3], 0x00); // distance low byte
}

#[test]
fn encode_output_is_padded_to_a_multiple_of_sixteen() {
    let src = [0x41u8; 17];
    let frame = encode(&src);
    assert_eq!(frame.len() % 16, 0);
}

#[test]
fn encode_non_repeating_data_is_all_literals() {
    let src: Vec<u8> = (0u8..8).collect();
    let frame = encode(&src);
    let stream = &frame[16..];
    assert_eq!(stream[0], 0xFF); // 8 literal tokens
    assert_eq!(&stream[1..9], src.as_slice());
}

#[test]
fn search_prefers_lowest_index_on_tied_length() {
    let src = [1u8, 2, 3, 1, 2, 3, 1, 2, 3, 9];
    let (len, pos) = search(&src, 6);
    assert_eq!(pos, 0);
    assert!(len >= 3);
}
