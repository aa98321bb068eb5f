use varint::{read_varint, unzigzag32, write_varint, zigzag32, VarintError};

#[test]
fn golden_bytes_from_protobuf_encoding_guide() {
    let cases: [(u64, &[u8]); 4] = [
        (1, &[0x01]),
        (150, &[0x96, 0x01]),
        (300, &[0xAC, 0x02]),
        (270_549_121, &[0x81, 0x81, 0x81, 0x81, 0x01]),
    ];
    for (value, expected) in cases {
        let mut buf = Vec::new();
        write_varint(value, &mut buf);
        assert_eq!(buf, expected, "encoding of {value}");
        assert_eq!(read_varint(expected).unwrap(), (value, expected.len()));
    }
}

#[test]
fn consecutive_varints_decode_in_sequence() {
    let mut buf = Vec::new();
    for value in [3u64, 270, 86_942] {
        write_varint(value, &mut buf);
    }

    let mut rest = buf.as_slice();
    let mut decoded = Vec::new();
    while !rest.is_empty() {
        let (value, consumed) = read_varint(rest).unwrap();
        decoded.push(value);
        rest = &rest[consumed..];
    }
    assert_eq!(decoded, vec![3, 270, 86_942]);
}

#[test]
fn sint32_minus_two_is_three() {
    let mut buf = Vec::new();
    write_varint(zigzag32(-2), &mut buf);
    assert_eq!(buf, [0x03]);
    let (raw, _) = read_varint(&buf).unwrap();
    assert_eq!(unzigzag32(raw), -2);
}

#[test]
fn truncated_multibyte_varint_is_rejected() {
    let mut buf = Vec::new();
    write_varint(u64::from(u32::MAX), &mut buf);
    let err = read_varint(&buf[..buf.len() - 1]).unwrap_err();
    assert!(matches!(err, VarintError::Incomplete { consumed: 4 }));
}
