use wire::{DecodeError, WireReader, WireType, WireWriter};

#[test]
fn skip_interleaved_unknown_records_preserves_known() {
    let mut writer = WireWriter::new();
    writer.write_tag(1, WireType::LengthDelimited);
    writer.write_length_delimited(b"first");
    writer.write_tag(99, WireType::Fixed64);
    writer.write_fixed64(u64::MAX);
    writer.write_tag(98, WireType::LengthDelimited);
    writer.write_length_delimited(&[0xFF; 40]);
    writer.write_tag(2, WireType::LengthDelimited);
    writer.write_length_delimited(b"second");
    let bytes = writer.finish();

    let mut reader = WireReader::new(&bytes);
    let mut known = Vec::new();
    while let Some(tag) = reader.next_field().unwrap() {
        match tag.field_number {
            1 | 2 => known.push(reader.read_length_delimited().unwrap().to_vec()),
            _ => reader.skip_field(tag.wire_type).unwrap(),
        }
    }
    assert_eq!(known, vec![b"first".to_vec(), b"second".to_vec()]);
}

#[test]
fn group_wire_type_is_rejected() {
    // field 1, wire type 3 (start group)
    let mut reader = WireReader::new(&[0x0B]);
    let err = reader.next_field().unwrap_err();
    assert_eq!(err, DecodeError::InvalidWireType { value: 3 });
}

#[test]
fn length_prefix_beyond_buffer_is_truncated() {
    let mut writer = WireWriter::new();
    writer.write_tag(4, WireType::LengthDelimited);
    writer.write_varint(10);
    writer.write_raw(b"abc");
    let bytes = writer.finish();

    let mut reader = WireReader::new(&bytes);
    let tag = reader.next_field().unwrap().unwrap();
    let err = reader.skip_field(tag.wire_type).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            needed: 10,
            available: 3
        }
    );
}
