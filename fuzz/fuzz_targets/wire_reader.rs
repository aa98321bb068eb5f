#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{WireReader, WireType};

fuzz_target!(|data: &[u8]| {
    let mut reader = WireReader::new(data);
    let mut steps = 0usize;

    // Walk fields until the input runs out or is rejected.
    while steps < 4096 {
        steps += 1;
        let Ok(Some(tag)) = reader.next_field() else {
            break;
        };
        let before = reader.position();
        let advanced = match tag.wire_type {
            WireType::Varint => reader.read_varint().map(|_| ()),
            WireType::Fixed64 => reader.read_fixed64().map(|_| ()),
            WireType::LengthDelimited => reader.read_length_delimited().map(|payload| {
                // Payloads are often nested messages; walk one level down.
                let mut nested = WireReader::new(payload);
                while let Ok(Some(inner)) = nested.next_field() {
                    if nested.skip_field(inner.wire_type).is_err() {
                        break;
                    }
                }
            }),
            WireType::Fixed32 => reader.read_fixed32().map(|_| ()),
        };
        if advanced.is_err() {
            break;
        }
        assert!(reader.position() > before);
        assert!(reader.position() <= data.len());
    }
});
