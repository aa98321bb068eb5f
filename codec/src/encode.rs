//! Message encoding.
//!
//! Fields are written in schema declaration order. Scalars equal to their
//! zero value are never stored, so elision falls out of walking the stored
//! slots. Repeated numeric fields are always packed; repeated strings, bytes
//! and messages get one occurrence per element. Map entries are written as
//! `{key = 1, value = 2}` submessages in key order.

use schema::{FieldKind, FieldNumber, ScalarKind, ValueKind};
use varint::{encoded_len, zigzag32, zigzag64};
use wire::{WireType, WireWriter};

use crate::message::Message;
use crate::value::Value;

const MAP_KEY_FIELD: FieldNumber = 1;
const MAP_VALUE_FIELD: FieldNumber = 2;

impl Message {
    /// Encodes this message to proto3 wire bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(self.encoded_len());
        self.encode_into(&mut writer);
        writer.finish()
    }

    /// Appends this message's fields to an existing writer.
    pub fn encode_into(&self, writer: &mut WireWriter) {
        for field in self.schema.fields() {
            let number = field.number;
            match &field.kind {
                FieldKind::Singular(kind) => {
                    if let Some(value) = self.singular.get(&number) {
                        writer.write_tag(number, kind.wire_type());
                        write_value(writer, kind, value);
                    }
                }
                FieldKind::Repeated(kind) => {
                    let Some(values) = self.repeated.get(&number) else {
                        continue;
                    };
                    if values.is_empty() {
                        continue;
                    }
                    if field.kind.is_packed() {
                        writer.write_nested(number, |run| {
                            for value in values {
                                write_value(run, kind, value);
                            }
                        });
                    } else {
                        for value in values {
                            writer.write_tag(number, kind.wire_type());
                            write_value(writer, kind, value);
                        }
                    }
                }
                FieldKind::Map(kind) => {
                    let Some(entries) = self.maps.get(&number) else {
                        continue;
                    };
                    for (key, value) in entries {
                        writer.write_nested(number, |entry| {
                            write_map_entry(entry, kind, key, value);
                        });
                    }
                }
            }
        }
        writer.write_raw(&self.unknown);
    }

    /// Returns the exact number of bytes [`encode`](Self::encode) produces.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let mut len = 0;
        for field in self.schema.fields() {
            let number = field.number;
            match &field.kind {
                FieldKind::Singular(kind) => {
                    if let Some(value) = self.singular.get(&number) {
                        len += tag_len(number) + value_len(kind, value);
                    }
                }
                FieldKind::Repeated(kind) => {
                    let Some(values) = self.repeated.get(&number) else {
                        continue;
                    };
                    if values.is_empty() {
                        continue;
                    }
                    if field.kind.is_packed() {
                        let run: usize = values.iter().map(|value| value_len(kind, value)).sum();
                        len += tag_len(number) + delimited_len(run);
                    } else {
                        len += values
                            .iter()
                            .map(|value| tag_len(number) + value_len(kind, value))
                            .sum::<usize>();
                    }
                }
                FieldKind::Map(kind) => {
                    let Some(entries) = self.maps.get(&number) else {
                        continue;
                    };
                    len += entries
                        .iter()
                        .map(|(key, value)| {
                            tag_len(number) + delimited_len(map_entry_len(kind, key, value))
                        })
                        .sum::<usize>();
                }
            }
        }
        len + self.unknown.len()
    }
}

fn write_map_entry(writer: &mut WireWriter, kind: &ValueKind, key: &str, value: &Value) {
    if !key.is_empty() {
        writer.write_tag(MAP_KEY_FIELD, WireType::LengthDelimited);
        writer.write_length_delimited(key.as_bytes());
    }
    if !value.is_default() {
        writer.write_tag(MAP_VALUE_FIELD, kind.wire_type());
        write_value(writer, kind, value);
    }
}

fn map_entry_len(kind: &ValueKind, key: &str, value: &Value) -> usize {
    let mut len = 0;
    if !key.is_empty() {
        len += tag_len(MAP_KEY_FIELD) + delimited_len(key.len());
    }
    if !value.is_default() {
        len += tag_len(MAP_VALUE_FIELD) + value_len(kind, value);
    }
    len
}

/// Writes the bytes that follow a tag for one value.
///
/// The value variant was checked against `kind` when it was stored; the kind
/// only picks between encodings that share a variant.
#[allow(clippy::cast_sign_loss)]
fn write_value(writer: &mut WireWriter, kind: &ValueKind, value: &Value) {
    let scalar = scalar_kind(kind);
    match value {
        Value::Bool(v) => writer.write_varint(u64::from(*v)),
        Value::I32(v) => match scalar {
            Some(ScalarKind::SInt32) => writer.write_varint(zigzag32(*v)),
            Some(ScalarKind::SFixed32) => writer.write_fixed32(*v as u32),
            _ => writer.write_varint(sign_extend(*v)),
        },
        Value::I64(v) => match scalar {
            Some(ScalarKind::SInt64) => writer.write_varint(zigzag64(*v)),
            Some(ScalarKind::SFixed64) => writer.write_fixed64(*v as u64),
            _ => writer.write_varint(*v as u64),
        },
        Value::U32(v) => match scalar {
            Some(ScalarKind::Fixed32) => writer.write_fixed32(*v),
            _ => writer.write_varint(u64::from(*v)),
        },
        Value::U64(v) => match scalar {
            Some(ScalarKind::Fixed64) => writer.write_fixed64(*v),
            _ => writer.write_varint(*v),
        },
        Value::F32(v) => writer.write_fixed32(v.to_bits()),
        Value::F64(v) => writer.write_fixed64(v.to_bits()),
        Value::Enum(v) => writer.write_varint(sign_extend(*v)),
        Value::String(v) => writer.write_length_delimited(v.as_bytes()),
        Value::Bytes(v) => writer.write_length_delimited(v),
        Value::Message(message) => writer.write_length_delimited(&message.encode()),
    }
}

#[allow(clippy::cast_sign_loss)]
fn value_len(kind: &ValueKind, value: &Value) -> usize {
    let scalar = scalar_kind(kind);
    match value {
        Value::Bool(_) => 1,
        Value::I32(v) => match scalar {
            Some(ScalarKind::SInt32) => encoded_len(zigzag32(*v)),
            Some(ScalarKind::SFixed32) => 4,
            _ => encoded_len(sign_extend(*v)),
        },
        Value::I64(v) => match scalar {
            Some(ScalarKind::SInt64) => encoded_len(zigzag64(*v)),
            Some(ScalarKind::SFixed64) => 8,
            _ => encoded_len(*v as u64),
        },
        Value::U32(v) => match scalar {
            Some(ScalarKind::Fixed32) => 4,
            _ => encoded_len(u64::from(*v)),
        },
        Value::U64(v) => match scalar {
            Some(ScalarKind::Fixed64) => 8,
            _ => encoded_len(*v),
        },
        Value::F32(_) => 4,
        Value::F64(_) => 8,
        Value::Enum(v) => encoded_len(sign_extend(*v)),
        Value::String(v) => delimited_len(v.len()),
        Value::Bytes(v) => delimited_len(v.len()),
        Value::Message(message) => delimited_len(message.encoded_len()),
    }
}

const fn scalar_kind(kind: &ValueKind) -> Option<ScalarKind> {
    match kind {
        ValueKind::Scalar(scalar) => Some(*scalar),
        ValueKind::Message(_) => None,
    }
}

/// `int32` and enum values are sign-extended to 64 bits, so negatives take ten bytes.
#[allow(clippy::cast_sign_loss)]
const fn sign_extend(value: i32) -> u64 {
    value as i64 as u64
}

const fn tag_len(number: FieldNumber) -> usize {
    encoded_len((number as u64) << 3)
}

const fn delimited_len(payload: usize) -> usize {
    encoded_len(payload as u64) + payload
}
