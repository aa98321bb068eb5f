//! Deterministic schema hashing.

use blake3::Hasher;

use crate::field::{FieldKind, ScalarKind, ValueKind};
use crate::message::MessageSchema;

/// Computes a deterministic hash of one message schema.
///
/// Covers the type name and every field's number, name, and kind.
/// Two peers with equal hashes agree on the wire layout of the message.
#[must_use]
pub fn schema_hash(schema: &MessageSchema) -> u64 {
    let mut hasher = Hasher::new();
    write_message(&mut hasher, schema);
    finish(&hasher)
}

pub(crate) fn registry_fingerprint<'a>(schemas: impl Iterator<Item = &'a MessageSchema>) -> u64 {
    let mut hasher = Hasher::new();
    for schema in schemas {
        write_message(&mut hasher, schema);
    }
    finish(&hasher)
}

fn write_message(hasher: &mut Hasher, schema: &MessageSchema) {
    write_str(hasher, schema.type_name());
    write_len(hasher, schema.fields().len());
    for field in schema.fields() {
        write_u32(hasher, field.number);
        write_str(hasher, &field.name);
        write_field_kind(hasher, &field.kind);
    }
}

fn write_field_kind(hasher: &mut Hasher, kind: &FieldKind) {
    match kind {
        FieldKind::Singular(value) => {
            write_u8(hasher, 0);
            write_value_kind(hasher, value);
        }
        FieldKind::Repeated(value) => {
            write_u8(hasher, 1);
            write_value_kind(hasher, value);
        }
        FieldKind::Map(value) => {
            write_u8(hasher, 2);
            write_value_kind(hasher, value);
        }
    }
}

fn write_value_kind(hasher: &mut Hasher, kind: &ValueKind) {
    match kind {
        ValueKind::Scalar(scalar) => {
            write_u8(hasher, 0);
            write_u8(hasher, scalar_code(*scalar));
        }
        ValueKind::Message(type_name) => {
            write_u8(hasher, 1);
            write_str(hasher, type_name);
        }
    }
}

const fn scalar_code(kind: ScalarKind) -> u8 {
    match kind {
        ScalarKind::Int32 => 0,
        ScalarKind::Int64 => 1,
        ScalarKind::UInt32 => 2,
        ScalarKind::UInt64 => 3,
        ScalarKind::SInt32 => 4,
        ScalarKind::SInt64 => 5,
        ScalarKind::Bool => 6,
        ScalarKind::Enum => 7,
        ScalarKind::Fixed32 => 8,
        ScalarKind::Fixed64 => 9,
        ScalarKind::SFixed32 => 10,
        ScalarKind::SFixed64 => 11,
        ScalarKind::Float => 12,
        ScalarKind::Double => 13,
        ScalarKind::String => 14,
        ScalarKind::Bytes => 15,
    }
}

fn finish(hasher: &Hasher) -> u64 {
    let hash = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(out)
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

fn write_len(hasher: &mut Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}
