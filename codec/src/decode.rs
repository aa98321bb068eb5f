//! Message decoding.

use std::sync::Arc;

use schema::{
    FieldKind, FieldNumber, FieldSchema, MessageSchema, ScalarKind, SchemaRegistry, ValueKind,
};
use varint::{unzigzag32, unzigzag64};
use wire::{WireReader, WireType};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::DecodeOptions;
use crate::message::Message;
use crate::value::Value;

/// Decodes a message of a registered type using default options.
///
/// Unknown field numbers are skipped. Any framing error aborts the whole
/// decode; no partial message is returned.
pub fn decode(registry: &SchemaRegistry, type_name: &str, bytes: &[u8]) -> CodecResult<Message> {
    decode_with(registry, type_name, bytes, &DecodeOptions::default())
}

/// Decodes a message of a registered type.
pub fn decode_with(
    registry: &SchemaRegistry,
    type_name: &str,
    bytes: &[u8],
    options: &DecodeOptions,
) -> CodecResult<Message> {
    let result = Decoder { registry, options }.decode_root(type_name, bytes);
    if let Err(err) = &result {
        tracing::debug!(type_name, error = %err, "decode failed");
    }
    result
}

struct Decoder<'a> {
    registry: &'a SchemaRegistry,
    options: &'a DecodeOptions,
}

impl Decoder<'_> {
    fn decode_root(&self, type_name: &str, bytes: &[u8]) -> CodecResult<Message> {
        let limit = self.options.limits.max_message_bytes;
        if bytes.len() > limit {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::MessageBytes,
                limit,
                actual: bytes.len(),
            });
        }
        let schema = self.schema(type_name)?;
        self.decode_message(schema, bytes, 0)
    }

    fn schema(&self, type_name: &str) -> CodecResult<&Arc<MessageSchema>> {
        self.registry
            .get(type_name)
            .ok_or_else(|| CodecError::UnknownMessageType {
                type_name: type_name.to_string(),
            })
    }

    fn decode_message(
        &self,
        schema: &Arc<MessageSchema>,
        bytes: &[u8],
        depth: usize,
    ) -> CodecResult<Message> {
        let limit = self.options.limits.max_depth;
        if depth > limit {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit,
                actual: depth,
            });
        }

        let mut message = Message::new(Arc::clone(schema));
        let mut reader = WireReader::new(bytes);
        loop {
            let start = reader.position();
            let Some(tag) = reader.next_field()? else {
                break;
            };
            if let Some(field) = schema.field(tag.field_number) {
                self.decode_field(&mut message, field, tag.wire_type, &mut reader, depth)?;
            } else {
                reader.skip_field(tag.wire_type)?;
                tracing::trace!(
                    type_name = schema.type_name(),
                    field = tag.field_number,
                    wire_type = tag.wire_type.raw(),
                    "skipped unknown field"
                );
                if self.options.retain_unknown_fields {
                    message
                        .unknown
                        .extend_from_slice(&bytes[start..reader.position()]);
                }
            }
        }
        Ok(message)
    }

    fn decode_field(
        &self,
        message: &mut Message,
        field: &FieldSchema,
        wire_type: WireType,
        reader: &mut WireReader<'_>,
        depth: usize,
    ) -> CodecResult<()> {
        let number = field.number;
        match &field.kind {
            FieldKind::Singular(kind) => {
                let value =
                    self.read_value(message.type_name(), number, kind, wire_type, reader, depth)?;
                message.store_singular(number, value);
            }
            FieldKind::Repeated(ValueKind::Scalar(kind))
                if kind.is_packable() && wire_type == WireType::LengthDelimited =>
            {
                let span = reader.read_length_delimited()?;
                let mut run = WireReader::new(span);
                while !run.is_empty() {
                    let value = read_scalar(message.type_name(), number, *kind, &mut run)?;
                    self.push_repeated(message, number, value)?;
                }
            }
            FieldKind::Repeated(kind) => {
                let value =
                    self.read_value(message.type_name(), number, kind, wire_type, reader, depth)?;
                self.push_repeated(message, number, value)?;
            }
            FieldKind::Map(kind) => {
                expect_wire_type(
                    message.type_name(),
                    number,
                    WireType::LengthDelimited,
                    wire_type,
                )?;
                let span = reader.read_length_delimited()?;
                let (key, value) =
                    self.read_map_entry(message.type_name(), number, kind, span, depth)?;
                let entries = message.map_slot(number);
                entries.set(key, value);
                let limit = self.options.limits.max_map_entries;
                if entries.len() > limit {
                    return Err(CodecError::LimitsExceeded {
                        kind: LimitKind::MapEntries,
                        limit,
                        actual: entries.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Reads one value of `kind` after checking the tag's wire type.
    fn read_value(
        &self,
        type_name: &str,
        number: FieldNumber,
        kind: &ValueKind,
        wire_type: WireType,
        reader: &mut WireReader<'_>,
        depth: usize,
    ) -> CodecResult<Value> {
        expect_wire_type(type_name, number, kind.wire_type(), wire_type)?;
        match kind {
            ValueKind::Scalar(scalar) => read_scalar(type_name, number, *scalar, reader),
            ValueKind::Message(target) => {
                let span = reader.read_length_delimited()?;
                let schema = self.schema(target)?;
                self.decode_message(schema, span, depth + 1)
                    .map(Value::Message)
            }
        }
    }

    /// Decodes one `{key = 1, value = 2}` entry. Missing parts take their defaults.
    fn read_map_entry(
        &self,
        type_name: &str,
        number: FieldNumber,
        kind: &ValueKind,
        span: &[u8],
        depth: usize,
    ) -> CodecResult<(String, Value)> {
        let mut key = None;
        let mut value = None;
        let mut entry = WireReader::new(span);
        while let Some(tag) = entry.next_field()? {
            match tag.field_number {
                1 => {
                    expect_wire_type(
                        type_name,
                        number,
                        WireType::LengthDelimited,
                        tag.wire_type,
                    )?;
                    let bytes = entry.read_length_delimited()?;
                    key = Some(utf8(type_name, number, bytes)?);
                }
                2 => {
                    value = Some(self.read_value(
                        type_name,
                        number,
                        kind,
                        tag.wire_type,
                        &mut entry,
                        depth,
                    )?);
                }
                _ => entry.skip_field(tag.wire_type)?,
            }
        }
        let value = match (value, kind) {
            (Some(value), _) => value,
            (None, ValueKind::Scalar(scalar)) => Value::default_for(*scalar),
            (None, ValueKind::Message(target)) => {
                Value::Message(Message::new(Arc::clone(self.schema(target)?)))
            }
        };
        Ok((key.unwrap_or_default(), value))
    }

    fn push_repeated(
        &self,
        message: &mut Message,
        number: FieldNumber,
        value: Value,
    ) -> CodecResult<()> {
        let values = message.repeated_slot(number);
        values.add(value);
        let limit = self.options.limits.max_repeated_elements;
        if values.len() > limit {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::RepeatedElements,
                limit,
                actual: values.len(),
            });
        }
        Ok(())
    }
}

/// Reads one scalar body. Integer narrowing follows proto3: the 64-bit
/// varint is truncated to 32 bits for `int32`, `uint32` and enums.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn read_scalar(
    type_name: &str,
    number: FieldNumber,
    kind: ScalarKind,
    reader: &mut WireReader<'_>,
) -> CodecResult<Value> {
    let value = match kind {
        ScalarKind::Int32 => Value::I32(reader.read_varint()? as i32),
        ScalarKind::Int64 => Value::I64(reader.read_varint()? as i64),
        ScalarKind::UInt32 => Value::U32(reader.read_varint()? as u32),
        ScalarKind::UInt64 => Value::U64(reader.read_varint()?),
        ScalarKind::SInt32 => Value::I32(unzigzag32(reader.read_varint()?)),
        ScalarKind::SInt64 => Value::I64(unzigzag64(reader.read_varint()?)),
        ScalarKind::Bool => Value::Bool(reader.read_varint()? != 0),
        ScalarKind::Enum => Value::Enum(reader.read_varint()? as i32),
        ScalarKind::Fixed32 => Value::U32(reader.read_fixed32()?),
        ScalarKind::Fixed64 => Value::U64(reader.read_fixed64()?),
        ScalarKind::SFixed32 => Value::I32(reader.read_fixed32()? as i32),
        ScalarKind::SFixed64 => Value::I64(reader.read_fixed64()? as i64),
        ScalarKind::Float => Value::F32(f32::from_bits(reader.read_fixed32()?)),
        ScalarKind::Double => Value::F64(f64::from_bits(reader.read_fixed64()?)),
        ScalarKind::String => {
            let bytes = reader.read_length_delimited()?;
            Value::String(utf8(type_name, number, bytes)?)
        }
        ScalarKind::Bytes => Value::Bytes(reader.read_length_delimited()?.to_vec()),
    };
    Ok(value)
}

fn utf8(type_name: &str, number: FieldNumber, bytes: &[u8]) -> CodecResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| CodecError::InvalidUtf8 {
            type_name: type_name.to_string(),
            field: number,
        })
}

fn expect_wire_type(
    type_name: &str,
    number: FieldNumber,
    expected: WireType,
    found: WireType,
) -> CodecResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(CodecError::WireTypeMismatch {
            type_name: type_name.to_string(),
            field: number,
            expected,
            found,
        })
    }
}
