//! Field values.

use schema::{ScalarKind, ValueKind};

use crate::message::Message;

/// A single field value.
///
/// Integer variants are keyed by Rust type, not by wire encoding: an `I32`
/// is accepted by `int32`, `sint32` and `sfixed32` fields alike.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Raw enum number; values outside the declared enum are kept as-is.
    Enum(i32),
    String(String),
    Bytes(Vec<u8>),
    Message(Message),
}

impl Value {
    /// Returns the proto3 zero value for a scalar kind.
    #[must_use]
    pub const fn default_for(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Int32 | ScalarKind::SInt32 | ScalarKind::SFixed32 => Self::I32(0),
            ScalarKind::Int64 | ScalarKind::SInt64 | ScalarKind::SFixed64 => Self::I64(0),
            ScalarKind::UInt32 | ScalarKind::Fixed32 => Self::U32(0),
            ScalarKind::UInt64 | ScalarKind::Fixed64 => Self::U64(0),
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::Enum => Self::Enum(0),
            ScalarKind::Float => Self::F32(0.0),
            ScalarKind::Double => Self::F64(0.0),
            ScalarKind::String => Self::String(String::new()),
            ScalarKind::Bytes => Self::Bytes(Vec::new()),
        }
    }

    /// Returns `true` if this value is elided on the wire.
    ///
    /// Messages are never default: their presence is tracked by the slot.
    /// Negative zero floats are not default, since they differ in bits.
    #[must_use]
    pub fn is_default(&self) -> bool {
        match self {
            Self::Bool(v) => !v,
            Self::I32(v) | Self::Enum(v) => *v == 0,
            Self::I64(v) => *v == 0,
            Self::U32(v) => *v == 0,
            Self::U64(v) => *v == 0,
            Self::F32(v) => v.to_bits() == 0,
            Self::F64(v) => v.to_bits() == 0,
            Self::String(v) => v.is_empty(),
            Self::Bytes(v) => v.is_empty(),
            Self::Message(_) => false,
        }
    }

    /// Returns `true` if a field of the given kind can hold this value.
    #[must_use]
    pub fn fits(&self, kind: &ValueKind) -> bool {
        match (kind, self) {
            (ValueKind::Message(type_name), Self::Message(message)) => {
                message.type_name() == type_name
            }
            (ValueKind::Scalar(scalar), value) => value.fits_scalar(*scalar),
            (ValueKind::Message(_), _) => false,
        }
    }

    const fn fits_scalar(&self, kind: ScalarKind) -> bool {
        matches!(
            (kind, self),
            (
                ScalarKind::Int32 | ScalarKind::SInt32 | ScalarKind::SFixed32,
                Self::I32(_)
            ) | (
                ScalarKind::Int64 | ScalarKind::SInt64 | ScalarKind::SFixed64,
                Self::I64(_)
            ) | (ScalarKind::UInt32 | ScalarKind::Fixed32, Self::U32(_))
                | (ScalarKind::UInt64 | ScalarKind::Fixed64, Self::U64(_))
                | (ScalarKind::Bool, Self::Bool(_))
                | (ScalarKind::Enum, Self::Enum(_))
                | (ScalarKind::Float, Self::F32(_))
                | (ScalarKind::Double, Self::F64(_))
                | (ScalarKind::String, Self::String(_))
                | (ScalarKind::Bytes, Self::Bytes(_))
        )
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn type_label(&self) -> String {
        match self {
            Self::Bool(_) => "bool".to_string(),
            Self::I32(_) => "i32".to_string(),
            Self::I64(_) => "i64".to_string(),
            Self::U32(_) => "u32".to_string(),
            Self::U64(_) => "u64".to_string(),
            Self::F32(_) => "f32".to_string(),
            Self::F64(_) => "f64".to_string(),
            Self::Enum(_) => "enum".to_string(),
            Self::String(_) => "string".to_string(),
            Self::Bytes(_) => "bytes".to_string(),
            Self::Message(message) => format!("message {}", message.type_name()),
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns any signed integer or enum value widened to `i64`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::I32(v) | Self::Enum(v) => Some(*v as i64),
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns any unsigned integer value widened to `u64`.
    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::U32(v) => Some(*v as u64),
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns any floating-point value widened to `f64`.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_message_mut(&mut self) -> Option<&mut Message> {
        match self {
            Self::Message(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Message> for Value {
    fn from(value: Message) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_scalar_kind() {
        assert_eq!(Value::default_for(ScalarKind::SInt32), Value::I32(0));
        assert_eq!(Value::default_for(ScalarKind::Fixed64), Value::U64(0));
        assert_eq!(Value::default_for(ScalarKind::Enum), Value::Enum(0));
        assert_eq!(
            Value::default_for(ScalarKind::String),
            Value::String(String::new())
        );
        for kind in [
            ScalarKind::Int32,
            ScalarKind::Int64,
            ScalarKind::UInt32,
            ScalarKind::UInt64,
            ScalarKind::SInt32,
            ScalarKind::SInt64,
            ScalarKind::Bool,
            ScalarKind::Enum,
            ScalarKind::Fixed32,
            ScalarKind::Fixed64,
            ScalarKind::SFixed32,
            ScalarKind::SFixed64,
            ScalarKind::Float,
            ScalarKind::Double,
            ScalarKind::String,
            ScalarKind::Bytes,
        ] {
            let value = Value::default_for(kind);
            assert!(value.is_default(), "{kind:?} default must be elided");
            assert!(value.fits(&ValueKind::Scalar(kind)));
        }
    }

    #[test]
    fn negative_zero_is_not_default() {
        assert!(!Value::F64(-0.0).is_default());
        assert!(!Value::F32(-0.0).is_default());
        assert!(Value::F32(0.0).is_default());
    }

    #[test]
    fn fits_checks_variant_against_kind() {
        let sint = ValueKind::Scalar(ScalarKind::SInt64);
        assert!(Value::I64(-5).fits(&sint));
        assert!(!Value::I32(-5).fits(&sint));
        assert!(!Value::U64(5).fits(&sint));
        assert!(!Value::from("x").fits(&ValueKind::Message("model.Piped".into())));
    }

    #[test]
    fn widening_accessors() {
        assert_eq!(Value::I32(-3).as_int(), Some(-3));
        assert_eq!(Value::Enum(4).as_int(), Some(4));
        assert_eq!(Value::U32(7).as_uint(), Some(7));
        assert_eq!(Value::F32(1.5).as_float(), Some(1.5));
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::from("prod").as_str(), Some("prod"));
        assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn type_labels() {
        assert_eq!(Value::Bool(true).type_label(), "bool");
        assert_eq!(Value::Bytes(Vec::new()).type_label(), "bytes");
    }
}
