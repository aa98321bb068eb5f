//! Field kinds and field descriptors.

use wire::WireType;

use crate::FieldNumber;

/// A proto3 scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ScalarKind {
    /// Varint, two's complement (negative values use ten bytes).
    Int32,
    Int64,
    UInt32,
    UInt64,
    /// Varint, zig-zag encoded.
    SInt32,
    SInt64,
    Bool,
    /// Open enum, carried as an `int32` varint.
    Enum,
    /// Four little-endian bytes.
    Fixed32,
    /// Eight little-endian bytes.
    Fixed64,
    SFixed32,
    SFixed64,
    Float,
    Double,
    /// Length-delimited UTF-8.
    String,
    /// Length-delimited raw bytes.
    Bytes,
}

impl ScalarKind {
    /// Returns the wire type a single value of this kind is encoded with.
    #[must_use]
    pub const fn wire_type(self) -> WireType {
        match self {
            Self::Int32
            | Self::Int64
            | Self::UInt32
            | Self::UInt64
            | Self::SInt32
            | Self::SInt64
            | Self::Bool
            | Self::Enum => WireType::Varint,
            Self::Fixed64 | Self::SFixed64 | Self::Double => WireType::Fixed64,
            Self::Fixed32 | Self::SFixed32 | Self::Float => WireType::Fixed32,
            Self::String | Self::Bytes => WireType::LengthDelimited,
        }
    }

    /// Returns `true` if repeated fields of this kind use packed encoding.
    #[must_use]
    pub const fn is_packable(self) -> bool {
        !matches!(self, Self::String | Self::Bytes)
    }

    /// Returns the `.proto` spelling of this type.
    #[must_use]
    pub const fn proto_name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::SInt32 => "sint32",
            Self::SInt64 => "sint64",
            Self::Bool => "bool",
            Self::Enum => "enum",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::SFixed32 => "sfixed32",
            Self::SFixed64 => "sfixed64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }
}

/// The type of a single value: a scalar or a nested message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ValueKind {
    Scalar(ScalarKind),
    /// A nested message, identified by its fully-qualified type name.
    Message(String),
}

impl ValueKind {
    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        match self {
            Self::Scalar(kind) => kind.wire_type(),
            Self::Message(_) => WireType::LengthDelimited,
        }
    }

    /// Returns the referenced message type name, if any.
    #[must_use]
    pub fn message_type(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Message(type_name) => Some(type_name),
        }
    }
}

/// Cardinality of a field.
///
/// Map keys are always `string`; only the value kind is described.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FieldKind {
    Singular(ValueKind),
    Repeated(ValueKind),
    Map(ValueKind),
}

impl FieldKind {
    /// Returns the kind of a single element (the value kind for maps).
    #[must_use]
    pub const fn value_kind(&self) -> &ValueKind {
        match self {
            Self::Singular(kind) | Self::Repeated(kind) | Self::Map(kind) => kind,
        }
    }

    /// Returns `true` for repeated scalar fields that are written packed.
    #[must_use]
    pub const fn is_packed(&self) -> bool {
        match self {
            Self::Repeated(ValueKind::Scalar(kind)) => kind.is_packable(),
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        matches!(self, Self::Repeated(_))
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }
}

/// A field descriptor: number, name, and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSchema {
    pub number: FieldNumber,
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSchema {
    /// Creates a field descriptor.
    #[must_use]
    pub fn new(number: FieldNumber, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            number,
            name: name.into(),
            kind,
        }
    }

    /// Creates a singular scalar field.
    #[must_use]
    pub fn scalar(number: FieldNumber, name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(number, name, FieldKind::Singular(ValueKind::Scalar(kind)))
    }

    /// Creates a singular message field.
    #[must_use]
    pub fn message(
        number: FieldNumber,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(
            number,
            name,
            FieldKind::Singular(ValueKind::Message(type_name.into())),
        )
    }

    /// Creates a repeated scalar field.
    #[must_use]
    pub fn repeated(number: FieldNumber, name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(number, name, FieldKind::Repeated(ValueKind::Scalar(kind)))
    }

    /// Creates a repeated message field.
    #[must_use]
    pub fn repeated_message(
        number: FieldNumber,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(
            number,
            name,
            FieldKind::Repeated(ValueKind::Message(type_name.into())),
        )
    }

    /// Creates a `map<string, V>` field with a scalar value kind.
    #[must_use]
    pub fn map(number: FieldNumber, name: impl Into<String>, value: ScalarKind) -> Self {
        Self::new(number, name, FieldKind::Map(ValueKind::Scalar(value)))
    }

    /// Creates a `map<string, M>` field with a message value kind.
    #[must_use]
    pub fn map_message(
        number: FieldNumber,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(
            number,
            name,
            FieldKind::Map(ValueKind::Message(type_name.into())),
        )
    }

    /// Returns the wire type this field is written with.
    ///
    /// Packed repeated fields and map entries are length-delimited.
    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        match &self.kind {
            FieldKind::Singular(kind) => kind.wire_type(),
            FieldKind::Repeated(ValueKind::Scalar(kind)) if kind.is_packable() => {
                WireType::LengthDelimited
            }
            FieldKind::Repeated(kind) => kind.wire_type(),
            FieldKind::Map(_) => WireType::LengthDelimited,
        }
    }
}
