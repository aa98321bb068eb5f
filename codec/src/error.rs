//! Error types for codec operations.

use std::fmt;

use schema::FieldNumber;
use varint::VarintError;
use wire::{DecodeError, WireType};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding, decoding, or editing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wire framing error (malformed varint, truncation, bad tag).
    Wire(DecodeError),

    /// A field arrived with a wire type its schema kind cannot use.
    WireTypeMismatch {
        type_name: String,
        field: FieldNumber,
        expected: WireType,
        found: WireType,
    },

    /// A `string` field carried bytes that are not valid UTF-8.
    InvalidUtf8 {
        type_name: String,
        field: FieldNumber,
    },

    /// The registry has no schema for the requested type.
    UnknownMessageType { type_name: String },

    /// A setter or getter named a field number the schema does not declare.
    UnknownField {
        type_name: String,
        field: FieldNumber,
    },

    /// A value does not match the field's declared kind.
    TypeMismatch {
        type_name: String,
        field: FieldNumber,
        expected: String,
        found: String,
    },

    /// A singular accessor was used on a repeated or map field, or vice versa.
    WrongCardinality {
        type_name: String,
        field: FieldNumber,
        expected: Cardinality,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Field cardinality named in [`CodecError::WrongCardinality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Singular,
    Repeated,
    Map,
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    MessageBytes,
    Depth,
    RepeatedElements,
    MapEntries,
}

/// Broad error category, matching the failure taxonomy callers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A varint ran past ten bytes or the input ended inside one.
    MalformedVarint,
    /// A length-delimited span or fixed-width value needs more bytes than remain.
    TruncatedMessage,
    /// The bytes are framed correctly but do not fit the schema.
    MalformedMessage,
    /// The registry cannot describe the requested type.
    Schema,
    /// An accessor was called in a way the schema does not allow.
    Usage,
    /// A configured limit was exceeded.
    Limits,
}

impl CodecError {
    /// Returns the broad category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Wire(DecodeError::Varint(_)) => ErrorKind::MalformedVarint,
            Self::Wire(DecodeError::Truncated { .. }) => ErrorKind::TruncatedMessage,
            Self::Wire(_) | Self::WireTypeMismatch { .. } | Self::InvalidUtf8 { .. } => {
                ErrorKind::MalformedMessage
            }
            Self::UnknownMessageType { .. } => ErrorKind::Schema,
            Self::UnknownField { .. }
            | Self::TypeMismatch { .. }
            | Self::WrongCardinality { .. } => ErrorKind::Usage,
            Self::LimitsExceeded { .. } => ErrorKind::Limits,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::WireTypeMismatch {
                type_name,
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field {field} of {type_name} expects wire type {}, found {}",
                    expected.raw(),
                    found.raw()
                )
            }
            Self::InvalidUtf8 { type_name, field } => {
                write!(f, "field {field} of {type_name} is not valid UTF-8")
            }
            Self::UnknownMessageType { type_name } => {
                write!(f, "unknown message type {type_name}")
            }
            Self::UnknownField { type_name, field } => {
                write!(f, "{type_name} has no field {field}")
            }
            Self::TypeMismatch {
                type_name,
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field {field} of {type_name} expected {expected} but got {found}"
                )
            }
            Self::WrongCardinality {
                type_name,
                field,
                expected,
            } => {
                write!(f, "field {field} of {type_name} is not {expected}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Singular => "singular",
            Self::Repeated => "repeated",
            Self::Map => "a map",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MessageBytes => "message bytes",
            Self::Depth => "nesting depth",
            Self::RepeatedElements => "repeated elements",
            Self::MapEntries => "map entries",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for CodecError {
    fn from(err: DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<VarintError> for CodecError {
    fn from(err: VarintError) -> Self {
        Self::Wire(DecodeError::Varint(err))
    }
}
