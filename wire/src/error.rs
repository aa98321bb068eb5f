//! Error types for wire format operations.

use std::fmt;

use varint::VarintError;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for wire framing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A varint (tag, length prefix, or value) was malformed.
    Varint(VarintError),

    /// A fixed-width read or length-delimited span needs more bytes than remain.
    Truncated { needed: usize, available: usize },

    /// The tag carried a wire type this format does not support.
    InvalidWireType { value: u8 },

    /// The tag carried field number zero or one beyond the 29-bit range.
    InvalidFieldNumber { value: u64 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Varint(err) => write!(f, "malformed varint: {err}"),
            Self::Truncated { needed, available } => {
                write!(
                    f,
                    "truncated message: need {needed} bytes, have {available}"
                )
            }
            Self::InvalidWireType { value } => {
                write!(f, "invalid wire type: {value}")
            }
            Self::InvalidFieldNumber { value } => {
                write!(f, "invalid field number: {value}")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Varint(e) => Some(e),
            _ => None,
        }
    }
}

impl From<VarintError> for DecodeError {
    fn from(err: VarintError) -> Self {
        Self::Varint(err)
    }
}
