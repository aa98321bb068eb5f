//! Error types for varint decoding.

use std::fmt;

/// Result type for varint operations.
pub type VarintResult<T> = Result<T, VarintError>;

/// Errors that can occur while decoding a varint.
///
/// Every variant describes a malformed varint; callers that only need the
/// category can treat them uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// The source ended before a terminating byte was read.
    Incomplete {
        /// Number of continuation bytes consumed before the source ran out.
        consumed: usize,
    },

    /// Ten bytes were consumed without a terminating byte.
    TooLong,

    /// The tenth byte carries bits that do not fit in 64 bits.
    Overflow {
        /// The offending tenth byte.
        last_byte: u8,
    },
}

impl fmt::Display for VarintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete { consumed } => {
                write!(
                    f,
                    "varint incomplete: source ended after {consumed} continuation bytes"
                )
            }
            Self::TooLong => {
                write!(
                    f,
                    "varint too long: no terminating byte within {} bytes",
                    crate::MAX_VARINT_BYTES
                )
            }
            Self::Overflow { last_byte } => {
                write!(f, "varint overflows 64 bits: final byte 0x{last_byte:02X}")
            }
        }
    }
}

impl std::error::Error for VarintError {}
