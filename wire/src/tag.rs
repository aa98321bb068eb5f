//! Field tags and wire types.

use crate::error::DecodeError;

/// Smallest assignable field number.
pub const MIN_FIELD_NUMBER: u32 = 1;

/// Largest assignable field number (29 bits).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// First field number reserved for the protobuf implementation.
pub const FIRST_RESERVED_FIELD_NUMBER: u32 = 19_000;

/// Last field number reserved for the protobuf implementation.
pub const LAST_RESERVED_FIELD_NUMBER: u32 = 19_999;

/// How the bytes following a tag are framed.
///
/// Wire types 3 and 4 (groups) are deprecated and not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// A single varint.
    Varint = 0,
    /// Eight little-endian bytes.
    Fixed64 = 1,
    /// A varint length followed by that many bytes.
    LengthDelimited = 2,
    /// Four little-endian bytes.
    Fixed32 = 5,
}

impl WireType {
    /// Parses a wire type from the low three bits of a tag.
    pub const fn from_raw(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            _ => Err(DecodeError::InvalidWireType { value }),
        }
    }

    /// Returns the raw three-bit value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// A decoded field key: field number plus wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    #[must_use]
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    /// Returns the varint value of this tag.
    #[must_use]
    pub const fn key(self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type.raw() as u64
    }

    /// Splits a raw tag varint into field number and wire type.
    pub fn from_key(key: u64) -> Result<Self, DecodeError> {
        let wire_type = WireType::from_raw((key & 0x7) as u8)?;
        let field_number = key >> 3;
        if field_number < u64::from(MIN_FIELD_NUMBER) || field_number > u64::from(MAX_FIELD_NUMBER)
        {
            return Err(DecodeError::InvalidFieldNumber {
                value: field_number,
            });
        }
        Ok(Self {
            field_number: field_number as u32,
            wire_type,
        })
    }
}
