//! Varint decoding with bounded reads.

use crate::error::{VarintError, VarintResult};
use crate::MAX_VARINT_BYTES;

/// Reads one varint from the front of `src`.
///
/// Returns the decoded value and the number of bytes consumed. Never reads
/// past `src` and never consumes more than [`MAX_VARINT_BYTES`].
pub fn read_varint(src: &[u8]) -> VarintResult<(u64, usize)> {
    let mut value = 0u64;
    for (index, &byte) in src.iter().take(MAX_VARINT_BYTES).enumerate() {
        if index == MAX_VARINT_BYTES - 1 {
            // Only the lowest bit of the tenth byte is still inside 64 bits.
            if byte & 0x80 != 0 {
                return Err(VarintError::TooLong);
            }
            if byte > 0x01 {
                return Err(VarintError::Overflow { last_byte: byte });
            }
        }
        value |= u64::from(byte & 0x7F) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok((value, index + 1));
        }
    }
    Err(VarintError::Incomplete {
        consumed: src.len().min(MAX_VARINT_BYTES),
    })
}
