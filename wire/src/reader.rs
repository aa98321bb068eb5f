//! Cursor over an encoded protobuf buffer.

use varint::read_varint;

use crate::error::{DecodeError, WireResult};
use crate::tag::{Tag, WireType};

/// A reader over proto3 wire bytes.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input, and length-delimited payloads
/// are borrowed from the input rather than copied.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a new `WireReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads the next tag, or `None` at the end of the buffer.
    ///
    /// End of buffer is clean termination; a tag cut off mid-varint is an error.
    pub fn next_field(&mut self) -> WireResult<Option<Tag>> {
        if self.is_empty() {
            return Ok(None);
        }
        let key = self.read_varint()?;
        Tag::from_key(key).map(Some)
    }

    /// Reads a varint.
    pub fn read_varint(&mut self) -> WireResult<u64> {
        let (value, consumed) = read_varint(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Reads a little-endian `u32`.
    pub fn read_fixed32(&mut self) -> WireResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a little-endian `u64`.
    pub fn read_fixed64(&mut self) -> WireResult<u64> {
        let bytes = self.read_array::<8>()?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Reads a length prefix and returns the span it describes.
    pub fn read_length_delimited(&mut self) -> WireResult<&'a [u8]> {
        let len = self.read_varint()?;
        match usize::try_from(len) {
            Ok(len) => self.take(len),
            Err(_) => Err(DecodeError::Truncated {
                needed: usize::MAX,
                available: self.remaining(),
            }),
        }
    }

    /// Discards the value that follows a tag of the given wire type.
    pub fn skip_field(&mut self, wire_type: WireType) -> WireResult<()> {
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.take(8)?;
            }
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
            WireType::Fixed32 => {
                self.take(4)?;
            }
        }
        Ok(())
    }

    fn take(&mut self, len: usize) -> WireResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::Truncated {
                needed: len,
                available,
            });
        }
        let span = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(span)
    }

    fn read_array<const N: usize>(&mut self) -> WireResult<[u8; N]> {
        let span = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(span);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varint::VarintError;

    #[test]
    fn empty_reader() {
        let mut reader = WireReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.next_field().unwrap(), None);
    }

    #[test]
    fn next_field_reads_tag() {
        let mut reader = WireReader::new(&[0x12, 0x00]);
        let tag = reader.next_field().unwrap().unwrap();
        assert_eq!(tag, Tag::new(2, WireType::LengthDelimited));
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn next_field_rejects_truncated_tag() {
        let mut reader = WireReader::new(&[0x80]);
        let err = reader.next_field().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Varint(VarintError::Incomplete { .. })
        ));
    }

    #[test]
    fn read_fixed_values_little_endian() {
        let mut reader = WireReader::new(&[
            0x78, 0x56, 0x34, 0x12, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80,
        ]);
        assert_eq!(reader.read_fixed32().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_fixed64().unwrap(), 0x8000_0000_0000_0001);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_fixed32_truncated() {
        let mut reader = WireReader::new(&[0x01, 0x02]);
        let err = reader.read_fixed32().unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                needed: 4,
                available: 2
            }
        );
    }

    #[test]
    fn read_length_delimited_borrows_span() {
        let data = [0x03, b'a', b'b', b'c', 0x08];
        let mut reader = WireReader::new(&data);
        let span = reader.read_length_delimited().unwrap();
        assert_eq!(span, b"abc");
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn read_length_delimited_past_end_fails() {
        let mut reader = WireReader::new(&[0x05, b'a', b'b']);
        let err = reader.read_length_delimited().unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                needed: 5,
                available: 2
            }
        );
    }

    #[test]
    fn read_length_delimited_huge_length_fails() {
        let mut reader = WireReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        let err = reader.read_length_delimited().unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { available: 0, .. }));
    }

    #[test]
    fn skip_each_wire_type() {
        let data = [
            0x96, 0x01, // varint
            1, 2, 3, 4, 5, 6, 7, 8, // fixed64
            0x02, b'h', b'i', // length-delimited
            1, 2, 3, 4, // fixed32
        ];
        let mut reader = WireReader::new(&data);
        reader.skip_field(WireType::Varint).unwrap();
        assert_eq!(reader.position(), 2);
        reader.skip_field(WireType::Fixed64).unwrap();
        assert_eq!(reader.position(), 10);
        reader.skip_field(WireType::LengthDelimited).unwrap();
        assert_eq!(reader.position(), 13);
        reader.skip_field(WireType::Fixed32).unwrap();
        assert!(reader.is_empty());
    }

    #[test]
    fn skip_fixed64_truncated() {
        let mut reader = WireReader::new(&[0x00; 7]);
        let err = reader.skip_field(WireType::Fixed64).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { needed: 8, .. }));
    }
}
