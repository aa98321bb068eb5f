//! Append-only writer for proto3 wire bytes.

use varint::write_varint;

use crate::tag::{Tag, WireType};

/// An append-only sink for encoded fields.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    bytes: Vec<u8>,
}

impl WireWriter {
    /// Creates a new empty `WireWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `WireWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes `(field_number << 3) | wire_type` as a varint.
    pub fn write_tag(&mut self, field_number: u32, wire_type: WireType) {
        write_varint(Tag::new(field_number, wire_type).key(), &mut self.bytes);
    }

    /// Writes a varint.
    pub fn write_varint(&mut self, value: u64) {
        write_varint(value, &mut self.bytes);
    }

    /// Writes a little-endian `u32`.
    pub fn write_fixed32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `u64`.
    pub fn write_fixed64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a varint length prefix followed by `payload`.
    pub fn write_length_delimited(&mut self, payload: &[u8]) {
        write_varint(payload.len() as u64, &mut self.bytes);
        self.bytes.extend_from_slice(payload);
    }

    /// Writes a length-delimited field whose payload is produced by `write_body`.
    ///
    /// The payload is encoded into a temporary writer first so its length is
    /// known before the outer tag and length prefix are emitted.
    pub fn write_nested<F>(&mut self, field_number: u32, write_body: F)
    where
        F: FnOnce(&mut Self),
    {
        let mut body = Self::new();
        write_body(&mut body);
        self.write_tag(field_number, WireType::LengthDelimited);
        self.write_length_delimited(&body.bytes);
    }

    /// Appends already-encoded bytes verbatim.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}
