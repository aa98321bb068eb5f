//! Protobuf wire framing for the pbwire codec.
//!
//! This crate handles the proto3 binary wire format at the level of tags and
//! framed values: it splits a buffer into `(field_number, wire_type)` records,
//! reads and writes the four supported wire types, and skips records it is told
//! nothing about. It does not know about schemas or messages, only the
//! structure of the byte stream.
//!
//! # Design Principles
//!
//! - **Standard wire format** - Tag is `(field_number << 3) | wire_type`, fixed-width values are little-endian.
//! - **Bounded decoding** - Every length prefix is validated against the bytes that remain.
//! - **Zero-copy reads** - Length-delimited payloads are returned as sub-slices of the input.
//! - **No domain knowledge** - This crate handles framing, not field semantics.

mod error;
mod reader;
mod tag;
mod writer;

pub use error::{DecodeError, WireResult};
pub use reader::WireReader;
pub use tag::{
    Tag, WireType, FIRST_RESERVED_FIELD_NUMBER, LAST_RESERVED_FIELD_NUMBER, MAX_FIELD_NUMBER,
    MIN_FIELD_NUMBER,
};
pub use writer::WireWriter;
