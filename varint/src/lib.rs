//! Base-128 varint primitives for the pbwire codec.
//!
//! This crate provides [`write_varint`] and [`read_varint`], the numeric encoding
//! every other layer of the protobuf wire format is built on, plus the zig-zag
//! mapping used by `sint32`/`sint64` fields.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - Decoding never reads past the provided slice.
//! - **No domain knowledge** - This crate knows nothing about tags, fields, or messages.
//! - **Explicit errors** - Malformed input returns a structured error, never panics.
//!
//! # Example
//!
//! ```
//! use varint::{read_varint, write_varint};
//!
//! let mut buf = Vec::new();
//! write_varint(300, &mut buf);
//! assert_eq!(buf, [0xAC, 0x02]);
//!
//! let (value, consumed) = read_varint(&buf).unwrap();
//! assert_eq!(value, 300);
//! assert_eq!(consumed, 2);
//! ```

mod decode;
mod encode;
mod error;
mod zigzag;

pub use decode::read_varint;
pub use encode::{encoded_len, write_varint};
pub use error::{VarintError, VarintResult};
pub use zigzag::{unzigzag32, unzigzag64, zigzag32, zigzag64};

/// Maximum number of bytes a 64-bit varint can occupy.
pub const MAX_VARINT_BYTES: usize = 10;
