//! Zig-zag mapping between signed and unsigned integers.
//!
//! Small magnitudes of either sign map to small unsigned values, so `sint32` and
//! `sint64` fields stay short on the wire.

/// Maps an `i32` onto a `u64` suitable for [`write_varint`](crate::write_varint).
#[must_use]
pub const fn zigzag32(value: i32) -> u64 {
    (((value << 1) ^ (value >> 31)) as u32) as u64
}

/// Inverts [`zigzag32`], truncating the raw value to 32 bits first.
#[must_use]
pub const fn unzigzag32(raw: u64) -> i32 {
    let raw = raw as u32;
    ((raw >> 1) as i32) ^ -((raw & 1) as i32)
}

/// Maps an `i64` onto a `u64`.
#[must_use]
pub const fn zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverts [`zigzag64`].
#[must_use]
pub const fn unzigzag64(raw: u64) -> i64 {
    ((raw >> 1) as i64) ^ -((raw & 1) as i64)
}
