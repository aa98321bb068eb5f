//! Varint encoding into a growable byte sink.

/// Appends `value` to `out` as a base-128 varint.
///
/// Emits 7 bits per byte, low group first, with the continuation bit set on
/// every byte except the last.
pub fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Returns the number of bytes [`write_varint`] emits for `value`.
#[must_use]
pub const fn encoded_len(value: u64) -> usize {
    // ceil(significant_bits / 7), with zero still taking one byte.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varint(value, &mut buf);
        buf
    }

    #[test]
    fn write_zero() {
        assert_eq!(encode(0), vec![0x00]);
    }

    #[test]
    fn write_single_byte_max() {
        assert_eq!(encode(127), vec![0x7F]);
    }

    #[test]
    fn write_two_bytes() {
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
    }

    #[test]
    fn write_u64_max() {
        assert_eq!(
            encode(u64::MAX),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
    }

    #[test]
    fn write_appends_to_existing_buffer() {
        let mut buf = vec![0x08];
        write_varint(150, &mut buf);
        assert_eq!(buf, vec![0x08, 0x96, 0x01]);
    }

    #[test]
    fn encoded_len_boundaries() {
        assert_eq!(encoded_len(0), 1);
        assert_eq!(encoded_len(127), 1);
        assert_eq!(encoded_len(128), 2);
        assert_eq!(encoded_len(16_383), 2);
        assert_eq!(encoded_len(16_384), 3);
        assert_eq!(encoded_len(u64::from(u32::MAX)), 5);
        assert_eq!(encoded_len(u64::MAX), 10);
    }
}
