//! Limits and options for message decoding.

/// Codec-specific limits enforced during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum size of the top-level input buffer.
    pub max_message_bytes: usize,
    /// Maximum nesting depth of embedded messages (top level is depth 0).
    pub max_depth: usize,
    /// Maximum number of elements in one repeated field.
    pub max_repeated_elements: usize,
    /// Maximum number of entries in one map field.
    pub max_map_entries: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_message_bytes: 64 * 1024 * 1024,
            max_depth: 100,
            max_repeated_elements: 1 << 24,
            max_map_entries: 1 << 20,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_message_bytes: 64 * 1024,
            max_depth: 8,
            max_repeated_elements: 256,
            max_map_entries: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_message_bytes: usize::MAX,
            max_depth: usize::MAX,
            max_repeated_elements: usize::MAX,
            max_map_entries: usize::MAX,
        }
    }
}

/// Options for [`decode_with`](crate::decode_with).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub limits: CodecLimits,
    /// Keep the raw bytes of unknown fields so they survive re-encoding.
    pub retain_unknown_fields: bool,
}

impl DecodeOptions {
    #[must_use]
    pub const fn with_limits(limits: CodecLimits) -> Self {
        Self {
            limits,
            retain_unknown_fields: false,
        }
    }

    #[must_use]
    pub const fn retain_unknown_fields(mut self, retain: bool) -> Self {
        self.retain_unknown_fields = retain;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = CodecLimits::default();
        assert_eq!(limits.max_depth, 100);
        assert!(limits.max_message_bytes >= 1024 * 1024);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = CodecLimits::for_testing();
        let default_limits = CodecLimits::default();
        assert!(test_limits.max_depth < default_limits.max_depth);
        assert!(test_limits.max_message_bytes < default_limits.max_message_bytes);
        assert!(test_limits.max_map_entries < default_limits.max_map_entries);
    }

    #[test]
    fn unlimited_limits() {
        let limits = CodecLimits::unlimited();
        assert_eq!(limits.max_depth, usize::MAX);
        assert_eq!(limits.max_message_bytes, usize::MAX);
    }

    #[test]
    fn default_options_drop_unknown_fields() {
        let options = DecodeOptions::default();
        assert!(!options.retain_unknown_fields);
        assert_eq!(options.limits, CodecLimits::default());
        assert!(options.retain_unknown_fields(true).retain_unknown_fields);
    }
}
