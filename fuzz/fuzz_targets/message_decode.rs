#![no_main]

use codec::{decode, decode_with, CodecLimits, DecodeOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bytes)) = data.split_first() else {
        return;
    };
    let registry = api_schema::api_registry();
    let type_name = api_schema::API_TYPE_NAMES[selector as usize % api_schema::API_TYPE_NAMES.len()];

    if let Ok(message) = decode(&registry, type_name, bytes) {
        // Anything accepted must re-encode to a fixed point.
        let encoded = message.encode();
        assert_eq!(encoded.len(), message.encoded_len());
        let again = decode(&registry, type_name, &encoded).expect("re-encoded message decodes");
        assert_eq!(again.encode(), encoded);
    }

    let options = DecodeOptions::with_limits(CodecLimits::for_testing()).retain_unknown_fields(true);
    if let Ok(message) = decode_with(&registry, type_name, bytes, &options) {
        let _ = message.encode();
    }
});
