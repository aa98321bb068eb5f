//! Schema-driven proto3 message encoding and decoding for the pbwire codec.
//!
//! This is the main codec crate that ties together varint, wire, and schema
//! to provide one generic encode/decode engine for every registered message
//! type. Message types are field tables; there is no per-type generated code.
//!
//! # Features
//!
//! - Scalar fields with proto3 default-value elision
//! - Embedded messages with explicit presence (wrapper types)
//! - Repeated fields, packed on encode, packed or unpacked on decode
//! - `map<string, V>` fields with last-write-wins upsert
//! - Forward-compatible decoding: unknown fields are skipped, optionally retained
//!
//! # Design Principles
//!
//! - **Correctness first** - All invariants are documented and tested.
//! - **Explicit registry** - Decode takes the schema registry as an argument.
//! - **Deterministic** - Same message produces the same bytes.
//! - **All-or-nothing decode** - A framing error never yields a partial message.

mod decode;
mod encode;
mod error;
mod limits;
mod map;
mod message;
mod repeated;
mod value;

pub use decode::{decode, decode_with};
pub use error::{Cardinality, CodecError, CodecResult, ErrorKind, LimitKind};
pub use limits::{CodecLimits, DecodeOptions};
pub use map::MapField;
pub use message::Message;
pub use repeated::RepeatedField;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FieldSchema, MessageSchema, ScalarKind, SchemaRegistry};

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = CodecLimits::default();
        let _ = DecodeOptions::default();
        let _ = RepeatedField::<Value>::new();
        let _ = MapField::<String, Value>::new();
        let _ = Value::Bool(true);
        let _ = ErrorKind::MalformedVarint;
        let _ = LimitKind::Depth;
        let _ = Cardinality::Map;

        let _: CodecResult<()> = Ok(());
    }

    #[test]
    fn encode_decode_basic_usage() {
        let registry = SchemaRegistry::builder()
            .message(
                MessageSchema::builder("RegisterPipedRequest")
                    .field(FieldSchema::scalar(1, "name", ScalarKind::String))
                    .field(FieldSchema::scalar(2, "desc", ScalarKind::String))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let mut request = Message::for_type(&registry, "RegisterPipedRequest").unwrap();
        request.set(1, "register").unwrap();
        let bytes = request.encode();

        let decoded = decode(&registry, "RegisterPipedRequest", &bytes).unwrap();
        assert_eq!(decoded, request);
        assert_eq!(decoded.get_str(1).unwrap(), "register");
    }
}
