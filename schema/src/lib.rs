//! Message schemas and field descriptors for the pbwire codec.
//!
//! This crate defines how a protobuf message type is described to the codec:
//! - Field descriptors (number, name, scalar/message kind, singular/repeated/map)
//! - Message schemas as ordered field tables
//! - An explicit registry mapping type names to schemas
//! - Deterministic schema fingerprints
//!
//! # Design Principles
//!
//! - **Schemas are data** - A message type is a field table, not generated code.
//! - **Explicit registry** - Schemas are registered at program start and passed to the decoder; no global state.
//! - **Validated once** - Field numbers and type references are checked when the registry is built.
//! - **Deterministic hashing** - The fingerprint is stable given the same field tables.

mod error;
mod field;
mod hash;
mod message;
mod registry;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldKind, FieldSchema, ScalarKind, ValueKind};
pub use hash::schema_hash;
pub use message::{MessageSchema, MessageSchemaBuilder};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};

/// A protobuf field number.
pub type FieldNumber = u32;
