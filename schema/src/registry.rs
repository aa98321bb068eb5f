//! Registry of message schemas keyed by type name.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult};
use crate::hash::{registry_fingerprint, schema_hash};
use crate::message::MessageSchema;

/// An immutable set of message schemas with all type references resolved.
///
/// Built once at program start and shared by reference with the codec.
/// Schemas are held behind `Arc` so decoded messages can keep their schema alive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<MessageSchema>", into = "Vec<MessageSchema>")
)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<MessageSchema>>,
}

impl SchemaRegistry {
    /// Starts a registry builder.
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Builds a registry from a list of schemas.
    ///
    /// Fails on duplicate type names or on any message-typed field whose
    /// target is not in the list.
    pub fn new(schemas: Vec<MessageSchema>) -> SchemaResult<Self> {
        let mut by_name = BTreeMap::new();
        for schema in schemas {
            let type_name = schema.type_name().to_string();
            if by_name.contains_key(&type_name) {
                return Err(SchemaError::DuplicateMessage { type_name });
            }
            by_name.insert(type_name, Arc::new(schema));
        }

        for schema in by_name.values() {
            for (field, target) in schema.message_references() {
                if !by_name.contains_key(target) {
                    return Err(SchemaError::UnresolvedMessageType {
                        type_name: schema.type_name().to_string(),
                        field,
                        target: target.to_string(),
                    });
                }
            }
        }

        let registry = Self { schemas: by_name };
        tracing::debug!(
            messages = registry.len(),
            fingerprint = %format_args!("{:016x}", registry.fingerprint()),
            "schema registry built"
        );
        Ok(registry)
    }

    /// Looks up a schema by fully-qualified type name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&Arc<MessageSchema>> {
        self.schemas.get(type_name)
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates over registered type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Iterates over registered schemas in type-name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<MessageSchema>> {
        self.schemas.values()
    }

    /// Returns the hash of one registered schema.
    #[must_use]
    pub fn schema_hash(&self, type_name: &str) -> Option<u64> {
        self.get(type_name).map(|schema| schema_hash(schema))
    }

    /// Returns a deterministic hash over every registered schema.
    ///
    /// Independent of registration order.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        registry_fingerprint(self.schemas.values().map(AsRef::as_ref))
    }
}

/// Builder for [`SchemaRegistry`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistryBuilder {
    schemas: Vec<MessageSchema>,
}

impl SchemaRegistryBuilder {
    /// Registers a message schema.
    #[must_use]
    pub fn message(mut self, schema: MessageSchema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Registers several message schemas.
    #[must_use]
    pub fn messages(mut self, schemas: impl IntoIterator<Item = MessageSchema>) -> Self {
        self.schemas.extend(schemas);
        self
    }

    /// Resolves references and builds the registry.
    pub fn build(self) -> SchemaResult<SchemaRegistry> {
        SchemaRegistry::new(self.schemas)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<Vec<MessageSchema>> for SchemaRegistry {
    type Error = SchemaError;

    fn try_from(schemas: Vec<MessageSchema>) -> SchemaResult<Self> {
        Self::new(schemas)
    }
}

#[cfg(feature = "serde")]
impl From<SchemaRegistry> for Vec<MessageSchema> {
    fn from(registry: SchemaRegistry) -> Self {
        registry
            .schemas
            .into_values()
            .map(|schema| MessageSchema::clone(&schema))
            .collect()
    }
}
