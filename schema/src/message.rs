//! Message schemas.

use std::collections::{HashMap, HashSet};

use wire::{
    FIRST_RESERVED_FIELD_NUMBER, LAST_RESERVED_FIELD_NUMBER, MAX_FIELD_NUMBER, MIN_FIELD_NUMBER,
};

use crate::error::{SchemaError, SchemaResult};
use crate::field::FieldSchema;
use crate::FieldNumber;

/// The field table of one message type.
///
/// Fields keep declaration order, which is also the order they are encoded in.
/// Lookup by field number goes through an index built at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MessageDef", into = "MessageDef")
)]
pub struct MessageSchema {
    type_name: String,
    fields: Vec<FieldSchema>,
    by_number: HashMap<FieldNumber, usize>,
}

impl MessageSchema {
    /// Creates and validates a message schema.
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldSchema>) -> SchemaResult<Self> {
        let type_name = type_name.into();
        validate(&type_name, &fields)?;
        let by_number = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.number, index))
            .collect();
        Ok(Self {
            type_name,
            fields,
            by_number,
        })
    }

    /// Starts a schema builder.
    #[must_use]
    pub fn builder(type_name: impl Into<String>) -> MessageSchemaBuilder {
        MessageSchemaBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the fully-qualified type name (e.g. `model.Piped`).
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field by number.
    #[must_use]
    pub fn field(&self, number: FieldNumber) -> Option<&FieldSchema> {
        self.by_number
            .get(&number)
            .and_then(|&index| self.fields.get(index))
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the message types this schema refers to, with the
    /// number of the referring field.
    pub fn message_references(&self) -> impl Iterator<Item = (FieldNumber, &str)> {
        self.fields.iter().filter_map(|field| {
            field
                .kind
                .value_kind()
                .message_type()
                .map(|target| (field.number, target))
        })
    }
}

/// Builder for [`MessageSchema`].
#[derive(Debug, Clone)]
pub struct MessageSchemaBuilder {
    type_name: String,
    fields: Vec<FieldSchema>,
}

impl MessageSchemaBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates and builds the schema.
    pub fn build(self) -> SchemaResult<MessageSchema> {
        MessageSchema::new(self.type_name, self.fields)
    }
}

fn validate(type_name: &str, fields: &[FieldSchema]) -> SchemaResult<()> {
    if type_name.is_empty() {
        return Err(SchemaError::EmptyTypeName);
    }

    let mut numbers = HashSet::with_capacity(fields.len());
    let mut names = HashSet::with_capacity(fields.len());
    for field in fields {
        if !(MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&field.number) {
            return Err(SchemaError::InvalidFieldNumber {
                type_name: type_name.to_string(),
                field: field.number,
            });
        }
        if (FIRST_RESERVED_FIELD_NUMBER..=LAST_RESERVED_FIELD_NUMBER).contains(&field.number) {
            return Err(SchemaError::ReservedFieldNumber {
                type_name: type_name.to_string(),
                field: field.number,
            });
        }
        if !numbers.insert(field.number) {
            return Err(SchemaError::DuplicateFieldNumber {
                type_name: type_name.to_string(),
                field: field.number,
            });
        }
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateFieldName {
                type_name: type_name.to_string(),
                name: field.name.clone(),
            });
        }
        if field.kind.value_kind().message_type() == Some("") {
            return Err(SchemaError::EmptyTypeName);
        }
    }
    Ok(())
}

/// Serialized form of a [`MessageSchema`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MessageDef {
    type_name: String,
    fields: Vec<FieldSchema>,
}

#[cfg(feature = "serde")]
impl TryFrom<MessageDef> for MessageSchema {
    type Error = SchemaError;

    fn try_from(def: MessageDef) -> SchemaResult<Self> {
        Self::new(def.type_name, def.fields)
    }
}

#[cfg(feature = "serde")]
impl From<MessageSchema> for MessageDef {
    fn from(schema: MessageSchema) -> Self {
        Self {
            type_name: schema.type_name,
            fields: schema.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ScalarKind;

    fn piped_key() -> MessageSchema {
        MessageSchema::builder("model.PipedKey")
            .field(FieldSchema::scalar(1, "hash", ScalarKind::String))
            .field(FieldSchema::scalar(2, "creator", ScalarKind::String))
            .field(FieldSchema::scalar(10, "created_at", ScalarKind::Int64))
            .build()
            .unwrap()
    }

    #[test]
    fn field_lookup_by_number_and_name() {
        let schema = piped_key();
        assert_eq!(schema.type_name(), "model.PipedKey");
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field(10).unwrap().name, "created_at");
        assert_eq!(schema.field_by_name("creator").unwrap().number, 2);
        assert!(schema.field(3).is_none());
        assert!(schema.field_by_name("missing").is_none());
    }

    #[test]
    fn fields_keep_declaration_order() {
        let schema = piped_key();
        let numbers: Vec<_> = schema.fields().iter().map(|f| f.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn empty_schema_is_valid() {
        let schema = MessageSchema::builder("google.protobuf.Empty")
            .build()
            .unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn rejects_empty_type_name() {
        let err = MessageSchema::builder("").build().unwrap_err();
        assert_eq!(err, SchemaError::EmptyTypeName);
    }

    #[test]
    fn rejects_empty_message_reference() {
        let err = MessageSchema::builder("Outer")
            .field(FieldSchema::message(1, "inner", ""))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyTypeName);
    }

    #[test]
    fn rejects_field_zero() {
        let err = MessageSchema::builder("Bad")
            .field(FieldSchema::scalar(0, "zero", ScalarKind::Bool))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidFieldNumber { field: 0, .. }
        ));
    }

    #[test]
    fn rejects_field_number_above_29_bits() {
        let err = MessageSchema::builder("Bad")
            .field(FieldSchema::scalar(1 << 29, "big", ScalarKind::Bool))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFieldNumber { .. }));
    }

    #[test]
    fn rejects_reserved_field_numbers() {
        for number in [19_000, 19_500, 19_999] {
            let err = MessageSchema::builder("Bad")
                .field(FieldSchema::scalar(number, "reserved", ScalarKind::Bool))
                .build()
                .unwrap_err();
            assert!(matches!(err, SchemaError::ReservedFieldNumber { .. }));
        }
        assert!(MessageSchema::builder("Ok")
            .field(FieldSchema::scalar(18_999, "a", ScalarKind::Bool))
            .field(FieldSchema::scalar(20_000, "b", ScalarKind::Bool))
            .build()
            .is_ok());
    }

    #[test]
    fn rejects_duplicate_field_number() {
        let err = MessageSchema::builder("Bad")
            .field(FieldSchema::scalar(1, "a", ScalarKind::Bool))
            .field(FieldSchema::scalar(1, "b", ScalarKind::Bool))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateFieldNumber {
                type_name: "Bad".to_string(),
                field: 1
            }
        );
    }

    #[test]
    fn rejects_duplicate_field_name() {
        let err = MessageSchema::builder("Bad")
            .field(FieldSchema::scalar(1, "a", ScalarKind::Bool))
            .field(FieldSchema::scalar(2, "a", ScalarKind::Bool))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldName { .. }));
    }

    #[test]
    fn message_references_lists_nested_types() {
        let schema = MessageSchema::builder("ListPipedsResponse")
            .field(FieldSchema::repeated_message(1, "pipeds", "model.Piped"))
            .field(FieldSchema::scalar(2, "cursor", ScalarKind::String))
            .build()
            .unwrap();
        let refs: Vec<_> = schema.message_references().collect();
        assert_eq!(refs, vec![(1, "model.Piped")]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_json_roundtrip_rebuilds_index() {
        let schema = piped_key();
        let json = serde_json::to_string(&schema).unwrap();
        let back: MessageSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
        assert_eq!(back.field(10).unwrap().name, "created_at");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_json_rejects_invalid_schema() {
        let json = r#"{
            "type_name": "Bad",
            "fields": [
                {"number": 1, "name": "a", "kind": {"singular": {"scalar": "bool"}}},
                {"number": 1, "name": "b", "kind": {"singular": {"scalar": "bool"}}}
            ]
        }"#;
        assert!(serde_json::from_str::<MessageSchema>(json).is_err());
    }
}
