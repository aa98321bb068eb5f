//! Schema-bound message container.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use schema::{
    FieldKind, FieldNumber, FieldSchema, MessageSchema, ScalarKind, SchemaRegistry, ValueKind,
};

use crate::error::{Cardinality, CodecError, CodecResult};
use crate::map::MapField;
use crate::repeated::RepeatedField;
use crate::value::Value;

static EMPTY_REPEATED: RepeatedField<Value> = RepeatedField::new();
static EMPTY_MAP: MapField<String, Value> = MapField::new();

/// A message instance bound to its schema.
///
/// Holds field values keyed by field number. Singular fields are present only
/// when set: scalars equal to their zero value are never stored, so an unset
/// scalar and a zero scalar are the same state. Submessage fields are present
/// whenever explicitly set, which is what gives wrapper types their meaning.
/// Repeated and map slots always exist and may be empty.
///
/// A message owns its submessages outright; nothing is shared between parents.
#[derive(Clone)]
pub struct Message {
    pub(crate) schema: Arc<MessageSchema>,
    pub(crate) singular: BTreeMap<FieldNumber, Value>,
    pub(crate) repeated: BTreeMap<FieldNumber, RepeatedField<Value>>,
    pub(crate) maps: BTreeMap<FieldNumber, MapField<String, Value>>,
    pub(crate) unknown: Vec<u8>,
}

impl Message {
    /// Creates an empty message of the given schema.
    #[must_use]
    pub fn new(schema: Arc<MessageSchema>) -> Self {
        let mut repeated = BTreeMap::new();
        let mut maps = BTreeMap::new();
        for field in schema.fields() {
            match field.kind {
                FieldKind::Singular(_) => {}
                FieldKind::Repeated(_) => {
                    repeated.insert(field.number, RepeatedField::new());
                }
                FieldKind::Map(_) => {
                    maps.insert(field.number, MapField::new());
                }
            }
        }
        Self {
            schema,
            singular: BTreeMap::new(),
            repeated,
            maps,
            unknown: Vec::new(),
        }
    }

    /// Creates an empty message of a registered type.
    pub fn for_type(registry: &SchemaRegistry, type_name: &str) -> CodecResult<Self> {
        registry
            .get(type_name)
            .map(|schema| Self::new(Arc::clone(schema)))
            .ok_or_else(|| CodecError::UnknownMessageType {
                type_name: type_name.to_string(),
            })
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<MessageSchema> {
        &self.schema
    }

    /// Raw bytes of fields the schema does not declare.
    ///
    /// Empty unless the message was decoded with
    /// [`DecodeOptions::retain_unknown_fields`](crate::DecodeOptions).
    /// Unknown fields inside map entries are always dropped, since an entry
    /// is rebuilt from its key and value on encode.
    #[must_use]
    pub fn unknown_fields(&self) -> &[u8] {
        &self.unknown
    }

    pub fn clear_unknown_fields(&mut self) {
        self.unknown.clear();
    }

    /// Sets a singular field.
    ///
    /// Setting a scalar to its zero value clears the field.
    pub fn set(&mut self, number: FieldNumber, value: impl Into<Value>) -> CodecResult<()> {
        let value = value.into();
        let schema = Arc::clone(&self.schema);
        let field = lookup(&schema, number)?;
        let kind = singular_kind(&schema, field)?;
        check_value(&schema, field, kind, &value)?;
        self.store_singular(number, value);
        Ok(())
    }

    /// Returns the stored value of a singular field, or `None` if unset.
    #[must_use]
    pub fn get(&self, number: FieldNumber) -> Option<&Value> {
        self.singular.get(&number)
    }

    /// Returns a scalar field's value, or its zero value if unset.
    pub fn get_or_default(&self, number: FieldNumber) -> CodecResult<Value> {
        let field = lookup(&self.schema, number)?;
        match singular_kind(&self.schema, field)? {
            ValueKind::Scalar(kind) => Ok(self
                .singular
                .get(&number)
                .cloned()
                .unwrap_or_else(|| Value::default_for(*kind))),
            kind @ ValueKind::Message(_) => Err(type_mismatch(
                &self.schema,
                field,
                "scalar".to_string(),
                expected_label(kind),
            )),
        }
    }

    /// Returns `true` if the field would be written on encode.
    ///
    /// Submessages: explicitly set. Scalars: non-default. Repeated and map
    /// fields: non-empty. Undeclared numbers are never present.
    #[must_use]
    pub fn has(&self, number: FieldNumber) -> bool {
        match self.schema.field(number).map(|field| &field.kind) {
            None => false,
            Some(FieldKind::Singular(_)) => self.singular.contains_key(&number),
            Some(FieldKind::Repeated(_)) => self
                .repeated
                .get(&number)
                .is_some_and(|values| !values.is_empty()),
            Some(FieldKind::Map(_)) => self
                .maps
                .get(&number)
                .is_some_and(|entries| !entries.is_empty()),
        }
    }

    /// Resets a field to its unset state.
    pub fn clear(&mut self, number: FieldNumber) -> CodecResult<()> {
        let schema = Arc::clone(&self.schema);
        match lookup(&schema, number)?.kind {
            FieldKind::Singular(_) => {
                self.singular.remove(&number);
            }
            FieldKind::Repeated(_) => self.repeated_slot(number).clear(),
            FieldKind::Map(_) => self.map_slot(number).clear(),
        }
        Ok(())
    }

    pub fn get_str(&self, number: FieldNumber) -> CodecResult<&str> {
        let value = self.typed_scalar(number, "string", |kind| kind == ScalarKind::String)?;
        Ok(value.and_then(Value::as_str).unwrap_or(""))
    }

    pub fn get_bool(&self, number: FieldNumber) -> CodecResult<bool> {
        let value = self.typed_scalar(number, "bool", |kind| kind == ScalarKind::Bool)?;
        Ok(value.and_then(Value::as_bool).unwrap_or(false))
    }

    /// Reads any signed integer or enum field as `i64`.
    pub fn get_int(&self, number: FieldNumber) -> CodecResult<i64> {
        let value = self.typed_scalar(number, "signed integer", |kind| {
            matches!(
                kind,
                ScalarKind::Int32
                    | ScalarKind::Int64
                    | ScalarKind::SInt32
                    | ScalarKind::SInt64
                    | ScalarKind::SFixed32
                    | ScalarKind::SFixed64
                    | ScalarKind::Enum
            )
        })?;
        Ok(value.and_then(Value::as_int).unwrap_or(0))
    }

    /// Reads any unsigned integer field as `u64`.
    pub fn get_uint(&self, number: FieldNumber) -> CodecResult<u64> {
        let value = self.typed_scalar(number, "unsigned integer", |kind| {
            matches!(
                kind,
                ScalarKind::UInt32 | ScalarKind::UInt64 | ScalarKind::Fixed32 | ScalarKind::Fixed64
            )
        })?;
        Ok(value.and_then(Value::as_uint).unwrap_or(0))
    }

    /// Reads a `float` or `double` field as `f64`.
    pub fn get_float(&self, number: FieldNumber) -> CodecResult<f64> {
        let value = self.typed_scalar(number, "floating point", |kind| {
            matches!(kind, ScalarKind::Float | ScalarKind::Double)
        })?;
        Ok(value.and_then(Value::as_float).unwrap_or(0.0))
    }

    pub fn get_bytes(&self, number: FieldNumber) -> CodecResult<&[u8]> {
        let value = self.typed_scalar(number, "bytes", |kind| kind == ScalarKind::Bytes)?;
        Ok(value.and_then(Value::as_bytes).unwrap_or(&[]))
    }

    /// Returns a submessage field, or `None` if it was never set.
    pub fn get_message(&self, number: FieldNumber) -> CodecResult<Option<&Message>> {
        self.message_field(number)?;
        Ok(self.singular.get(&number).and_then(Value::as_message))
    }

    pub fn get_message_mut(&mut self, number: FieldNumber) -> CodecResult<Option<&mut Message>> {
        self.message_field(number)?;
        Ok(self
            .singular
            .get_mut(&number)
            .and_then(Value::as_message_mut))
    }

    /// Returns the elements of a repeated field.
    pub fn repeated(&self, number: FieldNumber) -> CodecResult<&RepeatedField<Value>> {
        let field = lookup(&self.schema, number)?;
        repeated_kind(&self.schema, field)?;
        Ok(self.repeated.get(&number).unwrap_or(&EMPTY_REPEATED))
    }

    /// Appends an element to a repeated field.
    pub fn add(&mut self, number: FieldNumber, value: impl Into<Value>) -> CodecResult<()> {
        let value = value.into();
        let schema = Arc::clone(&self.schema);
        let field = lookup(&schema, number)?;
        let kind = repeated_kind(&schema, field)?;
        check_value(&schema, field, kind, &value)?;
        self.repeated_slot(number).add(value);
        Ok(())
    }

    /// Replaces every element of a repeated field.
    ///
    /// Nothing is changed if any element has the wrong type.
    pub fn set_all<V>(
        &mut self,
        number: FieldNumber,
        values: impl IntoIterator<Item = V>,
    ) -> CodecResult<()>
    where
        V: Into<Value>,
    {
        let schema = Arc::clone(&self.schema);
        let field = lookup(&schema, number)?;
        let kind = repeated_kind(&schema, field)?;
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        for value in &values {
            check_value(&schema, field, kind, value)?;
        }
        self.repeated_slot(number).set_all(values);
        Ok(())
    }

    /// Returns the entries of a map field.
    pub fn map(&self, number: FieldNumber) -> CodecResult<&MapField<String, Value>> {
        let field = lookup(&self.schema, number)?;
        map_kind(&self.schema, field)?;
        Ok(self.maps.get(&number).unwrap_or(&EMPTY_MAP))
    }

    /// Inserts or replaces a map entry, returning the previous value.
    pub fn map_set(
        &mut self,
        number: FieldNumber,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> CodecResult<Option<Value>> {
        let value = value.into();
        let schema = Arc::clone(&self.schema);
        let field = lookup(&schema, number)?;
        let kind = map_kind(&schema, field)?;
        check_value(&schema, field, kind, &value)?;
        Ok(self.map_slot(number).set(key.into(), value))
    }

    /// Removes a map entry, returning its value.
    pub fn map_delete(&mut self, number: FieldNumber, key: &str) -> CodecResult<Option<Value>> {
        let schema = Arc::clone(&self.schema);
        let field = lookup(&schema, number)?;
        map_kind(&schema, field)?;
        Ok(self.map_slot(number).delete(key))
    }

    pub(crate) fn store_singular(&mut self, number: FieldNumber, value: Value) {
        if value.is_default() {
            self.singular.remove(&number);
        } else {
            self.singular.insert(number, value);
        }
    }

    pub(crate) fn repeated_slot(&mut self, number: FieldNumber) -> &mut RepeatedField<Value> {
        self.repeated.entry(number).or_default()
    }

    pub(crate) fn map_slot(&mut self, number: FieldNumber) -> &mut MapField<String, Value> {
        self.maps.entry(number).or_default()
    }

    fn typed_scalar(
        &self,
        number: FieldNumber,
        wanted: &str,
        accepts: impl Fn(ScalarKind) -> bool,
    ) -> CodecResult<Option<&Value>> {
        let field = lookup(&self.schema, number)?;
        match singular_kind(&self.schema, field)? {
            ValueKind::Scalar(kind) if accepts(*kind) => Ok(self.singular.get(&number)),
            kind => Err(type_mismatch(
                &self.schema,
                field,
                wanted.to_string(),
                expected_label(kind),
            )),
        }
    }

    fn message_field(&self, number: FieldNumber) -> CodecResult<()> {
        let field = lookup(&self.schema, number)?;
        match singular_kind(&self.schema, field)? {
            ValueKind::Message(_) => Ok(()),
            kind @ ValueKind::Scalar(_) => Err(type_mismatch(
                &self.schema,
                field,
                "message".to_string(),
                expected_label(kind),
            )),
        }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name()
            && self.singular == other.singular
            && self.repeated == other.repeated
            && self.maps == other.maps
            && self.unknown == other.unknown
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("type_name", &self.type_name())
            .field("singular", &self.singular)
            .field("repeated", &self.repeated)
            .field("maps", &self.maps)
            .field("unknown_bytes", &self.unknown.len())
            .finish_non_exhaustive()
    }
}

fn lookup(schema: &MessageSchema, number: FieldNumber) -> CodecResult<&FieldSchema> {
    schema
        .field(number)
        .ok_or_else(|| CodecError::UnknownField {
            type_name: schema.type_name().to_string(),
            field: number,
        })
}

fn singular_kind<'a>(schema: &MessageSchema, field: &'a FieldSchema) -> CodecResult<&'a ValueKind> {
    match &field.kind {
        FieldKind::Singular(kind) => Ok(kind),
        _ => Err(wrong_cardinality(schema, field, Cardinality::Singular)),
    }
}

fn repeated_kind<'a>(schema: &MessageSchema, field: &'a FieldSchema) -> CodecResult<&'a ValueKind> {
    match &field.kind {
        FieldKind::Repeated(kind) => Ok(kind),
        _ => Err(wrong_cardinality(schema, field, Cardinality::Repeated)),
    }
}

fn map_kind<'a>(schema: &MessageSchema, field: &'a FieldSchema) -> CodecResult<&'a ValueKind> {
    match &field.kind {
        FieldKind::Map(kind) => Ok(kind),
        _ => Err(wrong_cardinality(schema, field, Cardinality::Map)),
    }
}

fn check_value(
    schema: &MessageSchema,
    field: &FieldSchema,
    kind: &ValueKind,
    value: &Value,
) -> CodecResult<()> {
    if value.fits(kind) {
        Ok(())
    } else {
        Err(type_mismatch(
            schema,
            field,
            expected_label(kind),
            value.type_label(),
        ))
    }
}

fn expected_label(kind: &ValueKind) -> String {
    match kind {
        ValueKind::Scalar(scalar) => scalar.proto_name().to_string(),
        ValueKind::Message(type_name) => format!("message {type_name}"),
    }
}

fn type_mismatch(
    schema: &MessageSchema,
    field: &FieldSchema,
    expected: String,
    found: String,
) -> CodecError {
    CodecError::TypeMismatch {
        type_name: schema.type_name().to_string(),
        field: field.number,
        expected,
        found,
    }
}

fn wrong_cardinality(
    schema: &MessageSchema,
    field: &FieldSchema,
    expected: Cardinality,
) -> CodecError {
    CodecError::WrongCardinality {
        type_name: schema.type_name().to_string(),
        field: field.number,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .message(
                MessageSchema::builder("google.protobuf.BoolValue")
                    .field(FieldSchema::scalar(1, "value", ScalarKind::Bool))
                    .build()
                    .unwrap(),
            )
            .message(
                MessageSchema::builder("test.Sample")
                    .field(FieldSchema::scalar(1, "name", ScalarKind::String))
                    .field(FieldSchema::scalar(2, "count", ScalarKind::SInt64))
                    .field(FieldSchema::scalar(3, "size", ScalarKind::Fixed32))
                    .field(FieldSchema::scalar(4, "ratio", ScalarKind::Double))
                    .field(FieldSchema::scalar(5, "blob", ScalarKind::Bytes))
                    .field(FieldSchema::scalar(6, "status", ScalarKind::Enum))
                    .field(FieldSchema::message(
                        7,
                        "enabled",
                        "google.protobuf.BoolValue",
                    ))
                    .field(FieldSchema::repeated(8, "ids", ScalarKind::String))
                    .field(FieldSchema::map(9, "labels", ScalarKind::String))
                    .field(FieldSchema::scalar(10, "flag", ScalarKind::Bool))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn sample() -> Message {
        Message::for_type(&registry(), "test.Sample").unwrap()
    }

    #[test]
    fn new_message_is_empty() {
        let message = sample();
        assert_eq!(message.type_name(), "test.Sample");
        for number in 1..=10 {
            assert!(!message.has(number), "field {number} should be unset");
        }
        assert!(message.repeated(8).unwrap().is_empty());
        assert!(message.map(9).unwrap().is_empty());
        assert!(message.unknown_fields().is_empty());
    }

    #[test]
    fn for_type_rejects_unknown_type() {
        let err = Message::for_type(&registry(), "test.Missing").unwrap_err();
        assert!(matches!(err, CodecError::UnknownMessageType { .. }));
    }

    #[test]
    fn set_and_get_scalars() {
        let mut message = sample();
        message.set(1, "register").unwrap();
        message.set(2, -42i64).unwrap();
        message.set(3, 7u32).unwrap();
        message.set(4, 0.5f64).unwrap();
        message.set(5, vec![1u8, 2, 3]).unwrap();
        message.set(6, Value::Enum(2)).unwrap();
        message.set(10, true).unwrap();

        assert_eq!(message.get_str(1).unwrap(), "register");
        assert_eq!(message.get_int(2).unwrap(), -42);
        assert_eq!(message.get_uint(3).unwrap(), 7);
        assert!((message.get_float(4).unwrap() - 0.5).abs() < f64::EPSILON);
        assert_eq!(message.get_bytes(5).unwrap(), &[1, 2, 3]);
        assert_eq!(message.get_int(6).unwrap(), 2);
        assert!(message.get_bool(10).unwrap());
        assert!(message.has(1));
    }

    #[test]
    fn typed_getters_return_defaults_when_unset() {
        let message = sample();
        assert_eq!(message.get_str(1).unwrap(), "");
        assert_eq!(message.get_int(2).unwrap(), 0);
        assert_eq!(message.get_bytes(5).unwrap(), &[] as &[u8]);
        assert!(!message.get_bool(10).unwrap());
        assert_eq!(message.get_or_default(3).unwrap(), Value::U32(0));
        assert_eq!(message.get(1), None);
    }

    #[test]
    fn setting_default_clears_field() {
        let mut message = sample();
        message.set(1, "x").unwrap();
        assert!(message.has(1));
        message.set(1, "").unwrap();
        assert!(!message.has(1));
        assert_eq!(message, sample());
    }

    #[test]
    fn set_rejects_wrong_variant() {
        let mut message = sample();
        let err = message.set(2, 5i32).unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                type_name: "test.Sample".to_string(),
                field: 2,
                expected: "sint64".to_string(),
                found: "i32".to_string(),
            }
        );
        assert!(!message.has(2));
    }

    #[test]
    fn set_rejects_unknown_field() {
        let mut message = sample();
        let err = message.set(99, true).unwrap_err();
        assert!(matches!(err, CodecError::UnknownField { field: 99, .. }));
    }

    #[test]
    fn singular_accessors_reject_repeated_fields() {
        let mut message = sample();
        let err = message.set(8, "a").unwrap_err();
        assert!(matches!(
            err,
            CodecError::WrongCardinality {
                expected: Cardinality::Singular,
                ..
            }
        ));
        assert!(message.repeated(1).is_err());
        assert!(message.map(8).is_err());
    }

    #[test]
    fn typed_getter_rejects_other_kind() {
        let message = sample();
        assert!(matches!(
            message.get_str(2),
            Err(CodecError::TypeMismatch { .. })
        ));
        assert!(message.get_message(1).is_err());
        assert!(message.get_or_default(7).is_err());
    }

    #[test]
    fn submessage_presence_is_explicit() {
        let registry = registry();
        let mut message = Message::for_type(&registry, "test.Sample").unwrap();
        let wrapper = Message::for_type(&registry, "google.protobuf.BoolValue").unwrap();
        message.set(7, wrapper).unwrap();
        assert!(message.has(7));
        let enabled = message.get_message(7).unwrap().unwrap();
        assert!(!enabled.get_bool(1).unwrap());

        message
            .get_message_mut(7)
            .unwrap()
            .unwrap()
            .set(1, true)
            .unwrap();
        assert!(message.get_message(7).unwrap().unwrap().get_bool(1).unwrap());

        message.clear(7).unwrap();
        assert!(!message.has(7));
        assert!(message.get_message(7).unwrap().is_none());
    }

    #[test]
    fn submessage_type_is_checked() {
        let mut message = sample();
        let err = message.set(7, sample()).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { field: 7, .. }));
    }

    #[test]
    fn repeated_add_and_set_all() {
        let mut message = sample();
        message.add(8, "a").unwrap();
        message.add(8, "b").unwrap();
        assert!(message.has(8));
        let ids: Vec<_> = message
            .repeated(8)
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        message.set_all(8, ["c"]).unwrap();
        assert_eq!(message.repeated(8).unwrap().len(), 1);

        message.clear(8).unwrap();
        assert!(!message.has(8));
    }

    #[test]
    fn set_all_is_atomic_on_type_error() {
        let mut message = sample();
        message.add(8, "keep").unwrap();
        let err = message
            .set_all(8, [Value::from("ok"), Value::I32(1)])
            .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
        assert_eq!(message.repeated(8).unwrap().len(), 1);
    }

    #[test]
    fn map_set_delete() {
        let mut message = sample();
        assert_eq!(message.map_set(9, "env", "dev").unwrap(), None);
        assert_eq!(
            message.map_set(9, "env", "prod").unwrap(),
            Some(Value::from("dev"))
        );
        assert!(message.has(9));
        assert_eq!(
            message.map(9).unwrap().get("env"),
            Some(&Value::from("prod"))
        );
        assert!(message.map_set(9, "n", 1i64).is_err());
        assert_eq!(
            message.map_delete(9, "env").unwrap(),
            Some(Value::from("prod"))
        );
        assert!(!message.has(9));
    }

    #[test]
    fn equality_ignores_schema_identity() {
        let mut a = sample();
        let mut b = sample();
        a.set(1, "same").unwrap();
        b.set(1, "same").unwrap();
        assert_eq!(a, b);
        b.set(10, true).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn debug_names_type() {
        let message = sample();
        assert!(format!("{message:?}").contains("test.Sample"));
    }
}
