//! Schema validation errors.

use std::fmt;

use crate::FieldNumber;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A message schema or message reference has an empty type name.
    EmptyTypeName,

    /// Two schemas in one registry share a type name.
    DuplicateMessage { type_name: String },

    /// Duplicate field number within a message.
    DuplicateFieldNumber {
        type_name: String,
        field: FieldNumber,
    },

    /// Duplicate field name within a message.
    DuplicateFieldName { type_name: String, name: String },

    /// Field number is zero or exceeds the 29-bit range.
    InvalidFieldNumber {
        type_name: String,
        field: FieldNumber,
    },

    /// Field number lies in the range reserved for the protobuf implementation.
    ReservedFieldNumber {
        type_name: String,
        field: FieldNumber,
    },

    /// A message-typed field refers to a type the registry does not contain.
    UnresolvedMessageType {
        type_name: String,
        field: FieldNumber,
        target: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTypeName => write!(f, "message type name must not be empty"),
            Self::DuplicateMessage { type_name } => {
                write!(f, "duplicate message type {type_name} in registry")
            }
            Self::DuplicateFieldNumber { type_name, field } => {
                write!(f, "duplicate field number {field} in {type_name}")
            }
            Self::DuplicateFieldName { type_name, name } => {
                write!(f, "duplicate field name {name} in {type_name}")
            }
            Self::InvalidFieldNumber { type_name, field } => {
                write!(f, "invalid field number {field} in {type_name}")
            }
            Self::ReservedFieldNumber { type_name, field } => {
                write!(f, "field number {field} in {type_name} is reserved")
            }
            Self::UnresolvedMessageType {
                type_name,
                field,
                target,
            } => {
                write!(
                    f,
                    "field {field} of {type_name} refers to unknown message type {target}"
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}
