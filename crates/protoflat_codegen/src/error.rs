//! Error implementations

use crate::schema::TypeKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a generator run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("malformed descriptor set: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configured runtime path does not parse as a Rust path.
    #[error("invalid runtime path `{0}`")]
    InvalidRuntimePath(String),
}

/// A schema that cannot be mapped to bindings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("{message}: field number {number} is used more than once")]
    DuplicateFieldNumber { message: String, number: u32 },

    #[error("{message}: field name `{name}` is used more than once")]
    DuplicateFieldName { message: String, name: String },

    /// Zero, above `2^29 - 1`, or inside the reserved `19000..=19999` range.
    #[error("{message}.{field}: invalid field number {number}")]
    InvalidFieldNumber {
        message: String,
        field: String,
        number: u32,
    },

    #[error("{message}.{field}: message and enum fields need a type_name")]
    MissingTypeName { message: String, field: String },

    #[error("{message}.{field}: cannot resolve type `{type_name}`")]
    UnresolvedType {
        message: String,
        field: String,
        type_name: String,
    },

    #[error("{message}.{field}: `{type_name}` is not {expected}")]
    TypeKindMismatch {
        message: String,
        field: String,
        type_name: String,
        expected: TypeKind,
    },

    /// `packed` set on a singular field, or on strings, bytes and messages.
    #[error("{message}.{field}: only repeated scalar fields can be packed")]
    NotPackable { message: String, field: String },

    #[error("{message}.{field}: oneof members cannot be repeated")]
    RepeatedOneofMember { message: String, field: String },

    #[error("{message}.{field}: oneof index {index} is out of range")]
    OneofIndexOutOfRange {
        message: String,
        field: String,
        index: usize,
    },

    #[error("{message}: oneof `{oneof}` has no members")]
    EmptyOneof { message: String, oneof: String },

    /// Messages holding each other by value, directly or through other
    /// messages, would have infinite size.
    #[error("{message}.{field}: closes a cycle of messages embedded by value")]
    RecursiveField { message: String, field: String },

    #[error("enum {name} declares no values")]
    EmptyEnum { name: String },

    #[error("enum {name}: value {number} is declared more than once")]
    DuplicateEnumValue { name: String, number: i32 },

    #[error("type {0} is declared more than once")]
    DuplicateType(String),

    /// Two declarations that map to the same Rust identifier in one scope,
    /// e.g. enum values `FOO_BAR` and `FooBar`.
    #[error("{scope}: `{ident}` would be generated more than once")]
    DuplicateIdentifier { scope: String, ident: String },
}
