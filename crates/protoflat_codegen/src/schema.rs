//! Schema descriptors.
//!
//! The generator reads a JSON descriptor set, the shape a schema compiler
//! front end emits after parsing `.proto` files:
//!
//! ```json
//! { "files": [{
//!     "name": "shop.proto",
//!     "package": "shop",
//!     "messages": [{
//!         "name": "Order",
//!         "fields": [
//!             { "name": "id", "number": 1, "type": "uint64" },
//!             { "name": "items", "number": 2, "type": "message",
//!               "label": "repeated", "type_name": ".shop.Item" }
//!         ]
//!     }]
//! }] }
//! ```

use std::collections::HashSet;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use protoflat_core::{WireType, MAX_FIELD_NUMBER};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Field numbers the wire format keeps for its own use.
pub const RESERVED_FIELD_NUMBERS: std::ops::RangeInclusive<u32> = 19000..=19999;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileDescriptorSet {
    pub files: Vec<FileDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path of the schema file, e.g. `shop/order.proto`.
    pub name: String,

    #[serde(default)]
    pub package: String,

    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,

    #[serde(default)]
    pub messages: Vec<MessageDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    #[serde(default)]
    pub oneofs: Vec<OneofDescriptor>,

    #[serde(default)]
    pub nested_messages: Vec<MessageDescriptor>,

    #[serde(default)]
    pub nested_enums: Vec<EnumDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    pub number: u32,

    #[serde(rename = "type")]
    pub ty: FieldType,

    #[serde(default)]
    pub label: Label,

    /// Unset means packed for repeated scalar fields.
    #[serde(default)]
    pub packed: Option<bool>,

    /// Index into the enclosing message's `oneofs`.
    #[serde(default)]
    pub oneof_index: Option<usize>,

    /// Referenced message or enum, fully qualified (`.pkg.Outer.Inner`) or
    /// relative to the referencing scope.
    #[serde(default)]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneofDescriptor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    pub name: String,

    #[serde(default)]
    pub values: Vec<EnumValueDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDescriptor {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    #[default]
    Singular,
    Repeated,
}

/// Declared field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Message,
    Enum,
}

/// What a `type_name` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Message,
    Enum,
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Message => write!(f, "a message"),
            TypeKind::Enum => write!(f, "an enum"),
        }
    }
}

impl FieldType {
    pub const ALL: [FieldType; 17] = [
        FieldType::Double,
        FieldType::Float,
        FieldType::Int32,
        FieldType::Int64,
        FieldType::Uint32,
        FieldType::Uint64,
        FieldType::Sint32,
        FieldType::Sint64,
        FieldType::Fixed32,
        FieldType::Fixed64,
        FieldType::Sfixed32,
        FieldType::Sfixed64,
        FieldType::Bool,
        FieldType::String,
        FieldType::Bytes,
        FieldType::Message,
        FieldType::Enum,
    ];

    /// Name as written in a schema.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::Uint32 => "uint32",
            FieldType::Uint64 => "uint64",
            FieldType::Sint32 => "sint32",
            FieldType::Sint64 => "sint64",
            FieldType::Fixed32 => "fixed32",
            FieldType::Fixed64 => "fixed64",
            FieldType::Sfixed32 => "sfixed32",
            FieldType::Sfixed64 => "sfixed64",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Bytes => "bytes",
            FieldType::Message => "message",
            FieldType::Enum => "enum",
        }
    }

    /// Wire type of a single value of this type.
    pub const fn wire_type(self) -> WireType {
        match self {
            FieldType::Int32
            | FieldType::Int64
            | FieldType::Uint32
            | FieldType::Uint64
            | FieldType::Sint32
            | FieldType::Sint64
            | FieldType::Bool
            | FieldType::Enum => WireType::Varint,
            FieldType::Fixed32 | FieldType::Sfixed32 | FieldType::Float => WireType::Fixed32,
            FieldType::Fixed64 | FieldType::Sfixed64 | FieldType::Double => WireType::Fixed64,
            FieldType::String | FieldType::Bytes | FieldType::Message => WireType::LengthDelimited,
        }
    }

    /// Whether repeated values of this type may share one packed run.
    pub const fn is_packable(self) -> bool {
        !matches!(
            self,
            FieldType::String | FieldType::Bytes | FieldType::Message
        )
    }

    pub const fn kind(self) -> Option<TypeKind> {
        match self {
            FieldType::Message => Some(TypeKind::Message),
            FieldType::Enum => Some(TypeKind::Enum),
            _ => None,
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown field type `{}`", s))
    }
}

impl FileDescriptorSet {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Checks every file before anything is mapped.
    pub fn validate(&self) -> std::result::Result<(), SchemaError> {
        for file in self.files.iter() {
            let scope = file.package.clone();

            for e in file.enums.iter() {
                e.validate(&qualify(&scope, &e.name))?;
            }
            for message in file.messages.iter() {
                message.validate(&qualify(&scope, &message.name))?;
            }
        }

        Ok(())
    }
}

impl MessageDescriptor {
    /// Checks this message and everything nested in it. `full_name` is used
    /// for error context.
    pub fn validate(&self, full_name: &str) -> std::result::Result<(), SchemaError> {
        let mut numbers = HashSet::new();
        let mut names = HashSet::new();
        let mut oneof_members = vec![0_usize; self.oneofs.len()];

        for field in self.fields.iter() {
            field.validate(full_name)?;

            if field.ty.kind().is_some() && field.type_name.is_none() {
                return Err(SchemaError::MissingTypeName {
                    message: full_name.to_string(),
                    field: field.name.clone(),
                });
            }

            if !numbers.insert(field.number) {
                return Err(SchemaError::DuplicateFieldNumber {
                    message: full_name.to_string(),
                    number: field.number,
                });
            }
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateFieldName {
                    message: full_name.to_string(),
                    name: field.name.clone(),
                });
            }

            if let Some(index) = field.oneof_index {
                match oneof_members.get_mut(index) {
                    Some(count) => *count += 1,
                    None => {
                        return Err(SchemaError::OneofIndexOutOfRange {
                            message: full_name.to_string(),
                            field: field.name.clone(),
                            index,
                        })
                    }
                }

                if field.label == Label::Repeated {
                    return Err(SchemaError::RepeatedOneofMember {
                        message: full_name.to_string(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        for (oneof, count) in self.oneofs.iter().zip(oneof_members) {
            if count == 0 {
                return Err(SchemaError::EmptyOneof {
                    message: full_name.to_string(),
                    oneof: oneof.name.clone(),
                });
            }
        }

        for e in self.nested_enums.iter() {
            e.validate(&qualify(full_name, &e.name))?;
        }
        for message in self.nested_messages.iter() {
            message.validate(&qualify(full_name, &message.name))?;
        }

        Ok(())
    }
}

impl FieldDescriptor {
    /// Checks that hold for a field on its own, whichever message it sits in.
    pub fn validate(&self, message: &str) -> std::result::Result<(), SchemaError> {
        if self.number == 0
            || self.number > MAX_FIELD_NUMBER
            || RESERVED_FIELD_NUMBERS.contains(&self.number)
        {
            return Err(SchemaError::InvalidFieldNumber {
                message: message.to_string(),
                field: self.name.clone(),
                number: self.number,
            });
        }

        let packable = self.label == Label::Repeated && self.ty.is_packable();
        if self.packed == Some(true) && !packable {
            return Err(SchemaError::NotPackable {
                message: message.to_string(),
                field: self.name.clone(),
            });
        }

        Ok(())
    }

    /// Whether the field is written as one packed run.
    pub fn is_packed(&self) -> bool {
        self.label == Label::Repeated && self.ty.is_packable() && self.packed.unwrap_or(true)
    }
}

impl EnumDescriptor {
    pub fn validate(&self, full_name: &str) -> std::result::Result<(), SchemaError> {
        if self.values.is_empty() {
            return Err(SchemaError::EmptyEnum {
                name: full_name.to_string(),
            });
        }

        let mut numbers = HashSet::new();
        for value in self.values.iter() {
            if !numbers.insert(value.number) {
                return Err(SchemaError::DuplicateEnumValue {
                    name: full_name.to_string(),
                    number: value.number,
                });
            }
        }

        Ok(())
    }
}

/// Joins a scope and a name with a dot, skipping an empty scope.
pub fn qualify(scope: &str, name: &str) -> String {
    match scope.is_empty() {
        true => name.to_string(),
        false => format!("{}.{}", scope, name),
    }
}
