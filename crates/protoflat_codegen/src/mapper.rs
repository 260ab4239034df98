//! Schema-to-binding mapper.
//!
//! Turns descriptors into bindings: for every field, the codec marker that
//! carries its values, the wire type of its tag and how repeated values are
//! laid out. The mapping is pure; both the file generator and the derive
//! macros feed it and hand the result to [`crate::emit`].

use proc_macro2::{Ident, TokenStream};
use protoflat_core::WireType;
use quote::quote;

use crate::error::SchemaError;
use crate::naming;
use crate::schema::{EnumDescriptor, FieldDescriptor, FieldType, Label};

/// Codec marker in the runtime's type-dispatch registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Varint,
    Zigzag,
    Fixed,
    LengthDelimited,
    Nested,
}

impl Codec {
    /// Marker for values of the declared type.
    pub const fn of(ty: FieldType) -> Self {
        match ty {
            FieldType::Int32
            | FieldType::Int64
            | FieldType::Uint32
            | FieldType::Uint64
            | FieldType::Bool
            | FieldType::Enum => Codec::Varint,
            FieldType::Sint32 | FieldType::Sint64 => Codec::Zigzag,
            FieldType::Fixed32
            | FieldType::Fixed64
            | FieldType::Sfixed32
            | FieldType::Sfixed64
            | FieldType::Float
            | FieldType::Double => Codec::Fixed,
            FieldType::String | FieldType::Bytes => Codec::LengthDelimited,
            FieldType::Message => Codec::Nested,
        }
    }

    /// Name of the marker type exported by the runtime.
    pub const fn marker(self) -> &'static str {
        match self {
            Codec::Varint => "Varint",
            Codec::Zigzag => "Zigzag",
            Codec::Fixed => "Fixed",
            Codec::LengthDelimited => "LengthDelimited",
            Codec::Nested => "Nested",
        }
    }

    /// Whether values of this codec may appear in a packed run.
    pub const fn is_scalar(self) -> bool {
        matches!(self, Codec::Varint | Codec::Zigzag | Codec::Fixed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Singular,
    /// One tag per element.
    Repeated,
    /// One tag and one length-delimited run for all elements.
    Packed,
}

/// Everything the emitter needs to drive one field.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    /// Name as declared in the schema.
    pub name: String,
    pub ident: Ident,
    pub tag_const: Ident,
    pub number: u32,
    pub ty: FieldType,
    pub codec: Codec,
    /// Wire type written in the tag. Packed fields use length-delimited.
    pub wire_type: WireType,
    pub cardinality: Cardinality,
    /// Rust type of one value (the element type for repeated fields).
    pub rust_type: TokenStream,
    /// Enum type behind an `int32`-stored enum field, for typed accessors.
    pub enumeration: Option<TokenStream>,
}

/// A oneof group as the enclosing message sees it.
#[derive(Debug, Clone)]
pub struct OneofBinding {
    pub name: String,
    /// Member of the message holding `Option<enum_path>`.
    pub ident: Ident,
    pub enum_ident: Ident,
    /// Path to the oneof enum from the message's scope.
    pub enum_path: TokenStream,
    pub numbers: Vec<u32>,
    /// Empty when only the message side is being emitted.
    pub alternatives: Vec<AlternativeBinding>,
}

#[derive(Debug, Clone)]
pub struct AlternativeBinding {
    pub variant: Ident,
    pub field: FieldBinding,
}

#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldBinding),
    Oneof(OneofBinding),
}

#[derive(Debug, Clone)]
pub struct MessageBinding {
    pub name: String,
    pub ident: Ident,
    /// In serialization order.
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumBinding {
    pub name: String,
    pub ident: Ident,
    /// Default first.
    pub values: Vec<EnumValueBinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueBinding {
    pub variant: Ident,
    /// Name as declared in the schema, returned by `as_str_name`.
    pub name: String,
    pub number: i32,
}

/// Resolves `type_name` references of message and enum fields to Rust paths.
pub trait ResolveType {
    /// Path of the referenced type from the emitting scope, or `None` when
    /// the field carries no reference.
    fn resolve(
        &self,
        message: &str,
        field: &FieldDescriptor,
    ) -> Result<Option<TokenStream>, SchemaError>;
}

/// Treats every `type_name` as a Rust path written by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl ResolveType for PathResolver {
    fn resolve(
        &self,
        message: &str,
        field: &FieldDescriptor,
    ) -> Result<Option<TokenStream>, SchemaError> {
        match &field.type_name {
            Some(type_name) => syn::parse_str::<syn::Path>(type_name)
                .map(|path| Some(quote!(#path)))
                .map_err(|_| SchemaError::UnresolvedType {
                    message: message.to_string(),
                    field: field.name.clone(),
                    type_name: type_name.clone(),
                }),
            None => Ok(None),
        }
    }
}

/// Maps one field using the rule table.
///
/// `message` is only used for error context.
pub fn map_field(
    message: &str,
    field: &FieldDescriptor,
    ident: Ident,
    resolver: &dyn ResolveType,
) -> Result<FieldBinding, SchemaError> {
    field.validate(message)?;

    let codec = Codec::of(field.ty);
    let resolved = resolver.resolve(message, field)?;

    let cardinality = match (field.label, field.is_packed()) {
        (Label::Singular, _) => Cardinality::Singular,
        (Label::Repeated, true) => Cardinality::Packed,
        (Label::Repeated, false) => Cardinality::Repeated,
    };

    let wire_type = match cardinality {
        Cardinality::Packed => WireType::LengthDelimited,
        _ => field.ty.wire_type(),
    };

    let (rust_type, enumeration) = match field.ty {
        FieldType::Message => (resolved.unwrap_or_else(|| quote!(_)), None),
        FieldType::Enum => (quote!(i32), resolved),
        scalar => (scalar_type(scalar), None),
    };

    Ok(FieldBinding {
        name: field.name.clone(),
        tag_const: syn::Ident::new(&naming::tag_const_name(&field.name), ident.span()),
        ident,
        number: field.number,
        ty: field.ty,
        codec,
        wire_type,
        cardinality,
        rust_type,
        enumeration,
    })
}

/// Maps a oneof group and its alternatives. Alternatives must already be
/// checked to be singular.
pub fn map_oneof(
    message: &str,
    name: &str,
    enum_path: TokenStream,
    members: &[&FieldDescriptor],
    resolver: &dyn ResolveType,
) -> Result<OneofBinding, SchemaError> {
    let alternatives = members
        .iter()
        .map(|field| {
            if field.label == Label::Repeated {
                return Err(SchemaError::RepeatedOneofMember {
                    message: message.to_string(),
                    field: field.name.clone(),
                });
            }

            let binding = map_field(message, field, naming::ident(&field.name), resolver)?;
            Ok(AlternativeBinding {
                variant: naming::ident(&naming::pascal_case(&field.name)),
                field: binding,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OneofBinding {
        name: name.to_string(),
        ident: naming::ident(name),
        enum_ident: naming::ident(&naming::pascal_case(name)),
        enum_path,
        numbers: alternatives.iter().map(|alt| alt.field.number).collect(),
        alternatives,
    })
}

/// Maps an enum; the first declared value becomes the default.
pub fn map_enum(
    full_name: &str,
    descriptor: &EnumDescriptor,
) -> Result<EnumBinding, SchemaError> {
    descriptor.validate(full_name)?;

    let values = descriptor
        .values
        .iter()
        .map(|value| EnumValueBinding {
            variant: naming::ident(&naming::pascal_case(&value.name)),
            name: value.name.clone(),
            number: value.number,
        })
        .collect::<Vec<_>>();
    check_unique_idents(full_name, values.iter().map(|value| &value.variant))?;

    Ok(EnumBinding {
        name: descriptor.name.clone(),
        ident: naming::ident(&descriptor.name),
        values,
    })
}

/// Rejects two declarations that end up under the same Rust identifier
/// within `scope`.
pub fn check_unique_idents<'a>(
    scope: &str,
    idents: impl IntoIterator<Item = &'a Ident>,
) -> Result<(), SchemaError> {
    let mut seen = std::collections::HashSet::new();

    for ident in idents {
        let name = ident.to_string();
        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateIdentifier {
                scope: scope.to_string(),
                ident: name,
            });
        }
    }

    Ok(())
}

/// Rejects field numbers claimed twice within one message, including
/// oneof alternatives, and members or tag constants whose identifiers collide.
pub fn check_unique_numbers(message: &MessageBinding) -> Result<(), SchemaError> {
    let members = message.members.iter().map(|member| match member {
        Member::Field(field) => &field.ident,
        Member::Oneof(oneof) => &oneof.ident,
    });
    check_unique_idents(&message.name, members)?;

    let tags = message.members.iter().filter_map(|member| match member {
        Member::Field(field) => Some(&field.tag_const),
        Member::Oneof(_) => None,
    });
    check_unique_idents(&message.name, tags)?;

    for member in message.members.iter() {
        if let Member::Oneof(oneof) = member {
            let scope = format!("{}.{}", message.name, oneof.name);
            let alternatives = oneof.alternatives.iter();
            check_unique_idents(&scope, alternatives.clone().map(|alt| &alt.variant))?;
            check_unique_idents(&scope, alternatives.map(|alt| &alt.field.tag_const))?;
        }
    }

    let mut seen = std::collections::HashSet::new();

    let numbers = message.members.iter().flat_map(|member| match member {
        Member::Field(field) => vec![field.number],
        Member::Oneof(oneof) => oneof.numbers.clone(),
    });

    for number in numbers {
        if !seen.insert(number) {
            return Err(SchemaError::DuplicateFieldNumber {
                message: message.name.clone(),
                number,
            });
        }
    }

    Ok(())
}

/// Rust type of a scalar, string or bytes value.
fn scalar_type(ty: FieldType) -> TokenStream {
    match ty {
        FieldType::Int32 | FieldType::Sint32 | FieldType::Sfixed32 | FieldType::Enum => quote!(i32),
        FieldType::Int64 | FieldType::Sint64 | FieldType::Sfixed64 => quote!(i64),
        FieldType::Uint32 | FieldType::Fixed32 => quote!(u32),
        FieldType::Uint64 | FieldType::Fixed64 => quote!(u64),
        FieldType::Float => quote!(f32),
        FieldType::Double => quote!(f64),
        FieldType::Bool => quote!(bool),
        FieldType::String => quote!(::std::string::String),
        FieldType::Bytes => quote!(::std::vec::Vec<u8>),
        FieldType::Message => quote!(_),
    }
}
