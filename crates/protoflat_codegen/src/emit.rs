//! Rust emitter.
//!
//! Builds token streams from bindings. The generator emits both declarations
//! and impls; the derive macros only emit the impls for types the user
//! already declared.

use proc_macro2::{Literal, TokenStream};
use protoflat_core::WireType;
use quote::{format_ident, quote};
use syn::ext::IdentExt;

use crate::config::{GeneratorConfig, DEFAULT_RUNTIME_PATH};
use crate::error::{Error, Result};
use crate::mapper::{
    AlternativeBinding, Cardinality, EnumBinding, FieldBinding, Member, MessageBinding,
    OneofBinding,
};

#[derive(Debug, Clone)]
pub struct Emitter {
    /// Path to the runtime crate as seen from the emitted code.
    runtime: syn::Path,
    emit_accessors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            runtime: syn::parse_quote!(::protoflat),
            emit_accessors: true,
        }
    }
}

impl Emitter {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let runtime = match config.runtime_path.as_str() {
            DEFAULT_RUNTIME_PATH => syn::parse_quote!(::protoflat),
            path => syn::parse_str::<syn::Path>(path)
                .map_err(|_| Error::InvalidRuntimePath(path.to_string()))?,
        };

        Ok(Self {
            runtime,
            emit_accessors: config.emit_accessors,
        })
    }

    /// Emitter for code that reaches the runtime through `runtime`.
    pub fn with_runtime(runtime: syn::Path) -> Self {
        Self {
            runtime,
            ..Default::default()
        }
    }

    /// `pub struct` holding one member per field.
    pub fn message_struct(&self, message: &MessageBinding) -> TokenStream {
        let ident = &message.ident;
        let members = message.members.iter().map(|member| match member {
            Member::Field(field) => {
                let field_ident = &field.ident;
                let ty = field_type(field);
                quote!(pub #field_ident: #ty)
            }
            Member::Oneof(oneof) => {
                let oneof_ident = &oneof.ident;
                let path = &oneof.enum_path;
                quote!(pub #oneof_ident: ::core::option::Option<#path>)
            }
        });

        quote! {
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct #ident {
                #(#members,)*
            }
        }
    }

    /// Tag constants, accessors and the `Message` driver.
    pub fn message_impl(&self, message: &MessageBinding) -> TokenStream {
        let rt = &self.runtime;
        let ident = &message.ident;

        let fields = message
            .members
            .iter()
            .filter_map(|member| match member {
                Member::Field(field) => Some(field),
                Member::Oneof(_) => None,
            })
            .collect::<Vec<_>>();

        let tags = fields.iter().map(|field| self.tag_const(field));
        let accessors = match self.emit_accessors {
            true => fields.iter().map(|field| self.accessors(field)).collect::<Vec<_>>(),
            false => Vec::new(),
        };

        let sizes = message.members.iter().map(|member| self.member_size(member));
        let writes = message.members.iter().map(|member| self.member_serialize(member));
        let arms = message.members.iter().map(|member| self.member_merge_arm(member));
        let defaults = message.members.iter().map(|member| self.member_is_default(member));

        let tag_checks = message.members.iter().filter_map(|member| match member {
            Member::Oneof(oneof) => Some(self.oneof_tag_check(&message.name, oneof)),
            Member::Field(_) => None,
        });

        let unused = match message.members.is_empty() {
            true => quote!(#[allow(unused_variables)]),
            false => quote!(),
        };

        quote! {
            impl #ident {
                #(#tags)*
                #(#accessors)*
            }

            impl #rt::Message for #ident {
                fn size(&self) -> usize {
                    0 #(+ #sizes)*
                }

                #unused
                fn serialize(&self, buf: &mut ::std::vec::Vec<u8>) {
                    #(#writes)*
                }

                #unused
                fn merge_field(
                    &mut self,
                    header: #rt::FieldHeader,
                    view: &mut #rt::ByteViewer<'_>,
                ) -> #rt::SerDeResult<bool> {
                    match header.field_number {
                        #(#arms)*
                        _ => ::core::result::Result::Ok(false),
                    }
                }

                fn is_default(&self) -> bool {
                    true #(&& #defaults)*
                }
            }

            #(#tag_checks)*
        }
    }

    /// Compile-time check that the tags a message routes to a oneof are the
    /// ones its enum declares.
    fn oneof_tag_check(&self, message: &str, oneof: &OneofBinding) -> TokenStream {
        let rt = &self.runtime;
        let path = &oneof.enum_path;
        let numbers = oneof.numbers.iter().map(|n| Literal::u32_unsuffixed(*n));
        let error = format!("{}.{}: tags do not match the oneof enum", message, oneof.name);

        quote! {
            const _: () = ::core::assert!(
                #rt::tags_match(&[#(#numbers),*], <#path as #rt::Oneof>::TAGS),
                #error
            );
        }
    }

    /// `pub enum` with one variant per alternative.
    pub fn oneof_enum(&self, oneof: &OneofBinding) -> TokenStream {
        let ident = &oneof.enum_ident;
        let variants = oneof.alternatives.iter().map(|alt| {
            let variant = &alt.variant;
            let ty = &alt.field.rust_type;
            quote!(#variant(#ty))
        });

        quote! {
            #[derive(Clone, Debug, PartialEq)]
            pub enum #ident {
                #(#variants,)*
            }
        }
    }

    /// Tag constants and the `Oneof` driver for a oneof enum.
    pub fn oneof_impl(&self, oneof: &OneofBinding) -> TokenStream {
        let rt = &self.runtime;
        let ident = &oneof.enum_ident;

        let tags = oneof.alternatives.iter().map(|alt| self.tag_const(&alt.field));
        let sizes = oneof.alternatives.iter().map(|alt| {
            let (variant, codec, tag) = alternative_parts(self, alt);
            quote! {
                Self::#variant(value) => #rt::field::size_explicit::<#codec, _>(Self::#tag, value),
            }
        });
        let writes = oneof.alternatives.iter().map(|alt| {
            let (variant, codec, tag) = alternative_parts(self, alt);
            quote! {
                Self::#variant(value) => #rt::field::serialize_explicit::<#codec, _>(
                    Self::#tag, value, buf
                ),
            }
        });
        let arms = oneof.alternatives.iter().map(|alt| {
            let (variant, codec, tag) = alternative_parts(self, alt);
            let number = Literal::u32_unsuffixed(alt.field.number);
            let ty = &alt.field.rust_type;

            quote! {
                #number => {
                    #rt::field::check_wire_type(header, Self::#tag)?;
                    match field {
                        ::core::option::Option::Some(Self::#variant(value)) => {
                            <#codec as #rt::TypeCodec<#ty>>::deserialize(view, value)?
                        }
                        _ => {
                            let mut value = <#ty as ::core::default::Default>::default();
                            <#codec as #rt::TypeCodec<#ty>>::deserialize(view, &mut value)?;
                            *field = ::core::option::Option::Some(Self::#variant(value));
                        }
                    }
                    ::core::result::Result::Ok(true)
                }
            }
        });

        let numbers = oneof
            .alternatives
            .iter()
            .map(|alt| Literal::u32_unsuffixed(alt.field.number));

        quote! {
            impl #ident {
                #(#tags)*
            }

            impl #rt::Oneof for #ident {
                const TAGS: &'static [u32] = &[#(#numbers),*];

                fn size(&self) -> usize {
                    match self {
                        #(#sizes)*
                    }
                }

                fn serialize(&self, buf: &mut ::std::vec::Vec<u8>) {
                    match self {
                        #(#writes)*
                    }
                }

                fn merge(
                    field: &mut ::core::option::Option<Self>,
                    header: #rt::FieldHeader,
                    view: &mut #rt::ByteViewer<'_>,
                ) -> #rt::SerDeResult<bool> {
                    match header.field_number {
                        #(#arms)*
                        _ => ::core::result::Result::Ok(false),
                    }
                }
            }
        }
    }

    /// `#[repr(i32)]` enum with explicit discriminants; the first value is
    /// the default.
    pub fn enum_def(&self, binding: &EnumBinding) -> TokenStream {
        let ident = &binding.ident;
        let variants = binding.values.iter().enumerate().map(|(i, value)| {
            let variant = &value.variant;
            let number = i32_literal(value.number);
            let default = match i {
                0 => quote!(#[default]),
                _ => quote!(),
            };
            quote!(#default #variant = #number)
        });

        quote! {
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[repr(i32)]
            pub enum #ident {
                #(#variants,)*
            }
        }
    }

    /// `Enumeration` and `From<_> for i32`.
    pub fn enum_impl(&self, binding: &EnumBinding) -> TokenStream {
        let rt = &self.runtime;
        let ident = &binding.ident;

        let from_arms = binding.values.iter().map(|value| {
            let variant = &value.variant;
            let number = i32_literal(value.number);
            quote!(#number => ::core::option::Option::Some(Self::#variant),)
        });
        let name_arms = binding.values.iter().map(|value| {
            let variant = &value.variant;
            let name = &value.name;
            quote!(Self::#variant => #name,)
        });

        quote! {
            impl #rt::Enumeration for #ident {
                fn from_i32(value: i32) -> ::core::option::Option<Self> {
                    match value {
                        #(#from_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn as_str_name(&self) -> &'static str {
                    match self {
                        #(#name_arms)*
                    }
                }
            }

            impl ::core::convert::From<#ident> for i32 {
                fn from(value: #ident) -> i32 {
                    value as i32
                }
            }
        }
    }

    fn tag_const(&self, field: &FieldBinding) -> TokenStream {
        let rt = &self.runtime;
        let tag = &field.tag_const;
        let number = Literal::u32_unsuffixed(field.number);
        let wire_type = wire_type_variant(field.wire_type);

        quote! {
            pub const #tag: #rt::FieldHeader =
                #rt::FieldHeader::new(#number, #rt::WireType::#wire_type);
        }
    }

    /// Typed view of an enum field stored as `i32`.
    fn accessors(&self, field: &FieldBinding) -> TokenStream {
        let rt = &self.runtime;
        let Some(path) = &field.enumeration else {
            return quote!();
        };

        let ident = &field.ident;
        let name = ident.unraw();

        match field.cardinality {
            Cardinality::Singular => {
                let setter = format_ident!("set_{}", name);
                quote! {
                    pub fn #ident(&self) -> #path {
                        <#path as #rt::Enumeration>::from_i32(self.#ident).unwrap_or_default()
                    }

                    pub fn #setter(&mut self, value: #path) {
                        self.#ident = ::core::convert::Into::into(value);
                    }
                }
            }
            Cardinality::Repeated | Cardinality::Packed => {
                let pusher = format_ident!("push_{}", name);
                quote! {
                    pub fn #ident(&self) -> impl ::core::iter::Iterator<Item = #path> + '_ {
                        self.#ident
                            .iter()
                            .map(|value| {
                                <#path as #rt::Enumeration>::from_i32(*value).unwrap_or_default()
                            })
                    }

                    pub fn #pusher(&mut self, value: #path) {
                        self.#ident.push(::core::convert::Into::into(value));
                    }
                }
            }
        }
    }

    fn member_size(&self, member: &Member) -> TokenStream {
        let rt = &self.runtime;

        match member {
            Member::Field(field) => {
                let (ident, codec, tag) = field_parts(self, field);
                match field.cardinality {
                    Cardinality::Singular => {
                        quote!(#rt::field::size::<#codec, _>(Self::#tag, &self.#ident))
                    }
                    Cardinality::Repeated => {
                        quote!(#rt::field::size_repeated::<#codec, _>(Self::#tag, &self.#ident))
                    }
                    Cardinality::Packed => {
                        quote!(#rt::field::size_packed::<#codec, _>(Self::#tag, &self.#ident))
                    }
                }
            }
            Member::Oneof(oneof) => {
                let ident = &oneof.ident;
                let path = &oneof.enum_path;
                quote!(self.#ident.as_ref().map_or(0, <#path as #rt::Oneof>::size))
            }
        }
    }

    fn member_serialize(&self, member: &Member) -> TokenStream {
        let rt = &self.runtime;

        match member {
            Member::Field(field) => {
                let (ident, codec, tag) = field_parts(self, field);
                match field.cardinality {
                    Cardinality::Singular => {
                        quote!(#rt::field::serialize::<#codec, _>(Self::#tag, &self.#ident, buf);)
                    }
                    Cardinality::Repeated => {
                        quote! {
                            #rt::field::serialize_repeated::<#codec, _>(
                                Self::#tag, &self.#ident, buf
                            );
                        }
                    }
                    Cardinality::Packed => {
                        quote! {
                            #rt::field::serialize_packed::<#codec, _>(
                                Self::#tag, &self.#ident, buf
                            );
                        }
                    }
                }
            }
            Member::Oneof(oneof) => {
                let ident = &oneof.ident;
                let path = &oneof.enum_path;
                quote! {
                    if let ::core::option::Option::Some(value) = &self.#ident {
                        <#path as #rt::Oneof>::serialize(value, buf);
                    }
                }
            }
        }
    }

    fn member_merge_arm(&self, member: &Member) -> TokenStream {
        let rt = &self.runtime;

        match member {
            Member::Field(field) => {
                let (ident, codec, tag) = field_parts(self, field);
                let number = Literal::u32_unsuffixed(field.number);
                let call = match (field.cardinality, field.codec.is_scalar()) {
                    (Cardinality::Singular, _) => quote!(#rt::field::deserialize::<#codec, _>),
                    (_, true) => quote!(#rt::field::deserialize_scalars::<#codec, _>),
                    (_, false) => quote!(#rt::field::deserialize_repeated::<#codec, _>),
                };

                quote! {
                    #number => #call(header, Self::#tag, view, &mut self.#ident).map(|()| true),
                }
            }
            Member::Oneof(oneof) => {
                let ident = &oneof.ident;
                let path = &oneof.enum_path;
                let numbers = oneof.numbers.iter().map(|n| Literal::u32_unsuffixed(*n));

                quote! {
                    #(#numbers)|* => <#path as #rt::Oneof>::merge(&mut self.#ident, header, view),
                }
            }
        }
    }

    fn member_is_default(&self, member: &Member) -> TokenStream {
        let rt = &self.runtime;

        match member {
            Member::Field(field) => {
                let (ident, codec, _) = field_parts(self, field);
                match field.cardinality {
                    Cardinality::Singular => {
                        quote!(<#codec as #rt::TypeCodec<_>>::is_default(&self.#ident))
                    }
                    Cardinality::Repeated | Cardinality::Packed => quote!(self.#ident.is_empty()),
                }
            }
            Member::Oneof(oneof) => {
                let ident = &oneof.ident;
                quote!(self.#ident.is_none())
            }
        }
    }

    fn codec(&self, field: &FieldBinding) -> TokenStream {
        let rt = &self.runtime;
        let marker = format_ident!("{}", field.codec.marker());
        quote!(#rt::#marker)
    }
}

/// Declared type of a struct member.
fn field_type(field: &FieldBinding) -> TokenStream {
    let ty = &field.rust_type;
    match field.cardinality {
        Cardinality::Singular => quote!(#ty),
        Cardinality::Repeated | Cardinality::Packed => quote!(::std::vec::Vec<#ty>),
    }
}

fn field_parts<'a>(
    emitter: &Emitter,
    field: &'a FieldBinding,
) -> (&'a proc_macro2::Ident, TokenStream, &'a proc_macro2::Ident) {
    (&field.ident, emitter.codec(field), &field.tag_const)
}

fn alternative_parts<'a>(
    emitter: &Emitter,
    alt: &'a AlternativeBinding,
) -> (&'a proc_macro2::Ident, TokenStream, &'a proc_macro2::Ident) {
    (&alt.variant, emitter.codec(&alt.field), &alt.field.tag_const)
}

fn wire_type_variant(wire_type: WireType) -> proc_macro2::Ident {
    let name = match wire_type {
        WireType::Varint => "Varint",
        WireType::Fixed64 => "Fixed64",
        WireType::LengthDelimited => "LengthDelimited",
        WireType::StartGroup => "StartGroup",
        WireType::EndGroup => "EndGroup",
        WireType::Fixed32 => "Fixed32",
    };
    format_ident!("{}", name)
}

/// Negative numbers become a unary minus, valid in both patterns and
/// discriminants.
fn i32_literal(value: i32) -> TokenStream {
    let magnitude = Literal::i64_unsuffixed((value as i64).abs());
    match value < 0 {
        true => quote!(-#magnitude),
        false => quote!(#magnitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{map_enum, map_field, map_oneof, PathResolver};
    use crate::naming;
    use crate::schema::{EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FieldType, Label};

    fn field(name: &str, number: u32, ty: FieldType) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            number,
            ty,
            label: Label::Singular,
            packed: None,
            oneof_index: None,
            type_name: None,
        }
    }

    fn binding(descriptor: FieldDescriptor) -> Member {
        let ident = naming::ident(&descriptor.name);
        Member::Field(map_field("Order", &descriptor, ident, &PathResolver).unwrap())
    }

    fn order() -> MessageBinding {
        let mut status = field("status", 2, FieldType::Enum);
        status.type_name = Some("Status".to_string());

        let mut weights = field("weights", 3, FieldType::Float);
        weights.label = Label::Repeated;

        let oneof = map_oneof(
            "Order",
            "extra",
            quote!(order::Extra),
            &[&field("note", 4, FieldType::String), &field("code", 5, FieldType::Sint32)],
            &PathResolver,
        )
        .unwrap();

        MessageBinding {
            name: "Order".to_string(),
            ident: naming::ident("Order"),
            members: vec![
                binding(field("id", 1, FieldType::Uint64)),
                binding(status),
                binding(weights),
                Member::Oneof(oneof),
            ],
        }
    }

    fn items(tokens: TokenStream) -> Vec<syn::Item> {
        syn::parse2::<syn::File>(tokens).unwrap().items
    }

    #[test]
    fn test_message_struct() {
        let emitted = Emitter::default().message_struct(&order());
        let [syn::Item::Struct(item)] = <[syn::Item; 1]>::try_from(items(emitted)).unwrap() else {
            panic!("expected a single struct");
        };

        let members = item
            .fields
            .iter()
            .map(|f| (f.ident.as_ref().unwrap().to_string(), quote!(#f).to_string()))
            .collect::<Vec<_>>();

        assert_eq!(item.ident, "Order");
        assert_eq!(members[0], ("id".to_string(), quote!(pub id: u64).to_string()));
        assert_eq!(members[1], ("status".to_string(), quote!(pub status: i32).to_string()));
        assert_eq!(
            members[2].1,
            quote!(pub weights: ::std::vec::Vec<f32>).to_string()
        );
        assert_eq!(
            members[3].1,
            quote!(pub extra: ::core::option::Option<order::Extra>).to_string()
        );
    }

    #[test]
    fn test_message_impl_parses() {
        let emitted = Emitter::default().message_impl(&order());
        let items = items(emitted.clone());
        assert_eq!(items.len(), 3);

        let text = emitted.to_string();
        let tag = quote!(pub const WEIGHTS_TAG: ::protoflat::FieldHeader =
            ::protoflat::FieldHeader::new(3, ::protoflat::WireType::LengthDelimited););
        assert!(text.contains(&tag.to_string()), "{}", text);
        let packed = quote!(::protoflat::field::size_packed::<::protoflat::Fixed, _>);
        let oneof = quote!(4 | 5 => <order::Extra as ::protoflat::Oneof>::merge);
        assert!(text.contains(&packed.to_string()));
        assert!(text.contains(&oneof.to_string()));
        assert!(text.contains(&quote!(pub fn set_status(&mut self, value: Status)).to_string()));
    }

    #[test]
    fn test_oneof_tags_are_checked() {
        let text = Emitter::default().message_impl(&order()).to_string();
        let check = quote! {
            const _: () = ::core::assert!(
                ::protoflat::tags_match(&[4, 5], <order::Extra as ::protoflat::Oneof>::TAGS),
                "Order.extra: tags do not match the oneof enum"
            );
        };
        assert!(text.contains(&check.to_string()), "{}", text);

        let Member::Oneof(oneof) = order().members.remove(3) else {
            panic!("expected the oneof member");
        };
        let imp = Emitter::default().oneof_impl(&oneof).to_string();
        assert!(imp.contains(&quote!(const TAGS: &'static [u32] = &[4, 5];).to_string()));
    }

    #[test]
    fn test_accessors_can_be_disabled() {
        let config = GeneratorConfig::default().with_accessors(false);
        let emitted = Emitter::new(&config).unwrap().message_impl(&order()).to_string();

        assert!(!emitted.contains("set_status"));
    }

    #[test]
    fn test_runtime_path() {
        let config = GeneratorConfig::default().with_runtime_path("crate::rt");
        let emitted = Emitter::new(&config).unwrap().message_impl(&order()).to_string();
        assert!(emitted.contains(&quote!(impl crate::rt::Message for Order).to_string()));

        let config = GeneratorConfig::default().with_runtime_path("not a path");
        assert!(matches!(Emitter::new(&config), Err(Error::InvalidRuntimePath(_))));
    }

    #[test]
    fn test_empty_message() {
        let message = MessageBinding {
            name: "Empty".to_string(),
            ident: naming::ident("Empty"),
            members: vec![],
        };
        let text = Emitter::default().message_impl(&message).to_string();

        assert!(text.contains(&quote!(fn size(&self) -> usize { 0 }).to_string()));
        assert!(text.contains(&quote!(fn is_default(&self) -> bool { true }).to_string()));
        assert!(text.contains(&quote!(#[allow(unused_variables)]).to_string()));
        assert_eq!(items(Emitter::default().message_impl(&message)).len(), 2);
    }

    #[test]
    fn test_oneof_items() {
        let emitter = Emitter::default();
        let Member::Oneof(oneof) = order().members.remove(3) else {
            panic!("expected the oneof member");
        };

        let def = emitter.oneof_enum(&oneof).to_string();
        assert!(def.contains(&quote!(Note(::std::string::String)).to_string()));
        assert!(def.contains(&quote!(Code(i32)).to_string()));

        let imp = emitter.oneof_impl(&oneof);
        assert_eq!(items(imp.clone()).len(), 2);
        let size = quote!(::protoflat::field::size_explicit::<::protoflat::Zigzag, _>);
        assert!(imp.to_string().contains(&size.to_string()));
    }

    #[test]
    fn test_enum_items() {
        let descriptor = EnumDescriptor {
            name: "Status".to_string(),
            values: vec![
                EnumValueDescriptor {
                    name: "PENDING".to_string(),
                    number: 0,
                },
                EnumValueDescriptor {
                    name: "LOST".to_string(),
                    number: -2,
                },
            ],
        };
        let binding = map_enum("Status", &descriptor).unwrap();
        let emitter = Emitter::default();

        let def = emitter.enum_def(&binding);
        assert_eq!(items(def.clone()).len(), 1);
        assert!(def.to_string().contains(&quote!(#[default] Pending = 0).to_string()));
        assert!(def.to_string().contains(&quote!(Lost = -2).to_string()));

        let imp = emitter.enum_impl(&binding).to_string();
        assert!(imp.contains(&quote!(-2 => ::core::option::Option::Some(Self::Lost)).to_string()));
        assert!(imp.contains(&quote!(Self::Lost => "LOST").to_string()));
    }
}
