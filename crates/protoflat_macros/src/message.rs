//! `#[derive(Message)]` for structs with named fields.

use proc_macro2::TokenStream;
use protoflat_codegen::mapper::{self, Member, MessageBinding, OneofBinding, PathResolver};
use protoflat_codegen::Emitter;
use quote::quote;
use syn::spanned::Spanned;

use crate::attr::{self, FieldAttr};

pub(crate) fn derive(input: syn::DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let name = ident.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&input.generics, "generic messages are not supported"));
    }

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => &fields.named,
            syn::Fields::Unit => return Ok(Emitter::default().message_impl(&empty(ident))),
            syn::Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(&input, "only named fields are supported"))
            }
        },
        _ => return Err(syn::Error::new_spanned(&input, "Message can only be derived for structs")),
    };

    let members = fields
        .iter()
        .map(|field| {
            let Some(field_ident) = field.ident.clone() else {
                return Err(syn::Error::new_spanned(field, "field must have a name"));
            };

            match attr::parse_field(&field_ident.to_string(), field.span(), &field.attrs)? {
                FieldAttr::Field(descriptor) => {
                    mapper::map_field(&name, &descriptor, field_ident, &PathResolver)
                        .map(Member::Field)
                        .map_err(|e| syn::Error::new_spanned(field, e.to_string()))
                }
                FieldAttr::Oneof { path, tags } => {
                    let enum_ident = match path.segments.last() {
                        Some(segment) => segment.ident.clone(),
                        None => return Err(syn::Error::new_spanned(&path, "empty oneof path")),
                    };

                    Ok(Member::Oneof(OneofBinding {
                        name: field_ident.to_string(),
                        ident: field_ident,
                        enum_ident,
                        enum_path: quote!(#path),
                        numbers: tags,
                        alternatives: Vec::new(),
                    }))
                }
            }
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let binding = MessageBinding {
        name,
        ident: ident.clone(),
        members,
    };
    mapper::check_unique_numbers(&binding)
        .map_err(|e| syn::Error::new_spanned(ident, e.to_string()))?;

    Ok(Emitter::default().message_impl(&binding))
}

fn empty(ident: &syn::Ident) -> MessageBinding {
    MessageBinding {
        name: ident.to_string(),
        ident: ident.clone(),
        members: Vec::new(),
    }
}
