//! `#[derive(Oneof)]` for enums whose variants each wrap one alternative.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use protoflat_codegen::mapper::{self, AlternativeBinding, OneofBinding, PathResolver};
use protoflat_codegen::schema::Label;
use protoflat_codegen::Emitter;
use quote::quote;
use syn::spanned::Spanned;

use crate::attr::{self, FieldAttr};

pub(crate) fn derive(input: syn::DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let name = ident.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&input.generics, "generic oneofs are not supported"));
    }

    let syn::Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input, "Oneof can only be derived for enums"));
    };

    let mut numbers = HashSet::new();
    let alternatives = data
        .variants
        .iter()
        .map(|variant| {
            let ty = match &variant.fields {
                syn::Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
                _ => {
                    return Err(syn::Error::new_spanned(
                        variant,
                        "oneof variants must wrap exactly one value",
                    ))
                }
            };

            let variant_name = variant.ident.to_string();
            let parsed = attr::parse_field(&variant_name, variant.span(), &variant.attrs)?;
            let descriptor = match parsed {
                FieldAttr::Field(descriptor) => descriptor,
                FieldAttr::Oneof { .. } => {
                    return Err(syn::Error::new_spanned(variant, "oneofs cannot nest"));
                }
            };

            if descriptor.label == Label::Repeated {
                return Err(syn::Error::new_spanned(
                    variant,
                    "oneof alternatives cannot be repeated",
                ));
            }
            if !numbers.insert(descriptor.number) {
                return Err(syn::Error::new_spanned(
                    variant,
                    format!("tag {} is used more than once", descriptor.number),
                ));
            }

            let mut field =
                mapper::map_field(&name, &descriptor, variant.ident.clone(), &PathResolver)
                    .map_err(|e| syn::Error::new_spanned(variant, e.to_string()))?;
            field.rust_type = quote!(#ty);

            Ok(AlternativeBinding {
                variant: variant.ident.clone(),
                field,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    if alternatives.is_empty() {
        return Err(syn::Error::new_spanned(&input, "a oneof needs at least one alternative"));
    }

    let binding = OneofBinding {
        name: name.clone(),
        ident: ident.clone(),
        enum_ident: ident.clone(),
        enum_path: quote!(#ident),
        numbers: alternatives.iter().map(|alt| alt.field.number).collect(),
        alternatives,
    };

    Ok(Emitter::default().oneof_impl(&binding))
}
