//! `#[derive(Enumeration)]` for fieldless enums with explicit discriminants.

use proc_macro2::TokenStream;
use protoflat_codegen::mapper::{EnumBinding, EnumValueBinding};
use protoflat_codegen::schema::{EnumDescriptor, EnumValueDescriptor};
use protoflat_codegen::Emitter;

pub(crate) fn derive(input: syn::DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;

    let syn::Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input, "Enumeration can only be derived for enums"));
    };

    let values = data
        .variants
        .iter()
        .map(|variant| {
            if !matches!(variant.fields, syn::Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    variant,
                    "enumeration variants cannot hold values",
                ));
            }

            let Some((_, discriminant)) = &variant.discriminant else {
                return Err(syn::Error::new_spanned(
                    variant,
                    "enumeration variants need an explicit number",
                ));
            };

            Ok(EnumValueBinding {
                variant: variant.ident.clone(),
                name: variant.ident.to_string(),
                number: discriminant_value(discriminant)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    // same checks the generator applies to schema enums
    let descriptor = EnumDescriptor {
        name: ident.to_string(),
        values: values
            .iter()
            .map(|value| EnumValueDescriptor {
                name: value.name.clone(),
                number: value.number,
            })
            .collect(),
    };
    descriptor
        .validate(&descriptor.name)
        .map_err(|e| syn::Error::new_spanned(ident, e.to_string()))?;

    let binding = EnumBinding {
        name: ident.to_string(),
        ident: ident.clone(),
        values,
    };

    Ok(Emitter::default().enum_impl(&binding))
}

/// Integer literal, optionally negated.
fn discriminant_value(expr: &syn::Expr) -> syn::Result<i32> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Int(lit),
            ..
        }) => lit.base10_parse::<i32>(),
        syn::Expr::Unary(syn::ExprUnary {
            op: syn::UnOp::Neg(_),
            expr,
            ..
        }) => match expr.as_ref() {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Int(lit),
                ..
            }) => {
                let magnitude = lit.base10_parse::<i64>()?;
                i32::try_from(-magnitude)
                    .map_err(|_| syn::Error::new_spanned(lit, "number out of range for i32"))
            }
            other => Err(syn::Error::new_spanned(other, "expected an integer literal")),
        },
        other => Err(syn::Error::new_spanned(other, "expected an integer literal")),
    }
}
