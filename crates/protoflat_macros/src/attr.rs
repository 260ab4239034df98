//! Parsing of `#[protoflat(...)]` attributes.

use proc_macro2::Span;
use protoflat_codegen::schema::{FieldDescriptor, FieldType, Label};
use syn::spanned::Spanned;

const ATTR: &str = "protoflat";

/// What a field attribute declares.
pub(crate) enum FieldAttr {
    Field(FieldDescriptor),
    Oneof { path: syn::Path, tags: Vec<u32> },
}

/// Parses the attribute on a struct field or enum variant named `name`.
///
/// `#[protoflat(<type>, tag = N [, repeated] [, packed = bool] [, enumeration = "Path"])]`
/// or `#[protoflat(oneof = "Path", tags = "N, M")]`.
pub(crate) fn parse_field(
    name: &str,
    span: Span,
    attrs: &[syn::Attribute],
) -> syn::Result<FieldAttr> {
    let attr = attrs
        .iter()
        .find(|a| a.path().is_ident(ATTR))
        .ok_or_else(|| syn::Error::new(span, "missing #[protoflat(...)] attribute"))?;

    let mut ty = None;
    let mut tag = None;
    let mut repeated = false;
    let mut packed = None;
    let mut enumeration = None;
    let mut oneof = None;
    let mut tags = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("tag") {
            let lit: syn::LitInt = meta.value()?.parse()?;
            tag = Some(lit.base10_parse::<u32>()?);
            return Ok(());
        }

        if meta.path.is_ident("repeated") {
            repeated = true;
            return Ok(());
        }

        if meta.path.is_ident("packed") {
            let lit: syn::LitBool = meta.value()?.parse()?;
            packed = Some(lit.value);
            return Ok(());
        }

        if meta.path.is_ident("enumeration") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            enumeration = Some(lit.value());
            ty = Some(FieldType::Enum);
            return Ok(());
        }

        if meta.path.is_ident("oneof") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            oneof = Some(lit.parse::<syn::Path>()?);
            return Ok(());
        }

        if meta.path.is_ident("tags") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            tags = Some(parse_tags(&lit)?);
            return Ok(());
        }

        let declared = meta
            .path
            .get_ident()
            .and_then(|ident| ident.to_string().parse::<FieldType>().ok());

        match declared {
            Some(FieldType::Enum) => {
                Err(meta.error("use `enumeration = \"Path\"` for enum fields"))
            }
            Some(declared) => {
                ty = Some(declared);
                Ok(())
            }
            None => Err(meta.error("unsupported protoflat attribute")),
        }
    })?;

    if let Some(path) = oneof {
        let tags = tags.ok_or_else(|| {
            syn::Error::new(attr.span(), "oneof fields need `tags = \"N, M\"`")
        })?;
        return Ok(FieldAttr::Oneof { path, tags });
    }

    let ty = ty.ok_or_else(|| syn::Error::new(attr.span(), "missing field type, e.g. `int32`"))?;
    let number = tag.ok_or_else(|| syn::Error::new(attr.span(), "missing `tag = N`"))?;

    Ok(FieldAttr::Field(FieldDescriptor {
        name: name.to_string(),
        number,
        ty,
        label: match repeated {
            true => Label::Repeated,
            false => Label::Singular,
        },
        packed,
        oneof_index: None,
        type_name: enumeration,
    }))
}

fn parse_tags(lit: &syn::LitStr) -> syn::Result<Vec<u32>> {
    lit.value()
        .split(',')
        .map(|tag| {
            tag.trim()
                .parse::<u32>()
                .map_err(|_| syn::Error::new(lit.span(), format!("invalid tag `{}`", tag.trim())))
        })
        .collect()
}

