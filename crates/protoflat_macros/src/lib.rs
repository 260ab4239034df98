//! Derive macros for protoflat messages, oneofs and enumerations.
//!
//! The derives map the attributes through the same mapper the file generator
//! uses, so a derived type and a generated one with the same fields produce
//! identical bytes.

mod attr;
mod enumeration;
mod message;
mod oneof;

/// Implements `Message` for a struct.
///
/// Every field carries its declared type and tag:
///
/// ```ignore
/// #[derive(Clone, Debug, Default, PartialEq, protoflat::Message)]
/// pub struct Order {
///     #[protoflat(uint64, tag = 1)]
///     pub id: u64,
///
///     #[protoflat(sint32, tag = 2, repeated)]
///     pub deltas: Vec<i32>,
///
///     #[protoflat(enumeration = "Status", tag = 3)]
///     pub status: i32,
///
///     #[protoflat(message, tag = 4, repeated)]
///     pub lines: Vec<Line>,
///
///     #[protoflat(oneof = "Extra", tags = "5, 6")]
///     pub extra: Option<Extra>,
/// }
/// ```
///
/// Repeated scalars are packed unless `packed = false` is given. Enum fields
/// are stored as `i32` and get typed accessors (`status()`, `set_status()`).
/// The `tags` of a oneof member must match the ones its enum declares, in any
/// order; a mismatch fails to compile.
#[proc_macro_derive(Message, attributes(protoflat))]
pub fn derive_message(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    message::derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Oneof` for an enum with one single-value variant per
/// alternative.
///
/// ```ignore
/// #[derive(Clone, Debug, PartialEq, protoflat::Oneof)]
/// pub enum Extra {
///     #[protoflat(string, tag = 5)]
///     Note(String),
///
///     #[protoflat(message, tag = 6)]
///     Gift(Line),
/// }
/// ```
#[proc_macro_derive(Oneof, attributes(protoflat))]
pub fn derive_oneof(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    oneof::derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Enumeration` and `From<_> for i32` for a fieldless enum.
///
/// Every variant needs an explicit number; the enum must also implement
/// `Copy` and `Default`.
#[proc_macro_derive(Enumeration)]
pub fn derive_enumeration(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    enumeration::derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
