//! Code generation for the Record derive macro.

mod record;

use crate::parse::RecordInput;
use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Main entry point for code generation.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = RecordInput::from_derive_input(input)
        .map_err(|e| syn::Error::new_spanned(input, e.to_string()))?;

    if let Some(lifetime) = parsed.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Record types must be 'static; lifetime parameters are not supported.",
        ));
    }

    for field in parsed.fields() {
        // A flattened record contributes many columns, so it cannot be one
        if field.flatten && !field.is_ignored() && !field.tag_name().is_empty() {
            return Err(syn::Error::new_spanned(
                field.ident(),
                "#[csv(flatten)] fields cannot name a column. \
                 Use an empty name (e.g. tag = \",omitempty\") or drop the tag.",
            ));
        }
    }

    record::generate(&parsed)
}
