//! Derive macro for the rowmap `Record` trait.
//!
//! This crate provides `#[derive(Record)]`, which generates:
//! - `impl Fields for {Name}`: field access by declaration index
//! - `impl Record for {Name}`: the type descriptor
//!
//! # Usage
//!
//! ```ignore
//! use rowmap::Record;
//!
//! #[derive(Default, Record)]
//! struct User {
//!     #[csv(tag = "id,omitempty")]
//!     id: Option<i64>,
//!     name: String,
//!     #[csv(flatten)]
//!     address: Address,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod parse;

/// Derive the `Record` trait for a struct with named fields.
///
/// The struct must also implement `Default`.
///
/// # Attributes
///
/// ## Field Attributes
///
/// - `#[csv(tag = "name,omitempty")]`: Column tag. An empty name keeps the
///   field name; `"-"` excludes the field (its type then needs no cell
///   conversion).
/// - `#[csv(flatten)]`: Merge a nested `Record`'s columns into the parent.
///
/// ## Struct Attributes
///
/// - `#[csv(crate = "path")]`: Path to the rowmap crate (default `::rowmap`).
#[proc_macro_derive(Record, attributes(csv))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match codegen::expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
