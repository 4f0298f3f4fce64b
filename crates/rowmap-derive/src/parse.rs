//! Parsing logic for the Record derive macro.

use darling::{ast, FromDeriveInput, FromField};
use syn::{Generics, Ident, Path, Type};

/// Parsed struct-level options.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(csv), supports(struct_named))]
pub struct RecordInput {
    /// The struct identifier.
    pub ident: Ident,

    /// Generic parameters.
    pub generics: Generics,

    /// Struct data (fields).
    pub data: ast::Data<(), FieldInput>,

    /// Path to the rowmap crate (e.g., `#[csv(crate = "rowmap_core")]`).
    #[darling(default, rename = "crate")]
    pub krate: Option<Path>,
}

impl RecordInput {
    /// Get the fields as a vector.
    pub fn fields(&self) -> Vec<&FieldInput> {
        self.data
            .as_ref()
            .take_struct()
            .map(|s| s.fields.to_vec())
            .unwrap_or_default()
    }
}

/// Parsed field-level options.
#[derive(Debug, FromField)]
#[darling(attributes(csv))]
pub struct FieldInput {
    /// Field identifier.
    pub ident: Option<Ident>,

    /// Field type.
    pub ty: Type,

    /// Raw column tag.
    #[darling(default)]
    pub tag: Option<String>,

    /// Merge a nested record's columns into the parent.
    #[darling(default)]
    pub flatten: bool,
}

impl FieldInput {
    /// Get the field identifier (panics if None).
    pub fn ident(&self) -> &Ident {
        self.ident.as_ref().expect("named field required")
    }

    /// Field name as written, without a raw-identifier prefix.
    pub fn name(&self) -> String {
        let name = self.ident().to_string();
        name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
    }

    /// Column name declared in the tag (empty when none).
    pub fn tag_name(&self) -> &str {
        self.tag
            .as_deref()
            .and_then(|t| t.split(',').next())
            .unwrap_or("")
    }

    /// Check if the tag excludes this field.
    pub fn is_ignored(&self) -> bool {
        self.tag_name() == "-"
    }
}
