//! # rowmap-core
//!
//! Field resolution and value conversion engine for the rowmap library.
//!
//! This crate provides the pieces the CSV sessions are built from:
//! - [`Record`] and [`TypeDescriptor`] - Describe a struct's field tree
//! - [`resolve`] and [`FieldMap`] - Columns a record type reads and writes
//! - [`DescriptorCache`] - Shared, lazily built field maps per type
//! - [`bind`] and [`HeaderBinding`] - Header positions mapped to fields
//! - [`convert`] and [`format`] - Cell text to typed [`Value`]s and back
//!
//! ## Example
//!
//! ```rust
//! use rowmap_core::{convert, format, FieldType, Kind, Value};
//!
//! let ty = FieldType::optional(Kind::I32);
//! assert_eq!(convert("", ty, true, "id").unwrap(), Value::Absent);
//! assert_eq!(convert("", ty, false, "id").unwrap(), Value::Int(0));
//! assert_eq!(convert("42", ty, true, "id").unwrap(), Value::Int(42));
//! assert_eq!(format(&Value::Int(42), ty, true), "42");
//! ```

pub mod binding;
pub mod cache;
pub mod cell;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod resolve;
pub mod tag;
pub mod value;

// Re-exports for convenience
pub use binding::{bind, HeaderBinding};
pub use cache::DescriptorCache;
pub use cell::{Cell, CellField};
pub use convert::{convert, format};
pub use descriptor::{
    cell_at, cell_at_mut, FieldDescriptor, FieldMut, FieldRef, FieldShape, Fields, Record,
    TypeDescriptor, TypeShape,
};
pub use error::{Error, Result};
pub use resolve::{resolve, FieldEntry, FieldMap};
pub use tag::Tag;
pub use value::{FieldType, Kind, Value};

/// Column names `T` encodes to, in order
pub fn header<T: Record>() -> Result<Vec<String>> {
    let map = DescriptorCache::global().field_map::<T>()?;
    Ok(map.names().map(str::to_string).collect())
}
