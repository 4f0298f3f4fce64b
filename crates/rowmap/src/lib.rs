//! # rowmap
//!
//! Map CSV rows onto Rust structs by column name.
//!
//! A record type's columns come from its fields: a field is read from and
//! written to the column named by its `#[csv(tag = "...")]`, or by the field
//! name when there is no tag. Flattened records contribute their columns to
//! the parent, and when two fields claim the same column the shallowest one
//! wins.
//!
//! ## Features
//!
//! - `#[derive(Record)]` for structs with named fields
//! - Header binding by name, in any column order, with unused columns reported
//! - Optional fields (`Option<T>`) for cells that may be empty
//! - `omitempty` to write zero values as empty cells
//! - Streaming [`Decoder`] and [`Encoder`] sessions, plus one-shot
//!   [`marshal`] / [`unmarshal`]
//!
//! ## Example
//!
//! ```rust
//! use rowmap::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct Person {
//!     #[csv(tag = "id,omitempty")]
//!     id: Option<i64>,
//!     name: String,
//!     age: u8,
//! }
//!
//! let data = "id,name,age,city\n,Alice,30,Paris\n7,Bob,41,Oslo\n";
//! let mut decoder = Decoder::from_reader(data.as_bytes(), &CsvReadOptions::default());
//!
//! let alice: Person = decoder.decode().unwrap().unwrap();
//! assert_eq!(alice, Person { id: None, name: "Alice".into(), age: 30 });
//! assert_eq!(decoder.unused(), &[3]);
//!
//! let bob: Person = decoder.decode().unwrap().unwrap();
//! assert_eq!(bob.id, Some(7));
//! assert!(decoder.decode::<Person>().unwrap().is_none());
//!
//! let bytes = marshal(&[alice, bob]).unwrap();
//! assert_eq!(bytes, b"id,name,age\n,Alice,30\n7,Bob,41\n");
//! ```

pub mod prelude;

// Re-export core types (the derive expands to paths under this crate)
pub use rowmap_core::{
    bind,
    cell_at,
    cell_at_mut,
    convert,
    format,
    header,
    resolve,
    // Cells
    Cell,
    CellField,
    DescriptorCache,
    // Errors
    Error,
    FieldDescriptor,
    FieldEntry,
    // Resolution
    FieldMap,
    FieldMut,
    FieldRef,
    FieldShape,
    FieldType,
    // Descriptors
    Fields,
    HeaderBinding,
    Kind,
    Record,
    Result,
    Tag,
    TypeDescriptor,
    TypeShape,
    Value,
};

#[cfg(feature = "derive")]
pub use rowmap_derive::Record;

// Re-export CSV sessions
pub use rowmap_csv::{
    marshal, marshal_with, unmarshal, unmarshal_with, CsvError, CsvReadOptions, CsvResult,
    CsvWriteOptions, Decoder, DecoderState, Encoder, EncoderState, LineTerminator, Records,
    RowSink, RowSource,
};
