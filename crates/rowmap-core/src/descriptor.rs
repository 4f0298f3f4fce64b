//! Record type descriptors
//!
//! A [`TypeDescriptor`] lists a record's fields in declaration order, each
//! with its raw tag and its shape: a convertible cell, a flattened
//! sub-record, or an opaque value that must be tagged `-`.
//!
//! Descriptors are normally generated by `#[derive(Record)]`, but can be
//! written by hand:
//!
//! ```rust
//! use rowmap_core::{
//!     Cell, FieldDescriptor, FieldMut, FieldRef, Fields, Record, TypeDescriptor,
//! };
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Fields for Point {
//!     fn field(&self, index: usize) -> Option<FieldRef<'_>> {
//!         match index {
//!             0 => Some(FieldRef::Cell(&self.x)),
//!             1 => Some(FieldRef::Cell(&self.y)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
//!         match index {
//!             0 => Some(FieldMut::Cell(&mut self.x)),
//!             1 => Some(FieldMut::Cell(&mut self.y)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl Record for Point {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::record::<Self>(vec![
//!             FieldDescriptor::cell("x", None, <i32 as Cell>::FIELD_TYPE),
//!             FieldDescriptor::cell("y", None, <i32 as Cell>::FIELD_TYPE),
//!         ])
//!     }
//! }
//! ```

use std::any::{type_name, TypeId};
use std::fmt;

use crate::cell::CellField;
use crate::value::FieldType;

/// Shape of a single declared field
#[derive(Clone, Copy)]
pub enum FieldShape {
    /// A value converted to and from one cell
    Cell(FieldType),
    /// A flattened sub-record whose fields join the parent's columns
    Record(fn() -> TypeDescriptor),
    /// A value with no cell conversion; only valid when tagged `-`
    Opaque,
}

impl fmt::Debug for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldShape::Cell(ty) => write!(f, "Cell({ty})"),
            FieldShape::Record(describe) => write!(f, "Record({})", describe().name()),
            FieldShape::Opaque => f.write_str("Opaque"),
        }
    }
}

/// A declared field of a record type
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Rust field name
    pub name: &'static str,
    /// Raw column tag (`name[,option...]`), if any
    pub tag: Option<&'static str>,
    /// Field shape
    pub shape: FieldShape,
}

impl FieldDescriptor {
    /// A field converted to and from one cell
    pub fn cell(name: &'static str, tag: Option<&'static str>, ty: FieldType) -> Self {
        Self {
            name,
            tag,
            shape: FieldShape::Cell(ty),
        }
    }

    /// A flattened sub-record
    pub fn record(
        name: &'static str,
        tag: Option<&'static str>,
        describe: fn() -> TypeDescriptor,
    ) -> Self {
        Self {
            name,
            tag,
            shape: FieldShape::Record(describe),
        }
    }

    /// A field without a cell conversion
    pub fn opaque(name: &'static str, tag: Option<&'static str>) -> Self {
        Self {
            name,
            tag,
            shape: FieldShape::Opaque,
        }
    }
}

/// Shape of a described type
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// A record of named fields in declaration order
    Record(Vec<FieldDescriptor>),
    /// A single value; not usable as a record
    Scalar(FieldType),
}

/// Description of a Rust type's field tree
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    shape: TypeShape,
}

impl TypeDescriptor {
    /// Describe `T` as a record with the given fields
    pub fn record<T: 'static>(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            shape: TypeShape::Record(fields),
        }
    }

    /// Describe `T` as a single value
    pub fn scalar<T: 'static>(ty: FieldType) -> Self {
        Self {
            name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            shape: TypeShape::Scalar(ty),
        }
    }

    /// Rust type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Identity of the described type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Shape of the described type
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Declared fields, if this is a record
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match &self.shape {
            TypeShape::Record(fields) => Some(fields),
            TypeShape::Scalar(_) => None,
        }
    }
}

/// Shared access to a field, by declaration index
pub enum FieldRef<'a> {
    Cell(&'a dyn CellField),
    Record(&'a dyn Fields),
}

/// Mutable access to a field, by declaration index
pub enum FieldMut<'a> {
    Cell(&'a mut dyn CellField),
    Record(&'a mut dyn Fields),
}

/// Object-safe field access used to walk field paths
pub trait Fields {
    /// Field at a declaration index (`None` for opaque or unknown fields)
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Mutable field at a declaration index
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// A structured record that can be decoded from and encoded to rows
pub trait Record: Fields + Default + 'static {
    /// Describe the record's field tree
    fn descriptor() -> TypeDescriptor;
}

/// Follow a field path to a cell field
pub fn cell_at<'a>(record: &'a dyn Fields, path: &[usize]) -> Option<&'a dyn CellField> {
    let (&first, rest) = path.split_first()?;
    match record.field(first)? {
        FieldRef::Cell(cell) if rest.is_empty() => Some(cell),
        FieldRef::Record(inner) if !rest.is_empty() => cell_at(inner, rest),
        _ => None,
    }
}

/// Follow a field path to a mutable cell field
pub fn cell_at_mut<'a>(
    record: &'a mut dyn Fields,
    path: &[usize],
) -> Option<&'a mut dyn CellField> {
    let (&first, rest) = path.split_first()?;
    match record.field_mut(first)? {
        FieldMut::Cell(cell) if rest.is_empty() => Some(cell),
        FieldMut::Record(inner) if !rest.is_empty() => cell_at_mut(inner, rest),
        _ => None,
    }
}
