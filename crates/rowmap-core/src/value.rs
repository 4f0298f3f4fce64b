//! Field kinds and converted values

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Primitive kind of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

impl Kind {
    /// Rust name of the kind, used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "string",
        }
    }

    /// Check if this is a signed integer kind
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 | Kind::Isize
        )
    }

    /// Check if this is an unsigned integer kind
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 | Kind::Usize
        )
    }

    /// Check if this is a floating-point kind
    pub fn is_float(&self) -> bool {
        matches!(self, Kind::F32 | Kind::F64)
    }

    /// The zero value of this kind
    pub fn zero(&self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::String => Value::Str(String::new()),
            Kind::F32 | Kind::F64 => Value::Float(0.0),
            k if k.is_signed() => Value::Int(0),
            _ => Value::Uint(0),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a cell field: a kind, optionally wrapped in `Option`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldType {
    /// Underlying primitive kind
    pub kind: Kind,
    /// Whether the field can be absent (`Option<T>`)
    pub optional: bool,
}

impl FieldType {
    /// A plain field of the given kind
    pub const fn required(kind: Kind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    /// An `Option`-wrapped field of the given kind
    pub const fn optional(kind: Kind) -> Self {
        Self {
            kind,
            optional: true,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// A converted cell value
///
/// Integers are widened to 64 bits; the declared [`Kind`] carries the width.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// No value (an empty optional field)
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Check if the value is absent
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Check if the value is absent or the zero value of its kind
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty(),
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }
}
