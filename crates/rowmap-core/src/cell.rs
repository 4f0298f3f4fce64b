//! Cell-convertible field types
//!
//! [`CellField`] is the object-safe view the decoder and encoder use to move
//! [`Value`]s in and out of a record field. [`Cell`] adds the static
//! [`FieldType`] that descriptors are built from.

use crate::value::{FieldType, Kind, Value};

/// Object-safe access to a single cell field
pub trait CellField {
    /// Declared type of the field
    fn field_type(&self) -> FieldType;

    /// Current value of the field
    fn to_value(&self) -> Value;

    /// Store a converted value.
    ///
    /// Returns the value back when it does not fit the field.
    fn set_value(&mut self, value: Value) -> Result<(), Value>;
}

/// A field type with a statically known [`FieldType`]
pub trait Cell: CellField + Default {
    /// Declared type of every field of this Rust type
    const FIELD_TYPE: FieldType;
}

macro_rules! impl_signed {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl CellField for $ty {
            fn field_type(&self) -> FieldType {
                <$ty as Cell>::FIELD_TYPE
            }

            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }

            fn set_value(&mut self, value: Value) -> Result<(), Value> {
                match value {
                    Value::Int(v) => {
                        *self = <$ty>::try_from(v).map_err(|_| Value::Int(v))?;
                        Ok(())
                    }
                    other => Err(other),
                }
            }
        }

        impl Cell for $ty {
            const FIELD_TYPE: FieldType = FieldType::required(Kind::$kind);
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl CellField for $ty {
            fn field_type(&self) -> FieldType {
                <$ty as Cell>::FIELD_TYPE
            }

            fn to_value(&self) -> Value {
                Value::Uint(*self as u64)
            }

            fn set_value(&mut self, value: Value) -> Result<(), Value> {
                match value {
                    Value::Uint(v) => {
                        *self = <$ty>::try_from(v).map_err(|_| Value::Uint(v))?;
                        Ok(())
                    }
                    other => Err(other),
                }
            }
        }

        impl Cell for $ty {
            const FIELD_TYPE: FieldType = FieldType::required(Kind::$kind);
        }
    )*};
}

impl_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
impl_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl CellField for f32 {
    fn field_type(&self) -> FieldType {
        <f32 as Cell>::FIELD_TYPE
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn set_value(&mut self, value: Value) -> Result<(), Value> {
        match value {
            // Converter already range-checked the f32 parse
            Value::Float(v) => {
                *self = v as f32;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Cell for f32 {
    const FIELD_TYPE: FieldType = FieldType::required(Kind::F32);
}

impl CellField for f64 {
    fn field_type(&self) -> FieldType {
        <f64 as Cell>::FIELD_TYPE
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn set_value(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::Float(v) => {
                *self = v;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Cell for f64 {
    const FIELD_TYPE: FieldType = FieldType::required(Kind::F64);
}

impl CellField for bool {
    fn field_type(&self) -> FieldType {
        <bool as Cell>::FIELD_TYPE
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn set_value(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::Bool(v) => {
                *self = v;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Cell for bool {
    const FIELD_TYPE: FieldType = FieldType::required(Kind::Bool);
}

impl CellField for String {
    fn field_type(&self) -> FieldType {
        <String as Cell>::FIELD_TYPE
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn set_value(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::Str(v) => {
                *self = v;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Cell for String {
    const FIELD_TYPE: FieldType = FieldType::required(Kind::String);
}

impl<T: Cell> CellField for Option<T> {
    fn field_type(&self) -> FieldType {
        <Self as Cell>::FIELD_TYPE
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Absent,
        }
    }

    fn set_value(&mut self, value: Value) -> Result<(), Value> {
        if value.is_absent() {
            *self = None;
            return Ok(());
        }

        let mut inner = T::default();
        inner.set_value(value)?;
        *self = Some(inner);
        Ok(())
    }
}

impl<T: Cell> Cell for Option<T> {
    const FIELD_TYPE: FieldType = FieldType::optional(T::FIELD_TYPE.kind);
}
