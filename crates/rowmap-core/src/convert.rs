//! Cell text <-> value conversion
//!
//! Conversion never guesses: anything that is not exactly a value of the
//! declared kind is an error.

use crate::error::{Error, Result};
use crate::value::{FieldType, Kind, Value};

/// Convert a cell to a value of the declared field type.
///
/// An empty cell becomes [`Value::Absent`] for an optional `omitempty` field
/// and the kind's zero value otherwise, so an optional field without
/// `omitempty` holds a present zero. `field` is only used for error context.
pub fn convert(raw: &str, ty: FieldType, omitempty: bool, field: &str) -> Result<Value> {
    if raw.is_empty() {
        return Ok(if ty.optional && omitempty {
            Value::Absent
        } else {
            ty.kind.zero()
        });
    }

    let fail = || Error::Conversion {
        field: field.to_string(),
        value: raw.to_string(),
        kind: ty.kind,
        row: None,
        column: None,
    };

    let value = match ty.kind {
        Kind::String => Value::Str(raw.to_string()),
        Kind::Bool => match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return Err(fail()),
        },
        Kind::F32 => {
            let v: f32 = raw.parse().map_err(|_| fail())?;
            if v.is_infinite() && !is_infinity_literal(raw) {
                return Err(fail());
            }
            Value::Float(f64::from(v))
        }
        Kind::F64 => {
            let v: f64 = raw.parse().map_err(|_| fail())?;
            if v.is_infinite() && !is_infinity_literal(raw) {
                return Err(fail());
            }
            Value::Float(v)
        }
        kind if kind.is_signed() => {
            let v: i64 = raw.parse().map_err(|_| fail())?;
            let (min, max) = signed_bounds(kind);
            if v < min || v > max {
                return Err(fail());
            }
            Value::Int(v)
        }
        kind => {
            let v: u64 = raw.parse().map_err(|_| fail())?;
            if v > unsigned_max(kind) {
                return Err(fail());
            }
            Value::Uint(v)
        }
    };

    Ok(value)
}

/// Format a value as cell text.
///
/// Absent values are always empty. With `omitempty`, a zero value of a
/// non-optional field is written as an empty cell; a present optional value
/// is always written out.
pub fn format(value: &Value, ty: FieldType, omitempty: bool) -> String {
    if omitempty && !ty.optional && value.is_zero() {
        return String::new();
    }

    match value {
        Value::Absent => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Uint(u) => u.to_string(),
        // f32 fields print their own shortest form, not the widened f64 one
        Value::Float(f) if ty.kind == Kind::F32 => (*f as f32).to_string(),
        Value::Float(f) => f.to_string(),
        Value::Str(s) => s.clone(),
    }
}

fn signed_bounds(kind: Kind) -> (i64, i64) {
    match kind {
        Kind::I8 => (i8::MIN.into(), i8::MAX.into()),
        Kind::I16 => (i16::MIN.into(), i16::MAX.into()),
        Kind::I32 => (i32::MIN.into(), i32::MAX.into()),
        Kind::Isize => (isize::MIN as i64, isize::MAX as i64),
        _ => (i64::MIN, i64::MAX),
    }
}

fn unsigned_max(kind: Kind) -> u64 {
    match kind {
        Kind::U8 => u8::MAX.into(),
        Kind::U16 => u16::MAX.into(),
        Kind::U32 => u32::MAX.into(),
        Kind::Usize => usize::MAX as u64,
        _ => u64::MAX,
    }
}

/// Overflowing literals parse to infinity; only explicit infinities are accepted
fn is_infinity_literal(raw: &str) -> bool {
    let digits = raw.trim_start_matches(['+', '-']);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}
