//! Value type definitions for partitioning keys and predicate constants.
//!
//! This module defines the `Value` enum which represents any scalar a
//! predicate can compare the partitioning key against, plus arrays of such
//! scalars for `ANY`/`ALL` membership tests.

use crate::error::{Error, Result};
use crate::types::DataType;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

/// A scalar (or array) value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// DateTime stored as Unix timestamp in milliseconds
    DateTime(i64),
    /// Binary data
    Bytes(Vec<u8>),
    /// Array of values, elements may be Null
    Array(Vec<Value>),
}

impl Value {
    /// Returns the data type of this value, or None if it's Null.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Int32(_) => Some(DataType::Int32),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::String(_) => Some(DataType::String),
            Value::DateTime(_) => Some(DataType::DateTime),
            Value::Bytes(_) => Some(DataType::Bytes),
            Value::Array(_) => Some(DataType::Array),
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is an Int64, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the array elements if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Coerces this value to `target`.
    ///
    /// Null casts to Null for every target. Lossy numeric conversions
    /// (fractional floats to integers, out-of-range narrowing) fail.
    pub fn cast_to(&self, target: DataType) -> Result<Value> {
        if self.data_type() == Some(target) || self.is_null() {
            return Ok(self.clone());
        }

        let cast = match (self, target) {
            (Value::Int32(v), DataType::Int64) => Some(Value::Int64(*v as i64)),
            (Value::Int32(v), DataType::Float64) => Some(Value::Float64(*v as f64)),
            (Value::Int64(v), DataType::Int32) => i32::try_from(*v).ok().map(Value::Int32),
            (Value::Int64(v), DataType::Float64) => Some(Value::Float64(*v as f64)),
            (Value::Int64(v), DataType::DateTime) => Some(Value::DateTime(*v)),
            (Value::DateTime(v), DataType::Int64) => Some(Value::Int64(*v)),
            (Value::Float64(v), DataType::Int32) => float_to_int(*v)
                .and_then(|i| i32::try_from(i).ok())
                .map(Value::Int32),
            (Value::Float64(v), DataType::Int64) => float_to_int(*v).map(Value::Int64),
            (Value::String(s), DataType::Boolean) => parse_bool(s.trim()).map(Value::Boolean),
            (Value::String(s), DataType::Int32) => s.trim().parse().ok().map(Value::Int32),
            (Value::String(s), DataType::Int64) => s.trim().parse().ok().map(Value::Int64),
            (Value::String(s), DataType::Float64) => s.trim().parse().ok().map(Value::Float64),
            (Value::String(s), DataType::DateTime) => s.trim().parse().ok().map(Value::DateTime),
            (Value::String(s), DataType::Bytes) => Some(Value::Bytes(s.as_bytes().to_vec())),
            (Value::Boolean(v), DataType::String) => Some(Value::String(v.to_string())),
            (Value::Int32(v), DataType::String) => Some(Value::String(v.to_string())),
            (Value::Int64(v), DataType::String) => Some(Value::String(v.to_string())),
            (Value::Float64(v), DataType::String) => Some(Value::String(format!("{}", v))),
            (Value::DateTime(v), DataType::String) => Some(Value::String(v.to_string())),
            _ => None,
        };

        cast.ok_or_else(|| Error::cast(self.clone(), target))
    }
}

/// Converts an integral, finite float to i64.
fn float_to_int(v: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; 2^63 is the first float past it.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !v.is_finite() || v < -LIMIT || v >= LIMIT {
        return None;
    }
    let truncated = v as i64;
    if truncated as f64 == v {
        Some(truncated)
    } else {
        None
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("t") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s.eq_ignore_ascii_case("f") || s == "0" {
        Some(false)
    } else {
        None
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Int32(i) => i.hash(state),
            Value::Int64(i) => i.hash(state),
            Value::Float64(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::DateTime(d) => d.hash(state),
            Value::Bytes(b) => b.hash(state),
            Value::Array(a) => a.hash(state),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            // Cross-type numeric comparisons
            (Value::Int32(a), Value::Int64(b)) => (*a as i64).cmp(b),
            (Value::Int64(a), Value::Int32(b)) => a.cmp(&(*b as i64)),
            (Value::Int32(a), Value::Float64(b)) => cmp_int_float(*a as i64, *b),
            (Value::Float64(a), Value::Int32(b)) => cmp_int_float(*b as i64, *a).reverse(),
            (Value::Int64(a), Value::Float64(b)) => cmp_int_float(*a, *b),
            (Value::Float64(a), Value::Int64(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::Float64(a), Value::Float64(b)) => {
                // Handle NaN: treat NaN as greater than all other values
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
                }
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            // Different types: order by type discriminant
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

fn cmp_int_float(a: i64, b: f64) -> Ordering {
    if b.is_nan() {
        Ordering::Less
    } else {
        (a as f64).partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

impl Value {
    /// Returns a type ordering value for comparing different types.
    fn type_order(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Int32(_) => 2,
            Value::Int64(_) => 3,
            Value::Float64(_) => 4,
            Value::String(_) => 5,
            Value::DateTime(_) => 6,
            Value::Bytes(_) => 7,
            Value::Array(_) => 8,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
