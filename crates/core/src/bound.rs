//! Partition boundary values.

use crate::error::Result;
use crate::types::DataType;
use crate::value::Value;

/// A boundary value delimiting a RANGE partition: a finite key value or one
/// of the two infinities.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Below every finite value.
    MinusInfinity,
    /// A finite value of the partitioning key type.
    Finite(Value),
    /// Above every finite value.
    PlusInfinity,
}

impl Bound {
    /// Creates a finite bound.
    pub fn finite(value: impl Into<Value>) -> Self {
        Bound::Finite(value.into())
    }

    /// Creates a finite bound from `value` coerced to `key_type`.
    ///
    /// Values whose type is directly comparable with the key type are kept
    /// as they are; everything else goes through an explicit cast.
    pub fn coerced(value: &Value, key_type: DataType) -> Result<Self> {
        match value.data_type() {
            Some(t) if t.is_comparable_with(key_type) => Ok(Bound::Finite(value.clone())),
            _ => value.cast_to(key_type).map(Bound::Finite),
        }
    }

    /// Returns the finite value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Bound::Finite(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for Bound {
    fn from(value: Value) -> Self {
        Bound::Finite(value)
    }
}
