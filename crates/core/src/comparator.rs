//! Comparator implementations for partition bounds.
//!
//! Pruning only ever needs a three-way comparison; the comparator is
//! supplied by the owner of the partition scheme so that type and collation
//! rules stay outside the pruning algorithm.

use crate::bound::Bound;
use crate::value::Value;
use core::cmp::Ordering;

/// Collation used to order string keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Collation {
    /// The database default collation.
    #[default]
    Default,
    /// Plain byte order.
    Binary,
    /// ASCII case-insensitive order.
    CaseInsensitive,
}

/// Trait for comparing key values under a collation.
pub trait Comparator {
    /// Compares two finite values.
    fn compare(&self, a: &Value, b: &Value, collation: Collation) -> Ordering;

    /// Compares two bounds, with the infinities ordered around every finite
    /// value.
    fn compare_bounds(&self, a: &Bound, b: &Bound, collation: Collation) -> Ordering {
        match (a, b) {
            (Bound::MinusInfinity, Bound::MinusInfinity) => Ordering::Equal,
            (Bound::PlusInfinity, Bound::PlusInfinity) => Ordering::Equal,
            (Bound::MinusInfinity, _) | (_, Bound::PlusInfinity) => Ordering::Less,
            (Bound::PlusInfinity, _) | (_, Bound::MinusInfinity) => Ordering::Greater,
            (Bound::Finite(a), Bound::Finite(b)) => self.compare(a, b, collation),
        }
    }
}

/// Comparator built on the `Value` total order.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultComparator;

impl DefaultComparator {
    /// Creates a new default comparator.
    pub fn new() -> Self {
        Self
    }
}

impl Comparator for DefaultComparator {
    fn compare(&self, a: &Value, b: &Value, collation: Collation) -> Ordering {
        match (a, b, collation) {
            (Value::String(a), Value::String(b), Collation::CaseInsensitive) => a
                .bytes()
                .map(|c| c.to_ascii_lowercase())
                .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
            _ => a.cmp(b),
        }
    }
}
