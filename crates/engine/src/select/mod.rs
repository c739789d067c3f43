//! Partition selectors for single comparisons against a constant.

mod hash;
mod range;

pub use hash::select_hash_partition;
pub use range::{select_range_partitions, RangeSelection};

use crate::ast::BinaryOp;

/// Comparison strategy of a key-vs-constant test, with the key on the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
}

impl Strategy {
    /// Maps a comparison operator to its strategy. `<>` and non-comparison
    /// operators have none.
    pub fn from_op(op: BinaryOp) -> Option<Strategy> {
        match op {
            BinaryOp::Lt => Some(Strategy::Less),
            BinaryOp::Le => Some(Strategy::LessEqual),
            BinaryOp::Eq => Some(Strategy::Equal),
            BinaryOp::Ge => Some(Strategy::GreaterEqual),
            BinaryOp::Gt => Some(Strategy::Greater),
            _ => None,
        }
    }

    /// Returns the strategy with the operands swapped (`c < x` is `x > c`).
    pub fn commute(self) -> Strategy {
        match self {
            Strategy::Less => Strategy::Greater,
            Strategy::LessEqual => Strategy::GreaterEqual,
            Strategy::Equal => Strategy::Equal,
            Strategy::GreaterEqual => Strategy::LessEqual,
            Strategy::Greater => Strategy::Less,
        }
    }

    /// Returns true for `=`.
    #[inline]
    pub fn is_equality(self) -> bool {
        self == Strategy::Equal
    }
}
