//! Prunus RangeSet - Tagged partition-index ranges.
//!
//! Partition pruning describes its result as a set of partition positions,
//! each tagged as either fully satisfying the predicate (`Complete`) or only
//! possibly satisfying it (`Lossy`). This crate provides:
//!
//! - `RangeTag`: Complete / Lossy
//! - `IndexRange`: an inclusive, tagged span of partition positions
//! - `RangeSet`: a normalized list of spans with union / intersection
//!
//! # Example
//!
//! ```rust
//! use prunus_rangeset::{IndexRange, RangeSet, RangeTag};
//!
//! let below_ten = RangeSet::span(0, 1, RangeTag::Complete);
//! let equals_fifteen = RangeSet::single(1, RangeTag::Lossy);
//!
//! // AND keeps only the overlap, conservatively tagged
//! let both = below_ten.intersect(&equals_fifteen);
//! assert_eq!(both.ranges(), &[IndexRange::single(1, RangeTag::Lossy)]);
//!
//! // OR lets Complete win where spans overlap
//! let either = below_ten.union(&equals_fifteen);
//! assert!(either.is_single_complete_span());
//! ```

#![no_std]

extern crate alloc;

mod range;
mod set;

pub use range::{IndexRange, RangeTag};
pub use set::RangeSet;
