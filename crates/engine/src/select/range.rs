//! RANGE partition selection by binary search over ordered bounds.

use super::Strategy;
use crate::scheme::RangeEntry;
use core::cmp::Ordering;
use log::trace;
use prunus_core::{Bound, Collation, Comparator};
use prunus_rangeset::{IndexRange, RangeSet, RangeTag};

/// Outcome of a RANGE selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeSelection {
    /// Selected partitions.
    pub rangeset: RangeSet,
    /// True when an equality value fell into a hole no partition covers.
    pub found_gap: bool,
}

impl RangeSelection {
    fn new(rangeset: RangeSet) -> Self {
        Self {
            rangeset,
            found_gap: false,
        }
    }
}

/// Selects the partitions of `ranges` that can hold a key `k` with
/// `k <strategy> value`.
///
/// `ranges` must be ordered and non-overlapping; each entry covers
/// `[min, max)`.
pub fn select_range_partitions(
    value: &Bound,
    strategy: Strategy,
    ranges: &[RangeEntry],
    comparator: &dyn Comparator,
    collation: Collation,
) -> RangeSelection {
    let n = ranges.len();
    if n == 0 {
        return RangeSelection::new(RangeSet::empty());
    }

    let cmp = |bound: &Bound| comparator.compare_bounds(value, bound, collation);

    let cmp_min = cmp(&ranges[0].min);
    let cmp_max = cmp(&ranges[n - 1].max);

    // Value lies outside of the whole key space on the wrong side
    if (cmp_min != Ordering::Greater && strategy == Strategy::Less)
        || (cmp_min == Ordering::Less
            && matches!(strategy, Strategy::LessEqual | Strategy::Equal))
        || (cmp_max != Ordering::Less
            && matches!(
                strategy,
                Strategy::GreaterEqual | Strategy::Greater | Strategy::Equal
            ))
    {
        return RangeSelection::new(RangeSet::empty());
    }

    // Every partition satisfies the predicate
    if (cmp_min == Ordering::Less && strategy == Strategy::Greater)
        || (cmp_min != Ordering::Greater && strategy == Strategy::GreaterEqual)
        || (cmp_max != Ordering::Less
            && matches!(strategy, Strategy::LessEqual | Strategy::Less))
    {
        return RangeSelection::new(RangeSet::full(n, RangeTag::Complete));
    }

    let mut start = 0;
    let mut end = n - 1;

    loop {
        let i = start + (end - start) / 2;
        let cmp_min = cmp(&ranges[i].min);
        let cmp_max = cmp(&ranges[i].max);

        let is_less = cmp_min == Ordering::Less
            || (cmp_min == Ordering::Equal && strategy == Strategy::Less);
        let is_greater = cmp_max == Ordering::Greater
            || (cmp_max != Ordering::Less && strategy != Strategy::Less);

        trace!(
            "range search [{}, {}] pivot {}: less={} greater={}",
            start,
            end,
            i,
            is_less,
            is_greater
        );

        if !is_less && !is_greater {
            let lossy = !((cmp_min == Ordering::Equal && strategy == Strategy::GreaterEqual)
                || (cmp_max == Ordering::Equal && strategy == Strategy::Less));
            return RangeSelection::new(assemble(i, n, strategy, lossy));
        }

        if is_less {
            if i == start {
                return gap(value, i, strategy, n);
            }
            end = i - 1;
        } else {
            if i == end {
                return gap(value, i + 1, strategy, n);
            }
            start = i + 1;
        }
    }
}

/// Builds the selection for a value covered by partition `i`.
fn assemble(i: usize, n: usize, strategy: Strategy, lossy: bool) -> RangeSet {
    let mut ranges = alloc::vec::Vec::with_capacity(2);
    match strategy {
        Strategy::Less | Strategy::LessEqual => {
            if lossy {
                if i > 0 {
                    ranges.push(IndexRange::new(0, i - 1, RangeTag::Complete));
                }
                ranges.push(IndexRange::single(i, RangeTag::Lossy));
            } else {
                ranges.push(IndexRange::new(0, i, RangeTag::Complete));
            }
        }
        Strategy::Equal => ranges.push(IndexRange::single(i, RangeTag::Lossy)),
        Strategy::GreaterEqual | Strategy::Greater => {
            if lossy {
                ranges.push(IndexRange::single(i, RangeTag::Lossy));
                if i + 1 < n {
                    ranges.push(IndexRange::new(i + 1, n - 1, RangeTag::Complete));
                }
            } else {
                ranges.push(IndexRange::new(i, n - 1, RangeTag::Complete));
            }
        }
    }
    RangeSet::from_ranges(ranges)
}

/// Builds the selection for a value no partition covers. `split` is the
/// number of partitions lying wholly below the value.
///
/// Only an equality search reports a gap; an inequality ending between two
/// partitions still selects exactly the partitions on its side.
fn gap(value: &Bound, split: usize, strategy: Strategy, n: usize) -> RangeSelection {
    let rangeset = match strategy {
        Strategy::Equal => RangeSet::empty(),
        Strategy::Less | Strategy::LessEqual if split > 0 => {
            RangeSet::span(0, split - 1, RangeTag::Complete)
        }
        Strategy::GreaterEqual | Strategy::Greater if split < n => {
            RangeSet::span(split, n - 1, RangeTag::Complete)
        }
        _ => RangeSet::empty(),
    };

    trace!(
        "range search for {:?} ended below partition {}",
        value,
        split
    );

    RangeSelection {
        rangeset,
        found_gap: strategy == Strategy::Equal,
    }
}
