//! Ordered sets of tagged partition-index ranges.
//!
//! A `RangeSet` is kept normalized at all times: ranges are sorted by
//! `lower`, never overlap, and adjacent ranges with the same tag are merged.
//! Union and intersection are single linear sweeps over both inputs.

use crate::range::{IndexRange, RangeTag};
use alloc::vec::Vec;

/// A normalized list of tagged partition-index ranges.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RangeSet {
    ranges: Vec<IndexRange>,
}

impl RangeSet {
    /// Creates an empty set (no partition selected).
    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Creates the span `[0, partitions - 1]` with the given tag.
    pub fn full(partitions: usize, tag: RangeTag) -> Self {
        if partitions == 0 {
            Self::empty()
        } else {
            Self::span(0, partitions - 1, tag)
        }
    }

    /// Creates a set holding one position.
    pub fn single(index: usize, tag: RangeTag) -> Self {
        Self::span(index, index, tag)
    }

    /// Creates a set holding `[lower, upper]`.
    pub fn span(lower: usize, upper: usize, tag: RangeTag) -> Self {
        Self {
            ranges: alloc::vec![IndexRange::new(lower, upper, tag)],
        }
    }

    /// Builds a normalized set from arbitrary ranges. Overlapping input
    /// ranges are combined with union semantics.
    pub fn from_ranges<I: IntoIterator<Item = IndexRange>>(ranges: I) -> Self {
        ranges.into_iter().fold(Self::empty(), |acc, range| {
            acc.union(&Self {
                ranges: alloc::vec![range],
            })
        })
    }

    /// Returns the normalized ranges.
    pub fn ranges(&self) -> &[IndexRange] {
        &self.ranges
    }

    /// Returns true if no position is selected.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of positions covered.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(IndexRange::len).sum()
    }

    /// OR-combination: a span is Complete if either side is Complete there.
    pub fn union(&self, other: &RangeSet) -> RangeSet {
        sweep(&self.ranges, &other.ranges, |a, b| match (a, b) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (Some(tag), None) | (None, Some(tag)) => Some(tag),
            (None, None) => None,
        })
    }

    /// AND-combination: a span is Complete only if both sides are Complete.
    pub fn intersect(&self, other: &RangeSet) -> RangeSet {
        sweep(&self.ranges, &other.ranges, |a, b| match (a, b) {
            (Some(a), Some(b)) => Some(a.intersect(b)),
            _ => None,
        })
    }

    /// Looks up the tag covering `index`.
    pub fn find(&self, index: usize) -> Option<RangeTag> {
        let pos = self.ranges.partition_point(|r| r.upper < index);
        self.ranges
            .get(pos)
            .filter(|r| r.contains(index))
            .map(|r| r.tag)
    }

    /// Membership lookup returning `(found, lossy)`.
    pub fn find_tag(&self, index: usize) -> (bool, bool) {
        match self.find(index) {
            Some(tag) => (true, tag.is_lossy()),
            None => (false, false),
        }
    }

    /// Checks if `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.find(index).is_some()
    }

    /// Iterates every selected position in ascending order with its tag.
    pub fn indices(&self) -> impl Iterator<Item = (usize, RangeTag)> + '_ {
        self.ranges
            .iter()
            .flat_map(|r| (r.lower..=r.upper).map(move |i| (i, r.tag)))
    }

    /// Returns true if the set is exactly one Complete span.
    pub fn is_single_complete_span(&self) -> bool {
        matches!(self.ranges.as_slice(), [r] if r.tag == RangeTag::Complete)
    }

    /// Returns true if every position in `[0, partitions)` is selected.
    pub fn covers_all(&self, partitions: usize) -> bool {
        self.len() == partitions
    }

    /// Appends a range that starts after every range already present,
    /// merging it into the last one when they touch with the same tag.
    fn push(&mut self, range: IndexRange) {
        if let Some(last) = self.ranges.last_mut() {
            debug_assert!(last.upper < range.lower, "ranges pushed out of order");
            if last.is_mergeable_with(&range) {
                last.upper = range.upper;
                return;
            }
        }
        self.ranges.push(range);
    }
}

impl From<IndexRange> for RangeSet {
    fn from(range: IndexRange) -> Self {
        Self {
            ranges: alloc::vec![range],
        }
    }
}

impl FromIterator<IndexRange> for RangeSet {
    fn from_iter<I: IntoIterator<Item = IndexRange>>(iter: I) -> Self {
        Self::from_ranges(iter)
    }
}

/// Walks both inputs as a sequence of elementary segments, each covered by
/// a fixed subset of the input ranges, and emits `merge(tag_a, tag_b)` for
/// every segment where it yields a tag.
fn sweep<F>(a: &[IndexRange], b: &[IndexRange], merge: F) -> RangeSet
where
    F: Fn(Option<RangeTag>, Option<RangeTag>) -> Option<RangeTag>,
{
    let mut out = RangeSet::empty();
    let (mut i, mut j) = (0, 0);
    let mut pos = 0usize;

    loop {
        while i < a.len() && a[i].upper < pos {
            i += 1;
        }
        while j < b.len() && b[j].upper < pos {
            j += 1;
        }

        let (ra, rb) = (a.get(i), b.get(j));
        let start_a = ra.map(|r| r.lower.max(pos));
        let start_b = rb.map(|r| r.lower.max(pos));

        let start = match (start_a, start_b) {
            (Some(x), Some(y)) => x.min(y),
            (Some(x), None) | (None, Some(x)) => x,
            (None, None) => break,
        };

        // Exclusive end of the segment: the first point where the set of
        // covering ranges changes.
        let mut end = usize::MAX;
        let mut tag_a = None;
        let mut tag_b = None;

        if let (Some(r), Some(s)) = (ra, start_a) {
            if s == start {
                tag_a = Some(r.tag);
                end = end.min(r.upper + 1);
            } else {
                end = end.min(s);
            }
        }
        if let (Some(r), Some(s)) = (rb, start_b) {
            if s == start {
                tag_b = Some(r.tag);
                end = end.min(r.upper + 1);
            } else {
                end = end.min(s);
            }
        }

        if let Some(tag) = merge(tag_a, tag_b) {
            out.push(IndexRange::new(start, end - 1, tag));
        }
        pos = end;
    }

    out
}
