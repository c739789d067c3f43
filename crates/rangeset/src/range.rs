//! Tagged ranges of partition positions.

/// How much of a partition span satisfies the predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeTag {
    /// Every row in the span satisfies the predicate; no re-check needed.
    Complete,
    /// The span may hold non-matching rows; the filter must still run.
    Lossy,
}

impl RangeTag {
    /// Tag of a span covered by both operands of an OR.
    #[inline]
    pub fn union(self, other: RangeTag) -> RangeTag {
        if self == RangeTag::Complete || other == RangeTag::Complete {
            RangeTag::Complete
        } else {
            RangeTag::Lossy
        }
    }

    /// Tag of a span covered by both operands of an AND.
    #[inline]
    pub fn intersect(self, other: RangeTag) -> RangeTag {
        if self == RangeTag::Complete && other == RangeTag::Complete {
            RangeTag::Complete
        } else {
            RangeTag::Lossy
        }
    }

    /// Returns true for `Lossy`.
    #[inline]
    pub fn is_lossy(self) -> bool {
        self == RangeTag::Lossy
    }
}

/// An inclusive span `[lower, upper]` of partition positions sharing a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub lower: usize,
    pub upper: usize,
    pub tag: RangeTag,
}

impl IndexRange {
    /// Creates a new range. `lower` must not exceed `upper`.
    pub fn new(lower: usize, upper: usize, tag: RangeTag) -> Self {
        debug_assert!(lower <= upper, "inverted index range [{}, {}]", lower, upper);
        Self { lower, upper, tag }
    }

    /// Creates a single-position range.
    pub fn single(index: usize, tag: RangeTag) -> Self {
        Self::new(index, index, tag)
    }

    /// Number of positions covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.upper - self.lower + 1
    }

    /// Always false; a range covers at least one position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks if a position is within this range.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.lower <= index && index <= self.upper
    }

    /// Checks if `other` starts right after this range ends, with the same tag.
    pub fn is_mergeable_with(&self, other: &IndexRange) -> bool {
        self.tag == other.tag && self.upper + 1 == other.lower
    }
}
