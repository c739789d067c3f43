//! Property-based tests for prunus-rangeset using proptest.

use prunus_rangeset::{IndexRange, RangeSet, RangeTag};
use proptest::prelude::*;

const UNIVERSE: usize = 64;

/// Strategy for a tag.
fn tag_strategy() -> impl Strategy<Value = RangeTag> {
    prop_oneof![Just(RangeTag::Complete), Just(RangeTag::Lossy)]
}

/// Strategy for a normalized range set over positions `0..UNIVERSE`.
fn rangeset_strategy() -> impl Strategy<Value = RangeSet> {
    prop::collection::vec((0..UNIVERSE, 0usize..8, tag_strategy()), 0..8).prop_map(|spans| {
        spans
            .into_iter()
            .map(|(lower, width, tag)| {
                IndexRange::new(lower, (lower + width).min(UNIVERSE - 1), tag)
            })
            .collect::<RangeSet>()
    })
}

/// Expands a set into a per-position tag table.
fn model(set: &RangeSet) -> Vec<Option<RangeTag>> {
    let mut table = vec![None; UNIVERSE];
    for (index, tag) in set.indices() {
        table[index] = Some(tag);
    }
    table
}

/// Checks the sorted / non-overlapping / merged invariant.
fn is_normalized(set: &RangeSet) -> bool {
    set.ranges().windows(2).all(|pair| {
        let (a, b) = (pair[0], pair[1]);
        a.upper < b.lower && !a.is_mergeable_with(&b)
    }) && set.ranges().iter().all(|r| r.lower <= r.upper)
}

proptest! {
    /// Union matches the per-position OR model and stays normalized.
    #[test]
    fn union_matches_model(a in rangeset_strategy(), b in rangeset_strategy()) {
        let u = a.union(&b);
        prop_assert!(is_normalized(&u));

        let (ma, mb, mu) = (model(&a), model(&b), model(&u));
        for i in 0..UNIVERSE {
            let expected = match (ma[i], mb[i]) {
                (Some(x), Some(y)) => Some(x.union(y)),
                (Some(x), None) | (None, Some(x)) => Some(x),
                (None, None) => None,
            };
            prop_assert_eq!(mu[i], expected, "position {}", i);
        }
    }

    /// Intersection matches the per-position AND model and stays normalized.
    #[test]
    fn intersect_matches_model(a in rangeset_strategy(), b in rangeset_strategy()) {
        let x = a.intersect(&b);
        prop_assert!(is_normalized(&x));

        let (ma, mb, mx) = (model(&a), model(&b), model(&x));
        for i in 0..UNIVERSE {
            let expected = match (ma[i], mb[i]) {
                (Some(p), Some(q)) => Some(p.intersect(q)),
                _ => None,
            };
            prop_assert_eq!(mx[i], expected, "position {}", i);
        }
    }

    /// Union and intersection are commutative.
    #[test]
    fn operations_commute(a in rangeset_strategy(), b in rangeset_strategy()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    /// Union and intersection are associative.
    #[test]
    fn operations_associate(
        a in rangeset_strategy(),
        b in rangeset_strategy(),
        c in rangeset_strategy()
    ) {
        prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        prop_assert_eq!(a.intersect(&b).intersect(&c), a.intersect(&b.intersect(&c)));
    }

    /// The full Complete span is the identity of intersection and absorbs union.
    #[test]
    fn full_complete_laws(a in rangeset_strategy()) {
        let full = RangeSet::full(UNIVERSE, RangeTag::Complete);
        prop_assert_eq!(a.intersect(&full), a.clone());
        prop_assert_eq!(a.union(&full), full);
    }

    /// The empty set is the identity of union and absorbs intersection.
    #[test]
    fn empty_laws(a in rangeset_strategy()) {
        prop_assert_eq!(a.union(&RangeSet::empty()), a.clone());
        prop_assert!(a.intersect(&RangeSet::empty()).is_empty());
    }

    /// Length counts covered positions and lookup agrees with iteration.
    #[test]
    fn length_and_lookup_agree(a in rangeset_strategy()) {
        let table = model(&a);
        prop_assert_eq!(a.len(), table.iter().filter(|t| t.is_some()).count());
        for (i, tag) in table.iter().enumerate() {
            prop_assert_eq!(a.find(i), *tag);
            prop_assert_eq!(a.find_tag(i), (tag.is_some(), *tag == Some(RangeTag::Lossy)));
        }
    }
}
