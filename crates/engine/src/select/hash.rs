//! HASH partition selection.

use crate::hash::{hash_to_part_index, PartitionHasher};
use prunus_core::Value;
use prunus_rangeset::{RangeSet, RangeTag};

/// Selects the partition holding `value` under a HASH scheme.
///
/// `value` must already be coerced to the key type. The match is tagged
/// `Lossy` so the equality filter still runs on the selected partition.
pub fn select_hash_partition(
    value: &Value,
    hasher: &dyn PartitionHasher,
    partitions: usize,
) -> RangeSet {
    if partitions == 0 {
        return RangeSet::empty();
    }
    let index = hash_to_part_index(hasher.hash(value), partitions);
    RangeSet::single(index, RangeTag::Lossy)
}
