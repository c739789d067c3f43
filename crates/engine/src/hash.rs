//! Hash functions mapping key values to HASH partitions.

use prunus_core::Value;
use xxhash_rust::xxh3::Xxh3;

/// Hashes a partitioning key value.
///
/// Implementations must be deterministic: the same value always lands in
/// the same partition, both when rows are inserted and when predicates are
/// pruned.
pub trait PartitionHasher {
    /// Hashes a value already coerced to the key type.
    fn hash(&self, value: &Value) -> u32;
}

/// Maps a hash to a partition position.
#[inline]
pub fn hash_to_part_index(hash: u32, partitions: usize) -> usize {
    debug_assert!(partitions > 0);
    hash as usize % partitions
}

/// Default hasher: xxh3 over a type-tagged little-endian encoding of the value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Hasher;

impl Xxh3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self
    }
}

impl PartitionHasher for Xxh3Hasher {
    fn hash(&self, value: &Value) -> u32 {
        let mut state = Xxh3::new();
        write_value(&mut state, value);
        let h = state.digest();
        (h ^ (h >> 32)) as u32
    }
}

fn write_value(state: &mut Xxh3, value: &Value) {
    match value {
        Value::Null => state.update(&[0]),
        Value::Boolean(b) => state.update(&[1, *b as u8]),
        Value::Int32(v) => {
            state.update(&[2]);
            state.update(&v.to_le_bytes());
        }
        Value::Int64(v) => {
            state.update(&[3]);
            state.update(&v.to_le_bytes());
        }
        Value::Float64(v) => {
            // -0.0 and 0.0 compare equal and must share a partition
            let v = if *v == 0.0 { 0.0 } else { *v };
            state.update(&[4]);
            state.update(&v.to_bits().to_le_bytes());
        }
        Value::String(s) => {
            state.update(&[5]);
            state.update(&(s.len() as u64).to_le_bytes());
            state.update(s.as_bytes());
        }
        Value::DateTime(v) => {
            state.update(&[6]);
            state.update(&v.to_le_bytes());
        }
        Value::Bytes(b) => {
            state.update(&[7]);
            state.update(&(b.len() as u64).to_le_bytes());
            state.update(b);
        }
        Value::Array(items) => {
            state.update(&[8]);
            state.update(&(items.len() as u64).to_le_bytes());
            for item in items {
                write_value(state, item);
            }
        }
    }
}
