//! Partition scheme metadata.
//!
//! A `PartitionScheme` is a read-only snapshot of how a table is split into
//! partitions. Pruning never mutates it.

use crate::hash::{PartitionHasher, Xxh3Hasher};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use prunus_core::{Bound, Collation, Comparator, DataType, DefaultComparator, Error, Result};

/// Partitioning scheme type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartitionType {
    Hash,
    Range,
}

impl PartitionType {
    /// Returns the catalog code of this type.
    pub fn code(&self) -> u32 {
        match self {
            PartitionType::Hash => 1,
            PartitionType::Range => 2,
        }
    }
}

impl TryFrom<u32> for PartitionType {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            1 => Ok(PartitionType::Hash),
            2 => Ok(PartitionType::Range),
            other => Err(Error::unsupported_scheme(other)),
        }
    }
}

/// Key span `[min, max)` covered by one RANGE partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeEntry {
    pub min: Bound,
    pub max: Bound,
}

impl RangeEntry {
    /// Creates a new range entry.
    pub fn new(min: Bound, max: Bound) -> Self {
        Self { min, max }
    }
}

/// Per-type partition layout.
#[derive(Clone)]
pub enum PartitionLayout {
    /// `partitions` buckets addressed by `hasher(value) mod partitions`.
    Hash {
        partitions: usize,
        hasher: Arc<dyn PartitionHasher + Send + Sync>,
    },
    /// Ordered, non-overlapping key spans.
    Range { ranges: Vec<RangeEntry> },
}

impl fmt::Debug for PartitionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionLayout::Hash { partitions, .. } => f
                .debug_struct("Hash")
                .field("partitions", partitions)
                .finish_non_exhaustive(),
            PartitionLayout::Range { ranges } => {
                f.debug_struct("Range").field("ranges", ranges).finish()
            }
        }
    }
}

/// Partitioning metadata for one table.
#[derive(Clone)]
pub struct PartitionScheme {
    key_type: DataType,
    collation: Collation,
    comparator: Arc<dyn Comparator + Send + Sync>,
    layout: PartitionLayout,
}

impl PartitionScheme {
    /// Creates a HASH scheme using the default xxh3 hasher.
    pub fn hash(key_type: DataType, partitions: usize) -> Self {
        Self::with_layout(
            key_type,
            PartitionLayout::Hash {
                partitions,
                hasher: Arc::new(Xxh3Hasher::new()),
            },
        )
    }

    /// Creates a RANGE scheme from ordered spans.
    pub fn range(key_type: DataType, ranges: Vec<RangeEntry>) -> Self {
        Self::with_layout(key_type, PartitionLayout::Range { ranges })
    }

    fn with_layout(key_type: DataType, layout: PartitionLayout) -> Self {
        Self {
            key_type,
            collation: Collation::Default,
            comparator: Arc::new(DefaultComparator::new()),
            layout,
        }
    }

    /// Sets the key collation.
    pub fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = collation;
        self
    }

    /// Sets the comparator used for RANGE bounds.
    pub fn with_comparator(mut self, comparator: Arc<dyn Comparator + Send + Sync>) -> Self {
        self.comparator = comparator;
        self
    }

    /// Replaces the hasher of a HASH scheme. No effect on RANGE schemes.
    pub fn with_hasher(mut self, hasher: Arc<dyn PartitionHasher + Send + Sync>) -> Self {
        if let PartitionLayout::Hash { hasher: h, .. } = &mut self.layout {
            *h = hasher;
        }
        self
    }

    /// Returns the partitioning key type.
    pub fn key_type(&self) -> DataType {
        self.key_type
    }

    /// Returns the key collation.
    pub fn collation(&self) -> Collation {
        self.collation
    }

    /// Returns the bound comparator.
    pub fn comparator(&self) -> &dyn Comparator {
        self.comparator.as_ref()
    }

    /// Returns the layout.
    pub fn layout(&self) -> &PartitionLayout {
        &self.layout
    }

    /// Returns the scheme type.
    pub fn partition_type(&self) -> PartitionType {
        match self.layout {
            PartitionLayout::Hash { .. } => PartitionType::Hash,
            PartitionLayout::Range { .. } => PartitionType::Range,
        }
    }

    /// Returns the number of partitions.
    pub fn partition_count(&self) -> usize {
        match &self.layout {
            PartitionLayout::Hash { partitions, .. } => *partitions,
            PartitionLayout::Range { ranges } => ranges.len(),
        }
    }

    /// Checks the metadata ordering rules.
    ///
    /// Every RANGE entry must have `min <= max`, consecutive entries must not
    /// overlap, and finite bounds must hold values comparable with the key
    /// type.
    pub fn validate(&self) -> Result<()> {
        if !self.key_type.is_partitionable() {
            return Err(Error::invalid_scheme(alloc::format!(
                "{} cannot be a partitioning key",
                self.key_type.name()
            )));
        }

        let ranges = match &self.layout {
            PartitionLayout::Hash { .. } => return Ok(()),
            PartitionLayout::Range { ranges } => ranges,
        };

        for (i, entry) in ranges.iter().enumerate() {
            for bound in [&entry.min, &entry.max] {
                if let Some(value) = bound.value() {
                    match value.data_type() {
                        Some(t) if t.is_comparable_with(self.key_type) => {}
                        _ => {
                            return Err(Error::invalid_scheme(alloc::format!(
                                "partition {} has a bound {:?} not comparable with {}",
                                i,
                                value,
                                self.key_type.name()
                            )))
                        }
                    }
                }
            }

            if self.compare(&entry.min, &entry.max) == Ordering::Greater {
                return Err(Error::invalid_scheme(alloc::format!(
                    "partition {} has min greater than max",
                    i
                )));
            }

            if let Some(next) = ranges.get(i + 1) {
                if self.compare(&entry.max, &next.min) == Ordering::Greater {
                    return Err(Error::invalid_scheme(alloc::format!(
                        "partitions {} and {} overlap",
                        i,
                        i + 1
                    )));
                }
            }
        }

        Ok(())
    }

    fn compare(&self, a: &Bound, b: &Bound) -> Ordering {
        self.comparator.compare_bounds(a, b, self.collation)
    }
}

impl fmt::Debug for PartitionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionScheme")
            .field("key_type", &self.key_type)
            .field("collation", &self.collation)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
