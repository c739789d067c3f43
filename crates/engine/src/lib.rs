//! Prunus Engine - Partition pruning for HASH and RANGE partitioned tables.
//!
//! Given a filter predicate over the partitioning key, this crate computes
//! which partitions can hold matching rows, whether each of them still needs
//! the filter, and an overall selectivity estimate:
//!
//! - `ast`: Predicate expression AST
//! - `scheme`: Partition scheme metadata and validation
//! - `hash`: Partition hash functions
//! - `select`: Per-comparison RANGE / HASH partition selectors
//! - `walker`: Predicate walk producing annotated `WrapperNode` trees
//! - `rebuild`: Per-partition residual filter reconstruction
//! - `param`: Runtime parameter values for late pruning
//! - `pruner`: Driver tying walk and rebuild together, plus insert routing
//!
//! # Example
//!
//! ```rust
//! use prunus_core::{Bound, DataType};
//! use prunus_engine::ast::Expr;
//! use prunus_engine::rebuild::Residual;
//! use prunus_engine::scheme::{PartitionScheme, RangeEntry};
//! use prunus_engine::pruner::PartitionPruner;
//!
//! let scheme = PartitionScheme::range(
//!     DataType::Int64,
//!     vec![
//!         RangeEntry::new(Bound::finite(0i64), Bound::finite(10i64)),
//!         RangeEntry::new(Bound::finite(10i64), Bound::finite(20i64)),
//!         RangeEntry::new(Bound::finite(20i64), Bound::finite(30i64)),
//!     ],
//! );
//! let key = Expr::column("t", "x", 0);
//! let pruner = PartitionPruner::new(&scheme, &key);
//!
//! let result = pruner.prune(&Expr::ge(key.clone(), Expr::literal(10i64))).unwrap();
//! assert_eq!(result.partition_indices(), vec![1, 2]);
//! assert!(result.partitions.iter().all(|p| p.residual == Residual::NoFilter));
//! ```

#![no_std]

extern crate alloc;

pub mod ast;
pub mod config;
pub mod hash;
pub mod param;
pub mod pruner;
pub mod rebuild;
pub mod scheme;
pub mod select;
pub mod walker;

pub use config::{GapPolicy, PruneConfig};
pub use pruner::{PartitionPruner, PruneResult, SelectedPartition};
pub use rebuild::{rebuild, Residual};
pub use walker::{walk, WalkerContext, WrapperNode};
