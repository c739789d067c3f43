//! Prunus Core - Core types for the Prunus partition pruner.
//!
//! This crate provides the foundational types shared by the pruning engine:
//!
//! - `DataType`: Supported key and constant types
//! - `Value`: Runtime values compared against partition bounds
//! - `Bound`: A finite boundary value or one of the infinities
//! - `Comparator`: Collation-aware three-way comparison over values and bounds
//! - `Error`: Error types for pruning
//!
//! # Example
//!
//! ```rust
//! use prunus_core::{Bound, Collation, Comparator, DefaultComparator, Value};
//! use core::cmp::Ordering;
//!
//! let cmp = DefaultComparator::new();
//! let ten = Bound::finite(10i64);
//!
//! assert_eq!(cmp.compare_bounds(&Bound::MinusInfinity, &ten, Collation::Default), Ordering::Less);
//! assert_eq!(
//!     cmp.compare_bounds(&Bound::Finite(Value::Int64(15)), &ten, Collation::Default),
//!     Ordering::Greater
//! );
//! ```

#![no_std]

extern crate alloc;

mod bound;
mod comparator;
mod error;
mod types;
mod value;

pub use bound::Bound;
pub use comparator::{Collation, Comparator, DefaultComparator};
pub use error::{Error, Result};
pub use types::DataType;
pub use value::Value;
