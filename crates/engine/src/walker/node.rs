//! Annotated mirror of a predicate tree.

use crate::ast::Expr;
use alloc::vec::Vec;
use prunus_rangeset::{RangeSet, RangeTag};

/// One predicate node with the partitions it selects and its selectivity.
///
/// The node borrows the expression it was derived from; the tree owns its
/// children, so dropping the root releases the whole walk at once.
#[derive(Clone, Debug)]
pub struct WrapperNode<'a> {
    orig: &'a Expr,
    args: Vec<WrapperNode<'a>>,
    rangeset: RangeSet,
    paramsel: f64,
    found_gap: bool,
}

impl<'a> WrapperNode<'a> {
    /// Creates a leaf node.
    pub(crate) fn leaf(orig: &'a Expr, rangeset: RangeSet, paramsel: f64) -> Self {
        Self {
            orig,
            args: Vec::new(),
            rangeset,
            paramsel: clamp_selectivity(paramsel),
            found_gap: false,
        }
    }

    /// Creates a leaf selecting every partition with the given tag.
    pub(crate) fn full(orig: &'a Expr, partitions: usize, tag: RangeTag, paramsel: f64) -> Self {
        Self::leaf(orig, RangeSet::full(partitions, tag), paramsel)
    }

    /// Creates an inner node over walked children.
    pub(crate) fn inner(
        orig: &'a Expr,
        args: Vec<WrapperNode<'a>>,
        rangeset: RangeSet,
        paramsel: f64,
    ) -> Self {
        let found_gap = args.iter().any(|a| a.found_gap);
        Self {
            orig,
            args,
            rangeset,
            paramsel: clamp_selectivity(paramsel),
            found_gap,
        }
    }

    pub(crate) fn with_gap(mut self, found_gap: bool) -> Self {
        self.found_gap |= found_gap;
        self
    }

    /// The expression this node was derived from.
    pub fn orig(&self) -> &'a Expr {
        self.orig
    }

    /// Children, in the order of the original AND / OR arguments.
    pub fn args(&self) -> &[WrapperNode<'a>] {
        &self.args
    }

    /// Selected partitions.
    pub fn rangeset(&self) -> &RangeSet {
        &self.rangeset
    }

    /// Estimated fraction of rows satisfying this node.
    pub fn paramsel(&self) -> f64 {
        self.paramsel
    }

    /// True if some RANGE search below this node landed in a hole.
    pub fn found_gap(&self) -> bool {
        self.found_gap
    }
}

fn clamp_selectivity(sel: f64) -> f64 {
    if sel.is_nan() {
        1.0
    } else {
        sel.clamp(0.0, 1.0)
    }
}
