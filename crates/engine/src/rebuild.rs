//! Residual filter reconstruction per partition.

use crate::ast::{Expr, LogicalOp};
use crate::walker::WrapperNode;
use alloc::vec::Vec;
use prunus_core::{Error, Result};
use prunus_rangeset::RangeTag;

/// Filter a scan of one partition still needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Residual {
    /// The partition cannot hold matching rows.
    Exclude,
    /// Every row of the partition matches.
    NoFilter,
    /// Rows must still be checked against this expression.
    Filter(Expr),
}

impl Residual {
    /// Returns true for `Exclude`.
    pub fn is_excluded(&self) -> bool {
        matches!(self, Residual::Exclude)
    }

    /// Returns the filter expression, if any.
    pub fn filter(&self) -> Option<&Expr> {
        match self {
            Residual::Filter(expr) => Some(expr),
            _ => None,
        }
    }
}

/// Rebuilds the filter `node` imposes on partition `index`.
///
/// AND / OR nodes keep only the children that still constrain the
/// partition; any other lossy node is copied as it was written.
pub fn rebuild(node: &WrapperNode<'_>, index: usize) -> Result<Residual> {
    match node.rangeset().find(index) {
        None => return Ok(Residual::Exclude),
        Some(RangeTag::Complete) => return Ok(Residual::NoFilter),
        Some(RangeTag::Lossy) => {}
    }

    match node.orig() {
        Expr::Logical { op, .. } => rebuild_logical(node, *op, index),
        orig => Ok(Residual::Filter(orig.clone())),
    }
}

fn rebuild_logical(node: &WrapperNode<'_>, op: LogicalOp, index: usize) -> Result<Residual> {
    let mut args = Vec::with_capacity(node.args().len());

    for child in node.args() {
        match (op, rebuild(child, index)?) {
            (_, Residual::Filter(expr)) => args.push(expr),
            (LogicalOp::And, Residual::NoFilter) | (LogicalOp::Or, Residual::Exclude) => {}
            (LogicalOp::And, Residual::Exclude) => {
                return Err(Error::invariant_violation(alloc::format!(
                    "AND child excludes partition {} its parent selected",
                    index
                )))
            }
            (LogicalOp::Or, Residual::NoFilter) => {
                return Err(Error::invariant_violation(alloc::format!(
                    "OR child fully matches partition {} its parent tagged lossy",
                    index
                )))
            }
        }
    }

    if args.len() > 1 {
        return Ok(Residual::Filter(Expr::Logical { op, args }));
    }

    args.pop().map(Residual::Filter).ok_or_else(|| {
        Error::invariant_violation(alloc::format!(
            "no child constrains partition {} of a lossy {:?}",
            index,
            op
        ))
    })
}
