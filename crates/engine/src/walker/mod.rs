//! Expression walker.
//!
//! `walk` mirrors a predicate tree into a tree of [`WrapperNode`]s, each
//! carrying the partitions its sub-predicate can match and an estimated
//! selectivity. Supported node kinds:
//!
//! - bare constants: a boolean keeps every partition or none, any other
//!   value acts as `key = constant`
//! - AND / OR
//! - `key op constant` and `constant op key` comparisons
//! - `key op ANY|ALL(array)` and `key IN (literals)`
//!
//! Everything else, including NOT, is opaque: every partition, lossy.

mod context;
mod node;
mod selectivity;

pub use context::WalkerContext;
pub use node::WrapperNode;

use crate::ast::{BinaryOp, Expr, LogicalOp, Quantifier};
use crate::scheme::PartitionLayout;
use crate::select::{select_hash_partition, select_range_partitions, Strategy};
use alloc::vec::Vec;
use log::debug;
use prunus_core::{Bound, Collation, Result, Value};
use prunus_rangeset::{RangeSet, RangeTag};

/// Walks `expr` and returns its annotated mirror.
pub fn walk<'a>(expr: &'a Expr, ctx: &WalkerContext<'_>) -> Result<WrapperNode<'a>> {
    match expr {
        Expr::Logical { op, args } => handle_boolexpr(expr, *op, args, ctx),
        Expr::BinaryOp { left, op, right } => handle_opexpr(expr, left, *op, right, ctx),
        Expr::ArrayOp {
            expr: operand,
            op,
            quantifier,
            array,
        } => handle_arrexpr(expr, operand, *op, *quantifier, array, ctx),
        Expr::In {
            expr: operand,
            list,
        } => handle_in(expr, operand, list, ctx),
        Expr::Literal(_) | Expr::Cast { .. } | Expr::Collate { .. } | Expr::Param(_) => {
            match eval_operand(expr, ctx)? {
                Operand::Const(value, collation) => match value.as_bool() {
                    Some(true) => Ok(WrapperNode::full(
                        expr,
                        ctx.partitions(),
                        RangeTag::Complete,
                        1.0,
                    )),
                    Some(false) => Ok(WrapperNode::leaf(expr, RangeSet::empty(), 0.0)),
                    None => handle_const(expr, &value, Strategy::Equal, collation, ctx),
                },
                _ => Ok(opaque(expr, ctx)),
            }
        }
        _ => Ok(opaque(expr, ctx)),
    }
}

/// Walks `constant` as `key = constant`. Unlike a bare boolean predicate,
/// a boolean here is a key value.
pub(crate) fn walk_key_equality<'a>(
    constant: &'a Expr,
    ctx: &WalkerContext<'_>,
) -> Result<WrapperNode<'a>> {
    match eval_operand(constant, ctx)? {
        Operand::Const(value, collation) => {
            handle_const(constant, &value, Strategy::Equal, collation, ctx)
        }
        _ => Ok(opaque(constant, ctx)),
    }
}

/// The non-key side of a comparison.
enum Operand {
    /// A value known now, with its explicit collation if any.
    Const(Value, Option<Collation>),
    /// A value only known at execution (a parameter or another column).
    Unknown,
    /// Not something a partition can be selected by.
    Opaque,
}

fn eval_operand(expr: &Expr, ctx: &WalkerContext<'_>) -> Result<Operand> {
    Ok(match expr {
        Expr::Literal(value) => Operand::Const(value.clone(), None),
        Expr::Collate { expr, collation } => match eval_operand(expr, ctx)? {
            Operand::Const(value, _) => Operand::Const(value, Some(*collation)),
            other => other,
        },
        Expr::Cast { expr, to } => match eval_operand(expr, ctx)? {
            Operand::Const(value, collation) => Operand::Const(value.cast_to(*to)?, collation),
            other => other,
        },
        Expr::Param(param) => match ctx.resolver() {
            Some(resolver) => Operand::Const(resolver.resolve(param)?, None),
            None => Operand::Unknown,
        },
        Expr::Column(_) => Operand::Unknown,
        _ => Operand::Opaque,
    })
}

fn opaque<'a>(expr: &'a Expr, ctx: &WalkerContext<'_>) -> WrapperNode<'a> {
    debug!("opaque predicate node, keeping all partitions: {:?}", expr);
    WrapperNode::full(expr, ctx.partitions(), RangeTag::Lossy, 1.0)
}

fn unknown<'a>(expr: &'a Expr, strategy: Strategy, ctx: &WalkerContext<'_>) -> WrapperNode<'a> {
    WrapperNode::full(
        expr,
        ctx.partitions(),
        RangeTag::Lossy,
        ctx.estimate_paramsel(strategy),
    )
}

/// Selects partitions for `key <strategy> value`.
fn handle_const<'a>(
    orig: &'a Expr,
    value: &Value,
    strategy: Strategy,
    collation: Option<Collation>,
    ctx: &WalkerContext<'_>,
) -> Result<WrapperNode<'a>> {
    let scheme = ctx.scheme();
    let key_type = scheme.key_type();

    if value.is_null() {
        return Ok(WrapperNode::leaf(orig, RangeSet::empty(), 0.0));
    }

    match scheme.layout() {
        PartitionLayout::Hash { partitions, hasher } => {
            if !strategy.is_equality() {
                return Ok(unknown(orig, strategy, ctx));
            }

            let value = if value.data_type() == Some(key_type) {
                value.clone()
            } else {
                value.cast_to(key_type).map_err(|e| {
                    debug!("hash pruning aborted: {}", e);
                    e
                })?
            };

            let rangeset = select_hash_partition(&value, hasher.as_ref(), *partitions);
            Ok(WrapperNode::leaf(
                orig,
                rangeset,
                ctx.estimate_paramsel(strategy),
            ))
        }
        PartitionLayout::Range { ranges } => {
            let collation = collation.unwrap_or(scheme.collation());
            if !strategy.is_equality() && collation != scheme.collation() {
                debug!("constant collation differs from key collation, not searching ranges");
                return Ok(unknown(orig, strategy, ctx));
            }

            let bound = Bound::coerced(value, key_type).map_err(|e| {
                debug!("range pruning aborted: {}", e);
                e
            })?;

            let selection = select_range_partitions(
                &bound,
                strategy,
                ranges,
                scheme.comparator(),
                collation,
            );
            if selection.found_gap {
                debug!("{:?} {:?} falls into a hole between partitions", strategy, value);
            }

            Ok(WrapperNode::leaf(
                orig,
                selection.rangeset,
                ctx.estimate_paramsel(strategy),
            )
            .with_gap(selection.found_gap))
        }
    }
}

fn handle_boolexpr<'a>(
    orig: &'a Expr,
    op: LogicalOp,
    args: &'a [Expr],
    ctx: &WalkerContext<'_>,
) -> Result<WrapperNode<'a>> {
    let mut rangeset = match op {
        LogicalOp::And => RangeSet::full(ctx.partitions(), RangeTag::Complete),
        LogicalOp::Or => RangeSet::empty(),
    };

    let mut children = Vec::with_capacity(args.len());
    for arg in args {
        let child = walk(arg, ctx)?;
        rangeset = match op {
            LogicalOp::And => rangeset.intersect(child.rangeset()),
            LogicalOp::Or => rangeset.union(child.rangeset()),
        };
        children.push(child);
    }

    let paramsel = match op {
        LogicalOp::And => selectivity::and_selectivity(&children),
        LogicalOp::Or => selectivity::or_selectivity(&children, rangeset.len()),
    };

    Ok(WrapperNode::inner(orig, children, rangeset, paramsel))
}

fn handle_opexpr<'a>(
    orig: &'a Expr,
    left: &Expr,
    op: BinaryOp,
    right: &Expr,
    ctx: &WalkerContext<'_>,
) -> Result<WrapperNode<'a>> {
    let strategy = match Strategy::from_op(op) {
        Some(s) => s,
        None => return Ok(opaque(orig, ctx)),
    };

    let (operand, strategy) = if ctx.matches_key(left) {
        (right, strategy)
    } else if ctx.matches_key(right) {
        (left, strategy.commute())
    } else {
        return Ok(opaque(orig, ctx));
    };

    match eval_operand(operand, ctx)? {
        Operand::Const(value, collation) => handle_const(orig, &value, strategy, collation, ctx),
        Operand::Unknown => Ok(unknown(orig, strategy, ctx)),
        Operand::Opaque => Ok(opaque(orig, ctx)),
    }
}

fn handle_arrexpr<'a>(
    orig: &'a Expr,
    operand: &Expr,
    op: BinaryOp,
    quantifier: Quantifier,
    array: &Expr,
    ctx: &WalkerContext<'_>,
) -> Result<WrapperNode<'a>> {
    let strategy = match Strategy::from_op(op) {
        Some(s) if ctx.matches_key(operand) => s,
        _ => return Ok(opaque(orig, ctx)),
    };

    match eval_operand(array, ctx)? {
        Operand::Const(value, collation) => match value.as_array() {
            Some(items) => select_elements(orig, items, strategy, quantifier, collation, ctx),
            None => Ok(opaque(orig, ctx)),
        },
        _ => Ok(opaque(orig, ctx)),
    }
}

/// `key IN (a, b, ...)` is `key = ANY(ARRAY[a, b, ...])` when every item is a literal.
fn handle_in<'a>(
    orig: &'a Expr,
    operand: &Expr,
    list: &[Expr],
    ctx: &WalkerContext<'_>,
) -> Result<WrapperNode<'a>> {
    if !ctx.matches_key(operand) {
        return Ok(opaque(orig, ctx));
    }

    let items: Option<Vec<Value>> = list.iter().map(|e| e.as_literal().cloned()).collect();
    match items {
        Some(items) => select_elements(orig, &items, Strategy::Equal, Quantifier::Any, None, ctx),
        None => Ok(opaque(orig, ctx)),
    }
}

fn select_elements<'a>(
    orig: &'a Expr,
    items: &[Value],
    strategy: Strategy,
    quantifier: Quantifier,
    collation: Option<Collation>,
    ctx: &WalkerContext<'_>,
) -> Result<WrapperNode<'a>> {
    let mut rangeset = match quantifier {
        Quantifier::Any => RangeSet::empty(),
        Quantifier::All => RangeSet::full(ctx.partitions(), RangeTag::Complete),
    };
    let mut found_gap = false;
    let mut selectivities = Vec::with_capacity(items.len());

    for item in items {
        let element = handle_const(orig, item, strategy, collation, ctx)?;
        rangeset = match quantifier {
            Quantifier::Any => rangeset.union(element.rangeset()),
            Quantifier::All => rangeset.intersect(element.rangeset()),
        };
        found_gap |= element.found_gap();
        selectivities.push(element.paramsel());
    }

    let paramsel = selectivity::array_selectivity(selectivities);
    Ok(WrapperNode::leaf(orig, rangeset, paramsel).with_gap(found_gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::PartitionHasher;
    use crate::param::ParamValues;
    use crate::scheme::{PartitionScheme, RangeEntry};
    use alloc::sync::Arc;
    use alloc::vec;
    use prunus_core::{DataType, Error};
    use prunus_rangeset::IndexRange;

    fn key() -> Expr {
        Expr::column("t", "x", 0)
    }

    /// `[0,10) [10,20) [20,30)`
    fn range_scheme() -> PartitionScheme {
        PartitionScheme::range(
            DataType::Int64,
            vec![
                RangeEntry::new(Bound::finite(0i64), Bound::finite(10i64)),
                RangeEntry::new(Bound::finite(10i64), Bound::finite(20i64)),
                RangeEntry::new(Bound::finite(20i64), Bound::finite(30i64)),
            ],
        )
    }

    struct Identity;

    impl PartitionHasher for Identity {
        fn hash(&self, value: &Value) -> u32 {
            let b = value.as_bool().map(i64::from);
            value.as_i64().or(b).unwrap_or(0) as u32
        }
    }

    fn hash_scheme() -> PartitionScheme {
        PartitionScheme::hash(DataType::Int64, 4).with_hasher(Arc::new(Identity))
    }

    fn set(ranges: &[(usize, usize, RangeTag)]) -> RangeSet {
        ranges
            .iter()
            .map(|&(l, u, t)| IndexRange::new(l, u, t))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        let d = a - b;
        d < 1e-12 && d > -1e-12
    }

    #[test]
    fn test_comparison_key_on_left() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::eq(key(), Expr::literal(15i64));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(1, 1, RangeTag::Lossy)]));
        assert!(close(node.paramsel(), 1.0 / 3.0));
        assert_eq!(node.orig(), &expr);
    }

    #[test]
    fn test_comparison_key_on_right_commutes() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        // 10 <= x  is  x >= 10
        let expr = Expr::le(Expr::literal(10i64), key());
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(1, 2, RangeTag::Complete)]));
    }

    #[test]
    fn test_non_key_comparison_is_opaque() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::eq(Expr::column("t", "y", 1), Expr::literal(15i64));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
        assert_eq!(node.paramsel(), 1.0);

        let expr = Expr::ne(key(), Expr::literal(15i64));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
    }

    #[test]
    fn test_not_is_opaque() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::not(Expr::eq(key(), Expr::literal(15i64)));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
        assert_eq!(node.paramsel(), 1.0);
        assert!(node.args().is_empty());

        for expr in [Expr::is_null(key()), Expr::is_not_null(key())] {
            let node = walk(&expr, &ctx).unwrap();
            assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
        }
    }

    #[test]
    fn test_param_without_resolver_uses_estimate() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::lt(key(), Expr::param(1, Some(DataType::Int64)));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
        assert!(close(node.paramsel(), crate::config::DEFAULT_INEQ_SELECTIVITY));

        let expr = Expr::eq(key(), Expr::column("u", "y", 0));
        let node = walk(&expr, &ctx).unwrap();
        assert!(close(node.paramsel(), 1.0 / 3.0));
    }

    #[test]
    fn test_param_with_resolver_prunes() {
        let scheme = range_scheme();
        let k = key();
        let params = ParamValues::new().with(1, 25i64);
        let ctx = WalkerContext::new(&scheme, &k).with_resolver(&params);

        let expr = Expr::eq(key(), Expr::param(1, None));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(2, 2, RangeTag::Lossy)]));

        let expr = Expr::eq(key(), Expr::param(2, None));
        assert!(matches!(walk(&expr, &ctx), Err(Error::ParamResolution { .. })));
    }

    #[test]
    fn test_null_and_boolean_constants() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::eq(key(), Expr::literal(Value::Null));
        let node = walk(&expr, &ctx).unwrap();
        assert!(node.rangeset().is_empty());
        assert_eq!(node.paramsel(), 0.0);

        let expr = Expr::literal(false);
        let node = walk(&expr, &ctx).unwrap();
        assert!(node.rangeset().is_empty());
        assert_eq!(node.paramsel(), 0.0);

        let expr = Expr::literal(true);
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Complete)]));
        assert_eq!(node.paramsel(), 1.0);
    }

    #[test]
    fn test_boolean_key_treats_booleans_as_values() {
        let scheme = PartitionScheme::hash(DataType::Boolean, 2)
            .with_hasher(Arc::new(Identity));
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::eq(key(), Expr::literal(true));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(1, 1, RangeTag::Lossy)]));

        let expr = Expr::eq(key(), Expr::literal(false));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 0, RangeTag::Lossy)]));

        // A bare boolean is still the whole predicate
        let expr = Expr::literal(true);
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 1, RangeTag::Complete)]));

        let expr = Expr::literal(false);
        let node = walk(&expr, &ctx).unwrap();
        assert!(node.rangeset().is_empty());

        let expr = Expr::literal(true);
        let node = walk_key_equality(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(1, 1, RangeTag::Lossy)]));
    }

    #[test]
    fn test_boolean_against_other_key_type_is_cast_error() {
        let k = key();

        let scheme = hash_scheme();
        let ctx = WalkerContext::new(&scheme, &k);
        let expr = Expr::eq(key(), Expr::literal(true));
        assert!(matches!(walk(&expr, &ctx), Err(Error::Cast { .. })));

        let scheme = range_scheme();
        let ctx = WalkerContext::new(&scheme, &k);
        let expr = Expr::lt(key(), Expr::literal(false));
        assert!(matches!(walk(&expr, &ctx), Err(Error::Cast { .. })));

        let expr = Expr::any(
            key(),
            BinaryOp::Eq,
            Expr::literal(Value::Array(vec![Value::Boolean(true)])),
        );
        assert!(matches!(walk(&expr, &ctx), Err(Error::Cast { .. })));
    }

    #[test]
    fn test_bare_constant_routes() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::literal(5i64);
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 0, RangeTag::Lossy)]));
    }

    #[test]
    fn test_cast_failure_is_error() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::eq(key(), Expr::literal("not a number"));
        assert!(matches!(walk(&expr, &ctx), Err(Error::Cast { .. })));

        let scheme = hash_scheme();
        let ctx = WalkerContext::new(&scheme, &k);
        assert!(matches!(walk(&expr, &ctx), Err(Error::Cast { .. })));
    }

    #[test]
    fn test_string_constant_is_coerced() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::eq(key(), Expr::literal("15"));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(1, 1, RangeTag::Lossy)]));

        let expr = Expr::eq(key(), Expr::cast(Expr::literal("25"), DataType::Int64));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(2, 2, RangeTag::Lossy)]));
    }

    #[test]
    fn test_hash_equality_and_inequality() {
        let scheme = hash_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::eq(key(), Expr::literal(6i64));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(2, 2, RangeTag::Lossy)]));
        assert!(close(node.paramsel(), 0.25));

        // Int32 constant is cast to the Int64 key before hashing
        let expr = Expr::eq(key(), Expr::literal(7i32));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(3, 3, RangeTag::Lossy)]));

        let expr = Expr::lt(key(), Expr::literal(6i64));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 3, RangeTag::Lossy)]));
        assert_eq!(node.paramsel(), 1.0);
    }

    #[test]
    fn test_and_intersects() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::and(
            Expr::ge(key(), Expr::literal(5i64)),
            Expr::lt(key(), Expr::literal(20i64)),
        );
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(
            node.rangeset(),
            &set(&[(0, 0, RangeTag::Lossy), (1, 1, RangeTag::Complete)])
        );
        assert_eq!(node.args().len(), 2);
        let third = crate::config::DEFAULT_INEQ_SELECTIVITY;
        assert!(close(node.paramsel(), third * third));
    }

    #[test]
    fn test_or_unions() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::or(
            Expr::eq(key(), Expr::literal(5i64)),
            Expr::eq(key(), Expr::literal(25i64)),
        );
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(
            node.rangeset(),
            &set(&[(0, 0, RangeTag::Lossy), (2, 2, RangeTag::Lossy)])
        );
        let expected = 1.0 - (1.0 - (1.0 / 3.0) * 0.5) * (1.0 - (1.0 / 3.0) * 0.5);
        assert!(close(node.paramsel(), expected));
    }

    #[test]
    fn test_array_any_and_all() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let array = Expr::literal(Value::Array(vec![Value::Int64(5), Value::Int64(25)]));
        let expr = Expr::any(key(), BinaryOp::Eq, array.clone());
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(
            node.rangeset(),
            &set(&[(0, 0, RangeTag::Lossy), (2, 2, RangeTag::Lossy)])
        );
        assert!(close(node.paramsel(), 1.0 / 3.0));

        // x < ALL(5, 25)  is  x < 5
        let expr = Expr::all(key(), BinaryOp::Lt, array);
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 0, RangeTag::Lossy)]));
    }

    #[test]
    fn test_empty_array() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::any(key(), BinaryOp::Eq, Expr::literal(Value::Array(vec![])));
        let node = walk(&expr, &ctx).unwrap();
        assert!(node.rangeset().is_empty());
        assert_eq!(node.paramsel(), 0.0);
    }

    #[test]
    fn test_non_constant_array_is_opaque() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::any(key(), BinaryOp::Eq, Expr::param(1, None));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
        assert_eq!(node.paramsel(), 1.0);

        let expr = Expr::any(
            Expr::column("t", "y", 1),
            BinaryOp::Eq,
            Expr::literal(Value::Array(vec![Value::Int64(5)])),
        );
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
    }

    #[test]
    fn test_in_list() {
        let scheme = range_scheme();
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::in_list(key(), vec![Value::Int64(1), Value::Int64(2)]);
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 0, RangeTag::Lossy)]));

        let expr = Expr::In {
            expr: alloc::boxed::Box::new(key()),
            list: vec![Expr::literal(1i64), Expr::column("t", "y", 1)],
        };
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 2, RangeTag::Lossy)]));
    }

    #[test]
    fn test_gap_propagates() {
        let scheme = PartitionScheme::range(
            DataType::Int64,
            vec![
                RangeEntry::new(Bound::finite(0i64), Bound::finite(10i64)),
                RangeEntry::new(Bound::finite(20i64), Bound::finite(30i64)),
            ],
        );
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::or(
            Expr::eq(key(), Expr::literal(15i64)),
            Expr::eq(key(), Expr::literal(25i64)),
        );
        let node = walk(&expr, &ctx).unwrap();
        assert!(node.found_gap());
        assert!(node.args()[0].found_gap());
        assert!(!node.args()[1].found_gap());
        assert_eq!(node.rangeset(), &set(&[(1, 1, RangeTag::Lossy)]));
    }

    #[test]
    fn test_collation_mismatch_skips_inequality() {
        let scheme = PartitionScheme::range(
            DataType::String,
            vec![
                RangeEntry::new(Bound::finite("a"), Bound::finite("m")),
                RangeEntry::new(Bound::finite("m"), Bound::finite("z")),
            ],
        );
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        let expr = Expr::lt(key(), Expr::collate(Expr::literal("c"), Collation::Binary));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 1, RangeTag::Lossy)]));

        let expr = Expr::eq(key(), Expr::collate(Expr::literal("c"), Collation::Binary));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 0, RangeTag::Lossy)]));

        let expr = Expr::lt(key(), Expr::literal("c"));
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 0, RangeTag::Lossy)]));
    }

    #[test]
    fn test_equality_searches_under_constant_collation() {
        let scheme = PartitionScheme::range(
            DataType::String,
            vec![
                RangeEntry::new(Bound::finite("a"), Bound::finite("m")),
                RangeEntry::new(Bound::finite("m"), Bound::finite("z")),
            ],
        );
        let k = key();
        let ctx = WalkerContext::new(&scheme, &k);

        // "B" sorts before "a" byte-wise
        let expr = Expr::eq(key(), Expr::literal("B"));
        let node = walk(&expr, &ctx).unwrap();
        assert!(node.rangeset().is_empty());

        let folded = Expr::collate(Expr::literal("B"), Collation::CaseInsensitive);
        let expr = Expr::eq(key(), folded);
        let node = walk(&expr, &ctx).unwrap();
        assert_eq!(node.rangeset(), &set(&[(0, 0, RangeTag::Lossy)]));
    }
}
