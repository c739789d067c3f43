//! Selectivity combination for AND / OR / array nodes.

use super::node::WrapperNode;

/// AND: children are assumed independent.
pub(crate) fn and_selectivity(children: &[WrapperNode<'_>]) -> f64 {
    children.iter().map(WrapperNode::paramsel).product()
}

/// OR: independence weighted by the share of the union each child covers,
/// `1 - Π(1 - sel_k · len_k / total)`. An empty union selects nothing.
pub(crate) fn or_selectivity(children: &[WrapperNode<'_>], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let miss: f64 = children
        .iter()
        .map(|c| 1.0 - c.paramsel() * c.rangeset().len() as f64 / total)
        .product();
    1.0 - miss
}

/// ANY / ALL: the most selective-looking element wins; no elements select nothing.
pub(crate) fn array_selectivity<I: IntoIterator<Item = f64>>(elements: I) -> f64 {
    elements.into_iter().fold(0.0, f64::max)
}
