//! Pruning driver: walk, then rebuild a residual for each surviving partition.

use crate::ast::Expr;
use crate::config::{GapPolicy, PruneConfig};
use crate::param::ParamResolver;
use crate::rebuild::{rebuild, Residual};
use crate::scheme::PartitionScheme;
use crate::walker::{walk, walk_key_equality, WalkerContext};
use alloc::vec::Vec;
use log::debug;
use prunus_core::{Error, Result, Value};
use prunus_rangeset::{RangeSet, RangeTag};

/// A partition that must be scanned, with the filter its scan still needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedPartition {
    /// Position of the partition in the scheme.
    pub index: usize,
    /// `NoFilter` or `Filter(expr)`; never `Exclude`.
    pub residual: Residual,
}

/// Result of pruning one predicate.
#[derive(Clone, Debug)]
pub struct PruneResult {
    /// Partitions to scan, in ascending position order.
    pub partitions: Vec<SelectedPartition>,
    /// Estimated fraction of rows matching the predicate.
    pub paramsel: f64,
    /// True if a RANGE equality landed in a hole between partitions.
    pub found_gap: bool,
    rangeset: RangeSet,
}

impl PruneResult {
    /// Selected partitions with their tags.
    pub fn rangeset(&self) -> &RangeSet {
        &self.rangeset
    }

    /// Returns true if nothing needs to be scanned.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Positions of the partitions to scan.
    pub fn partition_indices(&self) -> Vec<usize> {
        self.partitions.iter().map(|p| p.index).collect()
    }

    /// Returns false when the scan can skip a multi-partition merge step:
    /// at most one partition, or a single span needing no filter.
    pub fn needs_merge(&self) -> bool {
        self.partitions.len() > 1 && !self.rangeset.is_single_complete_span()
    }
}

/// Prunes predicates against one partition scheme snapshot.
#[derive(Clone, Copy, Debug)]
pub struct PartitionPruner<'a> {
    scheme: &'a PartitionScheme,
    key: &'a Expr,
    config: PruneConfig,
}

impl<'a> PartitionPruner<'a> {
    /// Creates a pruner for `scheme`, partitioned on `key`.
    pub fn new(scheme: &'a PartitionScheme, key: &'a Expr) -> Self {
        Self {
            scheme,
            key,
            config: PruneConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: PruneConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PruneConfig {
        &self.config
    }

    /// Prunes at planning time; parameters stay unknown.
    pub fn prune(&self, expr: &Expr) -> Result<PruneResult> {
        self.run(expr, WalkerContext::new(self.scheme, self.key))
    }

    /// Prunes at execution start, with parameter values available.
    pub fn prune_with_params(
        &self,
        expr: &Expr,
        resolver: &dyn ParamResolver,
    ) -> Result<PruneResult> {
        self.run(
            expr,
            WalkerContext::new(self.scheme, self.key).with_resolver(resolver),
        )
    }

    /// Finds the partition a row with key `value` belongs to.
    ///
    /// Returns `None` for NULL, for values in a hole between RANGE
    /// partitions and for schemes without partitions.
    pub fn route(&self, value: &Value) -> Result<Option<usize>> {
        let expr = Expr::Literal(value.cast_to(self.scheme.key_type())?);
        let ctx = WalkerContext::new(self.scheme, self.key).with_config(self.config);
        let node = walk_key_equality(&expr, &ctx)?;

        match node.rangeset().ranges() {
            [] => Ok(None),
            [r] if r.lower == r.upper => Ok(Some(r.lower)),
            _ => Err(Error::invariant_violation(alloc::format!(
                "{:?} routed to more than one partition",
                value
            ))),
        }
    }

    fn run(&self, expr: &Expr, ctx: WalkerContext<'_>) -> Result<PruneResult> {
        let ctx = ctx.with_config(self.config);
        let root = walk(expr, &ctx)?;
        let n = self.scheme.partition_count();

        if root.found_gap() && self.config.gap_policy == GapPolicy::ScanAll {
            debug!("predicate hit a hole between partitions, scanning all {}", n);
            let partitions = (0..n)
                .map(|index| SelectedPartition {
                    index,
                    residual: Residual::Filter(expr.clone()),
                })
                .collect();
            return Ok(PruneResult {
                partitions,
                paramsel: root.paramsel(),
                found_gap: true,
                rangeset: RangeSet::full(n, RangeTag::Lossy),
            });
        }

        let mut partitions = Vec::with_capacity(root.rangeset().len());
        for (index, _) in root.rangeset().indices() {
            let residual = rebuild(&root, index)?;
            if !residual.is_excluded() {
                partitions.push(SelectedPartition { index, residual });
            }
        }

        debug!(
            "pruned to {} of {} partitions, selectivity {}",
            partitions.len(),
            n,
            root.paramsel()
        );

        Ok(PruneResult {
            partitions,
            paramsel: root.paramsel(),
            found_gap: root.found_gap(),
            rangeset: root.rangeset().clone(),
        })
    }
}
