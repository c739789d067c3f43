//! Inputs shared by every step of an expression walk.

use crate::ast::Expr;
use crate::config::PruneConfig;
use crate::param::ParamResolver;
use crate::scheme::{PartitionLayout, PartitionScheme};
use crate::select::Strategy;
use prunus_core::DataType;

/// Walker context: the scheme snapshot, the partitioning key expression and
/// the optional runtime parameter resolver.
#[derive(Clone, Copy)]
pub struct WalkerContext<'a> {
    scheme: &'a PartitionScheme,
    key: &'a Expr,
    config: PruneConfig,
    resolver: Option<&'a dyn ParamResolver>,
}

impl<'a> WalkerContext<'a> {
    /// Creates a context for planning time (no parameter values).
    pub fn new(scheme: &'a PartitionScheme, key: &'a Expr) -> Self {
        Self {
            scheme,
            key,
            config: PruneConfig::default(),
            resolver: None,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: PruneConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables late pruning with runtime parameter values.
    pub fn with_resolver(mut self, resolver: &'a dyn ParamResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Returns the partition scheme.
    pub fn scheme(&self) -> &'a PartitionScheme {
        self.scheme
    }

    /// Returns the partitioning key expression.
    pub fn key(&self) -> &'a Expr {
        self.key
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PruneConfig {
        &self.config
    }

    /// Returns the parameter resolver, if any.
    pub fn resolver(&self) -> Option<&'a dyn ParamResolver> {
        self.resolver
    }

    /// Number of partitions in the scheme.
    pub fn partitions(&self) -> usize {
        self.scheme.partition_count()
    }

    /// Checks if `expr` is the partitioning key, ignoring casts to the key type.
    pub fn matches_key(&self, expr: &Expr) -> bool {
        let key_type = self.scheme.key_type();
        strip_key_casts(expr, key_type) == strip_key_casts(self.key, key_type)
    }

    /// Default selectivity of a comparison whose constant is unknown.
    pub fn estimate_paramsel(&self, strategy: Strategy) -> f64 {
        let n = self.partitions();
        match (strategy, self.scheme.layout()) {
            (Strategy::Equal, _) if n > 0 => 1.0 / n as f64,
            (Strategy::Equal, _) => 0.0,
            (_, PartitionLayout::Range { .. }) => self.config.default_ineq_selectivity,
            _ => 1.0,
        }
    }
}

fn strip_key_casts(mut expr: &Expr, key_type: DataType) -> &Expr {
    while let Expr::Cast { expr: inner, to } = expr {
        if *to != key_type {
            break;
        }
        expr = inner.as_ref();
    }
    expr
}
