//! Pruning configuration.

/// Selectivity assumed for a RANGE inequality whose constant is unknown.
pub const DEFAULT_INEQ_SELECTIVITY: f64 = 0.3333333333333333;

/// What to do when a RANGE search lands in a hole between partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Trust the metadata: the hole holds no rows.
    #[default]
    NoRows,
    /// Treat the metadata as stale and scan every partition with the full filter.
    ScanAll,
}

/// Configuration for partition pruning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PruneConfig {
    /// Default selectivity of a RANGE inequality (default: 1/3)
    pub default_ineq_selectivity: f64,
    /// Policy for values that fall into an uncovered hole (default: NoRows)
    pub gap_policy: GapPolicy,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            default_ineq_selectivity: DEFAULT_INEQ_SELECTIVITY,
            gap_policy: GapPolicy::NoRows,
        }
    }
}

impl PruneConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default inequality selectivity, clamped to `[0, 1]`.
    pub fn with_default_ineq_selectivity(mut self, selectivity: f64) -> Self {
        self.default_ineq_selectivity = if selectivity.is_nan() {
            DEFAULT_INEQ_SELECTIVITY
        } else {
            selectivity.clamp(0.0, 1.0)
        };
        self
    }

    /// Sets the gap policy.
    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }
}
