//! Leveling settings.

use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};

pub const DEFAULT_ROUND_COUNT: usize = 100;
pub const DEFAULT_MIN_PRECISION: f64 = 0.01;

/// Which group pairs a leveling sweep visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOrder {
    /// Every ordered pair: (A, B) and later (B, A). Twice the calls, and each
    /// direction spends its own round budget.
    #[default]
    Ordered,
    /// Each unordered pair once, lower group index first.
    Unordered,
}

/// Bounds on pairwise leveling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingOptions {
    /// Maximum single-swap rounds per group pair.
    pub round_count: usize,
    /// A pair stops once a round improves it by this much or less.
    pub min_precision: f64,
    pub pair_order: PairOrder,
}

impl Default for LevelingOptions {
    fn default() -> Self {
        Self {
            round_count: DEFAULT_ROUND_COUNT,
            min_precision: DEFAULT_MIN_PRECISION,
            pair_order: PairOrder::default(),
        }
    }
}

impl LevelingOptions {
    pub fn new(round_count: usize, min_precision: f64) -> Self {
        Self {
            round_count,
            min_precision,
            pair_order: PairOrder::default(),
        }
    }

    pub fn with_pair_order(mut self, pair_order: PairOrder) -> Self {
        self.pair_order = pair_order;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_precision.is_finite() || self.min_precision < 0.0 {
            return Err(PartitionError::invalid_option(
                "min_precision",
                format!("must be finite and >= 0, got {}", self.min_precision),
            ));
        }
        Ok(())
    }
}
