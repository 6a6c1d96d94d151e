#![forbid(unsafe_code)]

//! # balanced-partition
//!
//! Split weighted items into `k` groups whose totals are as even as a cheap
//! heuristic can make them.
//!
//! Two stages:
//! - [`greedy_partition`]: sort items by descending metric and always drop the
//!   next one into the currently lightest group (largest-first / LPT).
//! - [`level_all`]: for every pair of groups, repeatedly perform the single
//!   item swap that narrows their gap the most without overshooting.
//!
//! Leveling is pairwise and local. It never makes a pair worse, but with more
//! than two groups it gives no global optimality or convergence guarantee.
//!
//! Items stay owned by the caller; groups hold [`ItemId`] positions into the
//! caller's slice.

pub mod error;
pub mod item;
pub mod leveling;
pub mod options;
pub mod partition;
pub mod report;
pub mod sample;
pub mod stats;

pub use error::{PartitionError, Result};
pub use item::{Group, Item, ItemId, Weighted};
pub use leveling::{
    balance, level_all, level_pair, level_pair_to_convergence, LevelingSummary, PairLeveling,
};
pub use options::{LevelingOptions, PairOrder};
pub use partition::{greedy_partition, Partition};
