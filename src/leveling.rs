//! Pairwise swap leveling.
//!
//! Each round looks at two groups and performs the single item swap that
//! closes the most of their gap without overshooting past equality. Rounds
//! repeat per pair until the improvement falls to the precision threshold or
//! the round budget runs out, and a sweep does that for every group pair once.
//!
//! Leveling is local to a pair. With more than two groups, leveling (A, B)
//! after (B, C) can widen the gap between A and C again; a sweep gives no
//! global balance guarantee and is not iterated to a global fixed point.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::Result;
use crate::item::{ItemId, Weighted};
use crate::options::{LevelingOptions, PairOrder};
use crate::partition::{greedy_partition, Partition};

/// Outcome of leveling one group pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairLeveling {
    pub rounds: usize,
    pub swaps: usize,
    /// Improvement of the final round; `None` when no round ran.
    pub last_improvement: Option<f64>,
}

/// Outcome of one sweep over all group pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelingSummary {
    pub pairs_visited: usize,
    pub rounds: usize,
    pub swaps: usize,
}

fn sign(v: f64) -> Ordering {
    v.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

/// Perform the best single swap between groups `a` and `b`.
///
/// A pair `(x in a, y in b)` qualifies when `x - y` has the same sign as
/// `total(a) - total(b)` and `|x - y|` is strictly below half that gap. The
/// qualifying pair with the largest `|x - y|` is swapped (first found wins
/// ties). Returns `|x - y|`, the amount each group total moved, or 0.0 when
/// nothing qualifies and the groups are untouched.
///
/// The absolute gap between the two totals never grows.
pub fn level_pair<T: Weighted>(partition: &mut Partition<'_, T>, a: usize, b: usize) -> Result<f64> {
    let items = partition.items();
    let (group_a, group_b) = partition.pair_mut(a, b)?;

    let half_delta = (group_a.total(items) - group_b.total(items)) / 2.0;
    let half_delta_sign = sign(half_delta);
    let half_delta_abs = half_delta.abs();

    let mut best: Option<(ItemId, ItemId)> = None;
    let mut best_abs = 0.0;
    for &id_a in group_a.members() {
        let metric_a = items[id_a.get()].metric();
        for &id_b in group_b.members() {
            let delta = metric_a - items[id_b.get()].metric();
            let delta_abs = delta.abs();
            if sign(delta) == half_delta_sign && delta_abs > best_abs && delta_abs < half_delta_abs
            {
                best = Some((id_a, id_b));
                best_abs = delta_abs;
            }
        }
    }

    let Some((id_a, id_b)) = best else {
        return Ok(0.0);
    };
    group_a.swap(id_a, id_b)?;
    group_b.swap(id_b, id_a)?;

    debug!(
        group_a = group_a.id(),
        group_b = group_b.id(),
        item_out = id_a.get(),
        item_in = id_b.get(),
        improvement = best_abs,
        "swapped items"
    );
    Ok(best_abs)
}

fn converge_pair<T: Weighted>(
    partition: &mut Partition<'_, T>,
    a: usize,
    b: usize,
    options: &LevelingOptions,
) -> Result<PairLeveling> {
    partition.check_pair(a, b)?;

    let mut precision = f64::INFINITY;
    let mut outcome = PairLeveling {
        rounds: 0,
        swaps: 0,
        last_improvement: None,
    };
    while precision > options.min_precision && outcome.rounds < options.round_count {
        precision = level_pair(partition, a, b)?;
        outcome.rounds += 1;
        if precision > 0.0 {
            outcome.swaps += 1;
        }
        trace!(a, b, round = outcome.rounds, improvement = precision, "leveling round");
    }
    if outcome.rounds > 0 {
        outcome.last_improvement = Some(precision);
    }
    Ok(outcome)
}

/// Level groups `a` and `b` until a round improves them by at most
/// `min_precision` or `round_count` rounds have run.
///
/// The first round always runs when `round_count >= 1`. This is a bounded
/// iteration; the pair may stop at a local optimum short of equal totals.
pub fn level_pair_to_convergence<T: Weighted>(
    partition: &mut Partition<'_, T>,
    a: usize,
    b: usize,
    options: &LevelingOptions,
) -> Result<PairLeveling> {
    options.validate()?;
    converge_pair(partition, a, b, options)
}

/// One leveling sweep over every pair of distinct groups.
///
/// [`PairOrder::Ordered`] visits `(a, b)` for all `a != b` in index order, so
/// each pair is leveled from both sides. [`PairOrder::Unordered`] visits only
/// `a < b`. Either way the sweep runs exactly once.
pub fn level_all<T: Weighted>(
    partition: &mut Partition<'_, T>,
    options: &LevelingOptions,
) -> Result<LevelingSummary> {
    options.validate()?;

    let group_count = partition.group_count();
    let mut summary = LevelingSummary::default();
    for a in 0..group_count {
        for b in 0..group_count {
            let visit = match options.pair_order {
                PairOrder::Ordered => a != b,
                PairOrder::Unordered => a < b,
            };
            if !visit {
                continue;
            }
            let outcome = converge_pair(partition, a, b, options)?;
            summary.pairs_visited += 1;
            summary.rounds += outcome.rounds;
            summary.swaps += outcome.swaps;
        }
    }

    debug!(
        groups = group_count,
        pairs = summary.pairs_visited,
        rounds = summary.rounds,
        swaps = summary.swaps,
        "leveling sweep complete"
    );
    Ok(summary)
}

/// Greedy partition followed by one leveling sweep.
///
/// Options are validated before any grouping work happens.
pub fn balance<'a, T: Weighted>(
    items: &'a [T],
    group_count: usize,
    options: &LevelingOptions,
) -> Result<Partition<'a, T>> {
    options.validate()?;
    let mut partition = greedy_partition(items, group_count)?;
    level_all(&mut partition, options)?;
    Ok(partition)
}
