//! Greedy largest-first partitioning.
//!
//! Items are sorted by descending metric and each one is dropped into the
//! currently lightest group. The group list is kept ordered by ascending total
//! throughout with a stable sort, so the lightest group is always at the
//! front. Until every group holds an item, the next item goes to the first
//! empty group instead; with positive metrics that is the lightest one anyway.

use tracing::debug;

use crate::error::{PartitionError, Result};
use crate::item::{Group, ItemId, Weighted};

/// A set of groups over a caller-owned item slice.
///
/// Every item of the slice is referenced by exactly one group. All mutation
/// goes through this type so totals are always computed against the same
/// items the groups were built from.
#[derive(Debug, Clone)]
pub struct Partition<'a, T> {
    items: &'a [T],
    groups: Vec<Group>,
}

impl<'a, T: Weighted> Partition<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, group: usize) -> Result<&Group> {
        self.groups.get(group).ok_or(PartitionError::UnknownGroup {
            group,
            group_count: self.groups.len(),
        })
    }

    /// Total of one group, recomputed from its members.
    pub fn total(&self, group: usize) -> Result<f64> {
        Ok(self.group(group)?.total(self.items))
    }

    /// Totals of all groups in group order.
    pub fn totals(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.total(self.items)).collect()
    }

    /// Sum over all groups. Matches the item sum up to floating-point rounding.
    pub fn grand_total(&self) -> f64 {
        self.totals().iter().sum()
    }

    /// Members of one group, resolved to the caller's items.
    pub fn members_of(&self, group: usize) -> Result<Vec<&'a T>> {
        let items = self.items;
        Ok(self
            .group(group)?
            .members()
            .iter()
            .map(|id| &items[id.get()])
            .collect())
    }

    /// True when every item appears in exactly one group and no group holds a
    /// handle outside the item slice.
    pub fn is_partition(&self) -> bool {
        let mut seen = vec![false; self.items.len()];
        for group in &self.groups {
            for id in group.members() {
                match seen.get_mut(id.get()) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return false,
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Fails unless `a` and `b` are two distinct groups of this partition.
    pub(crate) fn check_pair(&self, a: usize, b: usize) -> Result<()> {
        let group_count = self.groups.len();
        for group in [a, b] {
            if group >= group_count {
                return Err(PartitionError::UnknownGroup { group, group_count });
            }
        }
        if a == b {
            return Err(PartitionError::invalid_argument(format!(
                "cannot level group {a} against itself"
            )));
        }
        Ok(())
    }

    /// Mutable access to two distinct groups at once.
    pub(crate) fn pair_mut(&mut self, a: usize, b: usize) -> Result<(&mut Group, &mut Group)> {
        self.check_pair(a, b)?;
        if a < b {
            let (left, right) = self.groups.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.groups.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }

    /// Build a partition from an explicit assignment of item positions to groups.
    ///
    /// Group `i` gets creation id `i`. The assignment must cover every item
    /// exactly once and must not leave a group empty, and every metric must be
    /// finite.
    pub fn from_assignment(items: &'a [T], assignment: Vec<Vec<usize>>) -> Result<Self> {
        if assignment.is_empty() {
            return Err(PartitionError::InvalidGroupCount);
        }
        if items.len() < assignment.len() {
            return Err(PartitionError::NotEnoughItems {
                items: items.len(),
                groups: assignment.len(),
            });
        }
        check_metrics(items)?;
        if let Some(group) = assignment.iter().position(Vec::is_empty) {
            return Err(PartitionError::invalid_argument(format!(
                "group {group} has no members"
            )));
        }

        let groups = assignment
            .into_iter()
            .enumerate()
            .map(|(id, members)| {
                let mut group = Group::new(id);
                for idx in members {
                    group.append(ItemId(idx));
                }
                group
            })
            .collect();
        let partition = Self { items, groups };
        if !partition.is_partition() {
            return Err(PartitionError::invalid_argument(
                "assignment must reference every item exactly once",
            ));
        }
        Ok(partition)
    }
}

/// Totals and orderings are only meaningful over finite metrics.
fn check_metrics<T: Weighted>(items: &[T]) -> Result<()> {
    match items
        .iter()
        .enumerate()
        .find(|(_, item)| !item.metric().is_finite())
    {
        Some((index, item)) => Err(PartitionError::NonFiniteMetric {
            index,
            metric: item.metric(),
        }),
        None => Ok(()),
    }
}

/// Split `items` into `group_count` groups using largest-first greedy assignment.
///
/// The returned groups are ordered by ascending total. Fails before building
/// anything when `group_count` is zero, when there are fewer items than
/// groups, or when any metric is not finite.
pub fn greedy_partition<T: Weighted>(items: &[T], group_count: usize) -> Result<Partition<'_, T>> {
    if group_count == 0 {
        return Err(PartitionError::InvalidGroupCount);
    }
    if items.len() < group_count {
        return Err(PartitionError::NotEnoughItems {
            items: items.len(),
            groups: group_count,
        });
    }
    check_metrics(items)?;

    // Stable sort: equal metrics keep their input order.
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[b].metric().total_cmp(&items[a].metric()));

    // Running totals are summed in member order, so they equal Group::total.
    let mut slots: Vec<(Group, f64)> = (0..group_count).map(|id| (Group::new(id), 0.0)).collect();
    let mut empty = group_count;
    for idx in order {
        // Zero or negative metrics must not starve a group that is still empty.
        let pos = if empty > 0 {
            empty -= 1;
            slots.iter().position(|(g, _)| g.is_empty()).unwrap_or(0)
        } else {
            0
        };
        let (group, total) = &mut slots[pos];
        group.append(ItemId(idx));
        *total += items[idx].metric();
        slots.sort_by(|a, b| a.1.total_cmp(&b.1));
    }

    debug!(
        items = items.len(),
        groups = group_count,
        lightest = slots.first().map(|(_, t)| *t),
        heaviest = slots.last().map(|(_, t)| *t),
        "greedy partition complete"
    );

    Ok(Partition {
        items,
        groups: slots.into_iter().map(|(group, _)| group).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_indices(partition: &Partition<'_, f64>, group: usize) -> Vec<usize> {
        partition.groups()[group]
            .members()
            .iter()
            .map(|id| id.get())
            .collect()
    }

    #[test]
    fn rejects_zero_groups() {
        let items = vec![1.0, 2.0];
        let err = greedy_partition(&items, 0).unwrap_err();
        assert_eq!(err, PartitionError::InvalidGroupCount);
    }

    #[test]
    fn rejects_fewer_items_than_groups() {
        let items: Vec<f64> = vec![];
        let err = greedy_partition(&items, 3).unwrap_err();
        assert_eq!(err, PartitionError::NotEnoughItems { items: 0, groups: 3 });
    }

    #[test]
    fn rejects_non_finite_metric() {
        let items = vec![1.0, f64::NAN, 3.0];
        match greedy_partition(&items, 2).unwrap_err() {
            PartitionError::NonFiniteMetric { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn largest_item_goes_first_then_lightest_group() {
        let items = vec![1.0, 2.0, 3.0, 10.0];
        let partition = greedy_partition(&items, 2).unwrap();

        // 10 -> g0; 3 -> g1; 2 -> g1 (5); 1 -> g1 (6). Sorted ascending: [g1, g0].
        assert_eq!(partition.totals(), vec![6.0, 10.0]);
        assert_eq!(member_indices(&partition, 0), vec![2, 1, 0]);
        assert_eq!(member_indices(&partition, 1), vec![3]);
        assert_eq!(partition.groups()[0].id(), 1);
    }

    #[test]
    fn equal_totals_keep_their_relative_order() {
        let items = vec![5.0, 5.0, 5.0];
        let partition = greedy_partition(&items, 3).unwrap();
        // g0 takes item 0 and moves behind the empty groups; g1 takes item 1 and
        // lands in front of g0 (equal totals, g1 was ahead); g2 stays in front.
        let ids: Vec<usize> = partition.groups().iter().map(Group::id).collect();
        assert_eq!(ids, vec![2, 1, 0]);
        assert_eq!(member_indices(&partition, 0), vec![2]);
        assert_eq!(member_indices(&partition, 2), vec![0]);
    }

    #[test]
    fn zero_and_negative_metrics_leave_no_group_empty() {
        let zeros = vec![0.0, 0.0, 0.0];
        let partition = greedy_partition(&zeros, 3).unwrap();
        assert!(partition.groups().iter().all(|g| g.len() == 1));

        let mixed = vec![-1.0, -2.0, 5.0, 0.0];
        let partition = greedy_partition(&mixed, 3).unwrap();
        assert!(partition.groups().iter().all(|g| !g.is_empty()));
        assert!(partition.is_partition());
    }

    #[test]
    fn groups_come_back_sorted_by_total() {
        let items: Vec<f64> = (1..=17).map(|v| v as f64 * 1.3).collect();
        let partition = greedy_partition(&items, 4).unwrap();
        let totals = partition.totals();
        assert!(totals.windows(2).all(|w| w[0] <= w[1]));
        assert!(partition.is_partition());
        assert_eq!(partition.group_count(), 4);
    }

    #[test]
    fn from_assignment_requires_exact_cover() {
        let items = vec![1.0, 2.0, 3.0];
        assert!(Partition::from_assignment(&items, vec![vec![0, 1], vec![2]]).is_ok());
        assert!(Partition::from_assignment(&items, vec![vec![0, 1], vec![1, 2]]).is_err());
        assert!(Partition::from_assignment(&items, vec![vec![0], vec![2]]).is_err());
        assert!(Partition::from_assignment(&items, vec![vec![0, 1, 7], vec![2]]).is_err());
        assert!(Partition::from_assignment(&items, vec![vec![0, 1, 2], vec![]]).is_err());
        assert_eq!(
            Partition::from_assignment(&items, vec![]).unwrap_err(),
            PartitionError::InvalidGroupCount
        );
    }

    #[test]
    fn from_assignment_rejects_non_finite_metrics() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let items = vec![1.0, bad, 3.0, 4.0];
            match Partition::from_assignment(&items, vec![vec![0, 1], vec![2, 3]]) {
                Err(PartitionError::NonFiniteMetric { index, .. }) => assert_eq!(index, 1),
                other => panic!("expected NonFiniteMetric for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn pair_mut_rejects_same_and_unknown_groups() {
        let items = vec![1.0, 2.0, 3.0];
        let mut partition = greedy_partition(&items, 3).unwrap();
        assert!(matches!(
            partition.pair_mut(1, 1),
            Err(PartitionError::InvalidArgument(_))
        ));
        assert_eq!(
            partition.pair_mut(0, 3).unwrap_err(),
            PartitionError::UnknownGroup {
                group: 3,
                group_count: 3
            }
        );
        let (a, b) = partition.pair_mut(2, 0).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
