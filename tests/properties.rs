use proptest::prelude::*;

use balanced_partition::{
    greedy_partition, level_all, level_pair, LevelingOptions, Partition, PartitionError,
};

fn arb_metrics() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-500.0f64..500.0, 1..48)
}

fn arb_metrics_and_groups() -> impl Strategy<Value = (Vec<f64>, usize)> {
    arb_metrics().prop_flat_map(|metrics| {
        let len = metrics.len();
        (Just(metrics), 1..=len)
    })
}

fn gap(partition: &Partition<'_, f64>, a: usize, b: usize) -> f64 {
    (partition.total(a).unwrap() - partition.total(b).unwrap()).abs()
}

proptest! {
    #[test]
    fn greedy_returns_requested_non_empty_groups((metrics, groups) in arb_metrics_and_groups()) {
        let partition = greedy_partition(&metrics, groups).unwrap();
        prop_assert_eq!(partition.group_count(), groups);
        prop_assert!(partition.groups().iter().all(|g| !g.is_empty()));
        prop_assert!(partition.is_partition());
        let totals = partition.totals();
        prop_assert!(totals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn leveling_keeps_the_partition_intact((metrics, groups) in arb_metrics_and_groups()) {
        let mut partition = greedy_partition(&metrics, groups).unwrap();
        level_all(&mut partition, &LevelingOptions::default()).unwrap();
        prop_assert!(partition.is_partition());
        prop_assert_eq!(partition.group_count(), groups);
    }

    #[test]
    fn single_rounds_never_widen_the_gap((metrics, groups) in arb_metrics_and_groups()) {
        prop_assume!(groups >= 2);
        let mut partition = greedy_partition(&metrics, groups).unwrap();
        for _ in 0..5 {
            let before = gap(&partition, 0, groups - 1);
            level_pair(&mut partition, 0, groups - 1).unwrap();
            prop_assert!(gap(&partition, 0, groups - 1) <= before);
        }
    }

    #[test]
    fn zero_improvement_is_a_fixed_point((metrics, groups) in arb_metrics_and_groups()) {
        prop_assume!(groups >= 2);
        let mut partition = greedy_partition(&metrics, groups).unwrap();
        let mut last = f64::INFINITY;
        for _ in 0..200 {
            last = level_pair(&mut partition, 0, 1).unwrap();
            if last == 0.0 {
                break;
            }
        }
        prop_assume!(last == 0.0);
        let snapshot = partition.groups().to_vec();
        prop_assert_eq!(level_pair(&mut partition, 0, 1).unwrap(), 0.0);
        prop_assert_eq!(partition.groups(), snapshot.as_slice());
    }

    #[test]
    fn too_few_items_is_rejected(metrics in arb_metrics()) {
        let groups = metrics.len() + 1;
        prop_assert_eq!(
            greedy_partition(&metrics, groups).unwrap_err(),
            PartitionError::NotEnoughItems { items: metrics.len(), groups }
        );
    }
}
