use aa_interval_tree::{
    compare_intervals, covers, matches, overlaps, touches, Interval, IntervalTree, NaturalOrder,
    OverlapMode,
};
use proptest::prelude::*;

fn interval() -> impl Strategy<Value = Interval<i32>> {
    (0..60i32, 0..12i32, any::<bool>(), any::<bool>()).prop_map(|(start, len, si, ei)| {
        if len == 0 {
            Interval::point(start)
        } else {
            Interval::new(start, start + len, si, ei).unwrap()
        }
    })
}

fn intervals(max: usize) -> impl Strategy<Value = Vec<Interval<i32>>> {
    proptest::collection::vec(interval(), 0..max)
}

fn mode() -> impl Strategy<Value = OverlapMode> {
    prop_oneof![
        Just(OverlapMode::Any),
        Just(OverlapMode::Cover),
        Just(OverlapMode::Within),
    ]
}

/// Whether the half-integer `twice / 2` lies in `interval`.
fn holds(interval: &Interval<i32>, twice: i32) -> bool {
    let (start, end) = (interval.start() * 2, interval.end() * 2);
    let after_start = if interval.start_inclusive() { twice >= start } else { twice > start };
    let before_end = if interval.end_inclusive() { twice <= end } else { twice < end };
    after_start && before_end
}

fn sorted_unique(mut input: Vec<Interval<i32>>) -> Vec<Interval<i32>> {
    input.sort_by(|a, b| compare_intervals(&NaturalOrder, a, b));
    input.dedup();
    input
}

proptest! {
    #[test]
    fn traversal_is_sorted_and_deduplicated(input in intervals(120)) {
        let mut tree = IntervalTree::new();
        for interval in input.iter().cloned() {
            tree.add(interval);
        }
        let expected = sorted_unique(input);
        prop_assert_eq!(tree.len(), expected.len());
        prop_assert_eq!(tree.into_vec(), expected);
    }

    #[test]
    fn bulk_load_matches_incremental_inserts(input in intervals(120)) {
        let bulk: IntervalTree<i32> = input.iter().cloned().collect();
        let mut incremental = IntervalTree::new();
        incremental.extend(input);
        prop_assert_eq!(bulk, incremental);
    }

    #[test]
    fn overlap_agrees_with_sampling(a in interval(), b in interval()) {
        let shared = (0..=160).any(|twice| holds(&a, twice) && holds(&b, twice));
        prop_assert_eq!(overlaps(&NaturalOrder, &a, &b), shared);

        let a_in_b = (0..=160).all(|twice| !holds(&a, twice) || holds(&b, twice));
        prop_assert_eq!(covers(&NaturalOrder, &b, &a), a_in_b);
    }

    #[test]
    fn touching_intervals_merge_without_gap(a in interval(), b in interval()) {
        if touches(&NaturalOrder, &a, &b) {
            let tree: IntervalTree<i32> = vec![a, b].into_iter().collect();
            prop_assert_eq!(tree.merge().len(), 1);
        }
    }

    #[test]
    fn intersect_matches_brute_force(
        input in intervals(150),
        query in interval(),
        mode in mode(),
    ) {
        let tree: IntervalTree<i32> = input.iter().cloned().collect();
        let expected: Vec<_> = sorted_unique(input)
            .into_iter()
            .filter(|stored| matches(&NaturalOrder, mode, stored, &query))
            .collect();
        prop_assert_eq!(tree.intersect(&query, mode).into_vec(), expected);
    }

    #[test]
    fn stored_queries_match_brute_force(input in intervals(80)) {
        let tree: IntervalTree<i32> = input.iter().cloned().collect();
        for a in tree.iter() {
            let expected: Vec<_> = tree
                .iter()
                .filter(|b| overlaps(&NaturalOrder, a, *b))
                .cloned()
                .collect();
            prop_assert_eq!(tree.intersect(a, OverlapMode::Any).into_vec(), expected);
        }
    }

    #[test]
    fn cover_is_within_swapped(input in intervals(100), query in interval()) {
        let tree: IntervalTree<i32> = input.iter().cloned().collect();
        let covering = tree.intersect(&query, OverlapMode::Cover);
        let expected: Vec<_> = tree
            .iter()
            .filter(|stored| matches(&NaturalOrder, OverlapMode::Within, &query, *stored))
            .cloned()
            .collect();
        prop_assert_eq!(covering.into_vec(), expected);
    }

    #[test]
    fn merge_is_idempotent_and_covering(input in intervals(100)) {
        let tree: IntervalTree<i32> = input.iter().cloned().collect();
        let merged = tree.merge();
        prop_assert_eq!(merged.merge(), merged.clone());

        let spans: Vec<_> = merged.iter().cloned().collect();
        for pair in spans.windows(2) {
            prop_assert!(!overlaps(&NaturalOrder, &pair[0], &pair[1]));
            prop_assert!(!touches(&NaturalOrder, &pair[0], &pair[1]));
        }
        for interval in &input {
            prop_assert!(spans.iter().any(|span| covers(&NaturalOrder, span, interval)));
        }
    }

    #[test]
    fn union_and_except_identities(a in intervals(60), b in intervals(60)) {
        let a: IntervalTree<i32> = a.into_iter().collect();
        let b: IntervalTree<i32> = b.into_iter().collect();
        let union = a.union(&b);
        prop_assert_eq!(&union, &b.union(&a));
        prop_assert_eq!(&(&a - &b) | &b, union.clone());
        prop_assert!((&union - &a).iter().all(|interval| b.contains(interval)));
        prop_assert!((&a - &b).iter().all(|interval| !b.contains(interval)));
    }

    #[test]
    fn removing_everything_empties_the_tree(input in intervals(100)) {
        let mut tree: IntervalTree<i32> = input.iter().cloned().collect();
        for interval in sorted_unique(input.clone()) {
            prop_assert!(tree.remove(&interval));
            prop_assert!(!tree.contains(&interval));
        }
        prop_assert!(tree.is_empty());
        for interval in &input {
            prop_assert!(!tree.remove(interval));
        }
    }

    #[test]
    fn remove_limit_drops_exactly_the_holders(input in intervals(100), limit in 0..75i32) {
        let mut tree: IntervalTree<i32> = input.iter().cloned().collect();
        let holders = tree.intersect_limit(&limit);
        prop_assert_eq!(tree.remove_limit(&limit), !holders.is_empty());
        prop_assert!(tree.intersect_limit(&limit).is_empty());
        prop_assert!(holders.iter().all(|interval| !tree.contains(interval)));
    }
}
