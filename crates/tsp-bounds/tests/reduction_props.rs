//! Property tests for the reduction primitives.

use proptest::prelude::*;
use tsp_bounds::{reduce_columns, reduce_rows, root_bound, CostMatrix};
use tsp_core::DistanceMatrix;

fn instance() -> impl Strategy<Value = DistanceMatrix<u64>> {
    (3usize..9).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0u64..500, n), n)
            .prop_map(|rows| DistanceMatrix::new(rows).unwrap())
    })
}

/// Random instance with a random set of unusable cells.
fn masked_instance() -> impl Strategy<Value = CostMatrix<u64>> {
    instance().prop_flat_map(|d| {
        let n = d.num_cities();
        prop::collection::vec(any::<bool>(), n * n).prop_map(move |mask| {
            let mut m = CostMatrix::from_distances(&d);
            for (idx, masked) in mask.into_iter().enumerate() {
                if masked {
                    m.mark_unusable(idx / n, idx % n);
                }
            }
            m
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_reduced_entries_stay_non_negative_and_usable_set_is_kept(m in masked_instance()) {
        let rows = reduce_rows(&m).unwrap();
        let cols = reduce_columns(&rows.matrix).unwrap();
        let n = m.num_cities();
        for r in 0..n {
            for c in 0..n {
                prop_assert_eq!(m.is_usable(r, c), cols.matrix.is_usable(r, c));
            }
        }
        let sum: u64 = rows.minimums.iter().sum();
        prop_assert_eq!(sum, rows.cost);
        let sum: u64 = cols.minimums.iter().sum();
        prop_assert_eq!(sum, cols.cost);
    }

    #[test]
    fn prop_every_open_line_has_a_zero_after_reduction(m in masked_instance()) {
        let rows = reduce_rows(&m).unwrap();
        let n = m.num_cities();
        for r in 0..n {
            let eligible: Vec<u64> = (0..n)
                .filter(|&c| c != r)
                .filter_map(|c| rows.matrix.get(r, c))
                .collect();
            if !eligible.is_empty() {
                prop_assert!(eligible.contains(&0));
            }
        }
    }

    #[test]
    fn prop_reduction_is_idempotent(m in masked_instance()) {
        let rows = reduce_rows(&m).unwrap();
        let cols = reduce_columns(&rows.matrix).unwrap();
        prop_assert_eq!(reduce_rows(&cols.matrix).unwrap().cost, 0);
        prop_assert_eq!(reduce_columns(&cols.matrix).unwrap().cost, 0);
    }

    #[test]
    fn prop_root_bound_never_exceeds_a_tour(d in instance()) {
        // Identity tour 0 -> 1 -> ... -> n-1 -> 0 is one feasible tour.
        let n = d.num_cities();
        let mut path: Vec<usize> = (0..n).collect();
        path.push(0);
        let cost = d.path_cost(&path).unwrap();
        let root = root_bound(&CostMatrix::from_distances(&d)).unwrap();
        prop_assert!(root.bound <= cost);
    }
}
