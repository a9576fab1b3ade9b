#![deny(clippy::all)]

//! Empirical checks of the branch-and-bound solver.
//!
//! [`validate_instance`] solves one matrix with both solvers and reports
//! whether the optimal costs agree, how many recorded bounds exceed the
//! cheapest tour sharing their prefix, and how far the root bound sits below
//! the optimum. [`random_symmetric_matrix`] generates seeded instances for
//! the `bound-sweep` binary.

use rand::Rng;
use serde::Serialize;
use tsp_bnb::{BranchAndBound, NodeStatus};
use tsp_brute_force::solve_brute_force;
use tsp_core::{DistanceMatrix, TspError, TspResult};

/// Per-instance outcome, one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceReport {
    pub n: usize,
    pub bnb_cost: u64,
    pub brute_cost: u64,
    pub agree: bool,
    pub root_bound: u64,
    pub nodes_explored: u64,
    pub nodes_pruned: u64,
    pub branch_attempts: u64,
    /// Trace entries whose bound exceeds the best completion of their path.
    pub admissibility_violations: u64,
    /// `(optimum - root_bound) / optimum`; 0 for a zero-cost optimum.
    pub tight_root_gap: f64,
}

impl InstanceReport {
    pub const CSV_HEADER: &'static str = "n,bnb_cost,brute_cost,agree,root_bound,nodes_explored,nodes_pruned,branch_attempts,admissibility_violations,tight_root_gap";

    pub fn is_sound(&self) -> bool {
        self.agree && self.admissibility_violations == 0
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{:.6}",
            self.n,
            self.bnb_cost,
            self.brute_cost,
            self.agree,
            self.root_bound,
            self.nodes_explored,
            self.nodes_pruned,
            self.branch_attempts,
            self.admissibility_violations,
            self.tight_root_gap
        )
    }
}

/// Runs both solvers on `matrix` and cross-checks the branch-and-bound trace.
///
/// Enumeration is factorial in `n`; keep instances small.
pub fn validate_instance(matrix: &DistanceMatrix<u64>) -> TspResult<InstanceReport> {
    let oracle = solve_brute_force(matrix)?;
    let outcome = BranchAndBound::new()
        .with_matrix_snapshots(false)
        .solve(matrix)?;
    let best = outcome.best().ok_or(TspError::NoTourFound)?;

    let admissibility_violations = outcome
        .trace()
        .nodes()
        .iter()
        .filter(|node| matches!(node.status, NodeStatus::Explored | NodeStatus::Pruned))
        .filter(|node| {
            oracle
                .min_cost_with_prefix(&node.path)
                .is_some_and(|best_completion| node.bound > best_completion)
        })
        .count() as u64;

    let root_bound = outcome.initial_bound();
    let tight_root_gap = if oracle.min_cost == 0 {
        0.0
    } else {
        (oracle.min_cost - root_bound.min(oracle.min_cost)) as f64 / oracle.min_cost as f64
    };

    let stats = outcome.statistics();
    let report = InstanceReport {
        n: matrix.num_cities(),
        bnb_cost: best.cost,
        brute_cost: oracle.min_cost,
        agree: best.cost == oracle.min_cost,
        root_bound,
        nodes_explored: stats.nodes_explored,
        nodes_pruned: stats.nodes_pruned,
        branch_attempts: stats.branch_attempts,
        admissibility_violations,
        tight_root_gap,
    };
    if !report.is_sound() {
        log::warn!("unsound instance: {report:?}");
    }
    Ok(report)
}

/// Symmetric matrix with a zero diagonal and off-diagonal costs in
/// `1..=max_cost`.
pub fn random_symmetric_matrix<R>(
    n: usize,
    max_cost: u64,
    rng: &mut R,
) -> TspResult<DistanceMatrix<u64>>
where
    R: Rng + ?Sized,
{
    let upper = max_cost.max(1);
    let mut rows = vec![vec![0u64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let cost = rng.gen_range(1..=upper);
            rows[i][j] = cost;
            rows[j][i] = cost;
        }
    }
    DistanceMatrix::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_four_city_report() {
        let m = DistanceMatrix::new(vec![
            vec![0u64, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap();
        let report = validate_instance(&m).unwrap();
        assert!(report.is_sound());
        assert_eq!(report.bnb_cost, 80);
        assert_eq!(report.root_bound, 70);
        assert!((report.tight_root_gap - 0.125).abs() < 1e-12);
        assert_eq!(
            report.nodes_explored + report.nodes_pruned,
            report.branch_attempts
        );
    }

    #[test]
    fn test_random_matrix_is_seeded_and_symmetric() {
        let mut rng_a = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut rng_b = Xoshiro256PlusPlus::seed_from_u64(7);
        let a = random_symmetric_matrix(6, 50, &mut rng_a).unwrap();
        let b = random_symmetric_matrix(6, 50, &mut rng_b).unwrap();
        assert_eq!(a, b);
        for i in 0..6 {
            assert_eq!(a.cost(i, i), 0);
            for j in 0..6 {
                assert_eq!(a.cost(i, j), a.cost(j, i));
                if i != j {
                    assert!((1..=50).contains(&a.cost(i, j)));
                }
            }
        }
    }

    #[test]
    fn test_too_small_instance_is_rejected() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert!(random_symmetric_matrix(2, 10, &mut rng)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_csv_row_matches_header_width() {
        let report = InstanceReport {
            n: 4,
            bnb_cost: 80,
            brute_cost: 80,
            agree: true,
            root_bound: 70,
            nodes_explored: 5,
            nodes_pruned: 2,
            branch_attempts: 7,
            admissibility_violations: 0,
            tight_root_gap: 0.125,
        };
        let row = report.to_csv_row();
        assert_eq!(row, "4,80,80,true,70,5,2,7,0,0.125000");
        assert_eq!(
            row.split(',').count(),
            InstanceReport::CSV_HEADER.split(',').count()
        );
    }
}
