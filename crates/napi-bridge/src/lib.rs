#![deny(clippy::all)]

use napi::{Error, Result};
use napi_derive::napi;

mod models;

use models::{
    BranchAndBoundReport, BruteForceReport, ExploredNode, ReductionPass, ReductionStep,
    TriedPath,
};
use tsp_bnb::{BranchAndBoundSolution, ReductionRecord, TraceNode};
use tsp_bnb::ReductionStep as TraceStep;
use tsp_brute_force::{BruteForce, BruteForceSolution};
use tsp_core::{DistanceMatrix, Tour, TspError};

/// Branch and bound with the full reduction trace.
#[napi]
pub fn solve_branch_and_bound(matrix: Vec<Vec<f64>>) -> Result<BranchAndBoundReport> {
    let matrix = distance_matrix(matrix)?;
    let solution = tsp_bnb::solve_branch_and_bound(&matrix).map_err(to_napi_error)?;
    Ok(bnb_report(solution))
}

/// Exhaustive enumeration. `retain` caps how many tried tours are returned;
/// totals always cover every permutation.
#[napi]
pub fn solve_brute_force(matrix: Vec<Vec<f64>>, retain: Option<u32>) -> Result<BruteForceReport> {
    let matrix = distance_matrix(matrix)?;
    let solver = match retain {
        Some(limit) => BruteForce::new().with_retention(limit as usize),
        None => BruteForce::new(),
    };
    let solution = solver.solve(&matrix).map_err(to_napi_error)?;
    Ok(brute_force_report(solution))
}

fn distance_matrix(rows: Vec<Vec<f64>>) -> Result<DistanceMatrix<f64>> {
    DistanceMatrix::new(rows).map_err(to_napi_error)
}

fn to_napi_error(err: TspError) -> Error {
    Error::from_reason(err.to_string())
}

fn to_u32_path(path: Vec<usize>) -> Vec<u32> {
    path.into_iter().map(|city| city as u32).collect()
}

fn bnb_report(solution: BranchAndBoundSolution<f64>) -> BranchAndBoundReport {
    BranchAndBoundReport {
        best_path: to_u32_path(solution.best_path),
        min_cost: solution.min_cost,
        initial_bound: solution.initial_bound,
        reduction_steps: solution.reduction_steps.into_iter().map(step).collect(),
        explored_nodes: solution.explored_nodes.into_iter().map(node).collect(),
        nodes_explored: solution.nodes_explored as i64,
        nodes_pruned: solution.nodes_pruned as i64,
    }
}

fn step(step: TraceStep<f64>) -> ReductionStep {
    ReductionStep {
        description: step.description,
        from: step.from.map(|c| c as u32),
        to: step.to.map(|c| c as u32),
        depth: step.depth as u32,
        parent_cost: step.parent_cost,
        edge_cost: step.edge_cost,
        matrix: step.matrix.map(|m| m.to_rows()),
        row_reduction: pass(step.row_reduction),
        col_reduction: pass(step.col_reduction),
        reduction_cost: step.reduction_cost,
        bound: step.bound,
    }
}

fn pass(record: ReductionRecord<f64>) -> ReductionPass {
    ReductionPass {
        matrix: record.matrix.map(|m| m.to_rows()),
        minimums: record.minimums,
        cost: record.cost,
    }
}

fn node(node: TraceNode<f64>) -> ExploredNode {
    ExploredNode {
        path: to_u32_path(node.path),
        path_cost: node.path_cost,
        cost: node.cost,
        bound: node.bound,
        depth: node.depth as u32,
        status: node.status.to_string(),
    }
}

fn brute_force_report(solution: BruteForceSolution<f64>) -> BruteForceReport {
    BruteForceReport {
        best_path: to_u32_path(solution.best_path),
        min_cost: solution.min_cost,
        all_paths: solution
            .all_paths
            .into_iter()
            .map(|Tour { path, cost }| TriedPath {
                path: to_u32_path(path),
                cost,
            })
            .collect(),
        total_paths: solution.total_paths as i64,
        iterations: solution.iterations as i64,
    }
}
