use crate::stats::BnbStatistics;
use crate::trace::{ReductionStep, SearchTrace, TraceNode};
use serde::Serialize;
use tsp_core::{Cost, Tour, TspError, TspResult};

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The tree was exhausted; the incumbent (if any) is optimal among tours
    /// cheaper than the seed.
    Completed,
    /// A monitor stopped the search early.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "Completed"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {reason}"),
        }
    }
}

/// Everything a branch-and-bound run produced.
#[derive(Debug, Clone)]
pub struct BnbOutcome<T> {
    pub(crate) best: Option<Tour<T>>,
    pub(crate) initial_bound: T,
    pub(crate) trace: SearchTrace<T>,
    pub(crate) statistics: BnbStatistics<T>,
    pub(crate) termination: TerminationReason,
}

impl<T> BnbOutcome<T>
where
    T: Cost,
{
    /// Best tour found; `None` if the search was seeded below the optimum or
    /// aborted before closing a tour.
    #[inline]
    pub fn best(&self) -> Option<&Tour<T>> {
        self.best.as_ref()
    }

    #[inline]
    pub fn initial_bound(&self) -> T {
        self.initial_bound
    }

    #[inline]
    pub fn trace(&self) -> &SearchTrace<T> {
        &self.trace
    }

    #[inline]
    pub fn statistics(&self) -> &BnbStatistics<T> {
        &self.statistics
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.termination == TerminationReason::Completed && self.best.is_some()
    }

    /// Flattens into the caller-facing result; fails with
    /// [`TspError::NoTourFound`] when no tour was closed.
    pub fn into_solution(self) -> TspResult<BranchAndBoundSolution<T>> {
        let best = self.best.ok_or(TspError::NoTourFound)?;
        let (reduction_steps, explored_nodes) = self.trace.into_parts();
        Ok(BranchAndBoundSolution {
            best_path: best.path,
            min_cost: best.cost,
            initial_bound: self.initial_bound,
            reduction_steps,
            explored_nodes,
            nodes_explored: self.statistics.nodes_explored,
            nodes_pruned: self.statistics.nodes_pruned,
        })
    }
}

/// Result of [`crate::solve_branch_and_bound`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchAndBoundSolution<T> {
    pub best_path: Vec<usize>,
    pub min_cost: T,
    pub initial_bound: T,
    pub reduction_steps: Vec<ReductionStep<T>>,
    pub explored_nodes: Vec<TraceNode<T>>,
    pub nodes_explored: u64,
    pub nodes_pruned: u64,
}
