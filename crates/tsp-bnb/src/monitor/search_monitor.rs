use crate::stats::BnbStatistics;
use crate::trace::TraceNode;
use tsp_core::{Cost, DistanceMatrix, Tour};

/// Decision returned by [`SearchMonitor::search_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Continue,
    /// Stop the search; the string is reported as the termination reason.
    Terminate(String),
}

/// Observes and controls a branch-and-bound run.
///
/// Callbacks take `&mut self` and run on the search thread; keep them cheap.
pub trait SearchMonitor<T>
where
    T: Cost,
{
    fn name(&self) -> &str;

    /// Called once before the root reduction.
    fn on_enter_search(&mut self, _matrix: &DistanceMatrix<T>) {}

    /// Called once after the search returns, aborted or not.
    fn on_exit_search(&mut self, _statistics: &BnbStatistics<T>) {}

    /// Consulted before each node is expanded.
    fn search_command(&mut self, _path: &[usize], _statistics: &BnbStatistics<T>) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called for every branch attempt and every closed tour, right before
    /// the entry is appended to the trace.
    fn on_node_evaluated(&mut self, _node: &TraceNode<T>, _statistics: &BnbStatistics<T>) {}

    /// Called when a tour strictly improves the incumbent.
    fn on_solution_found(&mut self, _tour: &Tour<T>, _statistics: &BnbStatistics<T>) {}
}

impl<T, M> SearchMonitor<T> for &mut M
where
    T: Cost,
    M: SearchMonitor<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, matrix: &DistanceMatrix<T>) {
        (**self).on_enter_search(matrix)
    }

    fn on_exit_search(&mut self, statistics: &BnbStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    fn search_command(&mut self, path: &[usize], statistics: &BnbStatistics<T>) -> SearchCommand {
        (**self).search_command(path, statistics)
    }

    fn on_node_evaluated(&mut self, node: &TraceNode<T>, statistics: &BnbStatistics<T>) {
        (**self).on_node_evaluated(node, statistics)
    }

    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &BnbStatistics<T>) {
        (**self).on_solution_found(tour, statistics)
    }
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
