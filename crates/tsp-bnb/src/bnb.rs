//! Depth-first branch and bound over reduced cost matrices.
//!
//! The root matrix is reduced once (rows, then columns) and its reduction
//! cost becomes the initial bound. From the start city the search extends
//! the current path by every unvisited city in ascending index order. For
//! each candidate it copies the node's reduced matrix, excludes the last
//! city's row, the candidate's column and (unless the candidate closes the
//! permutation) the candidate's return edge, reduces the copy and bounds the
//! child. A child is explored only if its bound is strictly below the
//! incumbent; otherwise the whole subtree is dropped without further matrix
//! work. A path of length `n` is closed back to the start city and offered
//! to the incumbent.
//!
//! Every node owns its matrix, so backtracking needs no undo step. Only the
//! path and the visited set are shared along the recursion and restored on
//! the way back.

use crate::incumbent::Incumbent;
use crate::monitor::no_op::NoOpMonitor;
use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::result::{BnbOutcome, BranchAndBoundSolution, TerminationReason};
use crate::stats::BnbStatistics;
use crate::trace::{NodeStatus, ReductionStep, SearchTrace, TraceNode};
use fixedbitset::FixedBitSet;
use std::ops::ControlFlow;
use std::time::Instant;
use tsp_bounds::{branch_bound, root_bound, CostMatrix};
use tsp_core::{Cost, DistanceMatrix, Tour, TspError, TspResult, START_CITY};

/// Configuration for a branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BranchAndBound<T> {
    incumbent: Option<T>,
    record_matrices: bool,
}

impl<T> Default for BranchAndBound<T> {
    fn default() -> Self {
        Self {
            incumbent: None,
            record_matrices: true,
        }
    }
}

impl<T> BranchAndBound<T>
where
    T: Cost,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `cost` as the best-known tour cost. Only strictly cheaper
    /// tours are accepted, and no tour is reported unless one is found.
    #[inline]
    pub fn with_incumbent(mut self, cost: T) -> Self {
        self.incumbent = Some(cost);
        self
    }

    /// Whether reduction steps carry full matrix snapshots (default `true`).
    /// Minimums and costs are recorded either way.
    #[inline]
    pub fn with_matrix_snapshots(mut self, record: bool) -> Self {
        self.record_matrices = record;
        self
    }

    /// Runs the search without a monitor.
    #[inline]
    pub fn solve(&self, matrix: &DistanceMatrix<T>) -> TspResult<BnbOutcome<T>> {
        self.solve_with_monitor(matrix, NoOpMonitor::new())
    }

    /// Runs the search, consulting `monitor` before every node expansion.
    /// Pass `&mut monitor` to keep access to the monitor afterwards.
    pub fn solve_with_monitor<M>(
        &self,
        matrix: &DistanceMatrix<T>,
        mut monitor: M,
    ) -> TspResult<BnbOutcome<T>>
    where
        M: SearchMonitor<T>,
    {
        let start_time = Instant::now();
        monitor.on_enter_search(matrix);

        let incumbent = match self.incumbent {
            Some(cost) => Incumbent::seeded(cost),
            None => Incumbent::empty(),
        };
        let mut session = SearchSession {
            distances: matrix,
            incumbent,
            trace: SearchTrace::default(),
            statistics: BnbStatistics::default(),
            record_matrices: self.record_matrices,
            monitor,
        };

        let root_matrix = CostMatrix::from_distances(matrix);
        let root = root_bound(&root_matrix)?;
        let initial_bound = root.bound;
        log::debug!(
            "root reduction: rows {} + columns {} = {initial_bound}",
            root.row_reduction.cost,
            root.column_reduction.cost
        );

        session.statistics.set_root_lower_bound(initial_bound);
        session.trace.push_step(ReductionStep::root(
            root_matrix,
            &root,
            T::zero(),
            self.record_matrices,
        ));
        session.trace.push_node(TraceNode {
            path: vec![START_CITY],
            path_cost: T::zero(),
            cost: initial_bound,
            bound: initial_bound,
            depth: 0,
            status: NodeStatus::Root,
        });

        let mut path = Vec::with_capacity(matrix.num_cities() + 1);
        path.push(START_CITY);
        let mut visited = FixedBitSet::with_capacity(matrix.num_cities());
        visited.insert(START_CITY);

        let node = SearchNode {
            cost: initial_bound,
            path_cost: T::zero(),
            matrix: root.column_reduction.matrix,
        };
        let flow = session.expand(&mut path, &mut visited, node)?;

        let SearchSession {
            incumbent,
            trace,
            mut statistics,
            mut monitor,
            ..
        } = session;
        statistics.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&statistics);

        let termination = match flow {
            ControlFlow::Continue(()) => TerminationReason::Completed,
            ControlFlow::Break(reason) => TerminationReason::Aborted(reason),
        };
        let best = incumbent.into_tour();
        match &best {
            Some(tour) => log::debug!(
                "search {termination}: best {} via {:?}, {} explored, {} pruned",
                tour.cost,
                tour.path,
                statistics.nodes_explored,
                statistics.nodes_pruned
            ),
            None => log::debug!("search {termination}: no tour beat the incumbent"),
        }

        Ok(BnbOutcome {
            best,
            initial_bound,
            trace,
            statistics,
            termination,
        })
    }
}

/// Solves `matrix` to optimality with a full trace.
pub fn solve_branch_and_bound<T>(
    matrix: &DistanceMatrix<T>,
) -> TspResult<BranchAndBoundSolution<T>>
where
    T: Cost,
{
    BranchAndBound::new().solve(matrix)?.into_solution()
}

/// A node of the search tree. Created per expansion and dropped when the
/// expansion returns.
struct SearchNode<T> {
    /// Bound of the node; the accumulated cost handed to its children.
    cost: T,
    /// Real distance of the path so far.
    path_cost: T,
    /// Fully reduced matrix owned by this node.
    matrix: CostMatrix<T>,
}

/// Per-run mutable state, passed by exclusive reference down the recursion.
struct SearchSession<'a, T, M> {
    distances: &'a DistanceMatrix<T>,
    incumbent: Incumbent<T>,
    trace: SearchTrace<T>,
    statistics: BnbStatistics<T>,
    record_matrices: bool,
    monitor: M,
}

impl<T, M> SearchSession<'_, T, M>
where
    T: Cost,
    M: SearchMonitor<T>,
{
    fn expand(
        &mut self,
        path: &mut Vec<usize>,
        visited: &mut FixedBitSet,
        node: SearchNode<T>,
    ) -> TspResult<ControlFlow<String>> {
        if let SearchCommand::Terminate(reason) =
            self.monitor.search_command(path, &self.statistics)
        {
            log::debug!("search terminated by {}: {reason}", self.monitor.name());
            return Ok(ControlFlow::Break(reason));
        }

        let n = self.distances.num_cities();
        let depth = path.len() - 1;
        let last = path[depth];
        self.statistics.on_depth_update(depth as u64);

        if path.len() == n {
            self.close_tour(path, &node)?;
            return Ok(ControlFlow::Continue(()));
        }

        let closes_permutation = path.len() + 1 == n;
        for city in 0..n {
            if visited.contains(city) {
                continue;
            }

            let edge_cost = node.matrix.edge(last, city)?;
            let branch_matrix =
                node.matrix
                    .branch_on(last, city, (!closes_permutation).then_some(START_CITY));
            let child_bound = branch_bound(node.cost, edge_cost, &branch_matrix)?;
            self.statistics.on_branch_attempt();

            let cost = node
                .cost
                .checked_add_cost(edge_cost)
                .ok_or_else(|| TspError::overflow("accumulating path cost"))?;
            let path_cost = node
                .path_cost
                .checked_add_cost(self.distances.cost(last, city))
                .ok_or_else(|| TspError::overflow("accumulating path cost"))?;
            let bound = child_bound.bound;
            let status = if self.incumbent.admits(bound) {
                NodeStatus::Explored
            } else {
                NodeStatus::Pruned
            };

            path.push(city);
            self.trace.push_step(ReductionStep::branch(
                last,
                city,
                depth + 1,
                node.cost,
                edge_cost,
                branch_matrix,
                &child_bound,
                self.record_matrices,
            ));
            let entry = TraceNode {
                path: path.clone(),
                path_cost,
                cost,
                bound,
                depth: depth + 1,
                status,
            };
            self.monitor.on_node_evaluated(&entry, &self.statistics);
            self.trace.push_node(entry);

            if status == NodeStatus::Pruned {
                self.statistics.on_node_pruned();
                log::trace!("prune {path:?}: bound {bound}");
                path.pop();
                continue;
            }

            self.statistics.on_node_explored();
            log::trace!("explore {path:?}: bound {bound}");
            visited.insert(city);
            let child = SearchNode {
                cost: bound,
                path_cost,
                matrix: child_bound.column_reduction.matrix,
            };
            let flow = self.expand(path, visited, child)?;
            visited.set(city, false);
            path.pop();

            if flow.is_break() {
                return Ok(flow);
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Closes a full permutation back to the start city and offers it to the
    /// incumbent.
    ///
    /// The tour is priced by summing input distances along the path. The
    /// reduced-matrix total only agrees with that sum in exact arithmetic, so
    /// it is used for bounding and never reported.
    fn close_tour(&mut self, path: &mut Vec<usize>, node: &SearchNode<T>) -> TspResult<()> {
        let depth = path.len() - 1;
        let last = path[depth];
        // Only the return edge is left usable at a leaf.
        node.matrix.edge(last, START_CITY)?;
        let total = node
            .path_cost
            .checked_add_cost(self.distances.cost(last, START_CITY))
            .ok_or_else(|| TspError::overflow("closing a tour"))?;

        path.push(START_CITY);
        self.statistics.on_tour_completed();
        let entry = TraceNode {
            path: path.clone(),
            path_cost: total,
            cost: total,
            bound: total,
            depth,
            status: NodeStatus::Complete,
        };
        self.monitor.on_node_evaluated(&entry, &self.statistics);
        self.trace.push_node(entry);

        if self.incumbent.try_install(path, total) {
            self.statistics.on_incumbent_update();
            log::debug!("new incumbent {total} via {path:?}");
            let tour = Tour::new(path.clone(), total);
            self.monitor.on_solution_found(&tour, &self.statistics);
        }
        path.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::composite::CompositeMonitor;
    use crate::monitor::interrupt::InterruptMonitor;
    use crate::monitor::log::LogMonitor;
    use crate::monitor::time_limit::TimeLimitMonitor;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        evaluated: u64,
        improvements: Vec<u32>,
        exited: bool,
    }

    impl SearchMonitor<u32> for Recorder {
        fn name(&self) -> &str {
            "Recorder"
        }

        fn on_exit_search(&mut self, _statistics: &BnbStatistics<u32>) {
            self.exited = true;
        }

        fn on_node_evaluated(&mut self, _node: &TraceNode<u32>, _statistics: &BnbStatistics<u32>) {
            self.evaluated += 1;
        }

        fn on_solution_found(&mut self, tour: &Tour<u32>, _statistics: &BnbStatistics<u32>) {
            self.improvements.push(tour.cost);
        }
    }

    fn four_cities() -> DistanceMatrix<u32> {
        DistanceMatrix::new(vec![
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_four_city_scenario() {
        let sol = solve_branch_and_bound(&four_cities()).unwrap();
        assert_eq!(sol.min_cost, 80);
        assert_eq!(sol.best_path, vec![0, 1, 3, 2, 0]);
        assert_eq!(sol.initial_bound, 70);
    }

    #[test]
    fn test_four_city_trace_shape() {
        let outcome = BranchAndBound::new().solve(&four_cities()).unwrap();
        let nodes = outcome.trace().nodes();
        let summary: Vec<(Vec<usize>, u32, NodeStatus)> = nodes
            .iter()
            .map(|n| (n.path.clone(), n.bound, n.status))
            .collect();

        // 0->2 reduces to exactly 80 and is pruned once 0-1-3-2-0 is known;
        // 0->3 bounds at 75 and is still explored.
        assert!(summary.contains(&(vec![0, 2], 80, NodeStatus::Pruned)));
        assert!(summary.contains(&(vec![0, 3], 75, NodeStatus::Explored)));
        assert_eq!(summary[0], (vec![0], 70, NodeStatus::Root));
        assert_eq!(summary[1], (vec![0, 1], 80, NodeStatus::Explored));
        assert!(summary
            .iter()
            .any(|(p, b, s)| p == &vec![0, 1, 3, 2, 0] && *b == 80 && *s == NodeStatus::Complete));
        assert_eq!(
            outcome.trace().reduction_steps()[0].description,
            "Initial cost matrix with row and column reduction"
        );
        assert_eq!(
            outcome.trace().reduction_steps()[1].description,
            "Branch from City 0 to City 1"
        );

        let stats = outcome.statistics();
        assert_eq!(
            stats.nodes_explored + stats.nodes_pruned,
            stats.branch_attempts
        );
        assert_eq!(
            outcome.trace().reduction_steps().len() as u64,
            stats.branch_attempts + 1
        );
        assert_eq!(outcome.termination_reason(), &TerminationReason::Completed);
        assert!(outcome.is_optimal());
    }

    #[test]
    fn test_seeded_incumbent_prunes_at_root() {
        let outcome = BranchAndBound::new()
            .with_incumbent(1)
            .solve(&four_cities())
            .unwrap();
        let stats = outcome.statistics();
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.nodes_pruned, 3);
        assert!(outcome.best().is_none());
        assert_eq!(
            outcome.into_solution().unwrap_err(),
            TspError::NoTourFound
        );
    }

    #[test]
    fn test_snapshots_can_be_disabled() {
        let outcome = BranchAndBound::new()
            .with_matrix_snapshots(false)
            .solve(&four_cities())
            .unwrap();
        let steps = outcome.trace().reduction_steps();
        assert!(steps.iter().all(|s| s.matrix.is_none()
            && s.row_reduction.matrix.is_none()
            && s.col_reduction.matrix.is_none()));
        assert_eq!(steps[0].row_reduction.minimums, vec![10, 10, 15, 20]);
        assert_eq!(steps[0].col_reduction.minimums, vec![0, 0, 5, 10]);
    }

    #[test]
    fn test_raised_interrupt_aborts_before_root_expansion() {
        let flag = AtomicBool::new(true);
        let outcome = BranchAndBound::new()
            .solve_with_monitor(&four_cities(), InterruptMonitor::new(&flag))
            .unwrap();
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("Interrupt signal received".to_string())
        );
        assert_eq!(outcome.statistics().branch_attempts, 0);
        assert!(outcome.best().is_none());
        assert!(!outcome.is_optimal());
    }

    #[test]
    fn test_monitor_sees_every_evaluation() {
        let mut recorder = Recorder::default();
        let outcome = BranchAndBound::new()
            .solve_with_monitor(&four_cities(), &mut recorder)
            .unwrap();
        let stats = outcome.statistics();
        assert!(recorder.exited);
        assert_eq!(
            recorder.evaluated,
            stats.branch_attempts + stats.tours_completed
        );
        assert_eq!(recorder.improvements.len() as u64, stats.incumbent_updates);
        assert_eq!(recorder.improvements.last(), Some(&80));
        assert!(recorder.improvements.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_generous_limits_do_not_interfere() {
        let flag = AtomicBool::new(false);
        let monitor = CompositeMonitor::new()
            .with(LogMonitor::<u32>::default())
            .with(TimeLimitMonitor::new(Duration::from_secs(3600), 1))
            .with(InterruptMonitor::new(&flag));
        let outcome = BranchAndBound::new()
            .solve_with_monitor(&four_cities(), monitor)
            .unwrap();
        assert!(outcome.is_optimal());
        assert_eq!(outcome.best().map(|t| t.cost), Some(80));
    }

    #[test]
    fn test_float_cost_is_sum_of_input_distances() {
        let m = DistanceMatrix::new(vec![
            vec![0.0, 0.1, 0.7, 0.3, 1.1],
            vec![0.2, 0.0, 0.1, 0.7, 0.3],
            vec![0.3, 1.1, 0.0, 0.1, 0.7],
            vec![0.7, 0.3, 0.2, 0.0, 0.1],
            vec![0.1, 0.7, 1.1, 0.2, 0.0],
        ])
        .unwrap();
        let outcome = BranchAndBound::new().solve(&m).unwrap();
        let best = outcome.best().unwrap();
        assert_eq!(m.path_cost(&best.path).unwrap(), best.cost);
        for node in outcome.trace().nodes() {
            if node.status == NodeStatus::Complete {
                assert_eq!(m.path_cost(&node.path).unwrap(), node.cost);
                assert_eq!(node.path_cost, node.cost);
            }
        }
    }
}
