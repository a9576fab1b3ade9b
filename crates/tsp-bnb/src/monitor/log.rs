use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::BnbStatistics;
use crate::trace::TraceNode;
use std::time::{Duration, Instant};
use tsp_core::{Cost, DistanceMatrix, Tour};

/// Reports progress through the `log` facade at `info` level.
///
/// A progress line is emitted at most once per `log_interval`; the clock is
/// only read when `nodes_explored & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: Cost,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
        }
    }

    fn log_line(&mut self, path: &[usize], stats: &BnbStatistics<T>) {
        let now = Instant::now();
        let best = self
            .best_cost
            .map_or_else(|| "Inf".to_string(), |c| c.to_string());
        ::log::info!(
            "{:>8.1}s | explored {:>10} | pruned {:>10} | depth {:>3} | best {}",
            now.duration_since(self.start_time).as_secs_f32(),
            stats.nodes_explored,
            stats.nodes_pruned,
            path.len().saturating_sub(1),
            best
        );
        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: Cost,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: Cost,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, matrix: &DistanceMatrix<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        ::log::info!("branch and bound on {} cities", matrix.num_cities());
    }

    fn search_command(&mut self, path: &[usize], stats: &BnbStatistics<T>) -> SearchCommand {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(path, stats);
        }
        SearchCommand::Continue
    }

    fn on_node_evaluated(&mut self, _node: &TraceNode<T>, _stats: &BnbStatistics<T>) {}

    fn on_solution_found(&mut self, tour: &Tour<T>, _stats: &BnbStatistics<T>) {
        self.best_cost = Some(tour.cost);
        ::log::info!("new best tour {} via {:?}", tour.cost, tour.path);
    }

    fn on_exit_search(&mut self, stats: &BnbStatistics<T>) {
        ::log::info!(
            "search finished: {} explored, {} pruned, {} tours closed in {:.2?}",
            stats.nodes_explored,
            stats.nodes_pruned,
            stats.tours_completed,
            stats.time_total
        );
    }
}
