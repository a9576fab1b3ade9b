use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::BnbStatistics;
use std::time::{Duration, Instant};
use tsp_core::{Cost, DistanceMatrix};

/// Terminates the search after a wall-clock budget.
///
/// The clock is read only every `check_interval` expansions.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    ops_since_last_check: u64,
}

impl TimeLimitMonitor {
    pub fn new(time_limit: Duration, check_interval: u64) -> Self {
        Self {
            time_limit,
            start_time: None,
            check_interval: check_interval.max(1),
            ops_since_last_check: 0,
        }
    }

    pub fn with_default_check_interval(time_limit: Duration) -> Self {
        Self::new(time_limit, 1_024)
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor
where
    T: Cost,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &DistanceMatrix<T>) {
        self.start_time = Some(Instant::now());
        self.ops_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &BnbStatistics<T>) {
        self.start_time = None;
    }

    fn search_command(&mut self, _path: &[usize], _statistics: &BnbStatistics<T>) -> SearchCommand {
        self.ops_since_last_check = self.ops_since_last_check.saturating_add(1);
        if self.ops_since_last_check < self.check_interval {
            return SearchCommand::Continue;
        }
        self.ops_since_last_check = 0;

        match self.start_time {
            Some(start) if start.elapsed() > self.time_limit => SearchCommand::Terminate(format!(
                "Time limit of {:.3}s exceeded",
                self.time_limit.as_secs_f64()
            )),
            _ => SearchCommand::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_terminates_on_first_check() {
        let matrix =
            DistanceMatrix::new(vec![vec![0u32, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]).unwrap();
        let stats = BnbStatistics::<u32>::default();
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO, 1);
        SearchMonitor::<u32>::on_enter_search(&mut monitor, &matrix);
        std::thread::sleep(Duration::from_millis(2));
        assert!(matches!(
            monitor.search_command(&[0], &stats),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_not_started_never_terminates() {
        let stats = BnbStatistics::<u32>::default();
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO, 1);
        assert_eq!(monitor.search_command(&[0], &stats), SearchCommand::Continue);
    }
}
