use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::BnbStatistics;
use std::sync::atomic::{AtomicBool, Ordering};
use tsp_core::Cost;

/// Stops the search once `stop_flag` is set, typically from another thread.
#[derive(Debug, Clone, Copy)]
pub struct InterruptMonitor<'a> {
    stop_flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    #[inline]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self { stop_flag }
    }
}

impl<T> SearchMonitor<T> for InterruptMonitor<'_>
where
    T: Cost,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn search_command(&mut self, _path: &[usize], _statistics: &BnbStatistics<T>) -> SearchCommand {
        if self.stop_flag.load(Ordering::Relaxed) {
            SearchCommand::Terminate("Interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
