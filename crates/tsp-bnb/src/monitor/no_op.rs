use crate::monitor::search_monitor::SearchMonitor;
use tsp_core::Cost;

/// A monitor that observes nothing and never stops the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> SearchMonitor<T> for NoOpMonitor
where
    T: Cost,
{
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}
