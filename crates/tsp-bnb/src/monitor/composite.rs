//! Fan-out monitor.
//!
//! Events are dispatched to child monitors in insertion order.
//! `search_command` short-circuits on the first non-`Continue` response, so
//! put stricter stop conditions first.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::BnbStatistics;
use crate::trace::TraceNode;
use tsp_core::{Cost, DistanceMatrix, Tour};

pub struct CompositeMonitor<'a, T>
where
    T: Cost,
{
    monitors: Vec<Box<dyn SearchMonitor<T> + 'a>>,
}

impl<T> Default for CompositeMonitor<'_, T>
where
    T: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: Cost,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Builder-style [`CompositeMonitor::add_monitor`].
    #[inline]
    pub fn with<M>(mut self, monitor: M) -> Self
    where
        M: SearchMonitor<T> + 'a,
    {
        self.add_monitor(monitor);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<T> SearchMonitor<T> for CompositeMonitor<'_, T>
where
    T: Cost,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, matrix: &DistanceMatrix<T>) {
        for m in &mut self.monitors {
            m.on_enter_search(matrix);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbStatistics<T>) {
        for m in &mut self.monitors {
            m.on_exit_search(statistics);
        }
    }

    fn search_command(&mut self, path: &[usize], statistics: &BnbStatistics<T>) -> SearchCommand {
        for m in &mut self.monitors {
            let command = m.search_command(path, statistics);
            if command != SearchCommand::Continue {
                return command;
            }
        }
        SearchCommand::Continue
    }

    fn on_node_evaluated(&mut self, node: &TraceNode<T>, statistics: &BnbStatistics<T>) {
        for m in &mut self.monitors {
            m.on_node_evaluated(node, statistics);
        }
    }

    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &BnbStatistics<T>) {
        for m in &mut self.monitors {
            m.on_solution_found(tour, statistics);
        }
    }
}
