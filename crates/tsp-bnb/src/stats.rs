use num_traits::Zero;
use std::time::Duration;

/// Counters collected during one branch-and-bound run.
///
/// Every branch attempt ends up either explored or pruned, so
/// `nodes_explored + nodes_pruned == branch_attempts` holds at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbStatistics<T> {
    /// Branches whose bound beat the incumbent and were recursed into.
    pub nodes_explored: u64,
    /// Branches discarded because their bound did not beat the incumbent.
    pub nodes_pruned: u64,
    /// Children generated (one per unvisited city per expanded node).
    pub branch_attempts: u64,
    /// Leaves reached, i.e. tours closed back to the start city.
    pub tours_completed: u64,
    /// Times the incumbent was strictly improved.
    pub incumbent_updates: u64,
    /// Deepest path length reached, excluding the start city.
    pub max_depth: u64,
    /// Reduction cost of the untouched matrix.
    pub root_lower_bound: T,
    pub time_total: Duration,
}

impl<T> Default for BnbStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            nodes_pruned: 0,
            branch_attempts: 0,
            tours_completed: 0,
            incumbent_updates: 0,
            max_depth: 0,
            root_lower_bound: T::zero(),
            time_total: Duration::ZERO,
        }
    }
}

impl<T> BnbStatistics<T> {
    #[inline]
    pub fn on_branch_attempt(&mut self) {
        self.branch_attempts = self.branch_attempts.saturating_add(1);
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_node_pruned(&mut self) {
        self.nodes_pruned = self.nodes_pruned.saturating_add(1);
    }

    #[inline]
    pub fn on_tour_completed(&mut self) {
        self.tours_completed = self.tours_completed.saturating_add(1);
    }

    #[inline]
    pub fn on_incumbent_update(&mut self) {
        self.incumbent_updates = self.incumbent_updates.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = bound;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl<T> std::fmt::Display for BnbStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Branch-and-Bound Statistics:")?;
        writeln!(f, "  Branch attempts:    {}", self.branch_attempts)?;
        writeln!(f, "  Nodes explored:     {}", self.nodes_explored)?;
        writeln!(f, "  Nodes pruned:       {}", self.nodes_pruned)?;
        writeln!(f, "  Tours completed:    {}", self.tours_completed)?;
        writeln!(f, "  Incumbent updates:  {}", self.incumbent_updates)?;
        writeln!(f, "  Max depth reached:  {}", self.max_depth)?;
        writeln!(f, "  Root lower bound:   {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:         {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s = BnbStatistics::<u32>::default();
        s.on_branch_attempt();
        s.on_branch_attempt();
        s.on_node_explored();
        s.on_node_pruned();
        s.on_depth_update(3);
        s.on_depth_update(1);
        assert_eq!(s.branch_attempts, 2);
        assert_eq!(s.nodes_explored + s.nodes_pruned, s.branch_attempts);
        assert_eq!(s.max_depth, 3);
    }

    #[test]
    fn test_display_lists_root_bound() {
        let mut s = BnbStatistics::<u32>::default();
        s.set_root_lower_bound(70);
        let text = s.to_string();
        assert!(text.contains("Root lower bound:   70"));
    }
}
