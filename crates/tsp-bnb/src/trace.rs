//! Ordered record of the search's decisions.
//!
//! Two append-only sequences are kept side by side:
//! - reduction steps: the root reduction, then one step per branch attempt
//!   with the branch matrix and both reduction passes;
//! - nodes: a `Root` entry, then one `Explored`/`Pruned` entry per branch
//!   attempt and one `Complete` entry per closed tour.
//!
//! Entries are appended in the exact order the decisions are made and are
//! never modified afterwards. The search never reads the trace back.

use serde::Serialize;
use tsp_bounds::{CostMatrix, NodeBound, Reduction};

/// What happened to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeStatus {
    /// The initial reduction; informational only.
    Root,
    /// The bound beat the incumbent and the node was recursed into.
    Explored,
    /// The bound did not beat the incumbent; the subtree was discarded.
    Pruned,
    /// A full permutation closed back to the start city.
    Complete,
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeStatus::Root => write!(f, "Root"),
            NodeStatus::Explored => write!(f, "Explored"),
            NodeStatus::Pruned => write!(f, "Pruned"),
            NodeStatus::Complete => write!(f, "Complete"),
        }
    }
}

/// One node of the search tree as seen by the trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceNode<T> {
    /// Path prefix from the start city; closed with the start city for
    /// `Complete` entries.
    pub path: Vec<usize>,
    /// Distance of `path` in the input matrix.
    pub path_cost: T,
    /// Parent bound plus the reduced cost of the last edge. Equals the tour
    /// cost for `Complete` entries.
    pub cost: T,
    pub bound: T,
    pub depth: usize,
    pub status: NodeStatus,
}

/// Reduction pass as recorded in the trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionRecord<T> {
    /// Matrix after the pass; omitted when snapshots are disabled.
    pub matrix: Option<CostMatrix<T>>,
    pub minimums: Vec<T>,
    pub cost: T,
}

impl<T> ReductionRecord<T>
where
    T: Clone,
{
    fn from_reduction(reduction: &Reduction<T>, with_matrix: bool) -> Self {
        Self {
            matrix: with_matrix.then(|| reduction.matrix.clone()),
            minimums: reduction.minimums.clone(),
            cost: reduction.cost.clone(),
        }
    }
}

/// Bound computation for the root or for one branch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionStep<T> {
    pub description: String,
    /// `None` for the root step.
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub depth: usize,
    pub parent_cost: T,
    pub edge_cost: T,
    /// Matrix before reduction (for branches: after marking the excluded
    /// row, column and return edge).
    pub matrix: Option<CostMatrix<T>>,
    pub row_reduction: ReductionRecord<T>,
    pub col_reduction: ReductionRecord<T>,
    pub reduction_cost: T,
    pub bound: T,
}

impl<T> ReductionStep<T>
where
    T: Clone,
{
    pub(crate) fn root(
        matrix: CostMatrix<T>,
        bound: &NodeBound<T>,
        zero: T,
        with_matrices: bool,
    ) -> Self {
        Self {
            description: "Initial cost matrix with row and column reduction".to_string(),
            from: None,
            to: None,
            depth: 0,
            parent_cost: zero.clone(),
            edge_cost: zero,
            matrix: with_matrices.then_some(matrix),
            row_reduction: ReductionRecord::from_reduction(&bound.row_reduction, with_matrices),
            col_reduction: ReductionRecord::from_reduction(&bound.column_reduction, with_matrices),
            reduction_cost: bound.reduction_cost.clone(),
            bound: bound.bound.clone(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn branch(
        from: usize,
        to: usize,
        depth: usize,
        parent_cost: T,
        edge_cost: T,
        matrix: CostMatrix<T>,
        bound: &NodeBound<T>,
        with_matrices: bool,
    ) -> Self {
        Self {
            description: format!("Branch from City {from} to City {to}"),
            from: Some(from),
            to: Some(to),
            depth,
            parent_cost,
            edge_cost,
            matrix: with_matrices.then_some(matrix),
            row_reduction: ReductionRecord::from_reduction(&bound.row_reduction, with_matrices),
            col_reduction: ReductionRecord::from_reduction(&bound.column_reduction, with_matrices),
            reduction_cost: bound.reduction_cost.clone(),
            bound: bound.bound.clone(),
        }
    }
}

/// Append-only trace of one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTrace<T> {
    reduction_steps: Vec<ReductionStep<T>>,
    nodes: Vec<TraceNode<T>>,
}

impl<T> Default for SearchTrace<T> {
    fn default() -> Self {
        Self {
            reduction_steps: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

impl<T> SearchTrace<T> {
    #[inline]
    pub(crate) fn push_step(&mut self, step: ReductionStep<T>) {
        self.reduction_steps.push(step);
    }

    #[inline]
    pub(crate) fn push_node(&mut self, node: TraceNode<T>) {
        self.nodes.push(node);
    }

    #[inline]
    pub fn reduction_steps(&self) -> &[ReductionStep<T>] {
        &self.reduction_steps
    }

    #[inline]
    pub fn nodes(&self) -> &[TraceNode<T>] {
        &self.nodes
    }

    /// Number of node entries with the given status.
    pub fn count(&self, status: NodeStatus) -> usize {
        self.nodes.iter().filter(|n| n.status == status).count()
    }

    pub fn into_parts(self) -> (Vec<ReductionStep<T>>, Vec<TraceNode<T>>) {
        (self.reduction_steps, self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(status: NodeStatus) -> TraceNode<u32> {
        TraceNode {
            path: vec![0],
            path_cost: 0,
            cost: 0,
            bound: 0,
            depth: 0,
            status,
        }
    }

    #[test]
    fn test_counts_by_status() {
        let mut trace = SearchTrace::default();
        trace.push_node(node(NodeStatus::Root));
        trace.push_node(node(NodeStatus::Explored));
        trace.push_node(node(NodeStatus::Pruned));
        trace.push_node(node(NodeStatus::Pruned));
        assert_eq!(trace.count(NodeStatus::Pruned), 2);
        assert_eq!(trace.count(NodeStatus::Complete), 0);
        assert_eq!(trace.nodes()[0].status, NodeStatus::Root);
    }

    #[test]
    fn test_status_serializes_as_name() {
        assert_eq!(
            serde_json::to_string(&NodeStatus::Explored).unwrap(),
            "\"Explored\""
        );
    }
}
