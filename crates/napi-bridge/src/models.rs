use napi_derive::napi;

#[napi(object)]
#[derive(Clone, Debug)]
pub struct ReductionPass {
    /// `null` cells are excluded from the tour.
    pub matrix: Option<Vec<Vec<Option<f64>>>>,
    pub minimums: Vec<f64>,
    pub cost: f64,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct ReductionStep {
    pub description: String,
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub depth: u32,
    pub parent_cost: f64,
    pub edge_cost: f64,
    pub matrix: Option<Vec<Vec<Option<f64>>>>,
    pub row_reduction: ReductionPass,
    pub col_reduction: ReductionPass,
    pub reduction_cost: f64,
    pub bound: f64,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct ExploredNode {
    pub path: Vec<u32>,
    pub path_cost: f64,
    pub cost: f64,
    pub bound: f64,
    pub depth: u32,
    /// "Root", "Explored", "Pruned" or "Complete".
    pub status: String,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct BranchAndBoundReport {
    pub best_path: Vec<u32>,
    pub min_cost: f64,
    pub initial_bound: f64,
    pub reduction_steps: Vec<ReductionStep>,
    pub explored_nodes: Vec<ExploredNode>,
    pub nodes_explored: i64,
    pub nodes_pruned: i64,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct TriedPath {
    pub path: Vec<u32>,
    pub cost: f64,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct BruteForceReport {
    pub best_path: Vec<u32>,
    pub min_cost: f64,
    pub all_paths: Vec<TriedPath>,
    pub total_paths: i64,
    pub iterations: i64,
}
