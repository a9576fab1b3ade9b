//! Admissible bounds from matrix reduction.
//!
//! A branch that extends a partial path by `from -> to` is bounded by
//!
//! ```text
//! bound = parent_cost + edge_cost + row_reduction + column_reduction
//! ```
//!
//! where `parent_cost` is the parent's bound, `edge_cost` is the parent's
//! reduced cost of the new edge, and the reductions are taken on the branch
//! matrix (rows first, then columns on the row-reduced result). The order is
//! fixed: column minimums are read from the row-reduced matrix.

use crate::reduce::{reduce_columns, reduce_rows, Reduction};
use crate::working::CostMatrix;
use serde::Serialize;
use tsp_core::{Cost, TspError, TspResult};

/// Both reduction passes of a node together with the resulting bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBound<T> {
    pub row_reduction: Reduction<T>,
    pub column_reduction: Reduction<T>,
    /// Row cost plus column cost.
    pub reduction_cost: T,
    pub bound: T,
}

impl<T> NodeBound<T>
where
    T: Cost,
{
    /// The fully reduced matrix handed to the node's children.
    #[inline]
    pub fn reduced_matrix(&self) -> &CostMatrix<T> {
        &self.column_reduction.matrix
    }
}

/// Bound of the root: the reduction cost of the untouched matrix.
pub fn root_bound<T>(matrix: &CostMatrix<T>) -> TspResult<NodeBound<T>>
where
    T: Cost,
{
    branch_bound(T::zero(), T::zero(), matrix)
}

/// Bound of a branch whose matrix has already been restricted (see
/// [`CostMatrix::branch_on`]).
pub fn branch_bound<T>(
    parent_cost: T,
    edge_cost: T,
    branch_matrix: &CostMatrix<T>,
) -> TspResult<NodeBound<T>>
where
    T: Cost,
{
    let row_reduction = reduce_rows(branch_matrix)?;
    let column_reduction = reduce_columns(&row_reduction.matrix)?;

    let reduction_cost = row_reduction
        .cost
        .checked_add_cost(column_reduction.cost)
        .ok_or_else(|| TspError::overflow("summing reduction costs"))?;
    let bound = T::checked_sum([parent_cost, edge_cost, reduction_cost])
        .ok_or_else(|| TspError::overflow("computing a branch bound"))?;

    log::trace!(
        "bound {bound} = parent {parent_cost} + edge {edge_cost} + rows {} + columns {}",
        row_reduction.cost,
        column_reduction.cost
    );

    Ok(NodeBound {
        row_reduction,
        column_reduction,
        reduction_cost,
        bound,
    })
}
