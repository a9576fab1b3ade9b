//! Row and column reduction.
//!
//! Reducing a line (row or column) subtracts its smallest eligible entry
//! from every eligible entry of that line. An entry is eligible when it is
//! off the diagonal and not marked unusable. A line without eligible entries
//! has minimum zero and is left alone. The sum of the subtracted minimums is
//! the reduction cost; every tour that still has to leave each open row
//! and enter each open column pays at least that much.
//!
//! Only the minimum value is subtracted, never a position, so scan order
//! does not affect the result.

use crate::working::CostMatrix;
use serde::Serialize;
use tsp_core::{Cost, TspError, TspResult};

/// Direction of a reduction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Maps (line, offset) to (row, col) for this axis.
    #[inline(always)]
    fn cell(self, line: usize, offset: usize) -> (usize, usize) {
        match self {
            Axis::Row => (line, offset),
            Axis::Column => (offset, line),
        }
    }

    fn context(self) -> &'static str {
        match self {
            Axis::Row => "reducing rows",
            Axis::Column => "reducing columns",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "Row"),
            Axis::Column => write!(f, "Column"),
        }
    }
}

/// Outcome of one reduction pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reduction<T> {
    pub axis: Axis,
    /// The matrix after subtraction.
    pub matrix: CostMatrix<T>,
    /// Minimum of each line in index order; zero for lines without eligible entries.
    pub minimums: Vec<T>,
    /// Sum of the positive minimums.
    pub cost: T,
}

/// Subtracts each row's minimum from that row.
#[inline]
pub fn reduce_rows<T>(matrix: &CostMatrix<T>) -> TspResult<Reduction<T>>
where
    T: Cost,
{
    reduce(matrix, Axis::Row)
}

/// Subtracts each column's minimum from that column.
#[inline]
pub fn reduce_columns<T>(matrix: &CostMatrix<T>) -> TspResult<Reduction<T>>
where
    T: Cost,
{
    reduce(matrix, Axis::Column)
}

fn line_minimum<T>(matrix: &CostMatrix<T>, axis: Axis, line: usize) -> Option<T>
where
    T: Cost,
{
    (0..matrix.num_cities())
        .map(|offset| axis.cell(line, offset))
        .filter(|&(row, col)| row != col)
        .filter_map(|(row, col)| matrix.get(row, col))
        .fold(None, |min, value| match min {
            Some(m) if m <= value => Some(m),
            _ => Some(value),
        })
}

fn reduce<T>(matrix: &CostMatrix<T>, axis: Axis) -> TspResult<Reduction<T>>
where
    T: Cost,
{
    let n = matrix.num_cities();
    let mut reduced = matrix.clone();
    let mut minimums = Vec::with_capacity(n);
    let mut cost = T::zero();

    for line in 0..n {
        let min = line_minimum(&reduced, axis, line).unwrap_or_else(T::zero);
        if min > T::zero() {
            for offset in 0..n {
                let (row, col) = axis.cell(line, offset);
                if row == col {
                    continue;
                }
                if let Some(value) = reduced.get(row, col) {
                    let value = value
                        .checked_sub_cost(min)
                        .ok_or_else(|| TspError::overflow(axis.context()))?;
                    reduced.set_usable(row, col, value);
                }
            }
            cost = cost
                .checked_add_cost(min)
                .ok_or_else(|| TspError::overflow(axis.context()))?;
        }
        minimums.push(min);
    }

    Ok(Reduction {
        axis,
        matrix: reduced,
        minimums,
        cost,
    })
}
