//! Working cost matrix used while branching.
//!
//! Each cell is `Option<T>`: `None` marks an edge excluded from the current
//! branch (an already-used row or column, or the early return to the start
//! city). An unusable cell never takes part in a minimum or a subtraction.
//! Branches own their copy; nothing is shared between siblings.

use serde::{Serialize, Serializer};
use tsp_core::{Cost, DistanceMatrix, InvalidInput, TspResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<T> {
    num_cities: usize,
    cells: Vec<Option<T>>,
}

impl<T> CostMatrix<T>
where
    T: Cost,
{
    /// Copies the distances; every cell starts out usable.
    pub fn from_distances(distances: &DistanceMatrix<T>) -> Self {
        Self {
            num_cities: distances.num_cities(),
            cells: distances.rows().flatten().copied().map(Some).collect(),
        }
    }

    /// Builds a matrix from nested rows where `None` marks an unusable cell.
    /// Panics if `rows` is not square.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<Option<T>>>) -> Self {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            assert_eq!(row.len(), n, "called `CostMatrix::from_rows` with a ragged row");
            cells.extend(row);
        }
        Self {
            num_cities: n,
            cells,
        }
    }

    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.num_cities && col < self.num_cities);
        row * self.num_cities + col
    }

    /// The cell value, or `None` if the edge is unusable.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn is_usable(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Like [`CostMatrix::get`], but an unusable edge is an error.
    pub fn edge(&self, from: usize, to: usize) -> TspResult<T> {
        self.get(from, to)
            .ok_or_else(|| InvalidInput::UnusableEdge { from, to }.into())
    }

    /// Overwrites a usable cell. Unusable cells stay unusable.
    #[inline]
    pub(crate) fn set_usable(&mut self, row: usize, col: usize, value: T) {
        let idx = self.index(row, col);
        if let Some(cell) = self.cells[idx].as_mut() {
            *cell = value;
        }
    }

    #[inline]
    pub fn mark_unusable(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = None;
    }

    pub fn mark_row_unusable(&mut self, row: usize) {
        let n = self.num_cities;
        self.cells[row * n..(row + 1) * n].fill(None);
    }

    pub fn mark_column_unusable(&mut self, col: usize) {
        let n = self.num_cities;
        for row in 0..n {
            self.cells[row * n + col] = None;
        }
    }

    /// Copy of `self` prepared for the branch that takes edge `from -> to`:
    /// row `from` and column `to` become unusable, and so does `to -> start`
    /// when `start` is given (i.e. when `to` is not the last city of the tour).
    pub fn branch_on(&self, from: usize, to: usize, start: Option<usize>) -> Self {
        let mut branch = self.clone();
        branch.mark_row_unusable(from);
        branch.mark_column_unusable(to);
        if let Some(start) = start {
            branch.mark_unusable(to, start);
        }
        branch
    }

    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &[Option<T>]> + '_ {
        self.cells.chunks_exact(self.num_cities)
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<T>>> {
        self.rows().map(<[Option<T>]>::to_vec).collect()
    }
}

impl<T> Serialize for CostMatrix<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.cells.chunks_exact(self.num_cities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::TspError;

    fn three() -> CostMatrix<u32> {
        let d = DistanceMatrix::new(vec![vec![0, 1, 2], vec![3, 0, 4], vec![5, 6, 0]]).unwrap();
        CostMatrix::from_distances(&d)
    }

    #[test]
    #[should_panic(expected = "ragged row")]
    fn test_from_rows_rejects_ragged_input() {
        CostMatrix::<u32>::from_rows(vec![vec![None, Some(1)], vec![Some(2)]]);
    }

    #[test]
    fn test_from_distances_is_fully_usable() {
        let m = three();
        assert_eq!(m.num_cities(), 3);
        assert_eq!(m.get(1, 2), Some(4));
        assert!((0..3).all(|r| (0..3).all(|c| m.is_usable(r, c))));
    }

    #[test]
    fn test_branch_on_marks_row_column_and_return() {
        let m = three();
        let b = m.branch_on(0, 1, Some(0));
        assert_eq!(
            b.to_rows(),
            vec![
                vec![None, None, None],
                vec![None, None, Some(4)],
                vec![Some(5), None, Some(0)],
            ]
        );
        // parent untouched
        assert_eq!(m.get(0, 1), Some(1));

        let last = m.branch_on(0, 1, None);
        assert_eq!(last.get(1, 0), Some(3));
    }

    #[test]
    fn test_edge_reports_unusable() {
        let mut m = three();
        m.mark_unusable(2, 1);
        assert_eq!(m.edge(2, 0).unwrap(), 5);
        assert_eq!(
            m.edge(2, 1).unwrap_err(),
            TspError::InvalidInput(InvalidInput::UnusableEdge { from: 2, to: 1 })
        );
    }

    #[test]
    fn test_set_usable_ignores_unusable() {
        let mut m = three();
        m.mark_unusable(0, 2);
        m.set_usable(0, 2, 9);
        m.set_usable(0, 1, 7);
        assert_eq!(m.get(0, 2), None);
        assert_eq!(m.get(0, 1), Some(7));
    }

    #[test]
    fn test_serializes_unusable_as_null() {
        let mut m = three();
        m.mark_row_unusable(1);
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            "[[0,1,2],[null,null,null],[5,6,0]]"
        );
    }
}
