use crate::cost::Cost;
use crate::error::{InvalidInput, TspError, TspResult};
use serde::{Deserialize, Serialize};

/// Smallest instance the solvers accept.
pub const MIN_CITIES: usize = 3;

/// A validated, square, non-negative cost matrix over cities `0..n`.
///
/// Stored row-major in a single flat buffer. Symmetry is not required;
/// `cost(i, j)` is the cost of travelling from `i` to `j`. Diagonal entries
/// are kept as given but never enter a cost sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<T>>",
    into = "Vec<Vec<T>>",
    bound(serialize = "T: Cost + Serialize", deserialize = "T: Cost + Deserialize<'de>")
)]
pub struct DistanceMatrix<T> {
    num_cities: usize,
    costs: Vec<T>,
}

impl<T> DistanceMatrix<T>
where
    T: Cost,
{
    /// Validates the nested rows and builds the matrix.
    ///
    /// Fails with [`InvalidInput`] when there are fewer than [`MIN_CITIES`]
    /// rows, a row length differs from the row count, or any entry is
    /// negative or non-finite.
    pub fn new(rows: Vec<Vec<T>>) -> TspResult<Self> {
        let n = rows.len();
        if n < MIN_CITIES {
            return Err(InvalidInput::TooFewCities {
                got: n,
                min: MIN_CITIES,
            }
            .into());
        }

        let mut costs = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(InvalidInput::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                }
                .into());
            }
            for (col, value) in values.into_iter().enumerate() {
                check_entry(row, col, value)?;
                costs.push(value);
            }
        }

        Ok(Self {
            num_cities: n,
            costs,
        })
    }

    /// Builds an `n x n` matrix from a cost function, validating every entry.
    pub fn from_fn<F>(n: usize, mut f: F) -> TspResult<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| f(i, j)).collect())
            .collect();
        Self::new(rows)
    }

    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Cost of the edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> T {
        assert!(
            from < self.num_cities && to < self.num_cities,
            "called `DistanceMatrix::cost` with ({from}, {to}) on a {n}-city matrix",
            n = self.num_cities
        );
        self.costs[from * self.num_cities + to]
    }

    #[inline]
    pub fn row(&self, city: usize) -> &[T] {
        let n = self.num_cities;
        &self.costs[city * n..(city + 1) * n]
    }

    /// Iterates over the rows in city order.
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.costs.chunks_exact(self.num_cities)
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Sum of consecutive edge costs along `path`. An open path is summed as
    /// given; pass a path ending in its start city for a closed tour.
    pub fn path_cost(&self, path: &[usize]) -> TspResult<T> {
        T::checked_sum(path.windows(2).map(|w| self.cost(w[0], w[1])))
            .ok_or_else(|| TspError::overflow("summing path cost"))
    }
}

fn check_entry<T>(row: usize, col: usize, value: T) -> TspResult<()>
where
    T: Cost,
{
    if value.is_valid_cost() {
        return Ok(());
    }
    let err = if value.is_finite_cost() {
        InvalidInput::NegativeCost {
            row,
            col,
            value: value.to_string(),
        }
    } else {
        InvalidInput::NonFiniteCost {
            row,
            col,
            value: value.to_string(),
        }
    };
    Err(err.into())
}

impl<T> TryFrom<Vec<Vec<T>>> for DistanceMatrix<T>
where
    T: Cost,
{
    type Error = TspError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl<T> From<DistanceMatrix<T>> for Vec<Vec<T>>
where
    T: Cost,
{
    fn from(matrix: DistanceMatrix<T>) -> Self {
        matrix.to_rows()
    }
}
