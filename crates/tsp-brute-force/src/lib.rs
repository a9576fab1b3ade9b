#![deny(clippy::all)]

//! Exhaustive TSP enumeration.
//!
//! City 0 is fixed as the start; every permutation of the remaining `n - 1`
//! cities is closed into a tour and priced. Permutations are produced in
//! lexicographic order, and among equal-cost tours the first one found is
//! kept. The cost is factorial in `n`, so this is a correctness oracle for
//! the branch-and-bound solver, not a production algorithm.

use serde::Serialize;
use tsp_core::{Cost, DistanceMatrix, Tour, TspError, TspResult, START_CITY};

/// Result of an exhaustive search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BruteForceSolution<T> {
    pub best_path: Vec<usize>,
    pub min_cost: T,
    /// Tried tours in enumeration order, truncated to the retention limit.
    pub all_paths: Vec<Tour<T>>,
    /// Number of tours priced, regardless of retention.
    pub total_paths: u64,
    /// Number of complete permutations visited.
    pub iterations: u64,
}

impl<T> BruteForceSolution<T>
where
    T: Cost,
{
    /// Cheapest retained tour whose path starts with `prefix`.
    ///
    /// Only meaningful when nothing was dropped by the retention limit.
    pub fn min_cost_with_prefix(&self, prefix: &[usize]) -> Option<T> {
        self.all_paths
            .iter()
            .filter(|tour| tour.path.starts_with(prefix))
            .map(|tour| tour.cost)
            .fold(None, |min, cost| match min {
                Some(m) if m <= cost => Some(m),
                _ => Some(cost),
            })
    }

    /// `true` if every priced tour is also in `all_paths`.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.all_paths.len() as u64 == self.total_paths
    }
}

/// Exhaustive solver with an optional cap on retained tours.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce {
    retention: Option<usize>,
}

impl BruteForce {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` tried tours in [`BruteForceSolution::all_paths`].
    /// The minimum and the counters still cover every tour.
    #[inline]
    pub fn with_retention(mut self, limit: usize) -> Self {
        self.retention = Some(limit);
        self
    }

    pub fn solve<T>(&self, matrix: &DistanceMatrix<T>) -> TspResult<BruteForceSolution<T>>
    where
        T: Cost,
    {
        let n = matrix.num_cities();
        let mut ctx = EnumerationContext {
            matrix,
            retention: self.retention,
            best: None,
            all_paths: Vec::new(),
            total_paths: 0,
        };

        let mut path = Vec::with_capacity(n + 1);
        path.push(START_CITY);
        let mut visited = vec![false; n];
        visited[START_CITY] = true;

        permute(&mut ctx, &mut path, &mut visited, T::zero())?;

        let EnumerationContext {
            best,
            all_paths,
            total_paths,
            ..
        } = ctx;
        let best = best.ok_or(TspError::NoTourFound)?;

        log::debug!(
            "brute force: {total_paths} tours priced, minimum {} via {:?}",
            best.cost,
            best.path
        );

        Ok(BruteForceSolution {
            best_path: best.path,
            min_cost: best.cost,
            all_paths,
            total_paths,
            iterations: total_paths,
        })
    }
}

/// Runs [`BruteForce`] with every tried tour retained.
#[inline]
pub fn solve_brute_force<T>(matrix: &DistanceMatrix<T>) -> TspResult<BruteForceSolution<T>>
where
    T: Cost,
{
    BruteForce::new().solve(matrix)
}

struct EnumerationContext<'a, T> {
    matrix: &'a DistanceMatrix<T>,
    retention: Option<usize>,
    best: Option<Tour<T>>,
    all_paths: Vec<Tour<T>>,
    total_paths: u64,
}

fn permute<T>(
    ctx: &mut EnumerationContext<'_, T>,
    path: &mut Vec<usize>,
    visited: &mut [bool],
    cost: T,
) -> TspResult<()>
where
    T: Cost,
{
    let n = visited.len();
    let last = path[path.len() - 1];

    if path.len() == n {
        let total = cost
            .checked_add_cost(ctx.matrix.cost(last, START_CITY))
            .ok_or_else(|| TspError::overflow("pricing a tour"))?;
        path.push(START_CITY);
        ctx.total_paths = ctx.total_paths.saturating_add(1);

        let improves = ctx.best.as_ref().is_none_or(|best| total < best.cost);
        let retain = ctx.retention.is_none_or(|limit| ctx.all_paths.len() < limit);
        if improves || retain {
            let tour = Tour::new(path.clone(), total);
            if retain {
                ctx.all_paths.push(tour.clone());
            }
            if improves {
                ctx.best = Some(tour);
            }
        }

        path.pop();
        return Ok(());
    }

    for city in 0..n {
        if visited[city] {
            continue;
        }
        let next = cost
            .checked_add_cost(ctx.matrix.cost(last, city))
            .ok_or_else(|| TspError::overflow("pricing a tour"))?;

        visited[city] = true;
        path.push(city);
        permute(ctx, path, visited, next)?;
        path.pop();
        visited[city] = false;
    }

    Ok(())
}
