#![deny(clippy::all)]

//! Lower bounds for the TSP via cost-matrix reduction.
//!
//! - `working`: the per-branch [`CostMatrix`] with unusable cells.
//! - `reduce`: [`reduce_rows`] / [`reduce_columns`].
//! - `bound`: [`root_bound`] / [`branch_bound`], the admissible bound of a node.

pub mod bound;
pub mod reduce;
pub mod working;

pub use bound::{branch_bound, root_bound, NodeBound};
pub use reduce::{reduce_columns, reduce_rows, Axis, Reduction};
pub use working::CostMatrix;
