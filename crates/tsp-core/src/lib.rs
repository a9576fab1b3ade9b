#![deny(clippy::all)]

//! Shared types for the exact TSP solvers.
//!
//! - [`DistanceMatrix`]: validated square cost matrix, the input to every solver.
//! - [`Cost`]: numeric trait implemented for the primitive integer and float types.
//! - [`Tour`]: a closed tour starting and ending at [`START_CITY`].
//! - [`TspError`] / [`InvalidInput`]: the only failure modes.

pub mod cost;
pub mod error;
pub mod matrix;
pub mod tour;

pub use cost::Cost;
pub use error::{InvalidInput, TspError, TspResult};
pub use matrix::{DistanceMatrix, MIN_CITIES};
pub use tour::{is_well_formed_tour, Tour, START_CITY};
