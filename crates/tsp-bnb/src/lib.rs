#![deny(clippy::all)]

//! Exact TSP solver using branch and bound over reduced cost matrices.
//!
//! - `bnb`: the search, [`BranchAndBound`] and [`solve_branch_and_bound`].
//! - `incumbent`: best-known tour, optionally seeded by the caller.
//! - `trace`: append-only record of reduction steps and node decisions.
//! - `stats`: counters for explored, pruned and completed nodes.
//! - `monitor`: observation hooks and cooperative cancellation.
//! - `result`: [`BnbOutcome`] and the flattened [`BranchAndBoundSolution`].

pub mod bnb;
pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod stats;
pub mod trace;

pub use bnb::{solve_branch_and_bound, BranchAndBound};
pub use incumbent::Incumbent;
pub use monitor::composite::CompositeMonitor;
pub use monitor::interrupt::InterruptMonitor;
pub use monitor::log::LogMonitor;
pub use monitor::no_op::NoOpMonitor;
pub use monitor::search_monitor::{SearchCommand, SearchMonitor};
pub use monitor::time_limit::TimeLimitMonitor;
pub use result::{BnbOutcome, BranchAndBoundSolution, TerminationReason};
pub use stats::BnbStatistics;
pub use trace::{NodeStatus, ReductionRecord, ReductionStep, SearchTrace, TraceNode};
