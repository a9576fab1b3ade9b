//! Monitoring and cancellation for the branch-and-bound search.
//!
//! A [`search_monitor::SearchMonitor`] observes the search lifecycle and is
//! asked before every node expansion whether to keep going. This is the
//! cooperative cancellation point: returning `Terminate` unwinds the
//! recursion and the solver reports the best tour found so far.
//!
//! Components
//! - `search_monitor`: the trait and `SearchCommand`.
//! - `no_op`: does nothing; the default.
//! - `interrupt`: stops when a shared `AtomicBool` is raised.
//! - `time_limit`: stops after a wall-clock budget.
//! - `log`: periodic progress through the `log` facade.
//! - `composite`: fan-out; the first non-`Continue` command wins.

pub mod composite;
pub mod interrupt;
pub mod log;
pub mod no_op;
pub mod search_monitor;
pub mod time_limit;
