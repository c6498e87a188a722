//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic over subsets. Each iteration
//! applies the best removal, exchange or insertion whose elements are not
//! tabu; the tabu list remembers recently moved elements so the search
//! cannot immediately undo its own moves.
//!
//! Optional extensions:
//!
//! - sampled neighborhoods ([`TabuConfig::sampled`])
//! - frequency-based restarts ([`TabuConfig::with_restart_every`])
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod diversify;
mod runner;
mod tabu_list;

pub use config::TabuConfig;
pub use diversify::{diversified_restart, FrequencyMemory};
pub use runner::{TabuResult, TabuRunner, TabuStep};
pub use tabu_list::TabuList;
