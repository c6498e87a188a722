//! Subset-selection metaheuristics.
//!
//! Provides generic implementations of two search engines over problems
//! whose solutions are subsets of a finite element domain `0..n`:
//!
//! - **GRASP**: Greedy Randomized Adaptive Search Procedure with basic
//!   (threshold RCL), sampled-greedy and reactive constructive heuristics,
//!   each followed by local search.
//! - **Tabu Search (TS)**: insertion / removal / exchange trajectory search
//!   with a fixed-tenure tabu list, aspiration, sampled neighborhoods and
//!   frequency-based restart diversification.
//!
//! Problems plug in through the [`Evaluator`] trait, which supplies full
//! costs and O(1)/O(n) move deltas. Costs are minimized.
//!
//! # Architecture
//!
//! The engines share the candidate list, the move scanner and the stop
//! rules. [`qbf::Qbf`] is a ready-made evaluator for the maximum
//! (knapsack) quadratic binary function and doubles as a test instance.
//!
//! # Logging
//!
//! Runs emit [`tracing`] events (summary at `info`, incumbents and restarts
//! at `debug`, every iteration at `trace`). No subscriber is installed.

pub mod budget;
pub mod candidate;
pub mod error;
pub mod evaluator;
pub mod grasp;
pub mod local_search;
pub mod neighborhood;
pub mod qbf;
pub mod random;
pub mod solution;
pub mod tabu;

pub use budget::StopReason;
pub use candidate::CandidateList;
pub use error::{ConfigError, EvaluatorError, SearchError};
pub use evaluator::Evaluator;
pub use neighborhood::Move;
pub use solution::Solution;
