//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! A multi-start metaheuristic: each iteration builds a solution with a
//! greedy randomized construction, improves it by local search, and keeps
//! the best result seen.
//!
//! # Construction
//!
//! - [`ConstructiveHeuristic::Basic`]: threshold RCL controlled by `alpha`
//! - [`ConstructiveHeuristic::SampledGreedy`]: best of a random sample
//! - [`ConstructiveHeuristic::Reactive`]: `alpha` drawn from an adaptive
//!   distribution ([`AlphaMemory`])
//!
//! # References
//!
//! - Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive Search
//!   Procedures", *Journal of Global Optimization* 6, 109-133.
//! - Resende, M. G. C. & Werneck, R. F. (2004). "A hybrid heuristic for the
//!   p-median problem", *Journal of Heuristics* 10, 59-88 (sampled greedy).

mod config;
mod construct;
mod reactive;
mod runner;
mod types;

pub use config::GraspConfig;
pub use construct::{construct_sampled, construct_threshold};
pub use reactive::AlphaMemory;
pub use runner::{GraspResult, GraspRunner};
pub use types::ConstructiveHeuristic;
