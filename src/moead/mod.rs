//! MOEA/D: multi-objective evolutionary algorithm based on decomposition.
//!
//! The problem is decomposed into `population_size` scalar subproblems,
//! one per weight vector on the unit simplex. Each subproblem keeps one
//! solution and cooperates with the subproblems whose weight vectors are
//! closest to its own (its neighborhood) through mating and replacement.
//!
//! # Key Types
//!
//! - [`MoeadConfig`]: decomposition, neighborhood and replacement settings
//! - [`Moead`]: executes the generational loop
//! - [`DecompositionMethod`]: weighted sum, Tchebycheff or PBI
//!
//! # References
//!
//! - Zhang & Li (2007), "MOEA/D: A Multiobjective Evolutionary Algorithm
//!   Based on Decomposition"
//! - Li & Zhang (2009), "Multiobjective Optimization Problems With
//!   Complicated Pareto Sets, MOEA/D and NSGA-II" (δ and nr parameters)

mod config;
mod decomposition;
mod runner;

pub use config::MoeadConfig;
pub use decomposition::{neighborhoods, weight_vectors, DecompositionMethod};
pub use runner::Moead;
