//! NSGA-II: elitist non-dominated sorting genetic algorithm.
//!
//! Parents are picked by crowded binary tournament, offspring are produced
//! by SBX and polynomial mutation, and the merged parent+offspring pool is
//! truncated front by front, breaking the last front by crowding
//! distance.
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: population, generations, operator parameters
//! - [`Nsga2`]: executes the generational loop
//!
//! # Complexity
//!
//! O(G · m · N²) for G generations, m objectives and population N
//! (dominated by non-dominated sorting of the 2N pool).
//!
//! # References
//!
//! - Deb, Pratap, Agarwal & Meyarivan (2002), "A Fast and Elitist
//!   Multiobjective Genetic Algorithm: NSGA-II"

mod config;
mod runner;
mod selection;

pub use config::Nsga2Config;
pub use runner::Nsga2;
pub use selection::crowded_tournament;

pub(crate) use runner::{initial_population, make_offspring, rank_and_crowd, take_indices};
