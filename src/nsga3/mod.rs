//! NSGA-III: reference-point based many-objective optimization.
//!
//! Shares the generational skeleton of [`nsga2`](crate::nsga2) but
//! replaces crowding distance with reference-point niching, which keeps
//! its selection pressure as the number of objectives grows:
//!
//! 1. Das–Dennis reference points on the unit simplex (once per run)
//! 2. Per generation: normalize objectives by the ideal point and the
//!    extreme-point hyperplane
//! 3. Associate each candidate with its nearest reference direction
//! 4. Fill the last partial front from the least crowded niches
//!
//! See [`reference`](crate::reference) for the building blocks.
//!
//! # References
//!
//! - Deb & Jain (2014), "An Evolutionary Many-Objective Optimization
//!   Algorithm Using Reference-Point-Based Nondominated Sorting Approach,
//!   Part I: Solving Problems With Box Constraints"

mod config;
mod runner;

pub use config::Nsga3Config;
pub use runner::Nsga3;
