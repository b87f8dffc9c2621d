//! Pareto dominance, non-dominated sorting, crowding distance and the
//! self-maintaining non-dominated archive.
//!
//! All objectives are **minimized**.
//!
//! # Submodules
//!
//! - [`dominates`], [`non_dominated_sort`], [`fast_non_dominated_sort`]:
//!   dominance test and front peeling (Deb et al., 2002)
//! - [`crowding_distance`], [`assign_crowding_distance`]: NSGA-II density
//! - [`ParetoFront`]: archive of mutually non-dominated solutions
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod crowding;
mod dominance;
mod front;

pub use crowding::{assign_crowding_distance, crowding_distance};
pub use dominance::{
    constrained_dominates, dominates, fast_non_dominated_sort, non_dominated_sort,
    NondominatedSortResult,
};
pub use front::ParetoFront;

pub(crate) use dominance::{dominance_cmp, Dominance};
