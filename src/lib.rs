//! Multi-objective evolutionary optimization.
//!
//! Searches for the set of Pareto-optimal trade-offs of a problem with
//! several conflicting objectives (all minimized) over box-bounded
//! real-valued decision variables.
//!
//! - **NSGA-II** ([`nsga2`]): non-dominated sorting with crowding distance.
//! - **NSGA-III** ([`nsga3`]): non-dominated sorting with reference-point
//!   niching, for many objectives.
//! - **MOEA/D** ([`moead`]): decomposition into scalar subproblems solved
//!   cooperatively by neighborhoods.
//! - **Quality indicators** ([`indicators`]): hypervolume, GD, IGD,
//!   spread, multiplicative ε and spacing.
//!
//! All three optimizers share the [`Problem`] definition, the SBX and
//! polynomial mutation [`operators`], and the [`pareto`] primitives, and
//! return a [`MoeaResult`] whose `front` is a [`ParetoFront`].
//!
//! # Example
//!
//! ```
//! use u_moea::nsga2::{Nsga2, Nsga2Config};
//! use u_moea::Problem;
//!
//! let problem = Problem::builder(vec![0.0], vec![2.0])
//!     .objective(|x| x[0] * x[0])
//!     .objective(|x| (x[0] - 2.0).powi(2))
//!     .build()
//!     .unwrap();
//!
//! let config = Nsga2Config::default()
//!     .with_population_size(40)
//!     .with_n_generations(50)
//!     .with_seed(42);
//! let result = Nsga2::optimize(&problem, &config).unwrap();
//!
//! for solution in &result.front {
//!     println!("{:?} -> {:?}", solution.variables(), solution.objectives());
//! }
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-backed objective evaluation when a config sets
//!   `parallel = true`. Results are identical to serial runs.
//! - `serde`: `Serialize`/`Deserialize` for configurations and reports.
//!
//! # Logging
//!
//! Runs emit `tracing` events (run start and finish at `info`, one event
//! per generation at `debug`). No subscriber is installed.

pub mod algorithm;
pub mod error;
pub mod evaluation;
pub mod indicators;
pub mod moead;
pub mod nsga2;
pub mod nsga3;
pub mod operators;
pub mod pareto;
pub mod problem;
pub mod problems;
pub mod reference;
pub mod solution;

pub use algorithm::Algorithm;
pub use error::{MoeaError, ObjectiveError, Result};
pub use evaluation::{GenerationStats, MoeaResult};
pub use indicators::{MetricsReport, PerformanceMetrics};
pub use moead::{DecompositionMethod, Moead, MoeadConfig};
pub use nsga2::{Nsga2, Nsga2Config};
pub use nsga3::{Nsga3, Nsga3Config};
pub use operators::Variation;
pub use pareto::ParetoFront;
pub use problem::{Problem, ProblemBuilder};
pub use solution::{ReferenceAssociation, Solution};
