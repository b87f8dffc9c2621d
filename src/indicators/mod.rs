//! Quality indicators for Pareto front approximations.
//!
//! - Convergence: [`calculate_gd`], [`calculate_igd`], [`calculate_epsilon_indicator`]
//! - Distribution: [`calculate_spread`], [`calculate_spacing`]
//! - Combined: [`hypervolume`]
//! - [`PerformanceMetrics`]: all of the above in one [`MetricsReport`]
//!
//! # References
//!
//! - Van Veldhuizen & Lamont (1998), "Evolutionary Computation and Convergence to a Pareto Front"
//! - Zitzler et al. (2003), "Performance Assessment of Multiobjective Optimizers"
//! - Schott (1995), "Fault Tolerant Design Using Single and Multicriteria Genetic Algorithm Optimization"
//! - Zhou et al. (2006), "Combining Model-based and Genetics-based Offspring Generation"

mod distance;
mod hypervolume;
mod metrics;

pub use distance::{
    calculate_epsilon_indicator, calculate_gd, calculate_igd, calculate_spacing, calculate_spread,
};
pub use hypervolume::hypervolume;
pub use metrics::{MetricsReport, PerformanceMetrics};
