//! Algorithm selection as a closed set of variants.

use crate::error::Result;
use crate::evaluation::MoeaResult;
use crate::moead::{Moead, MoeadConfig};
use crate::nsga2::{Nsga2, Nsga2Config};
use crate::nsga3::{Nsga3, Nsga3Config};
use crate::problem::Problem;

/// One of the available optimizers together with its configuration.
///
/// ```
/// use u_moea::nsga2::Nsga2Config;
/// use u_moea::{problems, Algorithm};
///
/// let problem = problems::schaffer_n1().unwrap();
/// let algorithm = Algorithm::Nsga2(
///     Nsga2Config::default().with_population_size(20).with_n_generations(10).with_seed(1),
/// );
/// let result = algorithm.optimize(&problem).unwrap();
/// assert_eq!(algorithm.name(), "NSGA-II");
/// assert!(!result.front.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Nsga2(Nsga2Config),
    Nsga3(Nsga3Config),
    Moead(MoeadConfig),
}

impl Algorithm {
    /// Runs the selected optimizer on `problem`.
    pub fn optimize(&self, problem: &Problem) -> Result<MoeaResult> {
        match self {
            Self::Nsga2(config) => Nsga2::optimize(problem, config),
            Self::Nsga3(config) => Nsga3::optimize(problem, config),
            Self::Moead(config) => Moead::optimize(problem, config),
        }
    }

    /// Display name of the optimizer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nsga2(_) => "NSGA-II",
            Self::Nsga3(_) => "NSGA-III",
            Self::Moead(_) => "MOEA/D",
        }
    }

    /// Validates the wrapped configuration.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Nsga2(config) => config.validate(),
            Self::Nsga3(config) => config.validate(),
            Self::Moead(config) => config.validate(),
        }
    }
}
