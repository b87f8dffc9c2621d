//! NSGA-II configuration.

use crate::error::{MoeaError, Result};
use crate::operators::Variation;

/// Configuration for NSGA-II.
///
/// # Defaults
///
/// ```
/// use u_moea::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.n_generations, 100);
/// assert_eq!(config.variation.eta_crossover, 15.0);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default()
///     .with_population_size(40)
///     .with_n_generations(250)
///     .with_crossover_prob(1.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Number of individuals kept between generations.
    ///
    /// Each generation produces the same number of offspring, so the
    /// sorted pool holds `2 * population_size` solutions.
    pub population_size: usize,

    /// Number of generations after the initial population.
    pub n_generations: usize,

    /// SBX and polynomial mutation parameters.
    pub variation: Variation,

    /// Random seed for reproducibility. `None` uses a fresh seed.
    pub seed: Option<u64>,

    /// Whether to evaluate offspring in parallel (requires the `parallel`
    /// feature; ignored otherwise).
    pub parallel: bool,

    /// Reference point for per-generation hypervolume tracking.
    pub hypervolume_reference: Option<Vec<f64>>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            n_generations: 100,
            variation: Variation::default(),
            seed: None,
            parallel: false,
            hypervolume_reference: None,
        }
    }
}

impl Nsga2Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_n_generations(mut self, n: usize) -> Self {
        self.n_generations = n;
        self
    }

    /// Replaces all variation parameters.
    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    /// Sets the SBX crossover probability.
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.variation.crossover_prob = p;
        self
    }

    /// Sets the per-variable mutation probability.
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.variation.mutation_prob = Some(p);
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_eta_crossover(mut self, eta: f64) -> Self {
        self.variation.eta_crossover = eta;
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_eta_mutation(mut self, eta: f64) -> Self {
        self.variation.eta_mutation = eta;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Records the hypervolume of the rank-0 set w.r.t. `reference` every
    /// generation.
    pub fn with_hypervolume_reference(mut self, reference: Vec<f64>) -> Self {
        self.hypervolume_reference = Some(reference);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(MoeaError::config("population_size must be at least 1"));
        }
        self.variation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Nsga2Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_population_rejected() {
        let err = Nsga2Config::default()
            .with_population_size(0)
            .validate()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_bad_variation_rejected() {
        assert!(Nsga2Config::default()
            .with_crossover_prob(1.5)
            .validate()
            .is_err());
        assert!(Nsga2Config::default()
            .with_eta_mutation(0.0)
            .validate()
            .is_err());
    }
}
