//! NSGA-III configuration.

use crate::error::{MoeaError, Result};
use crate::operators::Variation;
use crate::reference::das_dennis_count;

/// Configuration for NSGA-III.
///
/// Same parameters as [`Nsga2Config`](crate::nsga2::Nsga2Config) plus the
/// reference-point lattice density.
///
/// # Defaults
///
/// ```
/// use u_moea::nsga3::Nsga3Config;
///
/// let config = Nsga3Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.n_partitions, 12);
/// // 91 reference points for three objectives.
/// assert_eq!(config.n_reference_points(3), 91);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga3Config {
    /// Number of individuals kept between generations.
    ///
    /// Usually chosen close to the number of reference points.
    pub population_size: usize,

    /// Number of generations after the initial population.
    pub n_generations: usize,

    /// SBX and polynomial mutation parameters.
    pub variation: Variation,

    /// Divisions per objective axis of the Das–Dennis lattice.
    ///
    /// The point count is `C(n_partitions + m − 1, m − 1)` and grows
    /// combinatorially with both values.
    pub n_partitions: usize,

    /// Random seed for reproducibility. `None` uses a fresh seed.
    pub seed: Option<u64>,

    /// Whether to evaluate offspring in parallel (requires the `parallel`
    /// feature; ignored otherwise).
    pub parallel: bool,

    /// Reference point for per-generation hypervolume tracking.
    pub hypervolume_reference: Option<Vec<f64>>,
}

impl Default for Nsga3Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            n_generations: 100,
            variation: Variation::default(),
            n_partitions: 12,
            seed: None,
            parallel: false,
            hypervolume_reference: None,
        }
    }
}

impl Nsga3Config {
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

    /// Sets the number of lattice divisions.
    pub fn with_n_partitions(mut self, p: usize) -> Self {
        self.n_partitions = p;
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

    /// Number of reference points generated for `n_objectives` objectives.
    pub fn n_reference_points(&self, n_objectives: usize) -> usize {
        das_dennis_count(n_objectives, self.n_partitions)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(MoeaError::config("population_size must be at least 1"));
        }
        if self.n_partitions == 0 {
            return Err(MoeaError::config("n_partitions must be at least 1"));
        }
        self.variation.validate()
    }
}
