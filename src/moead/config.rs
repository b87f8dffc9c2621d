//! MOEA/D configuration.

use super::decomposition::DecompositionMethod;
use crate::error::{MoeaError, Result};
use crate::operators::Variation;

/// Configuration for MOEA/D.
///
/// `population_size` is also the number of weight vectors (one subproblem
/// per individual).
///
/// # Defaults
///
/// ```
/// use u_moea::moead::{DecompositionMethod, MoeadConfig};
///
/// let config = MoeadConfig::default();
/// assert_eq!(config.decomposition, DecompositionMethod::Tchebycheff);
/// assert_eq!(config.n_neighbors, 20);
/// assert_eq!(config.max_replacements, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoeadConfig {
    /// Number of subproblems (weight vectors) and individuals.
    pub population_size: usize,

    /// Number of generations after the initial population. One generation
    /// visits every subproblem once.
    pub n_generations: usize,

    /// SBX and polynomial mutation parameters.
    pub variation: Variation,

    /// Scalarizing function.
    pub decomposition: DecompositionMethod,

    /// Neighborhood size T, including the subproblem itself. Clamped to
    /// `population_size`.
    pub n_neighbors: usize,

    /// Probability of mating and replacing within the neighborhood rather
    /// than the whole population (δ).
    pub neighbor_selection_prob: f64,

    /// Maximum number of solutions one offspring may replace (nr).
    pub max_replacements: usize,

    /// PBI penalty θ. Only used with [`DecompositionMethod::Pbi`].
    pub pbi_theta: f64,

    /// Random seed for reproducibility. `None` uses a fresh seed.
    pub seed: Option<u64>,

    /// Whether to evaluate the initial population in parallel (requires
    /// the `parallel` feature). Offspring are evaluated one at a time
    /// because each replacement feeds the next subproblem.
    pub parallel: bool,

    /// Reference point for per-generation hypervolume tracking.
    pub hypervolume_reference: Option<Vec<f64>>,
}

impl Default for MoeadConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            n_generations: 100,
            variation: Variation::default(),
            decomposition: DecompositionMethod::default(),
            n_neighbors: 20,
            neighbor_selection_prob: 0.9,
            max_replacements: 2,
            pbi_theta: 5.0,
            seed: None,
            parallel: false,
            hypervolume_reference: None,
        }
    }
}

impl MoeadConfig {
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

    /// Sets the scalarizing function.
    pub fn with_decomposition(mut self, method: DecompositionMethod) -> Self {
        self.decomposition = method;
        self
    }

    /// Sets the neighborhood size.
    pub fn with_n_neighbors(mut self, t: usize) -> Self {
        self.n_neighbors = t;
        self
    }

    /// Sets the neighborhood mating probability.
    pub fn with_neighbor_selection_prob(mut self, p: f64) -> Self {
        self.neighbor_selection_prob = p;
        self
    }

    /// Sets the replacement cap.
    pub fn with_max_replacements(mut self, nr: usize) -> Self {
        self.max_replacements = nr;
        self
    }

    /// Sets the PBI penalty.
    pub fn with_pbi_theta(mut self, theta: f64) -> Self {
        self.pbi_theta = theta;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation of the initial population.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Records the hypervolume of the non-dominated members w.r.t.
    /// `reference` every generation.
    pub fn with_hypervolume_reference(mut self, reference: Vec<f64>) -> Self {
        self.hypervolume_reference = Some(reference);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(MoeaError::config("population_size must be at least 1"));
        }
        if self.n_neighbors == 0 {
            return Err(MoeaError::config("n_neighbors must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.neighbor_selection_prob) {
            return Err(MoeaError::config(format!(
                "neighbor_selection_prob must be in [0, 1], got {}",
                self.neighbor_selection_prob
            )));
        }
        if self.max_replacements == 0 {
            return Err(MoeaError::config("max_replacements must be at least 1"));
        }
        if !(self.pbi_theta >= 0.0 && self.pbi_theta.is_finite()) {
            return Err(MoeaError::config(format!(
                "pbi_theta must be non-negative and finite, got {}",
                self.pbi_theta
            )));
        }
        self.variation.validate()
    }
}
