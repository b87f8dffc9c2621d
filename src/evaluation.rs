//! Shared run plumbing: seeded generators, batch evaluation and the
//! result types every optimizer returns.

use crate::error::{MoeaError, Result};
use crate::indicators::hypervolume;
use crate::pareto::ParetoFront;
use crate::problem::Problem;
use crate::solution::Solution;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Creates the run's generator. `None` draws a fresh seed from entropy.
pub(crate) fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

/// Evaluates a batch of decision vectors.
///
/// All random draws must already have happened: this function consumes no
/// randomness, so the result is the same whether or not it runs in
/// parallel. Any failure aborts the whole batch.
pub(crate) fn evaluate_batch(
    problem: &Problem,
    candidates: Vec<Vec<f64>>,
    generation: usize,
    parallel: bool,
) -> Result<Vec<Solution>> {
    if parallel {
        return evaluate_parallel(problem, candidates, generation);
    }
    evaluate_serial(problem, candidates, generation)
}

fn evaluate_serial(
    problem: &Problem,
    candidates: Vec<Vec<f64>>,
    generation: usize,
) -> Result<Vec<Solution>> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, x)| problem.create_solution(x, generation, index))
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(
    problem: &Problem,
    candidates: Vec<Vec<f64>>,
    generation: usize,
) -> Result<Vec<Solution>> {
    candidates
        .into_par_iter()
        .enumerate()
        .map(|(index, x)| problem.create_solution(x, generation, index))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(
    problem: &Problem,
    candidates: Vec<Vec<f64>>,
    generation: usize,
) -> Result<Vec<Solution>> {
    evaluate_serial(problem, candidates, generation)
}

/// Per-generation diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number (0 = initial population).
    pub generation: usize,

    /// Number of rank-0 solutions in the population.
    pub front_size: usize,

    /// Component-wise minimum objective values seen in the population.
    pub ideal_point: Vec<f64>,

    /// Hypervolume of the rank-0 set, when a reference point is configured.
    pub hypervolume: Option<f64>,
}

impl GenerationStats {
    /// Summarizes a ranked population (ranks must be current).
    pub(crate) fn from_population(
        generation: usize,
        population: &[Solution],
        reference: Option<&[f64]>,
    ) -> Self {
        let front: Vec<Vec<f64>> = population
            .iter()
            .filter(|s| s.rank() == 0)
            .map(|s| s.objectives().to_vec())
            .collect();
        Self {
            generation,
            front_size: front.len(),
            ideal_point: ideal_point(population),
            hypervolume: reference.map(|r| hypervolume(&front, r)),
        }
    }
}

/// Checks that a hypervolume reference point matches the objective count.
pub(crate) fn check_reference_point(reference: Option<&[f64]>, problem: &Problem) -> Result<()> {
    match reference {
        Some(r) if r.len() != problem.n_objectives() => Err(MoeaError::config(format!(
            "hypervolume reference has {} components but the problem has {} objectives",
            r.len(),
            problem.n_objectives()
        ))),
        _ => Ok(()),
    }
}

/// Component-wise minimum of the population's objectives.
pub(crate) fn ideal_point(population: &[Solution]) -> Vec<f64> {
    let m = population.first().map_or(0, |s| s.n_objectives());
    let mut ideal = vec![f64::INFINITY; m];
    for s in population {
        for (z, &f) in ideal.iter_mut().zip(s.objectives()) {
            if f < *z {
                *z = f;
            }
        }
    }
    ideal
}

/// Result of an optimizer run.
#[derive(Debug, Clone)]
pub struct MoeaResult {
    /// Non-dominated solutions found.
    pub front: ParetoFront,

    /// Final population, with ranking metadata from the last generation.
    pub population: Vec<Solution>,

    /// Number of generations executed.
    pub generations: usize,

    /// Number of objective-vector evaluations performed.
    pub evaluations: usize,

    /// Diagnostics, one entry per generation including generation 0.
    pub history: Vec<GenerationStats>,
}

impl MoeaResult {
    /// Hypervolume trace from the history (empty when not tracked).
    pub fn hypervolume_history(&self) -> Vec<f64> {
        self.history.iter().filter_map(|h| h.hypervolume).collect()
    }
}
