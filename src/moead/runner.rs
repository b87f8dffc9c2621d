//! MOEA/D generational loop.

use super::config::MoeadConfig;
use super::decomposition::{neighborhoods, weight_vectors};
use crate::error::Result;
use crate::evaluation::{check_reference_point, create_rng, ideal_point, GenerationStats, MoeaResult};
use crate::nsga2::{initial_population, rank_and_crowd};
use crate::pareto::ParetoFront;
use crate::problem::Problem;
use crate::solution::Solution;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

/// Executes MOEA/D.
///
/// Each generation visits the subproblems in order. For subproblem `i`:
///
/// 1. With probability δ the mating and replacement pool is its
///    neighborhood, otherwise the whole population
/// 2. Two distinct mates from the pool produce one child (SBX + mutation)
/// 3. The child is evaluated and the ideal point updated
/// 4. The child replaces at most `max_replacements` pool members (in
///    random order) whose scalarized value it strictly improves
///
/// Under constraints a lower violation always wins before scalarized
/// values are compared.
///
/// ```
/// use u_moea::moead::{DecompositionMethod, Moead, MoeadConfig};
/// use u_moea::problems::zdt1;
///
/// let problem = zdt1(5).unwrap();
/// let config = MoeadConfig::default()
///     .with_population_size(20)
///     .with_n_neighbors(5)
///     .with_n_generations(10)
///     .with_decomposition(DecompositionMethod::Pbi)
///     .with_seed(3);
/// let result = Moead::optimize(&problem, &config).unwrap();
/// assert!(!result.front.is_empty());
/// ```
pub struct Moead;

impl Moead {
    /// Runs the optimization.
    ///
    /// The returned front is the non-dominated subset of the final
    /// population.
    ///
    /// # Errors
    ///
    /// Configuration errors before any evaluation; the first objective
    /// failure aborts the run, reporting the subproblem index.
    pub fn optimize(problem: &Problem, config: &MoeadConfig) -> Result<MoeaResult> {
        config.validate()?;
        let reference = config.hypervolume_reference.as_deref();
        check_reference_point(reference, problem)?;

        let n = config.population_size;
        let mut rng = create_rng(config.seed);
        let weights = weight_vectors(n, problem.n_objectives(), &mut rng);
        let hoods = neighborhoods(&weights, config.n_neighbors);

        info!(
            algorithm = "MOEA/D",
            decomposition = config.decomposition.name(),
            population_size = n,
            n_generations = config.n_generations,
            n_objectives = problem.n_objectives(),
            "starting run"
        );

        let mut population = initial_population(problem, n, config.parallel, &mut rng)?;
        let mut evaluations = population.len();
        let mut ideal = ideal_point(&population);
        rank_and_crowd(&mut population);

        let mut history = Vec::with_capacity(config.n_generations + 1);
        history.push(GenerationStats::from_population(0, &population, reference));

        let everyone: Vec<usize> = (0..n).collect();
        for gen in 1..=config.n_generations {
            for i in 0..n {
                let mut pool = if rng.random_bool(config.neighbor_selection_prob) {
                    hoods[i].clone()
                } else {
                    everyone.clone()
                };

                let (a, b) = pick_mates(&pool, &mut rng);
                let child = config.variation.reproduce_one(
                    population[a].variables(),
                    population[b].variables(),
                    problem.lower_bounds(),
                    problem.upper_bounds(),
                    &mut rng,
                );
                let child = problem.create_solution(child, gen, i)?;
                evaluations += 1;

                for (z, &f) in ideal.iter_mut().zip(child.objectives()) {
                    *z = z.min(f);
                }

                pool.shuffle(&mut rng);
                replace_neighbors(&mut population, &child, &pool, &weights, &ideal, config);
            }

            rank_and_crowd(&mut population);
            let stats = GenerationStats::from_population(gen, &population, reference);
            debug!(
                generation = gen,
                front_size = stats.front_size,
                hypervolume = ?stats.hypervolume,
                "generation complete"
            );
            history.push(stats);
        }

        let front =
            ParetoFront::from_solutions(population.iter().filter(|s| s.rank() == 0).cloned());
        info!(front_size = front.len(), evaluations, "run finished");

        Ok(MoeaResult {
            front,
            population,
            generations: config.n_generations,
            evaluations,
            history,
        })
    }
}

/// Two distinct members of `pool` (the same one if the pool has one).
fn pick_mates<R: Rng>(pool: &[usize], rng: &mut R) -> (usize, usize) {
    if pool.len() < 2 {
        return (pool[0], pool[0]);
    }
    let a = rng.random_range(0..pool.len());
    let mut b = rng.random_range(0..pool.len() - 1);
    if b >= a {
        b += 1;
    }
    (pool[a], pool[b])
}

/// Replaces members of `pool` (visited in the given order) whose
/// subproblem the child strictly improves, stopping after
/// `max_replacements`. Returns the number replaced.
fn replace_neighbors(
    population: &mut [Solution],
    child: &Solution,
    pool: &[usize],
    weights: &[Vec<f64>],
    ideal: &[f64],
    config: &MoeadConfig,
) -> usize {
    let mut replaced = 0;
    for &j in pool {
        if replaced >= config.max_replacements {
            break;
        }
        if improves(child, &population[j], &weights[j], ideal, config) {
            population[j] = child.clone();
            replaced += 1;
        }
    }
    replaced
}

fn improves(
    child: &Solution,
    current: &Solution,
    weight: &[f64],
    ideal: &[f64],
    config: &MoeadConfig,
) -> bool {
    if child.constraint_violation() != current.constraint_violation() {
        return child.constraint_violation() < current.constraint_violation();
    }
    let method = config.decomposition;
    let g_child = method.scalarize(child.objectives(), weight, ideal, config.pbi_theta);
    let g_current = method.scalarize(current.objectives(), weight, ideal, config.pbi_theta);
    g_child < g_current
}
