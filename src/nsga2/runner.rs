//! NSGA-II generational loop.
//!
//! [`Nsga2`] orchestrates the complete run:
//! initialize → evaluate → rank → (tournament → vary → evaluate →
//! merge → sort → truncate) × n_generations → extract rank 0.

use super::config::Nsga2Config;
use super::selection::crowded_tournament;
use crate::error::Result;
use crate::evaluation::{check_reference_point, create_rng, evaluate_batch, GenerationStats, MoeaResult};
use crate::operators::{random_vector, Variation};
use crate::pareto::{assign_crowding_distance, fast_non_dominated_sort, ParetoFront};
use crate::problem::Problem;
use crate::solution::Solution;
use rand::Rng;
use tracing::{debug, info};

/// Executes NSGA-II.
///
/// # Usage
///
/// ```
/// use u_moea::nsga2::{Nsga2, Nsga2Config};
/// use u_moea::Problem;
///
/// let problem = Problem::builder(vec![0.0], vec![1.0])
///     .objective(|x| x[0])
///     .objective(|x| 1.0 - x[0])
///     .build()
///     .unwrap();
/// let config = Nsga2Config::default()
///     .with_population_size(20)
///     .with_n_generations(10)
///     .with_seed(42);
///
/// let result = Nsga2::optimize(&problem, &config).unwrap();
/// assert!(!result.front.is_empty());
/// ```
pub struct Nsga2;

impl Nsga2 {
    /// Runs the optimization.
    ///
    /// # Errors
    ///
    /// - [`MoeaError::Configuration`](crate::MoeaError::Configuration)
    ///   before any evaluation if the configuration is invalid.
    /// - [`MoeaError::Evaluation`](crate::MoeaError::Evaluation) as soon as
    ///   an objective fails; the run is aborted.
    pub fn optimize(problem: &Problem, config: &Nsga2Config) -> Result<MoeaResult> {
        config.validate()?;
        let reference = config.hypervolume_reference.as_deref();
        check_reference_point(reference, problem)?;

        info!(
            algorithm = "NSGA-II",
            population_size = config.population_size,
            n_generations = config.n_generations,
            n_objectives = problem.n_objectives(),
            "starting run"
        );

        let mut rng = create_rng(config.seed);

        let mut population =
            initial_population(problem, config.population_size, config.parallel, &mut rng)?;
        let mut evaluations = population.len();
        rank_and_crowd(&mut population);

        let mut history = Vec::with_capacity(config.n_generations + 1);
        history.push(GenerationStats::from_population(0, &population, reference));

        for gen in 1..=config.n_generations {
            let children = make_offspring(
                problem,
                &population,
                &config.variation,
                config.population_size,
                &mut rng,
                crowded_tournament,
            );
            let offspring = evaluate_batch(problem, children, gen, config.parallel)?;
            evaluations += offspring.len();

            population.extend(offspring);
            population = crowded_survival(population, config.population_size);

            let stats = GenerationStats::from_population(gen, &population, reference);
            debug!(
                generation = gen,
                front_size = stats.front_size,
                hypervolume = ?stats.hypervolume,
                "generation complete"
            );
            history.push(stats);
        }

        let front = rank_zero_front(&population);
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

// ============================================================================
// Shared generational steps (also used by NSGA-III)
// ============================================================================

/// Samples and evaluates `size` uniform random individuals (generation 0).
pub(crate) fn initial_population<R: Rng>(
    problem: &Problem,
    size: usize,
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<Solution>> {
    let candidates: Vec<Vec<f64>> = (0..size)
        .map(|_| random_vector(problem.lower_bounds(), problem.upper_bounds(), rng))
        .collect();
    evaluate_batch(problem, candidates, 0, parallel)
}

/// Draws `count` offspring decision vectors. Parents are chosen by
/// `select`; each SBX pair yields two children, the surplus one is
/// dropped when `count` is odd.
pub(crate) fn make_offspring<R, S>(
    problem: &Problem,
    population: &[Solution],
    variation: &Variation,
    count: usize,
    rng: &mut R,
    mut select: S,
) -> Vec<Vec<f64>>
where
    R: Rng,
    S: FnMut(&[Solution], &mut R) -> usize,
{
    let lower = problem.lower_bounds();
    let upper = problem.upper_bounds();
    let mut children = Vec::with_capacity(count);
    while children.len() < count {
        let p1 = select(population, rng);
        let p2 = select(population, rng);
        let (c1, c2) = variation.reproduce(
            population[p1].variables(),
            population[p2].variables(),
            lower,
            upper,
            rng,
        );
        children.push(c1);
        if children.len() < count {
            children.push(c2);
        }
    }
    children
}

/// Sorts `population` into fronts (constrained dominance) and writes rank
/// and crowding distance into every member. Returns the fronts.
pub(crate) fn rank_and_crowd(population: &mut [Solution]) -> Vec<Vec<usize>> {
    let sorted = fast_non_dominated_sort(population);
    for (rank, front) in sorted.fronts.iter().enumerate() {
        assign_crowding_distance(population, front, rank);
    }
    sorted.fronts
}

/// Takes the members at `indices` out of `pool`, in `indices` order.
pub(crate) fn take_indices(pool: Vec<Solution>, indices: &[usize]) -> Vec<Solution> {
    let mut slots: Vec<Option<Solution>> = pool.into_iter().map(Some).collect();
    indices.iter().filter_map(|&i| slots[i].take()).collect()
}

/// Non-dominated rank-0 members as a [`ParetoFront`].
pub(crate) fn rank_zero_front(population: &[Solution]) -> ParetoFront {
    ParetoFront::from_solutions(population.iter().filter(|s| s.rank() == 0).cloned())
}

/// Environmental selection: whole fronts while they fit, then the last
/// front by descending crowding distance.
fn crowded_survival(mut pool: Vec<Solution>, size: usize) -> Vec<Solution> {
    let fronts = rank_and_crowd(&mut pool);

    let mut selected: Vec<usize> = Vec::with_capacity(size);
    for front in &fronts {
        if selected.len() + front.len() <= size {
            selected.extend_from_slice(front);
            continue;
        }
        let mut last = front.clone();
        last.sort_by(|&a, &b| {
            pool[b]
                .crowding_distance()
                .partial_cmp(&pool[a].crowding_distance())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        selected.extend_from_slice(&last[..size - selected.len()]);
        break;
    }

    take_indices(pool, &selected)
}
