//! NSGA-III generational loop.

use super::config::Nsga3Config;
use crate::error::Result;
use crate::evaluation::{check_reference_point, create_rng, evaluate_batch, GenerationStats, MoeaResult};
use crate::nsga2::{initial_population, make_offspring, take_indices};
use crate::pareto::{fast_non_dominated_sort, ParetoFront};
use crate::problem::Problem;
use crate::reference::{associate, das_dennis, niching_select, Normalization};
use crate::solution::{ReferenceAssociation, Solution};
use rand::Rng;
use tracing::{debug, info};

/// Executes NSGA-III.
///
/// ```
/// use u_moea::nsga3::{Nsga3, Nsga3Config};
/// use u_moea::problems::dtlz2;
///
/// let problem = dtlz2(3, 7).unwrap();
/// let config = Nsga3Config::default()
///     .with_population_size(16)
///     .with_n_partitions(4)
///     .with_n_generations(5)
///     .with_seed(1);
///
/// let result = Nsga3::optimize(&problem, &config).unwrap();
/// assert!(result.population.iter().all(|s| s.reference_association().is_some()));
/// ```
pub struct Nsga3;

impl Nsga3 {
    /// Runs the optimization.
    ///
    /// The returned front is the rank-0 set of the last merged
    /// parent+offspring pool (of the initial population when
    /// `n_generations` is 0).
    ///
    /// # Errors
    ///
    /// Configuration errors before any evaluation; the first objective
    /// failure aborts the run.
    pub fn optimize(problem: &Problem, config: &Nsga3Config) -> Result<MoeaResult> {
        config.validate()?;
        let reference = config.hypervolume_reference.as_deref();
        check_reference_point(reference, problem)?;

        let reference_points = das_dennis(problem.n_objectives(), config.n_partitions);
        info!(
            algorithm = "NSGA-III",
            population_size = config.population_size,
            n_generations = config.n_generations,
            n_objectives = problem.n_objectives(),
            n_reference_points = reference_points.len(),
            "starting run"
        );

        let mut rng = create_rng(config.seed);

        let initial = initial_population(problem, config.population_size, config.parallel, &mut rng)?;
        let mut evaluations = initial.len();
        let (mut population, mut pool_front) =
            niche_survival(initial, config.population_size, &reference_points, &mut rng);

        let mut history = Vec::with_capacity(config.n_generations + 1);
        history.push(GenerationStats::from_population(0, &population, reference));

        for gen in 1..=config.n_generations {
            let children = make_offspring(
                problem,
                &population,
                &config.variation,
                config.population_size,
                &mut rng,
                rank_tournament,
            );
            let offspring = evaluate_batch(problem, children, gen, config.parallel)?;
            evaluations += offspring.len();

            population.extend(offspring);
            let (survivors, front) =
                niche_survival(population, config.population_size, &reference_points, &mut rng);
            population = survivors;
            pool_front = front;

            let stats = GenerationStats::from_population(gen, &population, reference);
            debug!(
                generation = gen,
                front_size = stats.front_size,
                hypervolume = ?stats.hypervolume,
                "generation complete"
            );
            history.push(stats);
        }

        let front = ParetoFront::from_solutions(pool_front);
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

/// Binary tournament on rank alone; equal ranks are settled at random.
fn rank_tournament<R: Rng>(population: &[Solution], rng: &mut R) -> usize {
    let n = population.len();
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    match population[a].rank().cmp(&population[b].rank()) {
        std::cmp::Ordering::Less => a,
        std::cmp::Ordering::Greater => b,
        std::cmp::Ordering::Equal => {
            if rng.random_bool(0.5) {
                a
            } else {
                b
            }
        }
    }
}

/// Reference-point environmental selection.
///
/// Ranks the pool, keeps whole fronts while they fit, and fills the rest
/// from the first front that does not fit by niche preservation. Every
/// survivor carries its rank and reference association. Also returns the
/// pool's rank-0 members.
fn niche_survival<R: Rng>(
    mut pool: Vec<Solution>,
    size: usize,
    reference_points: &[Vec<f64>],
    rng: &mut R,
) -> (Vec<Solution>, Vec<Solution>) {
    let sorted = fast_non_dominated_sort(&pool);

    // Candidate set: whole fronts up to and including the one that
    // reaches `size`.
    let mut candidates: Vec<usize> = Vec::with_capacity(pool.len());
    let mut last_front: &[usize] = &[];
    for front in &sorted.fronts {
        if candidates.len() >= size {
            break;
        }
        if candidates.len() + front.len() > size {
            last_front = front;
            break;
        }
        candidates.extend_from_slice(front);
    }
    let selected_len = candidates.len();
    candidates.extend_from_slice(last_front);

    let objectives: Vec<Vec<f64>> = candidates
        .iter()
        .map(|&i| pool[i].objectives().to_vec())
        .collect();
    let first_front_len = sorted.fronts.first().map_or(0, |f| f.len().min(candidates.len()));
    let first_front: Vec<usize> = (0..first_front_len).collect();
    let normalization = Normalization::estimate(&objectives, &first_front);
    let normalized: Vec<Vec<f64>> = objectives.iter().map(|f| normalization.apply(f)).collect();

    let mut associations = vec![
        ReferenceAssociation {
            index: 0,
            distance: f64::INFINITY,
        };
        pool.len()
    ];
    for (&i, a) in candidates.iter().zip(associate(&normalized, reference_points)) {
        associations[i] = a;
    }
    for (i, s) in pool.iter_mut().enumerate() {
        s.set_ranking(sorted.ranks[i], 0.0, Some(associations[i]));
    }

    let pool_front: Vec<Solution> = sorted
        .fronts
        .first()
        .map(|f| f.iter().map(|&i| pool[i].clone()).collect())
        .unwrap_or_default();

    let mut selected: Vec<usize> = candidates[..selected_len].to_vec();
    if selected.len() < size {
        let picked = niching_select(
            &associations,
            &selected,
            last_front,
            reference_points.len(),
            size - selected.len(),
            rng,
        );
        selected.extend(picked);
    }

    (take_indices(pool, &selected), pool_front)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MoeaError, ObjectiveError};
    use crate::pareto::dominates;
    use crate::problems::dtlz2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn linear_problem() -> Problem {
        Problem::builder(vec![0.0], vec![1.0])
            .objective(|x| x[0])
            .objective(|x| 1.0 - x[0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_dtlz2_front_quality() {
        let problem = dtlz2(3, 7).unwrap();
        let config = Nsga3Config::default()
            .with_population_size(16)
            .with_n_partitions(4)
            .with_n_generations(60)
            .with_seed(21)
            .with_hypervolume_reference(vec![2.5, 2.5, 2.5]);
        let result = Nsga3::optimize(&problem, &config).unwrap();

        let objs = result.front.get_objectives();
        assert!(!objs.is_empty());
        for a in &objs {
            for b in &objs {
                assert!(!dominates(a, b));
            }
        }
        let hv = result.hypervolume_history();
        assert_eq!(hv.len(), 61);
        assert!(hv[60] > hv[0], "{} <= {}", hv[60], hv[0]);
    }

    #[test]
    fn test_population_carries_associations() {
        let problem = dtlz2(3, 6).unwrap();
        let config = Nsga3Config::default()
            .with_population_size(15)
            .with_n_partitions(4)
            .with_n_generations(5)
            .with_seed(2);
        let result = Nsga3::optimize(&problem, &config).unwrap();
        assert_eq!(result.population.len(), 15);
        for s in &result.population {
            let assoc = s.reference_association().unwrap();
            assert!(assoc.index < 15);
            assert!(assoc.distance.is_finite());
        }
    }

    #[test]
    fn test_linear_front_spans_extremes() {
        let config = Nsga3Config::default()
            .with_population_size(20)
            .with_n_partitions(19)
            .with_n_generations(20)
            .with_seed(42);
        let result = Nsga3::optimize(&linear_problem(), &config).unwrap();
        let xs: Vec<f64> = result.front.iter().map(|s| s.variables()[0]).collect();
        let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(min <= 0.2 && max >= 0.8, "span [{min}, {max}]");
    }

    #[test]
    fn test_zero_generations_uses_initial_front() {
        let config = Nsga3Config::default()
            .with_population_size(10)
            .with_n_partitions(9)
            .with_n_generations(0)
            .with_seed(4);
        let result = Nsga3::optimize(&linear_problem(), &config).unwrap();
        assert_eq!(result.evaluations, 10);
        assert_eq!(result.history.len(), 1);
        assert!(!result.front.is_empty());
    }

    #[test]
    fn test_seed_reproducibility() {
        let problem = dtlz2(3, 5).unwrap();
        let config = Nsga3Config::default()
            .with_population_size(15)
            .with_n_partitions(4)
            .with_n_generations(8)
            .with_seed(99);
        let a = Nsga3::optimize(&problem, &config).unwrap();
        let b = Nsga3::optimize(&problem, &config).unwrap();
        assert_eq!(a.population, b.population);
        assert_eq!(a.front.get_objectives(), b.front.get_objectives());
    }

    #[test]
    fn test_invalid_config() {
        let config = Nsga3Config::default().with_n_partitions(0);
        assert!(Nsga3::optimize(&linear_problem(), &config)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_failure_in_offspring_generation() {
        // The first 10 calls (generation 0) succeed.
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = AtomicUsize::new(0);
        let problem = Problem::builder(vec![0.0], vec![1.0])
            .objective(|x| x[0])
            .try_objective(move |x| {
                if calls.fetch_add(1, Ordering::Relaxed) >= 10 {
                    Err(ObjectiveError::new("license expired"))
                } else {
                    Ok(1.0 - x[0])
                }
            })
            .build()
            .unwrap();
        let config = Nsga3Config::default()
            .with_population_size(10)
            .with_n_partitions(9)
            .with_n_generations(3)
            .with_seed(1);
        let err = Nsga3::optimize(&problem, &config).unwrap_err();
        assert!(matches!(
            err,
            MoeaError::Evaluation {
                generation: 1,
                index: 0,
                objective: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_niche_survival_truncates_to_size() {
        let pool: Vec<Solution> = (0..10)
            .map(|i| {
                let x = i as f64 / 9.0;
                Solution::new(vec![x], vec![x, 1.0 - x])
            })
            .collect();
        let refs = das_dennis(2, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let (survivors, front) = niche_survival(pool, 5, &refs, &mut rng);
        assert_eq!(survivors.len(), 5);
        assert_eq!(front.len(), 10);
        // One survivor per reference direction.
        let mut niches: Vec<usize> = survivors
            .iter()
            .map(|s| s.reference_association().unwrap().index)
            .collect();
        niches.sort_unstable();
        assert_eq!(niches, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_rank_tournament_prefers_lower_rank() {
        let mut a = Solution::new(vec![0.0], vec![0.0]);
        a.set_ranking(0, 0.0, None);
        let mut b = Solution::new(vec![1.0], vec![1.0]);
        b.set_ranking(3, 0.0, None);
        let pop = vec![a, b];
        let mut rng = StdRng::seed_from_u64(5);
        // b only wins when drawn twice.
        let zero_wins = (0..400).filter(|_| rank_tournament(&pop, &mut rng) == 0).count();
        assert!(zero_wins > 250, "zero_wins={zero_wins}");
    }
}
