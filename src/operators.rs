//! Real-coded variation operators shared by all optimizers.
//!
//! - [`sbx_crossover`]: Simulated Binary Crossover (Deb & Agrawal, 1995)
//! - [`polynomial_mutation`]: Polynomial mutation (Deb & Goyal, 1996)
//! - [`Variation`]: the four operator parameters bundled together
//!
//! Both operators clip their output to the variable bounds and draw all
//! randomness from the caller's generator, so a seeded generator makes
//! them fully reproducible.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design"

use crate::error::{MoeaError, Result};
use rand::Rng;

/// Differences below this are treated as identical parent genes.
const SBX_EPS: f64 = 1e-14;

/// Parameters of SBX crossover and polynomial mutation.
///
/// ```
/// use u_moea::Variation;
///
/// let v = Variation::default().with_eta_crossover(20.0).with_mutation_prob(0.2);
/// assert_eq!(v.effective_mutation_prob(10), 0.2);
/// assert_eq!(Variation::default().effective_mutation_prob(10), 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variation {
    /// Probability of applying SBX to a parent pair (0.0–1.0).
    ///
    /// When crossover is not applied, the parents pass through unchanged.
    pub crossover_prob: f64,

    /// Per-variable mutation probability. `None` means `1 / n_variables`.
    pub mutation_prob: Option<f64>,

    /// SBX distribution index η_c. Larger values keep children closer to
    /// their parents.
    pub eta_crossover: f64,

    /// Polynomial mutation distribution index η_m.
    pub eta_mutation: f64,
}

impl Default for Variation {
    fn default() -> Self {
        Self {
            crossover_prob: 0.9,
            mutation_prob: None,
            eta_crossover: 15.0,
            eta_mutation: 20.0,
        }
    }
}

impl Variation {
    /// Sets the SBX application probability.
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.crossover_prob = p;
        self
    }

    /// Sets a fixed per-variable mutation probability, replacing the
    /// `1 / n_variables` default.
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = Some(p);
        self
    }

    /// Sets the SBX distribution index η_c.
    pub fn with_eta_crossover(mut self, eta: f64) -> Self {
        self.eta_crossover = eta;
        self
    }

    /// Sets the polynomial mutation distribution index η_m.
    pub fn with_eta_mutation(mut self, eta: f64) -> Self {
        self.eta_mutation = eta;
        self
    }

    /// Mutation probability actually used for `n_variables` variables.
    pub fn effective_mutation_prob(&self, n_variables: usize) -> f64 {
        self.mutation_prob
            .unwrap_or_else(|| 1.0 / n_variables.max(1) as f64)
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.crossover_prob) {
            return Err(MoeaError::config(format!(
                "crossover_prob must be in [0, 1], got {}",
                self.crossover_prob
            )));
        }
        if let Some(p) = self.mutation_prob {
            if !(0.0..=1.0).contains(&p) {
                return Err(MoeaError::config(format!(
                    "mutation_prob must be in [0, 1], got {p}"
                )));
            }
        }
        if !(self.eta_crossover > 0.0 && self.eta_crossover.is_finite()) {
            return Err(MoeaError::config("eta_crossover must be positive and finite"));
        }
        if !(self.eta_mutation > 0.0 && self.eta_mutation.is_finite()) {
            return Err(MoeaError::config("eta_mutation must be positive and finite"));
        }
        Ok(())
    }

    /// Produces two children: SBX on the pair, then polynomial mutation
    /// on each child.
    pub fn reproduce<R: Rng>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        lower: &[f64],
        upper: &[f64],
        rng: &mut R,
    ) -> (Vec<f64>, Vec<f64>) {
        let (mut c1, mut c2) = sbx_crossover(
            parent1,
            parent2,
            lower,
            upper,
            self.eta_crossover,
            self.crossover_prob,
            rng,
        );
        let pm = self.effective_mutation_prob(lower.len());
        polynomial_mutation(&mut c1, lower, upper, self.eta_mutation, pm, rng);
        polynomial_mutation(&mut c2, lower, upper, self.eta_mutation, pm, rng);
        (c1, c2)
    }

    /// Produces a single child: SBX on the pair, then polynomial mutation
    /// on the first child only. The second SBX child is discarded
    /// unmutated.
    pub fn reproduce_one<R: Rng>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        lower: &[f64],
        upper: &[f64],
        rng: &mut R,
    ) -> Vec<f64> {
        let (mut child, _) = sbx_crossover(
            parent1,
            parent2,
            lower,
            upper,
            self.eta_crossover,
            self.crossover_prob,
            rng,
        );
        let pm = self.effective_mutation_prob(lower.len());
        polynomial_mutation(&mut child, lower, upper, self.eta_mutation, pm, rng);
        child
    }
}

/// Uniform random vector inside `[lower, upper]`.
pub fn random_vector<R: Rng>(lower: &[f64], upper: &[f64], rng: &mut R) -> Vec<f64> {
    lower
        .iter()
        .zip(upper)
        .map(|(&lo, &hi)| lo + rng.random::<f64>() * (hi - lo))
        .collect()
}

/// Simulated Binary Crossover (SBX) for real-valued vectors.
///
/// With probability `crossover_prob` the pair is recombined; otherwise
/// copies of the parents are returned. Each variable is recombined with
/// probability 0.5, using a spread factor drawn from a polynomial
/// distribution with index `eta`. The bounded variant is used: the spread
/// distribution is truncated so children stay in bounds, then children are
/// clipped for floating-point safety.
///
/// # Panics
/// Panics if parents and bounds differ in length.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    lower: &[f64],
    upper: &[f64],
    eta: f64,
    crossover_prob: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(n, lower.len(), "bounds must match parent length");
    assert_eq!(n, upper.len(), "bounds must match parent length");

    let mut c1 = parent1.to_vec();
    let mut c2 = parent2.to_vec();

    if rng.random::<f64>() >= crossover_prob {
        return (c1, c2);
    }

    for i in 0..n {
        if rng.random::<f64>() > 0.5 {
            continue;
        }
        if (parent1[i] - parent2[i]).abs() <= SBX_EPS {
            continue;
        }

        let (lo, hi) = (lower[i], upper[i]);
        let y1 = parent1[i].min(parent2[i]);
        let y2 = parent1[i].max(parent2[i]);
        let u = rng.random::<f64>();

        let beta = 1.0 + 2.0 * (y1 - lo) / (y2 - y1);
        let betaq = spread_factor(beta, eta, u);
        let child_low = 0.5 * ((y1 + y2) - betaq * (y2 - y1));

        let beta = 1.0 + 2.0 * (hi - y2) / (y2 - y1);
        let betaq = spread_factor(beta, eta, u);
        let child_high = 0.5 * ((y1 + y2) + betaq * (y2 - y1));

        let child_low = child_low.clamp(lo, hi);
        let child_high = child_high.clamp(lo, hi);

        if rng.random_bool(0.5) {
            c1[i] = child_high;
            c2[i] = child_low;
        } else {
            c1[i] = child_low;
            c2[i] = child_high;
        }
    }

    (c1, c2)
}

/// Truncated polynomial spread factor β_q.
fn spread_factor(beta: f64, eta: f64, u: f64) -> f64 {
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    if u <= 1.0 / alpha {
        (u * alpha).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 - u * alpha)).powf(1.0 / (eta + 1.0))
    }
}

/// Polynomial mutation.
///
/// Each variable is perturbed independently with probability
/// `mutation_prob`, using a polynomial distribution with index `eta`
/// scaled to the variable's range. Results are clipped to bounds.
///
/// # Panics
/// Panics if `x` and the bounds differ in length.
pub fn polynomial_mutation<R: Rng>(
    x: &mut [f64],
    lower: &[f64],
    upper: &[f64],
    eta: f64,
    mutation_prob: f64,
    rng: &mut R,
) {
    assert_eq!(x.len(), lower.len(), "bounds must match vector length");
    assert_eq!(x.len(), upper.len(), "bounds must match vector length");

    let exponent = 1.0 / (eta + 1.0);
    for i in 0..x.len() {
        if rng.random::<f64>() >= mutation_prob {
            continue;
        }

        let (lo, hi) = (lower[i], upper[i]);
        let range = hi - lo;
        if range <= 0.0 {
            continue;
        }
        let y = x[i];
        let delta1 = (y - lo) / range;
        let delta2 = (hi - y) / range;
        let u = rng.random::<f64>();

        let deltaq = if u < 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };

        x[i] = (y + deltaq * range).clamp(lo, hi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn in_bounds(x: &[f64], lower: &[f64], upper: &[f64]) -> bool {
        x.iter()
            .zip(lower.iter().zip(upper))
            .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    #[test]
    fn test_sbx_no_crossover_passes_parents_through() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1 = vec![0.1, 0.2, 0.3];
        let p2 = vec![0.9, 0.8, 0.7];
        let (c1, c2) = sbx_crossover(&p1, &p2, &[0.0; 3], &[1.0; 3], 15.0, 0.0, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_sbx_identical_parents() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = vec![0.5, 0.25];
        let (c1, c2) = sbx_crossover(&p, &p, &[0.0; 2], &[1.0; 2], 15.0, 1.0, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_sbx_preserves_midpoint_per_variable() {
        // Without clipping, SBX children are symmetric around the parents' mean.
        let mut rng = StdRng::seed_from_u64(7);
        let p1 = vec![4.0];
        let p2 = vec![6.0];
        for _ in 0..200 {
            let (c1, c2) = sbx_crossover(&p1, &p2, &[-1e6], &[1e6], 15.0, 1.0, &mut rng);
            assert!(((c1[0] + c2[0]) / 2.0 - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sbx_changes_something_eventually() {
        let mut rng = StdRng::seed_from_u64(3);
        let p1 = vec![0.2; 5];
        let p2 = vec![0.8; 5];
        let changed = (0..50).any(|_| {
            let (c1, _) = sbx_crossover(&p1, &p2, &[0.0; 5], &[1.0; 5], 15.0, 1.0, &mut rng);
            c1 != p1 && c1 != p2
        });
        assert!(changed);
    }

    #[test]
    fn test_mutation_probability_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut x = vec![0.3, 0.6];
        polynomial_mutation(&mut x, &[0.0; 2], &[1.0; 2], 20.0, 0.0, &mut rng);
        assert_eq!(x, vec![0.3, 0.6]);
    }

    #[test]
    fn test_mutation_probability_one_moves_variables() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = vec![0.5; 8];
        let mut x = original.clone();
        polynomial_mutation(&mut x, &[0.0; 8], &[1.0; 8], 20.0, 1.0, &mut rng);
        assert_ne!(x, original);
        assert!(in_bounds(&x, &[0.0; 8], &[1.0; 8]));
    }

    #[test]
    fn test_same_seed_same_offspring() {
        let v = Variation::default();
        let lower = vec![0.0; 4];
        let upper = vec![1.0; 4];
        let p1 = vec![0.1, 0.4, 0.6, 0.9];
        let p2 = vec![0.8, 0.3, 0.2, 0.5];
        let a = v.reproduce(&p1, &p2, &lower, &upper, &mut StdRng::seed_from_u64(99));
        let b = v.reproduce(&p1, &p2, &lower, &upper, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reproduce_one_mutates_only_the_kept_child() {
        let v = Variation::default().with_mutation_prob(1.0);
        let lower = vec![0.0; 4];
        let upper = vec![1.0; 4];
        let p1 = vec![0.1, 0.4, 0.6, 0.9];
        let p2 = vec![0.8, 0.3, 0.2, 0.5];
        let mut single = StdRng::seed_from_u64(11);
        let mut pair = StdRng::seed_from_u64(11);

        let child = v.reproduce_one(&p1, &p2, &lower, &upper, &mut single);
        let (first, _) = v.reproduce(&p1, &p2, &lower, &upper, &mut pair);
        assert_eq!(child, first);
        // The pair variant drew extra numbers to mutate its second child.
        assert_ne!(single.random::<u64>(), pair.random::<u64>());
    }

    #[test]
    fn test_validate() {
        assert!(Variation::default().validate().is_ok());
        assert!(Variation::default().with_crossover_prob(1.5).validate().is_err());
        assert!(Variation::default().with_mutation_prob(-0.1).validate().is_err());
        assert!(Variation::default().with_eta_crossover(0.0).validate().is_err());
        assert!(Variation::default().with_eta_mutation(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_random_vector_in_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let lower = vec![-5.0, 0.0, 10.0];
        let upper = vec![5.0, 1.0, 20.0];
        for _ in 0..100 {
            let x = random_vector(&lower, &upper, &mut rng);
            assert!(in_bounds(&x, &lower, &upper));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_reproduce_respects_bounds(
            seed in any::<u64>(),
            p1 in prop::collection::vec(-2.0f64..3.0, 4),
            p2 in prop::collection::vec(-2.0f64..3.0, 4),
            eta_c in 1.0f64..40.0,
            eta_m in 1.0f64..40.0,
        ) {
            let lower = vec![-2.0; 4];
            let upper = vec![3.0; 4];
            let v = Variation::default()
                .with_crossover_prob(1.0)
                .with_mutation_prob(1.0)
                .with_eta_crossover(eta_c)
                .with_eta_mutation(eta_m);
            let mut rng = StdRng::seed_from_u64(seed);
            let (c1, c2) = v.reproduce(&p1, &p2, &lower, &upper, &mut rng);
            prop_assert!(in_bounds(&c1, &lower, &upper));
            prop_assert!(in_bounds(&c2, &lower, &upper));
            prop_assert!(c1.iter().chain(&c2).all(|v| v.is_finite()));
        }
    }
}
