//! Scalarizing functions and weight-vector geometry for MOEA/D.

use crate::reference::{das_dennis, das_dennis_count};
use rand::Rng;

/// How a subproblem reduces an objective vector to a scalar.
///
/// | Method | `g(f; w, z*)` | Fronts |
/// |--------|----------------|--------|
/// | [`WeightedSum`](Self::WeightedSum) | `Σ wᵢ·(fᵢ − zᵢ)` | convex only |
/// | [`Tchebycheff`](Self::Tchebycheff) | `max wᵢ·\|fᵢ − zᵢ\|` | any |
/// | [`Pbi`](Self::Pbi) | `d₁ + θ·d₂` | any |
///
/// Lower is better for every method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecompositionMethod {
    /// Linear aggregation relative to the ideal point.
    WeightedSum,

    /// Weighted Chebyshev distance to the ideal point.
    #[default]
    Tchebycheff,

    /// Penalty-based boundary intersection. `d₁` is the distance travelled
    /// along the weight direction from the ideal point, `d₂` the
    /// perpendicular distance to that direction.
    Pbi,
}

impl DecompositionMethod {
    /// Scalarizes `objectives` for weight vector `weight`.
    ///
    /// `theta` is only used by [`Pbi`](Self::Pbi). Weights are used as
    /// given: a zero weight removes that objective from the weighted sum
    /// and from the Tchebycheff maximum.
    ///
    /// ```
    /// use u_moea::moead::DecompositionMethod;
    ///
    /// let f = [3.0, 1.0];
    /// let w = [0.5, 0.5];
    /// let z = [1.0, 0.0];
    /// assert_eq!(DecompositionMethod::WeightedSum.scalarize(&f, &w, &z, 5.0), 1.5);
    /// assert_eq!(DecompositionMethod::Tchebycheff.scalarize(&f, &w, &z, 5.0), 1.0);
    /// ```
    pub fn scalarize(&self, objectives: &[f64], weight: &[f64], ideal: &[f64], theta: f64) -> f64 {
        match self {
            Self::WeightedSum => objectives
                .iter()
                .zip(weight)
                .zip(ideal)
                .map(|((&f, &w), &z)| w * (f - z))
                .sum(),
            Self::Tchebycheff => objectives
                .iter()
                .zip(weight)
                .zip(ideal)
                .map(|((&f, &w), &z)| w * (f - z).abs())
                .fold(f64::NEG_INFINITY, f64::max),
            Self::Pbi => pbi(objectives, weight, ideal, theta),
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WeightedSum => "weighted-sum",
            Self::Tchebycheff => "tchebycheff",
            Self::Pbi => "pbi",
        }
    }
}

fn pbi(objectives: &[f64], weight: &[f64], ideal: &[f64], theta: f64) -> f64 {
    let norm = weight.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm <= 0.0 {
        return f64::INFINITY;
    }
    let diff: Vec<f64> = objectives.iter().zip(ideal).map(|(f, z)| f - z).collect();
    let d1 = diff.iter().zip(weight).map(|(d, w)| d * w / norm).sum::<f64>();
    let d2 = diff
        .iter()
        .zip(weight)
        .map(|(d, w)| (d - d1 * w / norm).powi(2))
        .sum::<f64>()
        .sqrt();
    d1 + theta * d2
}

/// `n` weight vectors on the unit simplex, each summing to 1.
///
/// Two objectives get `n` evenly spaced vectors from `(0, 1)` to `(1, 0)`.
/// For more objectives the densest Das–Dennis lattice with at most `n`
/// points is used and the remainder is filled with uniformly random
/// simplex points.
pub fn weight_vectors<R: Rng>(n: usize, n_objectives: usize, rng: &mut R) -> Vec<Vec<f64>> {
    match (n, n_objectives) {
        (0, _) | (_, 0) => Vec::new(),
        (_, 1) => vec![vec![1.0]; n],
        (1, m) => vec![vec![1.0 / m as f64; m]],
        (n, 2) => (0..n)
            .map(|i| {
                let w = i as f64 / (n - 1) as f64;
                vec![w, 1.0 - w]
            })
            .collect(),
        (n, m) => {
            let mut h = 1;
            while das_dennis_count(m, h + 1) <= n {
                h += 1;
            }
            let mut weights = if das_dennis_count(m, h) <= n {
                das_dennis(m, h)
            } else {
                Vec::new()
            };
            while weights.len() < n {
                weights.push(random_simplex_point(m, rng));
            }
            weights
        }
    }
}

/// Uniform sample from the unit simplex (normalized exponentials).
fn random_simplex_point<R: Rng>(m: usize, rng: &mut R) -> Vec<f64> {
    let e: Vec<f64> = (0..m)
        .map(|_| -(1.0 - rng.random::<f64>()).ln())
        .collect();
    let sum: f64 = e.iter().sum();
    if sum <= 0.0 {
        return vec![1.0 / m as f64; m];
    }
    e.iter().map(|v| v / sum).collect()
}

/// For each weight vector, the indices of its `t` nearest weight vectors
/// by Euclidean distance, itself first (distance 0). Ties go to the lower
/// index.
pub fn neighborhoods(weights: &[Vec<f64>], t: usize) -> Vec<Vec<usize>> {
    let t = t.min(weights.len());
    weights
        .iter()
        .enumerate()
        .map(|(i, wi)| {
            let mut by_distance: Vec<(usize, f64)> = weights
                .iter()
                .enumerate()
                .map(|(j, wj)| {
                    let d = wi
                        .iter()
                        .zip(wj)
                        .map(|(a, b)| (a - b).powi(2))
                        .sum::<f64>()
                        .sqrt();
                    (j, d)
                })
                .collect();
            by_distance.sort_by(|a, b| {
                let self_first = (a.0 != i).cmp(&(b.0 != i));
                self_first
                    .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .then(a.0.cmp(&b.0))
            });
            by_distance.into_iter().take(t).map(|(j, _)| j).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tchebycheff_zero_weight_ignores_objective() {
        let tch = DecompositionMethod::Tchebycheff;
        let w = [0.0, 1.0];
        let z = [0.0, 0.0];
        assert_eq!(tch.scalarize(&[5.0, 0.0], &w, &z, 5.0), 0.0);
        assert_eq!(tch.scalarize(&[5.0, 2.0], &w, &z, 5.0), 2.0);
        assert_eq!(tch.scalarize(&[3.0, 1.0], &[0.25, 0.75], &z, 5.0), 0.75);
    }

    #[test]
    fn test_pbi_on_and_off_direction() {
        let w = [0.5, 0.5];
        let z = [0.0, 0.0];
        let on = DecompositionMethod::Pbi.scalarize(&[1.0, 1.0], &w, &z, 5.0);
        assert!((on - 2f64.sqrt()).abs() < 1e-12);
        let off = DecompositionMethod::Pbi.scalarize(&[2.0, 0.0], &w, &z, 5.0);
        // d1 = √2, d2 = √2
        assert!((off - 6.0 * 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_weight_vectors_two_objectives() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = weight_vectors(5, 2, &mut rng);
        assert_eq!(w[0], vec![0.0, 1.0]);
        assert_eq!(w[2], vec![0.5, 0.5]);
        assert_eq!(w[4], vec![1.0, 0.0]);
    }

    #[test]
    fn test_weight_vectors_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(0);
        for (n, m) in [(1, 2), (2, 2), (7, 2), (15, 3), (20, 3), (50, 4), (3, 5)] {
            let w = weight_vectors(n, m, &mut rng);
            assert_eq!(w.len(), n, "n={n}, m={m}");
            for v in &w {
                assert_eq!(v.len(), m);
                assert!(v.iter().all(|&x| x >= 0.0));
                assert!((v.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_weight_vectors_use_lattice_when_exact() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(weight_vectors(15, 3, &mut rng), das_dennis(3, 4));
    }

    #[test]
    fn test_neighborhoods_start_with_self() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = weight_vectors(10, 2, &mut rng);
        let hoods = neighborhoods(&w, 3);
        for (i, hood) in hoods.iter().enumerate() {
            assert_eq!(hood.len(), 3);
            assert_eq!(hood[0], i);
        }
        assert_eq!(hoods[0], vec![0, 1, 2]);
        let mut middle = hoods[5].clone();
        middle.sort_unstable();
        assert_eq!(middle, vec![4, 5, 6]);
        assert_eq!(neighborhoods(&w, 50)[0].len(), 10);
    }
}
