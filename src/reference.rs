//! Reference-point machinery (NSGA-III density estimator).
//!
//! - [`das_dennis`]: structured points on the unit simplex
//! - [`Normalization`]: ideal point, extreme-point intercepts, scaling
//! - [`perpendicular_distance`], [`associate`]: nearest reference direction
//! - [`niching_select`]: fill the last partial front by least-crowded niche
//!
//! # References
//!
//! - Das & Dennis (1998), "Normal-Boundary Intersection"
//! - Deb & Jain (2014), "An Evolutionary Many-Objective Optimization Algorithm
//!   Using Reference-Point-Based Nondominated Sorting Approach, Part I"

use crate::solution::ReferenceAssociation;
use rand::Rng;
use tracing::warn;

/// Weight floor used by the achievement scalarizing function.
const ASF_EPS: f64 = 1e-6;

/// Smallest intercept range accepted before falling back.
const MIN_RANGE: f64 = 1e-10;

/// Das–Dennis simplex-lattice points.
///
/// Every point has `n_objectives` non-negative components that are
/// multiples of `1 / n_partitions` and sum to 1. The count is
/// `C(n_partitions + n_objectives - 1, n_objectives - 1)`.
///
/// ```
/// use u_moea::reference::das_dennis;
///
/// let points = das_dennis(3, 4);
/// assert_eq!(points.len(), 15);
/// assert!(points.iter().all(|p| (p.iter().sum::<f64>() - 1.0).abs() < 1e-12));
/// ```
pub fn das_dennis(n_objectives: usize, n_partitions: usize) -> Vec<Vec<f64>> {
    if n_objectives == 0 {
        return Vec::new();
    }
    if n_objectives == 1 || n_partitions == 0 {
        let mut p = vec![0.0; n_objectives];
        p[0] = 1.0;
        return vec![p];
    }
    let mut points = Vec::new();
    let mut current = vec![0usize; n_objectives];
    lattice(n_partitions, 0, n_partitions, &mut current, &mut points);
    points
}

fn lattice(
    n_partitions: usize,
    depth: usize,
    left: usize,
    current: &mut [usize],
    out: &mut Vec<Vec<f64>>,
) {
    let last = current.len() - 1;
    if depth == last {
        current[depth] = left;
        out.push(
            current
                .iter()
                .map(|&c| c as f64 / n_partitions as f64)
                .collect(),
        );
        return;
    }
    for k in 0..=left {
        current[depth] = k;
        lattice(n_partitions, depth + 1, left - k, current, out);
    }
}

/// Number of Das–Dennis points for the given lattice.
pub fn das_dennis_count(n_objectives: usize, n_partitions: usize) -> usize {
    if n_objectives == 0 {
        return 0;
    }
    binomial(n_partitions + n_objectives - 1, n_objectives - 1)
}

fn binomial(n: usize, k: usize) -> usize {
    let k = k.min(n - k);
    (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
}

/// Per-generation objective normalization.
///
/// `normalized = (f - ideal) / (nadir - ideal)` component-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    /// Per-objective minimum over the normalized pool.
    pub ideal: Vec<f64>,
    /// Estimated nadir point.
    pub nadir: Vec<f64>,
}

impl Normalization {
    /// Estimates ideal and nadir points.
    ///
    /// `pool` holds the objective vectors being selected from and
    /// `front` indexes its non-dominated members. The nadir is the worst
    /// value among the non-dominated members. Objectives where that range
    /// collapses (at most `1e-10`) take the axis intercept of the
    /// hyperplane through the extreme points (one per objective, found by
    /// the achievement scalarizing function). If the hyperplane is singular
    /// or yields non-positive or non-finite intercepts, those objectives
    /// use the pool's worst value, then a unit range.
    pub fn estimate(pool: &[Vec<f64>], front: &[usize]) -> Self {
        let m = pool.first().map_or(0, |p| p.len());
        let mut ideal = vec![f64::INFINITY; m];
        for p in pool {
            for (z, &v) in ideal.iter_mut().zip(p) {
                *z = z.min(v);
            }
        }

        let mut nadir = worst_of(front.iter().map(|&i| &pool[i]), m);
        let collapsed: Vec<usize> = (0..m)
            .filter(|&k| nadir[k] - ideal[k] <= MIN_RANGE)
            .collect();
        if collapsed.is_empty() {
            return Self { ideal, nadir };
        }

        match hyperplane_intercepts(pool, &ideal) {
            Some(intercepts) => {
                for &k in &collapsed {
                    nadir[k] = ideal[k] + intercepts[k];
                }
            }
            None => {
                warn!(
                    objectives = ?collapsed,
                    "degenerate non-dominated range and extreme-point hyperplane, using pool worst"
                );
                let pool_worst = worst_of(pool.iter(), m);
                for &k in &collapsed {
                    nadir[k] = if pool_worst[k] - ideal[k] > MIN_RANGE {
                        pool_worst[k]
                    } else {
                        ideal[k] + 1.0
                    };
                }
            }
        }

        Self { ideal, nadir }
    }

    /// Normalizes one objective vector.
    pub fn apply(&self, objectives: &[f64]) -> Vec<f64> {
        objectives
            .iter()
            .zip(&self.ideal)
            .zip(&self.nadir)
            .map(|((&f, &z), &n)| {
                let range = n - z;
                if range > MIN_RANGE {
                    (f - z) / range
                } else {
                    f - z
                }
            })
            .collect()
    }
}

/// Achievement scalarizing function with axis weight `axis`.
fn asf(point: &[f64], ideal: &[f64], axis: usize) -> f64 {
    point
        .iter()
        .zip(ideal)
        .enumerate()
        .map(|(k, (&p, &z))| {
            let w = if k == axis { 1.0 } else { ASF_EPS };
            (p - z) / w
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Axis intercepts (relative to the ideal point) of the hyperplane
/// through the extreme points, or `None` if degenerate.
fn hyperplane_intercepts(pool: &[Vec<f64>], ideal: &[f64]) -> Option<Vec<f64>> {
    let m = ideal.len();
    if pool.is_empty() || m == 0 {
        return None;
    }

    let extremes: Vec<Vec<f64>> = (0..m)
        .map(|axis| {
            let best = pool
                .iter()
                .min_by(|a, b| {
                    asf(a, ideal, axis)
                        .partial_cmp(&asf(b, ideal, axis))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|p| p.as_slice())
                .unwrap_or(ideal);
            best.iter().zip(ideal).map(|(p, z)| p - z).collect()
        })
        .collect();

    // Solve E · x = 1; intercept_k = 1 / x_k.
    let x = solve_linear(extremes, vec![1.0; m])?;
    let intercepts: Vec<f64> = x.iter().map(|&v| 1.0 / v).collect();
    if intercepts.iter().all(|&a| a.is_finite() && a > MIN_RANGE) {
        Some(intercepts)
    } else {
        None
    }
}

fn worst_of<'a>(rows: impl Iterator<Item = &'a Vec<f64>>, m: usize) -> Vec<f64> {
    let mut worst = vec![f64::NEG_INFINITY; m];
    for row in rows {
        for (w, &v) in worst.iter_mut().zip(row) {
            *w = w.max(v);
        }
    }
    worst
}

/// Gaussian elimination with partial pivoting. `None` if singular.
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                let v = a[col][k];
                a[row][k] -= factor * v;
            }
            let v = b[col];
            b[row] -= factor * v;
        }
    }
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    x.iter().all(|v| v.is_finite()).then_some(x)
}

/// Perpendicular distance from `point` to the line through the origin
/// along `direction`.
pub fn perpendicular_distance(point: &[f64], direction: &[f64]) -> f64 {
    let norm_sq: f64 = direction.iter().map(|d| d * d).sum();
    if norm_sq <= 0.0 {
        return point.iter().map(|p| p * p).sum::<f64>().sqrt();
    }
    let scale = point.iter().zip(direction).map(|(p, d)| p * d).sum::<f64>() / norm_sq;
    point
        .iter()
        .zip(direction)
        .map(|(p, d)| (p - scale * d).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Associates each normalized point with its nearest reference direction.
/// Ties go to the lower reference index.
pub fn associate(normalized: &[Vec<f64>], reference_points: &[Vec<f64>]) -> Vec<ReferenceAssociation> {
    normalized
        .iter()
        .map(|point| {
            let mut best = ReferenceAssociation {
                index: 0,
                distance: f64::INFINITY,
            };
            for (j, r) in reference_points.iter().enumerate() {
                let d = perpendicular_distance(point, r);
                if d < best.distance {
                    best = ReferenceAssociation { index: j, distance: d };
                }
            }
            best
        })
        .collect()
}

/// Picks `remaining` members of `last_front` by niche preservation.
///
/// Niche counts start from the members already in `selected`. Repeatedly,
/// among reference points that still have unpicked candidates in the last
/// front, one with the smallest niche count is chosen (ties at random),
/// and its candidate with the smallest perpendicular distance is taken.
///
/// `associations` is indexed like the pool that `selected` and
/// `last_front` index into.
pub fn niching_select<R: Rng>(
    associations: &[ReferenceAssociation],
    selected: &[usize],
    last_front: &[usize],
    n_reference_points: usize,
    remaining: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut niche_count = vec![0usize; n_reference_points];
    for &i in selected {
        niche_count[associations[i].index] += 1;
    }

    // Candidates per reference point, closest first.
    let mut candidates: Vec<Vec<usize>> = vec![Vec::new(); n_reference_points];
    for &i in last_front {
        candidates[associations[i].index].push(i);
    }
    for list in &mut candidates {
        list.sort_by(|&a, &b| {
            associations[b]
                .distance
                .partial_cmp(&associations[a].distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.cmp(&a))
        });
    }

    let mut chosen = Vec::with_capacity(remaining);
    while chosen.len() < remaining {
        let min_count = (0..n_reference_points)
            .filter(|&j| !candidates[j].is_empty())
            .map(|j| niche_count[j])
            .min();
        let Some(min_count) = min_count else {
            break;
        };
        let tied: Vec<usize> = (0..n_reference_points)
            .filter(|&j| !candidates[j].is_empty() && niche_count[j] == min_count)
            .collect();
        let j = tied[rng.random_range(0..tied.len())];

        // Lists are sorted descending, so the closest is at the end.
        if let Some(i) = candidates[j].pop() {
            chosen.push(i);
            niche_count[j] += 1;
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_das_dennis_two_objectives() {
        let points = das_dennis(2, 4);
        assert_eq!(
            points,
            vec![
                vec![0.0, 1.0],
                vec![0.25, 0.75],
                vec![0.5, 0.5],
                vec![0.75, 0.25],
                vec![1.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_das_dennis_counts() {
        for (m, p) in [(2, 10), (3, 12), (5, 4), (8, 3)] {
            let points = das_dennis(m, p);
            assert_eq!(points.len(), das_dennis_count(m, p), "m={m}, p={p}");
            for point in &points {
                assert_eq!(point.len(), m);
                assert!((point.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            }
        }
        assert_eq!(das_dennis_count(3, 12), 91);
    }

    #[test]
    fn test_das_dennis_degenerate() {
        assert_eq!(das_dennis(1, 5), vec![vec![1.0]]);
        assert!(das_dennis(0, 5).is_empty());
    }

    #[test]
    fn test_perpendicular_distance() {
        assert!((perpendicular_distance(&[1.0, 0.0], &[1.0, 1.0]) - 0.5f64.sqrt()).abs() < 1e-12);
        assert!(perpendicular_distance(&[2.0, 2.0], &[0.5, 0.5]).abs() < 1e-12);
        assert_eq!(perpendicular_distance(&[0.0, 3.0], &[1.0, 0.0]), 3.0);
    }

    #[test]
    fn test_normalization_linear_front() {
        // Points on f0 + f1 = 4, shifted by (1, 1).
        let pool = vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]];
        let norm = Normalization::estimate(&pool, &[0, 1, 2]);
        assert_eq!(norm.ideal, vec![1.0, 1.0]);
        assert!((norm.nadir[0] - 5.0).abs() < 1e-9);
        assert!((norm.nadir[1] - 5.0).abs() < 1e-9);
        let n = norm.apply(&[3.0, 3.0]);
        assert!((n[0] - 0.5).abs() < 1e-9 && (n[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_nadir_is_worst_non_dominated_point() {
        // The extreme-point hyperplane would put the nadir at 1.5 per axis.
        let pool = vec![vec![1.0, 0.5, 0.0], vec![0.0, 1.0, 0.5], vec![0.5, 0.0, 1.0]];
        let norm = Normalization::estimate(&pool, &[0, 1, 2]);
        assert_eq!(norm.ideal, vec![0.0, 0.0, 0.0]);
        assert_eq!(norm.nadir, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_nadir_ignores_dominated_members() {
        let pool = vec![vec![0.0, 2.0], vec![2.0, 0.0], vec![9.0, 9.0]];
        let norm = Normalization::estimate(&pool, &[0, 1]);
        assert_eq!(norm.nadir, vec![2.0, 2.0]);
    }

    #[test]
    fn test_collapsed_front_range_uses_pool_worst() {
        // Front shares f0 = 0; extreme points coincide, so the hyperplane is
        // singular and f0 falls back to the pool's worst value.
        let pool = vec![vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0], vec![1.0, 1.0, 1.0]];
        let norm = Normalization::estimate(&pool, &[0, 1]);
        assert_eq!(norm.nadir, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_normalization_degenerate_falls_back() {
        // Every point identical: hyperplane singular, ranges zero.
        let pool = vec![vec![2.0, 2.0]; 3];
        let norm = Normalization::estimate(&pool, &[0, 1, 2]);
        assert_eq!(norm.ideal, vec![2.0, 2.0]);
        assert_eq!(norm.nadir, vec![3.0, 3.0]);
        assert_eq!(norm.apply(&[2.0, 2.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_associate_nearest_direction() {
        let refs = das_dennis(2, 2); // (0,1), (0.5,0.5), (1,0)
        let points = vec![vec![0.05, 0.9], vec![0.4, 0.45], vec![0.9, 0.0]];
        let assoc = associate(&points, &refs);
        let idx: Vec<usize> = assoc.iter().map(|a| a.index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        assert!(assoc[2].distance.abs() < 1e-12);
    }

    #[test]
    fn test_niching_prefers_empty_niches_and_close_members() {
        // Pool: 0,1 already selected on ref 0. Last front: 2,3 on ref 0, 4,5 on ref 1.
        let a = |index, distance| ReferenceAssociation { index, distance };
        let associations = vec![
            a(0, 0.1),
            a(0, 0.2),
            a(0, 0.01),
            a(0, 0.02),
            a(1, 0.5),
            a(1, 0.3),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let picked = niching_select(&associations, &[0, 1], &[2, 3, 4, 5], 3, 2, &mut rng);
        // Ref 1 has count 0: its closest member (5) goes first, then 4
        // (ref 1 count 1 < ref 0 count 2).
        assert_eq!(picked, vec![5, 4]);
    }

    #[test]
    fn test_niching_stops_when_front_exhausted() {
        let associations = vec![ReferenceAssociation {
            index: 0,
            distance: 0.0,
        }];
        let mut rng = StdRng::seed_from_u64(1);
        let picked = niching_select(&associations, &[], &[0], 2, 5, &mut rng);
        assert_eq!(picked, vec![0]);
    }
}
