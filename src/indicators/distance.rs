//! Distance-based quality indicators.
//!
//! All functions take objective vectors row by row. Empty inputs are a
//! numerical degeneracy, not an error: convergence indicators return
//! `f64::INFINITY` when there is nothing to measure against, and
//! distribution indicators return `0.0` for fronts too small to have a
//! distribution.

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn nearest_distance(point: &[f64], set: &[Vec<f64>]) -> f64 {
    set.iter()
        .map(|q| euclidean(point, q))
        .fold(f64::INFINITY, f64::min)
}

fn check_dimensions(a: &[Vec<f64>], b: &[Vec<f64>]) {
    if let Some(first) = a.first().or_else(|| b.first()) {
        let m = first.len();
        assert!(
            a.iter().chain(b).all(|p| p.len() == m),
            "all objective vectors must have the same dimension"
        );
    }
}

/// Generational distance: mean Euclidean distance from each
/// approximation point to its nearest reference point.
///
/// ```
/// use u_moea::indicators::calculate_gd;
///
/// let reference = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
/// let approx = vec![vec![0.0, 2.0]];
/// assert_eq!(calculate_gd(&approx, &reference), 1.0);
/// ```
pub fn calculate_gd(approx: &[Vec<f64>], reference: &[Vec<f64>]) -> f64 {
    check_dimensions(approx, reference);
    if approx.is_empty() || reference.is_empty() {
        return f64::INFINITY;
    }
    approx
        .iter()
        .map(|a| nearest_distance(a, reference))
        .sum::<f64>()
        / approx.len() as f64
}

/// Inverted generational distance: mean Euclidean distance from each
/// reference point to its nearest approximation point.
///
/// Zero only when every reference point is matched exactly.
pub fn calculate_igd(approx: &[Vec<f64>], reference: &[Vec<f64>]) -> f64 {
    check_dimensions(approx, reference);
    if approx.is_empty() || reference.is_empty() {
        return f64::INFINITY;
    }
    reference
        .iter()
        .map(|r| nearest_distance(r, approx))
        .sum::<f64>()
        / reference.len() as f64
}

/// Spread (Δ) of a front: distribution uniformity and extent.
///
/// For two objectives this is Deb's Δ: the front is ordered by the first
/// objective, `d_i` are consecutive gaps, and `d_f`, `d_l` the distances
/// from the reference set's extreme points to the front's boundary
/// solutions:
///
/// `Δ = (d_f + d_l + Σ|d_i − d̄|) / (d_f + d_l + (N − 1)·d̄)`
///
/// For three or more objectives the generalized form (Zhou et al., 2006)
/// is used, with nearest-neighbour distances in place of consecutive gaps
/// and one extreme point per objective.
///
/// Without a reference set the extreme terms are zero. Lower is better;
/// 0 means perfectly uniform. Fronts with fewer than two points, or with
/// all points identical, yield 0.
pub fn calculate_spread(front: &[Vec<f64>], reference: Option<&[Vec<f64>]>) -> f64 {
    if let Some(r) = reference {
        check_dimensions(front, r);
    } else {
        check_dimensions(front, &[]);
    }
    if front.len() < 2 {
        return 0.0;
    }
    let m = front[0].len();
    let reference = reference.filter(|r| !r.is_empty());

    let (extreme_sum, gaps) = if m == 2 {
        let mut sorted: Vec<&Vec<f64>> = front.iter().collect();
        sorted.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));
        let gaps: Vec<f64> = sorted.windows(2).map(|w| euclidean(w[0], w[1])).collect();

        let extreme_sum = reference.map_or(0.0, |r| {
            let first = extreme_point(r, 0);
            let last = extreme_point(r, 1);
            euclidean(first, sorted[0]) + euclidean(last, sorted[sorted.len() - 1])
        });
        (extreme_sum, gaps)
    } else {
        let gaps: Vec<f64> = (0..front.len())
            .map(|i| nearest_neighbour_distance(front, i))
            .collect();
        let extreme_sum = reference.map_or(0.0, |r| {
            (0..m)
                .map(|k| nearest_distance(extreme_point(r, k), front))
                .sum()
        });
        (extreme_sum, gaps)
    };

    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    let deviation: f64 = gaps.iter().map(|d| (d - mean).abs()).sum();
    let denominator = extreme_sum + gaps.len() as f64 * mean;
    if denominator <= 0.0 {
        return 0.0;
    }
    (extreme_sum + deviation) / denominator
}

/// Point of `set` with the smallest value in objective `k`.
fn extreme_point(set: &[Vec<f64>], k: usize) -> &[f64] {
    set.iter()
        .min_by(|a, b| a[k].partial_cmp(&b[k]).unwrap_or(std::cmp::Ordering::Equal))
        .map(|p| p.as_slice())
        .unwrap_or(&[])
}

fn nearest_neighbour_distance(front: &[Vec<f64>], i: usize) -> f64 {
    front
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(_, q)| euclidean(&front[i], q))
        .fold(f64::INFINITY, f64::min)
}

/// Multiplicative ε-indicator.
///
/// The smallest factor ε ≥ 1 such that every reference point `r` is
/// ε-dominated by some approximation point `a`, i.e. `a_i <= ε · r_i` for
/// all objectives. Exactly 1.0 when the approximation contains the
/// reference set.
///
/// Intended for strictly positive objectives. A zero reference component
/// is matched only by a non-positive approximation component (ratio 1),
/// otherwise the ratio is infinite.
pub fn calculate_epsilon_indicator(approx: &[Vec<f64>], reference: &[Vec<f64>]) -> f64 {
    check_dimensions(approx, reference);
    if approx.is_empty() || reference.is_empty() {
        return f64::INFINITY;
    }
    let eps = reference
        .iter()
        .map(|r| {
            approx
                .iter()
                .map(|a| {
                    a.iter()
                        .zip(r)
                        .map(|(&ai, &ri)| component_ratio(ai, ri))
                        .fold(f64::NEG_INFINITY, f64::max)
                })
                .fold(f64::INFINITY, f64::min)
        })
        .fold(f64::NEG_INFINITY, f64::max);
    eps.max(1.0)
}

fn component_ratio(a: f64, r: f64) -> f64 {
    if a == r {
        1.0
    } else if r == 0.0 {
        if a <= 0.0 {
            1.0
        } else {
            f64::INFINITY
        }
    } else {
        a / r
    }
}

/// Spacing (Schott, 1995): standard deviation of each point's distance to
/// its nearest neighbour in the front. Lower is more uniform; fronts with
/// fewer than two points yield 0.
pub fn calculate_spacing(front: &[Vec<f64>]) -> f64 {
    check_dimensions(front, &[]);
    let n = front.len();
    if n < 2 {
        return 0.0;
    }
    let distances: Vec<f64> = (0..n).map(|i| nearest_neighbour_distance(front, i)).collect();
    let mean = distances.iter().sum::<f64>() / n as f64;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}
