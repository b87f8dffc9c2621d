//! Crowding distance (NSGA-II density estimator).

use crate::solution::Solution;

/// Density estimate for each point of one front.
///
/// Per objective, points are ordered by value (ties broken by input
/// index). The first and last in that order become `f64::INFINITY`; every
/// other point accumulates the normalized gap between its two neighbors,
/// `(next - prev) / (max - min)`. Objectives whose values are all equal,
/// or whose range is not finite (e.g. `f64::INFINITY` penalties), add
/// nothing to interior points.
///
/// Because contributions are summed, a point that is extreme in any one
/// objective stays infinite. Inputs with one or two points are entirely
/// infinite. Cost is O(m n log n).
///
/// ```
/// use u_moea::pareto::crowding_distance;
///
/// let front = [vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]];
/// let d = crowding_distance(&front);
/// assert!(d[0].is_infinite() && d[2].is_infinite());
/// assert_eq!(d[1], 2.0);
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    let mut crowd = vec![0.0f64; n];
    if n <= 2 {
        crowd.fill(f64::INFINITY);
        return crowd;
    }

    let mut order: Vec<usize> = (0..n).collect();
    for k in 0..objectives[0].len() {
        let value = |i: usize| objectives[i][k];
        order.sort_by(|&a, &b| value(a).total_cmp(&value(b)).then(a.cmp(&b)));

        let (first, last) = (order[0], order[n - 1]);
        crowd[first] = f64::INFINITY;
        crowd[last] = f64::INFINITY;

        let span = value(last) - value(first);
        if !(span.is_finite() && span > 0.0) {
            continue;
        }
        for w in order.windows(3) {
            crowd[w[1]] += (value(w[2]) - value(w[0])) / span;
        }
    }
    crowd
}

/// Computes crowding distances for the members of one front and writes
/// them into the population.
///
/// Returns the distances in `front` order. Only the crowding distance of
/// the listed members is touched.
pub fn assign_crowding_distance(population: &mut [Solution], front: &[usize], rank: usize) -> Vec<f64> {
    let objectives: Vec<Vec<f64>> = front
        .iter()
        .map(|&i| population[i].objectives().to_vec())
        .collect();
    let distances = crowding_distance(&objectives);
    for (&i, &d) in front.iter().zip(&distances) {
        population[i].set_ranking(rank, d, None);
    }
    distances
}
