//! Hypervolume indicator.

use crate::pareto::dominates;

/// Hypervolume of the region dominated by `points` and bounded by
/// `reference_point` (minimization).
///
/// Only points that strictly dominate the reference point in every
/// objective contribute; the rest add nothing. Duplicates and dominated
/// points are harmless.
///
/// # Algorithm
///
/// - 1D: distance from the best point to the reference
/// - 2D: sort by the first objective and sum the staircase boxes
/// - 3D: sweep the third objective, slicing into 2D staircases
/// - higher: recursive slicing on the last objective (exact, exponential)
///
/// # Panics
///
/// Panics if a point's length differs from the reference point's.
///
/// # Example
///
/// ```
/// use u_moea::indicators::hypervolume;
///
/// let front = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
/// assert_eq!(hypervolume(&front, &[4.0, 4.0]), 6.0);
/// ```
pub fn hypervolume(points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
    let d = reference_point.len();
    assert!(
        points.iter().all(|p| p.len() == d),
        "points must have the same dimension as the reference point"
    );
    if d == 0 {
        return 0.0;
    }

    let inside: Vec<Vec<f64>> = points
        .iter()
        .filter(|p| p.iter().zip(reference_point).all(|(&v, &r)| v < r))
        .cloned()
        .collect();
    if inside.is_empty() {
        return 0.0;
    }

    match d {
        1 => hv_1d(&inside, reference_point),
        2 => hv_2d(&inside, reference_point),
        3 => hv_3d(&inside, reference_point),
        _ => hv_recursive(&inside, reference_point),
    }
}

fn hv_1d(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let best = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
    reference[0] - best
}

/// Staircase sweep. Sorting by (f0, f1) lets dominated points be skipped
/// by tracking the lowest f1 seen so far.
fn hv_2d(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let mut sorted: Vec<(f64, f64)> = points.iter().map(|p| (p[0], p[1])).collect();
    sorted.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut area = 0.0;
    let mut prev_f1 = reference[1];
    for &(f0, f1) in &sorted {
        if f1 < prev_f1 {
            area += (reference[0] - f0) * (prev_f1 - f1);
            prev_f1 = f1;
        }
    }
    area
}

/// Slabs along the third objective: between consecutive f2 levels, the
/// dominated cross-section is the 2D hypervolume of all points at or
/// below that level.
fn hv_3d(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| a[2].partial_cmp(&b[2]).unwrap_or(std::cmp::Ordering::Equal));

    let sub_ref = [reference[0], reference[1]];
    let mut volume = 0.0;
    let mut slice: Vec<Vec<f64>> = Vec::with_capacity(sorted.len());
    for (i, p) in sorted.iter().enumerate() {
        slice.push(vec![p[0], p[1]]);
        let next_level = sorted.get(i + 1).map_or(reference[2], |q| q[2]);
        let depth = next_level - p[2];
        if depth > 0.0 {
            volume += depth * hv_2d(&slice, &sub_ref);
        }
    }
    volume
}

/// Exact slicing on the last objective for any dimension.
fn hv_recursive(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();
    match d {
        1 => return hv_1d(points, reference),
        2 => return hv_2d(points, reference),
        _ => {}
    }

    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| a[d - 1].partial_cmp(&b[d - 1]).unwrap_or(std::cmp::Ordering::Equal));

    let sub_ref = &reference[..d - 1];
    let mut volume = 0.0;
    let mut projected: Vec<Vec<f64>> = Vec::with_capacity(sorted.len());
    for (i, p) in sorted.iter().enumerate() {
        let candidate = p[..d - 1].to_vec();
        if !projected.iter().any(|q| q == &candidate || dominates(q, &candidate)) {
            projected.retain(|q| !dominates(&candidate, q));
            projected.push(candidate);
        }
        let next_level = sorted.get(i + 1).map_or(reference[d - 1], |q| q[d - 1]);
        let depth = next_level - p[d - 1];
        if depth > 0.0 {
            volume += depth * hv_recursive(&projected, sub_ref);
        }
    }
    volume
}
