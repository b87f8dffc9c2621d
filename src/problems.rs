//! Standard benchmark problems.
//!
//! | Problem | Objectives | Variables | Pareto-optimal set |
//! |---------|-----------|-----------|--------------------|
//! | [`schaffer_n1`] | 2 | 1 | `x ∈ [0, 2]` |
//! | [`zdt1`] | 2 | `n` | `x_1 ∈ [0, 1]`, rest 0 (convex front) |
//! | [`zdt2`] | 2 | `n` | `x_1 ∈ [0, 1]`, rest 0 (concave front) |
//! | [`dtlz2`] | `m` | `n ≥ m` | `x_m..x_n = 0.5` (unit sphere octant) |
//!
//! # References
//!
//! - Schaffer (1985), "Multiple Objective Optimization with Vector
//!   Evaluated Genetic Algorithms"
//! - Zitzler, Deb & Thiele (2000), "Comparison of Multiobjective
//!   Evolutionary Algorithms: Empirical Results"
//! - Deb, Thiele, Laumanns & Zitzler (2002), "Scalable Multi-Objective
//!   Optimization Test Problems"

use crate::error::{MoeaError, Result};
use crate::problem::Problem;
use std::f64::consts::FRAC_PI_2;

/// Schaffer N.1: `f1 = x²`, `f2 = (x − 2)²` on `x ∈ [−10, 10]`.
pub fn schaffer_n1() -> Result<Problem> {
    Problem::builder(vec![-10.0], vec![10.0])
        .objective(|x| x[0] * x[0])
        .objective(|x| (x[0] - 2.0).powi(2))
        .build()
}

fn zdt_g(x: &[f64]) -> f64 {
    if x.len() < 2 {
        return 1.0;
    }
    1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64
}

/// ZDT1 with `n_variables` variables in `[0, 1]`.
///
/// ```
/// let p = u_moea::problems::zdt1(30).unwrap();
/// let mut x = vec![0.0; 30];
/// x[0] = 0.25;
/// assert_eq!(p.evaluate(&x).unwrap(), vec![0.25, 0.5]);
/// ```
pub fn zdt1(n_variables: usize) -> Result<Problem> {
    Problem::builder(vec![0.0; n_variables], vec![1.0; n_variables])
        .objective(|x| x[0])
        .objective(|x| {
            let g = zdt_g(x);
            g * (1.0 - (x[0] / g).sqrt())
        })
        .build()
}

/// ZDT2 with `n_variables` variables in `[0, 1]`.
pub fn zdt2(n_variables: usize) -> Result<Problem> {
    Problem::builder(vec![0.0; n_variables], vec![1.0; n_variables])
        .objective(|x| x[0])
        .objective(|x| {
            let g = zdt_g(x);
            g * (1.0 - (x[0] / g).powi(2))
        })
        .build()
}

/// DTLZ2 with `n_objectives` objectives and `n_variables` variables in
/// `[0, 1]`. The Pareto front is the positive octant of the unit sphere.
///
/// # Errors
///
/// [`MoeaError::Configuration`] if `n_objectives < 2` or
/// `n_variables < n_objectives`.
pub fn dtlz2(n_objectives: usize, n_variables: usize) -> Result<Problem> {
    if n_objectives < 2 {
        return Err(MoeaError::config("DTLZ2 needs at least 2 objectives"));
    }
    if n_variables < n_objectives {
        return Err(MoeaError::config(format!(
            "DTLZ2 needs at least {n_objectives} variables, got {n_variables}"
        )));
    }

    let m = n_objectives;
    let mut builder = Problem::builder(vec![0.0; n_variables], vec![1.0; n_variables]);
    for j in 0..m {
        builder = builder.objective(move |x| {
            let g: f64 = x[m - 1..].iter().map(|v| (v - 0.5).powi(2)).sum();
            let mut f = 1.0 + g;
            for v in &x[..m - 1 - j] {
                f *= (v * FRAC_PI_2).cos();
            }
            if j > 0 {
                f *= (x[m - 1 - j] * FRAC_PI_2).sin();
            }
            f
        });
    }
    builder.build()
}
