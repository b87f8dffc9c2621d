//! Problem definition.
//!
//! A [`Problem`] is an immutable description of what is being optimized:
//! an ordered list of objective functions (all minimized), box bounds for
//! the decision variables, and optional inequality constraints used as
//! feasibility penalties.
//!
//! # Example
//!
//! ```
//! use u_moea::Problem;
//!
//! // Schaffer N.1 on a single variable in [0, 2].
//! let problem = Problem::builder(vec![0.0], vec![2.0])
//!     .objective(|x| x[0] * x[0])
//!     .objective(|x| (x[0] - 2.0).powi(2))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(problem.n_objectives(), 2);
//! assert_eq!(problem.evaluate(&[1.0]).unwrap(), vec![1.0, 1.0]);
//! ```

use crate::error::{MoeaError, ObjectiveError, Result};
use crate::solution::Solution;
use std::fmt;

/// An objective function. Lower values are better.
pub type ObjectiveFn = Box<dyn Fn(&[f64]) -> std::result::Result<f64, ObjectiveError> + Send + Sync>;

/// An inequality constraint `g(x) <= 0`. Positive values are violations.
pub type ConstraintFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Immutable multi-objective problem.
///
/// Built with [`Problem::builder`]. All objectives are **minimized**;
/// negate an objective to maximize it.
pub struct Problem {
    objectives: Vec<ObjectiveFn>,
    constraints: Vec<ConstraintFn>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("n_objectives", &self.objectives.len())
            .field("n_constraints", &self.constraints.len())
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish()
    }
}

impl Problem {
    /// Starts building a problem over the box `[lower, upper]`.
    pub fn builder(lower: Vec<f64>, upper: Vec<f64>) -> ProblemBuilder {
        ProblemBuilder {
            objectives: Vec::new(),
            constraints: Vec::new(),
            lower,
            upper,
        }
    }

    /// Number of objectives `m`.
    pub fn n_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Number of decision variables `n`.
    pub fn n_variables(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds, one per variable.
    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds, one per variable.
    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper
    }

    /// Returns `true` if the problem declares constraints.
    pub fn is_constrained(&self) -> bool {
        !self.constraints.is_empty()
    }

    /// Evaluates `x` into an objective vector of length `m`, in
    /// declaration order.
    ///
    /// On failure, returns the index of the failing objective with the
    /// error. NaN results are reported as failures.
    pub fn evaluate(&self, x: &[f64]) -> std::result::Result<Vec<f64>, (usize, ObjectiveError)> {
        let mut values = Vec::with_capacity(self.objectives.len());
        for (k, objective) in self.objectives.iter().enumerate() {
            let value = objective(x).map_err(|e| (k, e))?;
            if value.is_nan() {
                return Err((k, ObjectiveError::new("objective returned NaN")));
            }
            values.push(value);
        }
        Ok(values)
    }

    /// Total constraint violation of `x`: the sum of positive parts.
    pub fn constraint_violation(&self, x: &[f64]) -> f64 {
        self.constraints
            .iter()
            .map(|g| {
                let v = g(x);
                if v > 0.0 {
                    v
                } else {
                    0.0
                }
            })
            .sum()
    }

    /// Evaluates `x` into a [`Solution`], tagging failures with the
    /// generation and batch index for reproduction.
    pub fn create_solution(&self, x: Vec<f64>, generation: usize, index: usize) -> Result<Solution> {
        let objectives = self
            .evaluate(&x)
            .map_err(|(objective, source)| MoeaError::Evaluation {
                generation,
                index,
                objective,
                source,
            })?;
        let violation = self.constraint_violation(&x);
        Ok(Solution::new(x, objectives).with_constraint_violation(violation))
    }

    /// Clamps `x` into the problem bounds.
    pub fn clip(&self, x: &mut [f64]) {
        for ((v, &lo), &hi) in x.iter_mut().zip(&self.lower).zip(&self.upper) {
            *v = v.clamp(lo, hi);
        }
    }
}

/// Builder for [`Problem`].
pub struct ProblemBuilder {
    objectives: Vec<ObjectiveFn>,
    constraints: Vec<ConstraintFn>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ProblemBuilder {
    /// Appends an infallible objective.
    pub fn objective<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.objectives.push(Box::new(move |x| Ok(f(x))));
        self
    }

    /// Appends an objective that may fail. A failure aborts the run.
    pub fn try_objective<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> std::result::Result<f64, ObjectiveError> + Send + Sync + 'static,
    {
        self.objectives.push(Box::new(f));
        self
    }

    /// Appends an inequality constraint `g(x) <= 0`.
    pub fn constraint<G>(mut self, g: G) -> Self
    where
        G: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.constraints.push(Box::new(g));
        self
    }

    /// Validates and builds the problem.
    ///
    /// # Errors
    ///
    /// [`MoeaError::Configuration`] if there are no objectives, no
    /// variables, the bound vectors differ in length, a bound is not
    /// finite, or some `lower[i] >= upper[i]`.
    pub fn build(self) -> Result<Problem> {
        if self.objectives.is_empty() {
            return Err(MoeaError::config("problem must declare at least one objective"));
        }
        if self.lower.is_empty() {
            return Err(MoeaError::config("problem must have at least one variable"));
        }
        if self.lower.len() != self.upper.len() {
            return Err(MoeaError::config(format!(
                "bounds length mismatch: {} lower vs {} upper",
                self.lower.len(),
                self.upper.len()
            )));
        }
        for (i, (&lo, &hi)) in self.lower.iter().zip(&self.upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(MoeaError::config(format!("bounds of variable {i} must be finite")));
            }
            if lo >= hi {
                return Err(MoeaError::config(format!(
                    "variable {i}: lower bound {lo} must be below upper bound {hi}"
                )));
            }
        }
        Ok(Problem {
            objectives: self.objectives,
            constraints: self.constraints,
            lower: self.lower,
            upper: self.upper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_objectives() -> Problem {
        Problem::builder(vec![0.0], vec![1.0])
            .objective(|x| x[0])
            .objective(|x| 1.0 - x[0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_evaluate_in_declaration_order() {
        let p = two_objectives();
        assert_eq!(p.evaluate(&[0.25]).unwrap(), vec![0.25, 0.75]);
        assert_eq!(p.n_objectives(), 2);
        assert_eq!(p.n_variables(), 1);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = Problem::builder(vec![1.0], vec![1.0])
            .objective(|x| x[0])
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rejects_mismatched_bounds() {
        let err = Problem::builder(vec![0.0, 0.0], vec![1.0])
            .objective(|x| x[0])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_rejects_missing_objectives() {
        assert!(Problem::builder(vec![0.0], vec![1.0]).build().is_err());
    }

    #[test]
    fn test_failing_objective_reports_context() {
        let p = Problem::builder(vec![0.0], vec![1.0])
            .objective(|x| x[0])
            .try_objective(|_| Err(ObjectiveError::new("solver crashed")))
            .build()
            .unwrap();
        match p.create_solution(vec![0.5], 4, 9) {
            Err(MoeaError::Evaluation {
                generation,
                index,
                objective,
                source,
            }) => {
                assert_eq!((generation, index, objective), (4, 9, 1));
                assert_eq!(source.message(), "solver crashed");
            }
            other => panic!("expected evaluation error, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_is_an_evaluation_failure() {
        let p = Problem::builder(vec![0.0], vec![1.0])
            .objective(|_| f64::NAN)
            .build()
            .unwrap();
        assert!(p.evaluate(&[0.5]).is_err());
    }

    #[test]
    fn test_constraint_violation_sums_positive_parts() {
        let p = Problem::builder(vec![0.0, 0.0], vec![1.0, 1.0])
            .objective(|x| x[0])
            .constraint(|x| x[0] + x[1] - 1.0)
            .constraint(|x| -x[0])
            .build()
            .unwrap();
        assert!(p.is_constrained());
        assert_eq!(p.constraint_violation(&[0.2, 0.3]), 0.0);
        assert!((p.constraint_violation(&[0.9, 0.6]) - 0.5).abs() < 1e-12);

        let s = p.create_solution(vec![0.9, 0.6], 0, 0).unwrap();
        assert!(!s.is_feasible());
    }

    #[test]
    fn test_clip() {
        let p = Problem::builder(vec![0.0, -1.0], vec![1.0, 1.0])
            .objective(|x| x[0])
            .build()
            .unwrap();
        let mut x = vec![2.0, -3.0];
        p.clip(&mut x);
        assert_eq!(x, vec![1.0, -1.0]);
    }
}
