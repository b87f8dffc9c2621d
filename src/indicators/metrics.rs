//! Aggregate performance report.

use super::distance::{
    calculate_epsilon_indicator, calculate_gd, calculate_igd, calculate_spacing, calculate_spread,
};
use super::hypervolume::hypervolume;

/// All quality indicators for one front.
///
/// Indicators that need a reference set are `None` when the evaluator was
/// built without one; likewise `hypervolume` needs a reference point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsReport {
    /// Number of points in the evaluated front.
    pub n_solutions: usize,
    /// Dominated volume bounded by the reference point (higher is better).
    pub hypervolume: Option<f64>,
    /// Inverted generational distance to the reference set.
    pub igd: Option<f64>,
    /// Generational distance from the front to the reference set.
    pub gd: Option<f64>,
    /// Multiplicative ε indicator against the reference set (1.0 = covers it).
    pub epsilon: Option<f64>,
    /// Deb's Δ spread; uses the reference set's extremes when available.
    pub spread: f64,
    /// Standard deviation of nearest-neighbor distances within the front.
    pub spacing: f64,
}

/// Evaluates fronts against a fixed reference set and reference point.
///
/// ```
/// use u_moea::indicators::PerformanceMetrics;
///
/// let reference = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
/// let metrics = PerformanceMetrics::new(Some(reference.clone()), Some(vec![4.0, 4.0]));
/// let report = metrics.evaluate(&reference);
///
/// assert_eq!(report.n_solutions, 3);
/// assert_eq!(report.igd, Some(0.0));
/// assert_eq!(report.epsilon, Some(1.0));
/// assert_eq!(report.hypervolume, Some(6.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    reference_set: Option<Vec<Vec<f64>>>,
    reference_point: Option<Vec<f64>>,
}

impl PerformanceMetrics {
    /// Creates an evaluator. Either reference may be omitted; the
    /// indicators that need it are then reported as `None`.
    pub fn new(reference_set: Option<Vec<Vec<f64>>>, reference_point: Option<Vec<f64>>) -> Self {
        Self {
            reference_set,
            reference_point,
        }
    }

    /// Reference set used by IGD, GD, ε and spread.
    pub fn reference_set(&self) -> Option<&[Vec<f64>]> {
        self.reference_set.as_deref()
    }

    /// Reference point used by hypervolume.
    pub fn reference_point(&self) -> Option<&[f64]> {
        self.reference_point.as_deref()
    }

    /// Computes every indicator for `front`.
    pub fn evaluate(&self, front: &[Vec<f64>]) -> MetricsReport {
        let reference = self.reference_set.as_deref();
        MetricsReport {
            n_solutions: front.len(),
            hypervolume: self.reference_point.as_deref().map(|r| hypervolume(front, r)),
            igd: reference.map(|r| calculate_igd(front, r)),
            gd: reference.map(|r| calculate_gd(front, r)),
            epsilon: reference.map(|r| calculate_epsilon_indicator(front, r)),
            spread: calculate_spread(front, reference),
            spacing: calculate_spacing(front),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_references() {
        let report = PerformanceMetrics::default().evaluate(&[vec![1.0, 2.0], vec![2.0, 1.0]]);
        assert_eq!(report.n_solutions, 2);
        assert!(report.hypervolume.is_none());
        assert!(report.igd.is_none());
        assert!(report.gd.is_none());
        assert!(report.epsilon.is_none());
        assert_eq!(report.spacing, 0.0);
    }

    #[test]
    fn test_worse_front_scores_worse() {
        let reference: Vec<Vec<f64>> = (0..=10)
            .map(|i| {
                let x = i as f64 / 10.0;
                vec![x + 0.1, 1.1 - x]
            })
            .collect();
        let metrics = PerformanceMetrics::new(Some(reference.clone()), Some(vec![2.0, 2.0]));
        let shifted: Vec<Vec<f64>> = reference
            .iter()
            .map(|p| vec![p[0] + 0.2, p[1] + 0.2])
            .collect();

        let good = metrics.evaluate(&reference);
        let bad = metrics.evaluate(&shifted);
        assert!(bad.igd.unwrap() > good.igd.unwrap());
        assert!(bad.gd.unwrap() > good.gd.unwrap());
        assert!(bad.epsilon.unwrap() > good.epsilon.unwrap());
        assert!(bad.hypervolume.unwrap() < good.hypervolume.unwrap());
    }
}
