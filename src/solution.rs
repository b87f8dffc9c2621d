//! Candidate solutions.
//!
//! A [`Solution`] pairs a decision vector with its evaluated objective
//! vector. Ranking metadata (Pareto rank, crowding distance, reference
//! association) is written by the optimizers every generation and is
//! always overwritten as a whole, never updated incrementally.

/// Association of a solution with an NSGA-III reference direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceAssociation {
    /// Index of the nearest reference point.
    pub index: usize,
    /// Perpendicular distance to that reference direction, measured in
    /// normalized objective space.
    pub distance: f64,
}

/// A single evaluated candidate.
///
/// Decision variables and objectives are fixed once the solution is
/// created; only the ranking metadata changes between generations.
///
/// ```
/// use u_moea::Solution;
///
/// let s = Solution::new(vec![0.25], vec![0.25, 0.75]);
/// assert_eq!(s.objectives(), &[0.25, 0.75]);
/// assert!(s.is_feasible());
/// assert_eq!(s.rank(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    variables: Vec<f64>,
    objectives: Vec<f64>,
    constraint_violation: f64,
    rank: usize,
    crowding_distance: f64,
    reference_association: Option<ReferenceAssociation>,
}

impl Solution {
    /// Creates a feasible solution from already computed objectives.
    pub fn new(variables: Vec<f64>, objectives: Vec<f64>) -> Self {
        Self {
            variables,
            objectives,
            constraint_violation: 0.0,
            rank: 0,
            crowding_distance: 0.0,
            reference_association: None,
        }
    }

    /// Sets the total constraint violation (negative values are treated as 0).
    pub fn with_constraint_violation(mut self, violation: f64) -> Self {
        self.constraint_violation = violation.max(0.0);
        self
    }

    /// Decision vector.
    pub fn variables(&self) -> &[f64] {
        &self.variables
    }

    /// Objective vector, in the problem's objective order.
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// Number of objectives.
    pub fn n_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Sum of constraint violations; 0 means feasible.
    pub fn constraint_violation(&self) -> f64 {
        self.constraint_violation
    }

    /// Returns `true` when no constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.constraint_violation <= 0.0
    }

    /// Pareto front index assigned in the last ranking (0 = best).
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Crowding distance assigned in the last ranking.
    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }

    /// Reference point association (NSGA-III only).
    pub fn reference_association(&self) -> Option<ReferenceAssociation> {
        self.reference_association
    }

    /// Overwrites all ranking metadata at once.
    pub(crate) fn set_ranking(
        &mut self,
        rank: usize,
        crowding_distance: f64,
        reference_association: Option<ReferenceAssociation>,
    ) {
        self.rank = rank;
        self.crowding_distance = crowding_distance;
        self.reference_association = reference_association;
    }
}

/// Stacks the objective vectors of `solutions` row by row.
pub(crate) fn objective_matrix(solutions: &[Solution]) -> Vec<Vec<f64>> {
    solutions.iter().map(|s| s.objectives.clone()).collect()
}
