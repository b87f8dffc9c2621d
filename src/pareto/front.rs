//! Non-dominated archive.

use super::dominance::{dominance_cmp, Dominance};
use crate::indicators::hypervolume;
use crate::solution::{objective_matrix, Solution};

/// A set of mutually non-dominated solutions.
///
/// Invariant: for any two members `a`, `b`, neither dominates the other
/// and their objective vectors differ. Every optimizer returns its result
/// as a `ParetoFront`.
///
/// ```
/// use u_moea::{ParetoFront, Solution};
///
/// let mut front = ParetoFront::new();
/// assert!(front.add(Solution::new(vec![0.0], vec![1.0, 4.0])));
/// assert!(front.add(Solution::new(vec![1.0], vec![4.0, 1.0])));
/// // Dominated by (1, 4): rejected.
/// assert!(!front.add(Solution::new(vec![2.0], vec![2.0, 5.0])));
/// // Dominates (4, 1): inserted, (4, 1) is evicted.
/// assert!(front.add(Solution::new(vec![3.0], vec![3.0, 1.0])));
/// assert_eq!(front.size(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParetoFront {
    solutions: Vec<Solution>,
}

impl ParetoFront {
    /// Creates an empty front.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a front by adding each solution in order.
    pub fn from_solutions<I>(solutions: I) -> Self
    where
        I: IntoIterator<Item = Solution>,
    {
        let mut front = Self::new();
        for s in solutions {
            front.add(s);
        }
        front
    }

    /// Offers `solution` to the archive.
    ///
    /// Returns `false` without touching the archive if a member dominates
    /// the candidate or has an identical objective vector. Otherwise the
    /// candidate is inserted, every member it dominates is removed, and
    /// `true` is returned.
    pub fn add(&mut self, solution: Solution) -> bool {
        let candidate = solution.objectives();
        let rejected = self.solutions.iter().any(|member| {
            let objs = member.objectives();
            objs == candidate || dominance_cmp(objs, candidate) == Dominance::Left
        });
        if rejected {
            return false;
        }
        self.solutions
            .retain(|member| dominance_cmp(candidate, member.objectives()) != Dominance::Left);
        self.solutions.push(solution);
        true
    }

    /// Number of members.
    pub fn size(&self) -> usize {
        self.solutions.len()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Returns `true` if the archive holds no solution.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Members in insertion order (after evictions).
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Iterates over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Consumes the archive, returning its members.
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    /// Row-major objective matrix of all members, one row per member.
    pub fn get_objectives(&self) -> Vec<Vec<f64>> {
        objective_matrix(&self.solutions)
    }

    /// Decision vectors of all members, in the same order as
    /// [`get_objectives`](Self::get_objectives).
    pub fn get_variables(&self) -> Vec<Vec<f64>> {
        self.solutions.iter().map(|s| s.variables().to_vec()).collect()
    }

    /// Hypervolume of the archive with respect to `reference_point`.
    pub fn hypervolume(&self, reference_point: &[f64]) -> f64 {
        hypervolume(&self.get_objectives(), reference_point)
    }
}

impl<'a> IntoIterator for &'a ParetoFront {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}
