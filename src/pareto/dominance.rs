//! Pareto dominance and fast non-dominated sorting.

use crate::solution::Solution;

/// Ranks and fronts produced by a non-dominated sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// `ranks[i]` is the front number of input `i`; rank 0 is non-dominated.
    pub ranks: Vec<usize>,

    /// Input indices per front, ascending within each front.
    pub fronts: Vec<Vec<usize>>,
}

/// Returns `true` if `a` Pareto-dominates `b` (minimization).
///
/// `a` dominates `b` when it is no worse in every objective and strictly
/// better in at least one. Equal vectors never dominate each other.
///
/// ```
/// use u_moea::pareto::dominates;
///
/// assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
/// assert!(!dominates(&[1.0, 3.0], &[3.0, 1.0]));
/// assert!(!dominates(&[2.0, 2.0], &[2.0, 2.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Constrained dominance (Deb's feasibility rules).
///
/// - a feasible solution dominates an infeasible one;
/// - between two infeasible solutions, the smaller violation dominates;
/// - between two feasible solutions, plain Pareto dominance applies.
pub fn constrained_dominates(a: &Solution, b: &Solution) -> bool {
    constrained_cmp(a, b) == Dominance::Left
}

/// Outcome of comparing two candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dominance {
    Left,
    Right,
    Neither,
}

impl Dominance {
    fn from_flags(left_wins_somewhere: bool, right_wins_somewhere: bool) -> Self {
        match (left_wins_somewhere, right_wins_somewhere) {
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            _ => Self::Neither,
        }
    }
}

/// Pareto comparison of two objective vectors under minimization.
pub(crate) fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len(), "objective vectors must have equal length");
    let left = a.iter().zip(b).any(|(x, y)| x < y);
    let right = a.iter().zip(b).any(|(x, y)| y < x);
    Dominance::from_flags(left, right)
}

fn constrained_cmp(a: &Solution, b: &Solution) -> Dominance {
    if a.is_feasible() && b.is_feasible() {
        return dominance_cmp(a.objectives(), b.objectives());
    }
    // At least one is infeasible; feasible counts as zero violation.
    let (va, vb) = (a.constraint_violation(), b.constraint_violation());
    Dominance::from_flags(va < vb, vb < va)
}

/// Partitions raw objective vectors into successive Pareto fronts.
///
/// Front 0 holds the points no other point dominates; front `k + 1` holds
/// those dominated only by members of fronts `0..=k`. Counting-based
/// (Deb et al., 2002), O(m n²). Empty input gives an empty result.
///
/// # Panics
///
/// If the vectors do not all have the same length.
///
/// ```
/// use u_moea::pareto::non_dominated_sort;
///
/// // (4, 4) is dominated by (3, 3).
/// let points = [vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0], vec![4.0, 4.0]];
/// let sorted = non_dominated_sort(&points);
/// assert_eq!(sorted.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(sorted.fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let width = objectives.first().map_or(0, Vec::len);
    assert!(
        objectives.iter().all(|o| o.len() == width),
        "objective vectors differ in length"
    );
    sort_by_dominance(objectives.len(), |i, j| {
        dominance_cmp(&objectives[i], &objectives[j])
    })
}

/// Non-dominated sort of a population under constrained dominance.
///
/// Feasible solutions always rank ahead of infeasible ones; without
/// constraints the result matches [`non_dominated_sort`] on the objective
/// matrix.
pub fn fast_non_dominated_sort(population: &[Solution]) -> NondominatedSortResult {
    sort_by_dominance(population.len(), |i, j| {
        constrained_cmp(&population[i], &population[j])
    })
}

fn sort_by_dominance<F>(n: usize, cmp: F) -> NondominatedSortResult
where
    F: Fn(usize, usize) -> Dominance,
{
    // beaten_by[i]: how many points dominate i. beats[i]: whom i dominates.
    let mut beaten_by = vec![0usize; n];
    let mut beats: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            let (winner, loser) = match cmp(i, j) {
                Dominance::Left => (i, j),
                Dominance::Right => (j, i),
                Dominance::Neither => continue,
            };
            beats[winner].push(loser);
            beaten_by[loser] += 1;
        }
    }

    let mut ranks = vec![0usize; n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut layer: Vec<usize> = (0..n).filter(|&i| beaten_by[i] == 0).collect();

    while !layer.is_empty() {
        let mut peeled = Vec::new();
        for &i in &layer {
            ranks[i] = fronts.len();
            for &j in &beats[i] {
                beaten_by[j] -= 1;
                if beaten_by[j] == 0 {
                    peeled.push(j);
                }
            }
        }
        peeled.sort_unstable();
        fronts.push(std::mem::replace(&mut layer, peeled));
    }

    NondominatedSortResult { ranks, fronts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lone_point_is_front_zero() {
        let sorted = non_dominated_sort(&[vec![1.0, 2.0]]);
        assert_eq!(sorted.ranks, vec![0]);
        assert_eq!(sorted.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_empty_input() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
    }

    #[test]
    fn test_clear_dominance_chain() {
        let chain = [vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let sorted = non_dominated_sort(&chain);
        assert_eq!(sorted.ranks, vec![0, 1, 2]);
        assert_eq!(sorted.fronts, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_mixed_fronts() {
        let objs = vec![
            vec![1.0, 5.0],
            vec![3.0, 3.0],
            vec![5.0, 1.0],
            vec![4.0, 4.0], // dominated by (3,3)
            vec![6.0, 6.0], // dominated by (4,4) as well
        ];
        assert_eq!(non_dominated_sort(&objs).ranks, vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_all_equal_share_front_zero() {
        let sorted = non_dominated_sort(&vec![vec![2.0, 2.0]; 3]);
        assert_eq!(sorted.ranks, vec![0, 0, 0]);
        assert_eq!(sorted.fronts, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_three_objectives_mutually_non_dominated() {
        let objs = vec![
            vec![1.0, 5.0, 3.0],
            vec![3.0, 1.0, 5.0],
            vec![5.0, 3.0, 1.0],
            vec![4.0, 4.0, 4.0],
        ];
        assert_eq!(non_dominated_sort(&objs).ranks, vec![0; 4]);
    }

    #[test]
    fn test_weak_dominance() {
        // Equal in one objective, better in the other.
        assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
        assert!(!dominates(&[1.0, 3.0], &[1.0, 2.0]));
    }

    #[test]
    fn test_constrained_dominance_rules() {
        let feasible = Solution::new(vec![0.0], vec![10.0, 10.0]);
        let slightly = Solution::new(vec![0.0], vec![0.0, 0.0]).with_constraint_violation(0.1);
        let badly = Solution::new(vec![0.0], vec![0.0, 0.0]).with_constraint_violation(2.0);

        assert!(constrained_dominates(&feasible, &slightly));
        assert!(!constrained_dominates(&slightly, &feasible));
        assert!(constrained_dominates(&slightly, &badly));
        assert!(!constrained_dominates(&badly, &badly.clone()));
    }

    #[test]
    fn test_population_sort_puts_feasible_first() {
        let pop = vec![
            Solution::new(vec![0.0], vec![0.0, 0.0]).with_constraint_violation(1.0),
            Solution::new(vec![0.0], vec![5.0, 5.0]),
            Solution::new(vec![0.0], vec![4.0, 6.0]),
        ];
        let result = fast_non_dominated_sort(&pop);
        assert_eq!(result.ranks, vec![1, 0, 0]);
        assert_eq!(result.fronts, vec![vec![1, 2], vec![0]]);
    }

    fn objective_matrix() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..4).prop_flat_map(|m| {
            prop::collection::vec(prop::collection::vec(0.0f64..10.0, m), 1..30)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_dominance_is_irreflexive(v in prop::collection::vec(-1e6f64..1e6, 1..6)) {
            prop_assert!(!dominates(&v, &v));
        }

        #[test]
        fn prop_sort_partitions_and_orders_fronts(objs in objective_matrix()) {
            let result = non_dominated_sort(&objs);

            // Every index appears in exactly one front.
            let mut seen = vec![0usize; objs.len()];
            for front in &result.fronts {
                for &i in front {
                    seen[i] += 1;
                }
            }
            prop_assert!(seen.iter().all(|&c| c == 1));

            for (k, front) in result.fronts.iter().enumerate() {
                for &i in front {
                    prop_assert_eq!(result.ranks[i], k);
                    // No member of a front dominates another member.
                    for &j in front {
                        prop_assert!(!dominates(&objs[i], &objs[j]));
                    }
                    // Every member of front k > 0 is dominated by front k-1.
                    if k > 0 {
                        let dominated = result.fronts[k - 1]
                            .iter()
                            .any(|&p| dominates(&objs[p], &objs[i]));
                        prop_assert!(dominated);
                    }
                }
            }
        }
    }
}
