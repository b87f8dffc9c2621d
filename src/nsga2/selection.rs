//! Crowded binary tournament.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
//!   Algorithm: NSGA-II", crowded-comparison operator

use crate::solution::Solution;
use rand::Rng;

/// Picks two distinct individuals at random and returns the index of the
/// winner.
///
/// Lower rank wins; on equal rank the larger crowding distance wins; a
/// full tie is settled by a fair coin. Ranks already encode constrained
/// dominance, so feasibility needs no separate check here.
///
/// # Complexity
/// O(1) per selection
pub fn crowded_tournament<R: Rng>(population: &[Solution], rng: &mut R) -> usize {
    let n = population.len();
    if n < 2 {
        return 0;
    }
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    crowded_compare(&population[a], &population[b], a, b, rng)
}

fn crowded_compare<R: Rng>(sa: &Solution, sb: &Solution, a: usize, b: usize, rng: &mut R) -> usize {
    if sa.rank() != sb.rank() {
        return if sa.rank() < sb.rank() { a } else { b };
    }
    if sa.crowding_distance() > sb.crowding_distance() {
        return a;
    }
    if sb.crowding_distance() > sa.crowding_distance() {
        return b;
    }
    if rng.random_bool(0.5) {
        a
    } else {
        b
    }
}
