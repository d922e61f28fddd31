//! Crossover operators for locus-based genomes.
//!
//! Both operators exchange genes position by position, so gene `i` of a
//! child always comes from gene `i` of a parent and stays inside
//! `[0, deg(i)]`.
//!
//! # Operators
//!
//! - [`uniform_crossover`]: per-locus coin flip
//! - [`two_point_crossover`]: swap of one contiguous segment
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Pizzuti (2008), "GA-Net", uniform crossover on locus-based genomes

use super::config::Crossover;
use rand::Rng;

impl Crossover {
    /// Recombines two parents into two children.
    ///
    /// # Panics
    /// Panics if the parents differ in length.
    pub fn apply<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut R,
    ) -> (Vec<usize>, Vec<usize>) {
        match self {
            Crossover::Uniform => uniform_crossover(parent1, parent2, rng),
            Crossover::TwoPoint => two_point_crossover(parent1, parent2, rng),
        }
    }
}

/// Uniform crossover.
///
/// Each locus goes to child 1 from either parent with probability 0.5;
/// child 2 receives the other parent's gene.
///
/// # Complexity
/// O(n)
///
/// # Panics
/// Panics if the parents differ in length.
pub fn uniform_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    for (a, b) in child1.iter_mut().zip(child2.iter_mut()) {
        if rng.random_bool(0.5) {
            std::mem::swap(a, b);
        }
    }
    (child1, child2)
}

/// Two-point crossover.
///
/// Picks a random segment `[start, end]` and swaps it between the parents.
///
/// # Complexity
/// O(n)
///
/// # Panics
/// Panics if the parents differ in length.
pub fn two_point_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    if n < 2 {
        return (child1, child2);
    }

    let (start, end) = random_segment(n, rng);
    child1[start..=end].swap_with_slice(&mut child2[start..=end]);
    (child1, child2)
}

/// Random segment `[start, end]` within `0..n` with `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
