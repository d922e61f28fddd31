//! Pareto utilities for NSGA-II.
//!
//! All objectives are **minimized**.
//!
//! # Algorithms
//!
//! - [`non_dominated_sort`]: fast non-dominated sorting
//! - [`crowding_distance`]: density estimate inside one front
//! - [`hypervolume`]: volume dominated by a point set, bounded by a
//!   reference point
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   *IEEE Trans. Evol. Comput.* 6(2), 182-197
//! - While et al. (2006), "A Faster Algorithm for Calculating Hypervolume",
//!   *IEEE Trans. Evol. Comput.* 10(1), 29-38

use crate::error::{BicommError, Result};
use std::cmp::Ordering;

/// Result of non-dominated sorting.
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Pareto rank of every solution (0 = first front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` holds the rank-0 indices.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// # Complexity
/// O(m * n²) for `n` solutions with `m` objectives.
///
/// # Panics
/// Panics if `objectives` is empty.
///
/// # Example
///
/// ```
/// use u_bicomm::moea::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![-0.4, 2.0],
///     vec![-0.3, 1.0],
///     vec![-0.2, 2.0], // dominated by the first
/// ];
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    assert!(n > 0, "objectives must not be empty");

    let mut domination_count = vec![0usize; n];
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&objectives[i], &objectives[j]) {
                Dominance::Left => {
                    dominates[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominates[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominates[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Dominance comparison result.
#[derive(Debug, PartialEq)]
enum Dominance {
    Left,
    Right,
    Neither,
}

fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better = false;
    let mut b_better = false;
    for (&va, &vb) in a.iter().zip(b) {
        if va < vb {
            a_better = true;
        } else if vb < va {
            b_better = true;
        }
    }
    match (a_better, b_better) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Whether `a` Pareto-dominates `b`.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Crowding distance of every solution of one front.
///
/// Boundary solutions of any objective get `f64::INFINITY`; interior ones
/// accumulate the normalized gap between their neighbors.
///
/// # Complexity
/// O(m * n log n).
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];
    let mut order: Vec<usize> = (0..n).collect();
    for k in 0..m {
        order.sort_by(|&a, &b| {
            objectives[a][k]
                .partial_cmp(&objectives[b][k])
                .unwrap_or(Ordering::Equal)
        });
        let (first, last) = (order[0], order[n - 1]);
        distances[first] = f64::INFINITY;
        distances[last] = f64::INFINITY;

        let range = objectives[last][k] - objectives[first][k];
        if range <= 0.0 {
            continue;
        }
        for w in order.windows(3) {
            let gap = objectives[w[2]][k] - objectives[w[0]][k];
            distances[w[1]] += gap / range;
        }
    }
    distances
}

/// Hypervolume dominated by `points` and bounded by `reference`.
///
/// Points that do not strictly dominate the reference in every objective
/// contribute nothing. An empty set has volume 0.
///
/// # Errors
/// [`BicommError::DimensionMismatch`] if the reference point's length
/// differs from a point's.
///
/// # Example
///
/// ```
/// use u_bicomm::moea::multi_objective::hypervolume;
///
/// let front = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
/// let hv = hypervolume(&front, &[4.0, 4.0]).unwrap();
/// assert!((hv - 6.0).abs() < 1e-12);
/// ```
pub fn hypervolume(points: &[Vec<f64>], reference: &[f64]) -> Result<f64> {
    let d = reference.len();
    if let Some(p) = points.iter().find(|p| p.len() != d) {
        return Err(BicommError::DimensionMismatch {
            got: d,
            expected: p.len(),
        });
    }
    if d == 0 {
        return Ok(0.0);
    }

    let inside: Vec<&[f64]> = points
        .iter()
        .map(Vec::as_slice)
        .filter(|p| p.iter().zip(reference).all(|(x, r)| x < r))
        .collect();
    Ok(slice_volume(inside, reference))
}

/// Recursive slicing over the last objective.
fn slice_volume(mut points: Vec<&[f64]>, reference: &[f64]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let d = reference.len();
    if d == 1 {
        let best = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return reference[0] - best;
    }

    let last = d - 1;
    points.sort_by(|a, b| a[last].partial_cmp(&b[last]).unwrap_or(Ordering::Equal));

    let mut volume = 0.0;
    for i in 0..points.len() {
        let upper = points.get(i + 1).map_or(reference[last], |p| p[last]);
        let depth = upper - points[i][last];
        if depth <= 0.0 {
            continue;
        }
        let slab: Vec<&[f64]> = points[..=i].iter().map(|p| &p[..last]).collect();
        volume += depth * slice_volume(slab, &reference[..last]);
    }
    volume
}
