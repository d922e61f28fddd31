//! Parent selection for NSGA-II.
//!
//! # References
//!
//! - Deb et al. (2002), crowded-comparison operator
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

/// Crowded-comparison order: lower rank wins, then larger crowding
/// distance.
pub fn crowded_better(rank_a: usize, crowd_a: f64, rank_b: usize, crowd_b: f64) -> bool {
    rank_a < rank_b || (rank_a == rank_b && crowd_a > crowd_b)
}

/// Binary tournament under the crowded-comparison order.
///
/// Draws two indices uniformly with replacement and returns the winner;
/// on a full tie the first draw wins.
///
/// # Complexity
/// O(1) per selection
///
/// # Panics
/// Panics if `ranks` is empty or `crowding` has a different length.
pub fn crowded_tournament<R: Rng>(ranks: &[usize], crowding: &[f64], rng: &mut R) -> usize {
    let n = ranks.len();
    assert!(n > 0, "cannot select from empty population");
    assert_eq!(n, crowding.len(), "ranks and crowding must align");

    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if crowded_better(ranks[b], crowding[b], ranks[a], crowding[a]) {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_crowded_order() {
        assert!(crowded_better(0, 0.1, 1, f64::INFINITY));
        assert!(crowded_better(1, 2.0, 1, 1.0));
        assert!(!crowded_better(1, 1.0, 1, 1.0));
        assert!(crowded_better(2, f64::INFINITY, 2, 5.0));
    }

    #[test]
    fn test_tournament_favors_low_rank() {
        let mut rng = create_rng(42);
        let ranks = vec![0, 1, 2, 3];
        let crowding = vec![1.0; 4];
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[crowded_tournament(&ranks, &crowding, &mut rng)] += 1;
        }
        // P(win) = (2(n - i) - 1) / n² : 7/16, 5/16, 3/16, 1/16
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
    }

    #[test]
    fn test_tournament_uses_crowding_within_rank() {
        let mut rng = create_rng(7);
        let ranks = vec![0, 0];
        let crowding = vec![0.5, f64::INFINITY];
        let picks_isolated = (0..1000)
            .filter(|_| crowded_tournament(&ranks, &crowding, &mut rng) == 1)
            .count();
        // index 1 wins unless both draws hit index 0
        assert!(picks_isolated > 650);
    }

    #[test]
    fn test_single_individual() {
        let mut rng = create_rng(1);
        assert_eq!(crowded_tournament(&[0], &[f64::INFINITY], &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn test_empty_panics() {
        let mut rng = create_rng(1);
        crowded_tournament(&[], &[], &mut rng);
    }
}
