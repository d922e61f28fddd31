//! Partition quality metrics.
//!
//! All functions take a membership slice (`membership[v]` = community of
//! `v`) and are pure: identical inputs give bit-identical outputs.
//!
//! # References
//!
//! - Newman & Girvan (2004), modularity
//! - Barber (2007), "Modularity and community detection in bipartite networks"
//! - Murata (2009), "Detecting communities from bipartite networks based on
//!   bipartite modularities"
//! - Hubert & Arabie (1985), adjusted Rand index
//! - Fortunato (2010), coverage, performance and conductance

use crate::graph::{BipartiteGraph, Side};
use std::collections::{BTreeMap, HashMap};

/// Newman modularity of a weighted undirected graph.
///
/// `Q = (1/2m) Σ_ij (A_ij − k_i k_j / 2m) δ(c_i, c_j)`, computed per
/// community as `Σ_c [L_c / m − (d_c / 2m)²]`. A graph with no edge weight
/// has modularity 0.
///
/// # Example
///
/// ```
/// use u_bicomm::community::metrics::modularity;
///
/// let edges = vec![(0, 2, 1.0), (0, 3, 1.0), (1, 2, 1.0)];
/// assert_eq!(modularity(4, edges, &[0, 0, 0, 0]), 0.0);
/// ```
pub fn modularity<I>(n: usize, edges: I, membership: &[usize]) -> f64
where
    I: IntoIterator<Item = (usize, usize, f64)>,
{
    debug_assert_eq!(membership.len(), n);
    let k = label_bound(membership);
    let mut inside = vec![0.0f64; k];
    let mut degree = vec![0.0f64; k];
    let mut m = 0.0f64;

    for (u, v, w) in edges {
        let (cu, cv) = (membership[u], membership[v]);
        m += w;
        degree[cu] += w;
        degree[cv] += w;
        if cu == cv {
            inside[cu] += w;
        }
    }

    if m <= 0.0 {
        return 0.0;
    }

    let two_m = 2.0 * m;
    inside
        .iter()
        .zip(degree.iter())
        .map(|(&l, &d)| l / m - (d / two_m) * (d / two_m))
        .sum()
}

/// Barber's bipartite modularity.
///
/// Null model restricted to lower/upper pairs:
/// `Q_B = (1/m) Σ_{i∈L, j∈U} (A_ij − k_i d_j / m) δ(c_i, c_j)`.
pub fn barber_modularity(graph: &BipartiteGraph, membership: &[usize]) -> f64 {
    let k = label_bound(membership);
    let mut inside = vec![0.0f64; k];
    let mut lower_strength = vec![0.0f64; k];
    let mut upper_strength = vec![0.0f64; k];

    for (u, v, w) in graph.weighted_edges() {
        let (cu, cv) = (membership[u], membership[v]);
        if cu == cv {
            inside[cu] += w;
        }
        for (x, c) in [(u, cu), (v, cv)] {
            match graph.side(x) {
                Side::Lower => lower_strength[c] += w,
                Side::Upper => upper_strength[c] += w,
            }
        }
    }

    let m = graph.total_weight();
    if m <= 0.0 {
        return 0.0;
    }
    (0..k)
        .map(|c| inside[c] / m - lower_strength[c] * upper_strength[c] / (m * m))
        .sum()
}

/// Murata's bipartite modularity.
///
/// `e[l][m]` is the weight between lower-side community `l` and upper-side
/// community `m`, divided by `2·Σw`, and `a[l]` is the row sum of `e`. Each
/// lower-side community is matched to its strongest upper-side partner `m*`:
/// `Q = Σ_l (e[l][m*] − a[l]·a[m*])`. Ties pick the lowest partner id.
pub fn murata_modularity(graph: &BipartiteGraph, membership: &[usize]) -> f64 {
    let two_m = 2.0 * graph.total_weight();
    if two_m <= 0.0 {
        return 0.0;
    }

    let k = label_bound(membership);
    let mut e: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    let mut a = vec![0.0f64; k];
    for (u, v, w) in graph.weighted_edges() {
        let (l, r) = match graph.side(u) {
            Side::Lower => (u, v),
            Side::Upper => (v, u),
        };
        let (cl, cr) = (membership[l], membership[r]);
        let share = w / two_m;
        *e.entry((cl, cr)).or_insert(0.0) += share;
        a[cl] += share;
    }

    let mut row_best: Vec<Option<(f64, usize)>> = vec![None; k];
    for (&(cl, cr), &value) in &e {
        if row_best[cl].map_or(true, |(best, _)| value > best) {
            row_best[cl] = Some((value, cr));
        }
    }

    row_best
        .iter()
        .enumerate()
        .filter_map(|(cl, best)| best.map(|(value, cr)| value - a[cl] * a[cr]))
        .sum()
}

/// Adjusted Rand index between two labelings of the same vertices.
///
/// Returns 1.0 when the chance-corrected denominator vanishes (for example
/// when both labelings are a single cluster).
///
/// # Panics
/// Panics if the labelings differ in length.
pub fn adjusted_rand_index(a: &[usize], b: &[usize]) -> f64 {
    assert_eq!(a.len(), b.len(), "labelings must cover the same vertices");
    let n = a.len();
    if n < 2 {
        return 1.0;
    }

    let mut contingency: HashMap<(usize, usize), u64> = HashMap::new();
    let mut a_counts: HashMap<usize, u64> = HashMap::new();
    let mut b_counts: HashMap<usize, u64> = HashMap::new();
    for (&x, &y) in a.iter().zip(b) {
        *contingency.entry((x, y)).or_insert(0) += 1;
        *a_counts.entry(x).or_insert(0) += 1;
        *b_counts.entry(y).or_insert(0) += 1;
    }

    let index: f64 = contingency.values().map(|&c| pairs(c)).sum();
    let sum_a: f64 = a_counts.values().map(|&c| pairs(c)).sum();
    let sum_b: f64 = b_counts.values().map(|&c| pairs(c)).sum();
    let expected = sum_a * sum_b / pairs(n as u64);
    let max_index = 0.5 * (sum_a + sum_b);

    let denominator = max_index - expected;
    if denominator.abs() < f64::EPSILON {
        return 1.0;
    }
    (index - expected) / denominator
}

/// Bipartite performance: the fraction of lower/upper pairs classified
/// correctly.
///
/// A pair `(i ∈ L, j ∈ U)` is correct when it is an edge inside a community
/// or a non-edge across communities. Edge weights are ignored.
pub fn performance(graph: &BipartiteGraph, membership: &[usize]) -> f64 {
    let k = label_bound(membership);
    let mut lower = vec![0u64; k];
    let mut upper = vec![0u64; k];
    for (v, &c) in membership.iter().enumerate() {
        match graph.side(v) {
            Side::Lower => lower[c] += 1,
            Side::Upper => upper[c] += 1,
        }
    }

    let total_pairs: u64 = lower.iter().sum::<u64>() * upper.iter().sum::<u64>();
    if total_pairs == 0 {
        return 0.0;
    }
    let same_pairs: u64 = lower.iter().zip(&upper).map(|(&l, &u)| l * u).sum();
    let edges = graph.edge_count() as u64;
    let inside = intra_edge_count(graph, membership) as u64;

    // correct = inside + (non-edges across communities)
    let correct = inside + (total_pairs - same_pairs) - (edges - inside);
    correct as f64 / total_pairs as f64
}

/// Fraction of edges whose endpoints share a community.
pub fn coverage(graph: &BipartiteGraph, membership: &[usize]) -> f64 {
    intra_edge_count(graph, membership) as f64 / graph.edge_count() as f64
}

/// Mean conductance over communities.
///
/// The conductance of community `S` is `cut(S) / vol(S)`, the weight
/// leaving `S` over the total weight incident to it. A community with no
/// volume contributes 0.
pub fn conductance(graph: &BipartiteGraph, membership: &[usize]) -> f64 {
    let k = label_bound(membership);
    if k == 0 {
        return 0.0;
    }
    let mut cut = vec![0.0f64; k];
    let mut volume = vec![0.0f64; k];
    for (u, v, w) in graph.weighted_edges() {
        let (cu, cv) = (membership[u], membership[v]);
        volume[cu] += w;
        volume[cv] += w;
        if cu != cv {
            cut[cu] += w;
            cut[cv] += w;
        }
    }

    let sum: f64 = cut
        .iter()
        .zip(&volume)
        .map(|(&c, &vol)| if vol > 0.0 { c / vol } else { 0.0 })
        .sum();
    sum / k as f64
}

/// Gini index of a community size distribution.
///
/// Lorenz-curve estimate by rectangles, `max(0, 1 − (2/n) Σ_i L_i)` where
/// `L_i` is the cumulative share of the `i` smallest communities. Equal
/// sizes give 0; a single dominant community pushes it toward 1.
pub fn gini(sizes: &[usize]) -> f64 {
    let n = sizes.len();
    let total: usize = sizes.iter().sum();
    if n == 0 || total == 0 {
        return 0.0;
    }
    let mut sorted = sizes.to_vec();
    sorted.sort_unstable();
    let mut running = 0usize;
    let lorenz: f64 = sorted
        .iter()
        .map(|&x| {
            running += x;
            running as f64 / total as f64
        })
        .sum();
    (1.0 - 2.0 * lorenz / n as f64).max(0.0)
}

fn intra_edge_count(graph: &BipartiteGraph, membership: &[usize]) -> usize {
    graph
        .edges()
        .iter()
        .filter(|&&(u, v)| membership[u] == membership[v])
        .count()
}

fn pairs(c: u64) -> f64 {
    (c * c.saturating_sub(1)) as f64 / 2.0
}

fn label_bound(membership: &[usize]) -> usize {
    membership.iter().max().map_or(0, |&m| m + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> BipartiteGraph {
        // Lower {0, 1}, Upper {2, 3}, edges (0,2), (0,3), (1,2)
        BipartiteGraph::from_biadjacency(2, 2, &[(0, 0), (0, 1), (1, 0)]).unwrap()
    }

    /// Two K(2,2) blocks joined by one edge.
    fn two_squares() -> BipartiteGraph {
        BipartiteGraph::from_biadjacency(
            4,
            4,
            &[
                (0, 0),
                (0, 1),
                (1, 0),
                (1, 1),
                (2, 2),
                (2, 3),
                (3, 2),
                (3, 3),
                (1, 2),
            ],
        )
        .unwrap()
    }

    const BLOCKS: [usize; 8] = [0, 0, 1, 1, 0, 0, 1, 1];

    #[test]
    fn test_modularity_single_community_is_zero() {
        let g = small();
        assert_eq!(modularity(4, g.weighted_edges(), &[0, 0, 0, 0]), 0.0);
    }

    #[test]
    fn test_modularity_two_blocks() {
        let g = two_squares();
        // m = 9; each block: 4 inside edges, degree 9
        let expected = 2.0 * (4.0 / 9.0 - 0.25);
        let q = modularity(8, g.weighted_edges(), &BLOCKS);
        assert!((q - expected).abs() < 1e-12, "got {q}");
    }

    #[test]
    fn test_modularity_singletons_negative() {
        let g = small();
        let q = modularity(4, g.weighted_edges(), &[0, 1, 2, 3]);
        assert!(q < 0.0);
        assert!(q >= -1.0);
    }

    #[test]
    fn test_modularity_empty_edges() {
        assert_eq!(modularity(2, Vec::new(), &[0, 1]), 0.0);
    }

    #[test]
    fn test_barber_single_community_is_zero() {
        let g = small();
        assert!(barber_modularity(&g, &[0, 0, 0, 0]).abs() < 1e-12);
    }

    #[test]
    fn test_barber_two_blocks() {
        let g = two_squares();
        // the bridge (1, 6) puts one extra unit of lower strength in block 0
        // and one of upper strength in block 1: 5 x 4 on both sides
        let expected = 2.0 * (4.0 / 9.0 - 5.0 * 4.0 / 81.0);
        let q = barber_modularity(&g, &BLOCKS);
        assert!((q - expected).abs() < 1e-12, "got {q}");
    }

    #[test]
    fn test_murata_single_community() {
        let g = small();
        // e = [[0.5]], a = [0.5]: 0.5 - 0.25
        assert!((murata_modularity(&g, &[0, 0, 0, 0]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_murata_two_blocks() {
        let g = two_squares();
        // e = [[4/18, 1/18], [0, 4/18]], a = [5/18, 4/18]
        let expected = (4.0 / 18.0 - (5.0 / 18.0) * (5.0 / 18.0))
            + (4.0 / 18.0 - (4.0 / 18.0) * (4.0 / 18.0));
        let q = murata_modularity(&g, &BLOCKS);
        assert!((q - expected).abs() < 1e-12, "got {q}");
    }

    #[test]
    fn test_murata_prefers_blocks() {
        let g = two_squares();
        let blocks = murata_modularity(&g, &BLOCKS);
        let single = murata_modularity(&g, &[0; 8]);
        assert!(blocks > single, "blocks {blocks} vs single {single}");
    }

    #[test]
    fn test_ari_identical_and_permuted() {
        assert!((adjusted_rand_index(&[0, 0, 1, 1], &[0, 0, 1, 1]) - 1.0).abs() < 1e-12);
        assert!((adjusted_rand_index(&[0, 0, 1, 1], &[5, 5, 2, 2]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ari_known_value() {
        // sklearn: adjusted_rand_score([0,0,1,1], [0,0,1,2]) = 0.5714...
        let ari = adjusted_rand_index(&[0, 0, 1, 1], &[0, 0, 1, 2]);
        assert!((ari - 4.0 / 7.0).abs() < 1e-12, "got {ari}");
    }

    #[test]
    fn test_ari_degenerate() {
        assert_eq!(adjusted_rand_index(&[0, 0, 0], &[1, 1, 1]), 1.0);
    }

    #[test]
    fn test_performance() {
        let g = small();
        // single community: only the 3 edges are correct out of 4 pairs
        assert!((performance(&g, &[0, 0, 0, 0]) - 0.75).abs() < 1e-12);
        // singletons: the one non-edge (1,3) is correct
        assert!((performance(&g, &[0, 1, 2, 3]) - 0.25).abs() < 1e-12);
        // {0,2,3} {1}: edges (0,2),(0,3) correct, (1,2) wrong, (1,3) correct
        assert!((performance(&g, &[0, 1, 0, 0]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_coverage() {
        let g = two_squares();
        assert!((coverage(&g, &BLOCKS) - 8.0 / 9.0).abs() < 1e-12);
        assert_eq!(coverage(&g, &[0; 8]), 1.0);
    }

    #[test]
    fn test_conductance() {
        let g = two_squares();
        // each block: cut 1, volume 9, complement 9
        assert!((conductance(&g, &BLOCKS) - 1.0 / 9.0).abs() < 1e-12);
        assert_eq!(conductance(&g, &[0; 8]), 0.0);
    }

    #[test]
    fn test_conductance_uses_own_volume() {
        // star L0 - U1, U2, U3 split as {L0, U1, U2} and {U3}
        let g = BipartiteGraph::from_biadjacency(1, 3, &[(0, 0), (0, 1), (0, 2)]).unwrap();
        // cut 1 over volume 5, then cut 1 over volume 1
        let c = conductance(&g, &[0, 0, 0, 1]);
        assert!((c - 0.6).abs() < 1e-12, "got {c}");
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[3, 3, 3]), 0.0);
        assert_eq!(gini(&[5]), 0.0);
        // two communities never exceed the rectangle bias
        assert_eq!(gini(&[3, 1]), 0.0);
        // lorenz [1/12, 2/12, 3/12, 1]: 1 - (2/4)·1.5
        assert!((gini(&[9, 1, 1, 1]) - 0.25).abs() < 1e-12);
    }
}
