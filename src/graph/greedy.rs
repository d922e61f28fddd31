//! Greedy modularity agglomeration (Clauset–Newman–Moore).
//!
//! Starting from singletons, repeatedly merges the pair of adjacent
//! communities with the largest modularity gain until one community is
//! left. The merge sequence is recorded as a [`Dendrogram`] that can be cut
//! at any community count.
//!
//! # References
//!
//! - Clauset, Newman & Moore (2004), "Finding community structure in very
//!   large networks", *Phys. Rev. E* 70, 066111

use super::bipartite::BipartiteGraph;
use super::components::component_labels;
use petgraph::unionfind::UnionFind;
use std::collections::BTreeMap;

/// Merge history of an agglomerative clustering.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    vertex_count: usize,
    merges: Vec<(usize, usize)>,
    modularity: Vec<f64>,
}

impl Dendrogram {
    /// Number of leaves.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Merges in execution order; `(keep, absorbed)` community ids.
    pub fn merges(&self) -> &[(usize, usize)] {
        &self.merges
    }

    /// Modularity before any merge followed by the value after each merge.
    pub fn modularity_trace(&self) -> &[f64] {
        &self.modularity
    }

    /// Smallest community count reachable by cutting this dendrogram.
    pub fn min_communities(&self) -> usize {
        self.vertex_count - self.merges.len()
    }

    /// Community count with the highest recorded modularity.
    ///
    /// Ties go to the larger count (fewer merges).
    pub fn best_cut(&self) -> usize {
        self.vertex_count - argmax(&self.modularity)
    }

    /// Membership after cutting at `k` communities.
    ///
    /// `k` is clamped to `[min_communities, vertex_count]`. Labels are
    /// numbered in order of the lowest vertex of each community.
    pub fn cut(&self, k: usize) -> Vec<usize> {
        let k = k.clamp(self.min_communities(), self.vertex_count);
        let steps = self.vertex_count - k;
        let mut sets = UnionFind::new(self.vertex_count);
        for &(a, b) in &self.merges[..steps] {
            sets.union(a, b);
        }
        component_labels(sets).0
    }
}

/// Builds the greedy-modularity dendrogram of `graph`, using edge weights.
///
/// # Complexity
/// O(V * E) time with this straightforward pair scan.
pub fn greedy_modularity(graph: &BipartiteGraph) -> Dendrogram {
    let n = graph.vertex_count();
    let two_m = 2.0 * graph.total_weight();

    let mut e: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
    let mut a = vec![0.0f64; n];
    if two_m > 0.0 {
        for (u, v, w) in graph.weighted_edges() {
            let share = w / two_m;
            *e[u].entry(v).or_insert(0.0) += share;
            *e[v].entry(u).or_insert(0.0) += share;
            a[u] += share;
            a[v] += share;
        }
    }

    let mut q: f64 = -a.iter().map(|x| x * x).sum::<f64>();
    let mut modularity = Vec::with_capacity(n);
    modularity.push(q);
    let mut merges = Vec::with_capacity(n.saturating_sub(1));
    let mut alive = vec![true; n];

    loop {
        let mut best: Option<(f64, usize, usize)> = None;
        for i in 0..n {
            if !alive[i] {
                continue;
            }
            for (&j, &eij) in e[i].range(i + 1..) {
                let dq = 2.0 * (eij - a[i] * a[j]);
                if best.map_or(true, |(bq, _, _)| dq > bq) {
                    best = Some((dq, i, j));
                }
            }
        }

        let Some((dq, i, j)) = best else {
            break;
        };

        let absorbed = std::mem::take(&mut e[j]);
        for (k, w) in absorbed {
            if k == i {
                continue;
            }
            *e[i].entry(k).or_insert(0.0) += w;
            let row = &mut e[k];
            row.remove(&j);
            *row.entry(i).or_insert(0.0) += w;
        }
        e[i].remove(&j);
        a[i] += a[j];
        a[j] = 0.0;
        alive[j] = false;

        q += dq;
        merges.push((i, j));
        modularity.push(q);
    }

    log::trace!(
        "greedy modularity: {} merges, peak Q at {} communities",
        merges.len(),
        n - argmax(&modularity)
    );

    Dendrogram {
        vertex_count: n,
        merges,
        modularity,
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::metrics::modularity;

    /// Two K(3,3) blocks joined by a single edge.
    fn two_blocks() -> BipartiteGraph {
        let mut pairs = Vec::new();
        for l in 0..3 {
            for u in 0..3 {
                pairs.push((l, u));
                pairs.push((l + 3, u + 3));
            }
        }
        pairs.push((0, 3));
        BipartiteGraph::from_biadjacency(6, 6, &pairs).unwrap()
    }

    #[test]
    fn test_full_dendrogram_on_connected_graph() {
        let g = two_blocks();
        let d = greedy_modularity(&g);
        assert_eq!(d.merges().len(), g.vertex_count() - 1);
        assert_eq!(d.min_communities(), 1);
        assert_eq!(d.cut(1), vec![0; 12]);
        assert_eq!(d.cut(12), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_two_cut_separates_blocks() {
        let g = two_blocks();
        let d = greedy_modularity(&g);
        let cut = d.cut(2);
        // lower 0..3 and upper 6..9 form block A
        for v in [0, 1, 2, 6, 7, 8] {
            assert_eq!(cut[v], cut[0]);
        }
        for v in [3, 4, 5, 9, 10, 11] {
            assert_eq!(cut[v], cut[3]);
        }
        assert_ne!(cut[0], cut[3]);
        assert_eq!(d.best_cut(), 2);
    }

    #[test]
    fn test_trace_matches_modularity() {
        let g = two_blocks();
        let d = greedy_modularity(&g);
        for k in [1, 2, 5, 12] {
            let steps = g.vertex_count() - k;
            let expected = d.modularity_trace()[steps];
            let got = modularity(g.vertex_count(), g.weighted_edges(), &d.cut(k));
            assert!(
                (expected - got).abs() < 1e-9,
                "k={k}: trace {expected} vs recomputed {got}"
            );
        }
    }
}
