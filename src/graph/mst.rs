//! Minimum spanning tree (Kruskal).

use super::bipartite::BipartiteGraph;
use petgraph::unionfind::UnionFind;

/// Returns the edge ids of a minimum spanning forest under `costs`.
///
/// `costs[e]` is the cost of edge `e`. Equal costs are broken by edge id,
/// so the result is deterministic. On a connected graph the forest is a
/// single tree with `n - 1` edges.
///
/// # Panics
/// Panics if `costs` does not have one entry per edge.
pub fn minimum_spanning_tree(graph: &BipartiteGraph, costs: &[f64]) -> Vec<usize> {
    assert_eq!(costs.len(), graph.edge_count(), "one cost per edge");

    let mut order: Vec<usize> = (0..graph.edge_count()).collect();
    order.sort_by(|&a, &b| {
        costs[a]
            .partial_cmp(&costs[b])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut forest = UnionFind::new(graph.vertex_count());
    let mut tree = Vec::with_capacity(graph.vertex_count().saturating_sub(1));
    for e in order {
        let (u, v) = graph.edges()[e];
        if forest.union(u, v) {
            tree.push(e);
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_cheapest_edges() {
        // 4-cycle; the most expensive edge is dropped.
        let g = BipartiteGraph::from_biadjacency(2, 2, &[(0, 0), (1, 0), (1, 1), (0, 1)]).unwrap();
        let mut tree = minimum_spanning_tree(&g, &[1.0, 2.0, 3.0, 4.0]);
        tree.sort_unstable();
        assert_eq!(tree, vec![0, 1, 2]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let g = BipartiteGraph::from_biadjacency(2, 2, &[(0, 0), (1, 0), (1, 1), (0, 1)]).unwrap();
        let tree = minimum_spanning_tree(&g, &[1.0; 4]);
        assert_eq!(tree, vec![0, 1, 2]);
    }

    #[test]
    fn test_spanning_tree_size() {
        let g = BipartiteGraph::from_biadjacency(
            3,
            3,
            &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 0), (0, 2)],
        )
        .unwrap();
        let costs: Vec<f64> = (0..g.edge_count()).map(|e| (e % 3) as f64).collect();
        assert_eq!(minimum_spanning_tree(&g, &costs).len(), 5);
    }
}
