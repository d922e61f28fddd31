//! One-mode projections of a bipartite graph.

use super::bipartite::{BipartiteGraph, Side};
use std::collections::BTreeMap;

/// The graph induced on one side of a bipartite graph.
///
/// Two vertices of the projected side are joined when they share at least
/// one neighbor on the other side; the edge weight is the number of shared
/// neighbors. Vertices are renumbered `0..len` in increasing global order.
#[derive(Debug, Clone)]
pub struct Projection {
    side: Side,
    vertices: Vec<usize>,
    edges: Vec<(usize, usize, f64)>,
}

impl Projection {
    /// Projects `graph` onto `side`.
    pub fn new(graph: &BipartiteGraph, side: Side) -> Self {
        let vertices = graph.vertices_on(side);
        let mut local = vec![usize::MAX; graph.vertex_count()];
        for (i, &v) in vertices.iter().enumerate() {
            local[v] = i;
        }

        let mut shared: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for hub in graph.vertices_on(opposite(side)) {
            let members = graph.neighbors(hub);
            for (a, &x) in members.iter().enumerate() {
                for &y in &members[a + 1..] {
                    let (lx, ly) = (local[x], local[y]);
                    *shared.entry((lx.min(ly), lx.max(ly))).or_insert(0.0) += 1.0;
                }
            }
        }

        let edges = shared.into_iter().map(|((a, b), w)| (a, b, w)).collect();

        Self {
            side,
            vertices,
            edges,
        }
    }

    /// Side this projection was taken on.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Global ids of the projected vertices, in local order.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of projected vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the projected side is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Weighted edges in local ids, sorted by endpoint pair.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Restricts a global membership vector to this side.
    pub fn restrict(&self, membership: &[usize]) -> Vec<usize> {
        self.vertices.iter().map(|&v| membership[v]).collect()
    }
}

fn opposite(side: Side) -> Side {
    match side {
        Side::Lower => Side::Upper,
        Side::Upper => Side::Lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_neighbor_weights() {
        // L0, L1 share U3 and U4; L2 shares U4 with both.
        let g = BipartiteGraph::from_biadjacency(
            3,
            2,
            &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 1)],
        )
        .unwrap();
        let p = Projection::new(&g, Side::Lower);
        assert_eq!(p.vertices(), &[0, 1, 2]);
        assert_eq!(p.edges(), &[(0, 1, 2.0), (0, 2, 1.0), (1, 2, 1.0)]);

        let q = Projection::new(&g, Side::Upper);
        assert_eq!(q.vertices(), &[3, 4]);
        assert_eq!(q.edges(), &[(0, 1, 2.0)]);
    }

    #[test]
    fn test_restrict() {
        let g = BipartiteGraph::from_biadjacency(2, 1, &[(0, 0), (1, 0)]).unwrap();
        let p = Projection::new(&g, Side::Upper);
        assert_eq!(p.restrict(&[4, 5, 6]), vec![6]);
        assert!(p.edges().is_empty());
    }
}
