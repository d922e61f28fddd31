//! Validated, read-only bipartite graph.

use super::components::component_count;
use crate::error::{BicommError, Result};
use std::collections::HashSet;

/// Partition side of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// First vertex set.
    Lower,
    /// Second vertex set.
    Upper,
}

/// An undirected, connected bipartite graph.
///
/// Vertices are `0..n`. Each vertex carries its [`Side`], an adjacency list
/// in edge insertion order and, optionally, a ground-truth community label.
/// Edges only join a `Lower` vertex to an `Upper` vertex.
///
/// The invariants (non-empty, at least one edge, bipartite, no duplicate
/// edges, connected) are checked on construction, so every other component
/// can take a `&BipartiteGraph` as already valid.
///
/// # Examples
///
/// ```
/// use u_bicomm::graph::{BipartiteGraph, Side};
///
/// let g = BipartiteGraph::new(
///     vec![Side::Lower, Side::Lower, Side::Upper, Side::Upper],
///     vec![(0, 2), (0, 3), (1, 2)],
/// ).unwrap();
///
/// assert_eq!(g.vertex_count(), 4);
/// assert_eq!(g.neighbors(0), &[2, 3]);
/// assert_eq!(g.degree(3), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    sides: Vec<Side>,
    labels: Option<Vec<usize>>,
    edges: Vec<(usize, usize)>,
    weights: Vec<f64>,
    adjacency: Vec<Vec<usize>>,
    incident: Vec<Vec<usize>>,
}

impl BipartiteGraph {
    /// Builds an unweighted graph (every edge weight is 1.0).
    pub fn new(sides: Vec<Side>, edges: Vec<(usize, usize)>) -> Result<Self> {
        let weights = vec![1.0; edges.len()];
        Self::with_weights(sides, edges, weights)
    }

    /// Builds a weighted graph.
    pub fn with_weights(
        sides: Vec<Side>,
        edges: Vec<(usize, usize)>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let n = sides.len();
        if n == 0 {
            return Err(BicommError::EmptyGraph);
        }
        if edges.is_empty() {
            return Err(BicommError::NoEdges);
        }
        if weights.len() != edges.len() {
            return Err(BicommError::LengthMismatch {
                what: "weights",
                got: weights.len(),
                expected: edges.len(),
            });
        }

        let mut seen = HashSet::with_capacity(edges.len());
        let mut adjacency = vec![Vec::new(); n];
        let mut incident = vec![Vec::new(); n];

        for (e, &(u, v)) in edges.iter().enumerate() {
            for w in [u, v] {
                if w >= n {
                    return Err(BicommError::VertexOutOfRange {
                        vertex: w,
                        vertex_count: n,
                    });
                }
            }
            if u == v {
                return Err(BicommError::SelfLoop(u));
            }
            if sides[u] == sides[v] {
                return Err(BicommError::NotBipartite(u, v));
            }
            if !seen.insert((u.min(v), u.max(v))) {
                return Err(BicommError::DuplicateEdge(u, v));
            }
            let weight = weights[e];
            if !weight.is_finite() || weight < 0.0 {
                return Err(BicommError::InvalidWeight { edge: e, weight });
            }

            adjacency[u].push(v);
            incident[u].push(e);
            adjacency[v].push(u);
            incident[v].push(e);
        }

        let components = component_count(n, &edges);
        if components > 1 {
            return Err(BicommError::Disconnected(components));
        }

        Ok(Self {
            sides,
            labels: None,
            edges,
            weights,
            adjacency,
            incident,
        })
    }

    /// Builds a graph from a biadjacency edge list.
    ///
    /// Lower vertices are numbered `0..lower_count`, upper vertices
    /// `lower_count..lower_count + upper_count`. Each pair `(l, u)` indexes
    /// into its own side.
    pub fn from_biadjacency(
        lower_count: usize,
        upper_count: usize,
        pairs: &[(usize, usize)],
    ) -> Result<Self> {
        let mut sides = vec![Side::Lower; lower_count];
        sides.extend(vec![Side::Upper; upper_count]);
        let mut edges = Vec::with_capacity(pairs.len());
        for &(l, u) in pairs {
            if l >= lower_count {
                return Err(BicommError::VertexOutOfRange {
                    vertex: l,
                    vertex_count: lower_count,
                });
            }
            if u >= upper_count {
                return Err(BicommError::VertexOutOfRange {
                    vertex: u,
                    vertex_count: upper_count,
                });
            }
            edges.push((l, lower_count + u));
        }
        Self::new(sides, edges)
    }

    /// Attaches ground-truth community labels, one per vertex.
    pub fn with_labels(mut self, labels: Vec<usize>) -> Result<Self> {
        if labels.len() != self.vertex_count() {
            return Err(BicommError::LengthMismatch {
                what: "labels",
                got: labels.len(),
                expected: self.vertex_count(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.sides.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Side of vertex `v`.
    pub fn side(&self, v: usize) -> Side {
        self.sides[v]
    }

    /// Sides of all vertices.
    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// Vertices on `side`, in increasing order.
    pub fn vertices_on(&self, side: Side) -> Vec<usize> {
        (0..self.vertex_count())
            .filter(|&v| self.sides[v] == side)
            .collect()
    }

    /// Ground-truth labels, if any.
    pub fn labels(&self) -> Option<&[usize]> {
        self.labels.as_deref()
    }

    /// Neighbors of `v` in adjacency order.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    /// All adjacency lists.
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Degree of `v`; also the upper bound of gene `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Edge ids incident to `v`, parallel to [`neighbors`](Self::neighbors).
    pub fn incident_edges(&self, v: usize) -> &[usize] {
        &self.incident[v]
    }

    /// Id of the edge in the `k`-th adjacency slot of `v`.
    pub fn edge_id(&self, v: usize, k: usize) -> usize {
        self.incident[v][k]
    }

    /// Edge endpoints in insertion order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Weight of edge `e`.
    pub fn weight(&self, e: usize) -> f64 {
        self.weights[e]
    }

    /// All edge weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of incident edge weights of `v`.
    pub fn strength(&self, v: usize) -> f64 {
        self.incident[v].iter().map(|&e| self.weights[e]).sum()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weighted edge list `(u, v, w)`.
    pub fn weighted_edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges
            .iter()
            .zip(self.weights.iter())
            .map(|(&(u, v), &w)| (u, v, w))
    }
}
