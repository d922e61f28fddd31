//! Shortest-path betweenness for vertices and edges.
//!
//! # References
//!
//! - Brandes (2001), "A faster algorithm for betweenness centrality"
//! - Girvan & Newman (2002), edge betweenness

use super::bipartite::BipartiteGraph;
use std::collections::VecDeque;

/// Vertex and edge betweenness scores of a graph.
///
/// Scores are unnormalized and count each unordered vertex pair once.
#[derive(Debug, Clone)]
pub struct Betweenness {
    /// Betweenness of each vertex.
    pub vertex: Vec<f64>,
    /// Betweenness of each edge, indexed by edge id.
    pub edge: Vec<f64>,
}

/// Computes vertex and edge betweenness with Brandes' algorithm.
///
/// Paths are unweighted (hop count).
///
/// # Complexity
/// O(V * E) time, O(V + E) space
pub fn betweenness(graph: &BipartiteGraph) -> Betweenness {
    let n = graph.vertex_count();
    let mut vertex = vec![0.0f64; n];
    let mut edge = vec![0.0f64; graph.edge_count()];

    let mut stack = Vec::with_capacity(n);
    let mut preds: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![usize::MAX; n];
    let mut delta = vec![0.0f64; n];
    let mut queue = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        for p in preds.iter_mut() {
            p.clear();
        }
        sigma.iter_mut().for_each(|x| *x = 0.0);
        dist.iter_mut().for_each(|d| *d = usize::MAX);
        delta.iter_mut().for_each(|x| *x = 0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let neighbors = graph.neighbors(v);
            let incident = graph.incident_edges(v);
            for (&w, &e) in neighbors.iter().zip(incident.iter()) {
                if dist[w] == usize::MAX {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push((v, e));
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &(v, e) in &preds[w] {
                let c = sigma[v] / sigma[w] * (1.0 + delta[w]);
                edge[e] += c;
                delta[v] += c;
            }
            if w != s {
                vertex[w] += delta[w];
            }
        }
    }

    // Each unordered pair was counted from both endpoints.
    vertex.iter_mut().for_each(|x| *x /= 2.0);
    edge.iter_mut().for_each(|x| *x /= 2.0);

    Betweenness { vertex, edge }
}
