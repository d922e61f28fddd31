//! Immutable problem state shared by evaluation, mutation and seeding.

use crate::graph::{betweenness, BipartiteGraph, Projection, Side};

/// Sampling weights derived once from static graph structure.
///
/// Every table is read-only for the lifetime of a [`ProblemContext`].
#[derive(Debug, Clone)]
pub struct BiasTables {
    /// Per-vertex weight proportional to degree, with degree-1 vertices
    /// weighted 0; sums to 1.
    pub prob1: Vec<f64>,
    /// Per-vertex weight proportional to vertex betweenness; sums to 1.
    pub prob2: Vec<f64>,
    /// Per-vertex weight proportional to `degree · betweenness`; sums to 1.
    pub prob3: Vec<f64>,
    /// For each vertex, the betweenness share of each incident edge in
    /// adjacency order; each row sums to 1.
    pub edge_p: Vec<Vec<f64>>,
}

impl BiasTables {
    fn new(graph: &BipartiteGraph, vertex_bc: &[f64], edge_bc: &[f64]) -> Self {
        let degrees: Vec<f64> = (0..graph.vertex_count())
            .map(|v| graph.degree(v) as f64)
            .collect();
        // a leaf has no alternative neighbor to switch to
        let branching: Vec<f64> = degrees
            .iter()
            .map(|&d| if d == 1.0 { 0.0 } else { d })
            .collect();
        let combined: Vec<f64> = degrees
            .iter()
            .zip(vertex_bc)
            .map(|(&d, &b)| d * b)
            .collect();
        let prob1 = normalize(&branching);
        let prob2 = normalize(vertex_bc);
        let prob3 = normalize(&combined);
        let edge_p = (0..graph.vertex_count())
            .map(|v| {
                let scores: Vec<f64> = graph
                    .incident_edges(v)
                    .iter()
                    .map(|&e| edge_bc[e])
                    .collect();
                normalize(&scores)
            })
            .collect();

        Self {
            prob1,
            prob2,
            prob3,
            edge_p,
        }
    }
}

/// A graph together with everything precomputed from it.
///
/// Built once per problem instance and passed by reference into the pure
/// decode, evaluate, mutate and collate functions.
#[derive(Debug, Clone)]
pub struct ProblemContext {
    graph: BipartiteGraph,
    lower: Projection,
    upper: Projection,
    edge_betweenness: Vec<f64>,
    bias: BiasTables,
}

impl ProblemContext {
    /// Precomputes projections, betweenness and bias tables.
    pub fn new(graph: BipartiteGraph) -> Self {
        let bc = betweenness(&graph);
        let lower = Projection::new(&graph, Side::Lower);
        let upper = Projection::new(&graph, Side::Upper);
        for p in [&lower, &upper] {
            if p.edges().is_empty() {
                log::warn!(
                    "{:?} projection has no edges; its modularity is defined as 0",
                    p.side()
                );
            }
        }
        let bias = BiasTables::new(&graph, &bc.vertex, &bc.edge);
        log::debug!(
            "problem context: {} vertices, {} edges, projections {}/{} edges",
            graph.vertex_count(),
            graph.edge_count(),
            lower.edges().len(),
            upper.edges().len()
        );

        Self {
            graph,
            lower,
            upper,
            edge_betweenness: bc.edge,
            bias,
        }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &BipartiteGraph {
        &self.graph
    }

    /// Number of decision variables (one per vertex).
    pub fn n_var(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Upper bound of gene `v`.
    pub fn upper_bound(&self, v: usize) -> usize {
        self.graph.degree(v)
    }

    /// Projection on `side`.
    pub fn projection(&self, side: Side) -> &Projection {
        match side {
            Side::Lower => &self.lower,
            Side::Upper => &self.upper,
        }
    }

    /// Edge betweenness, indexed by edge id.
    pub fn edge_betweenness(&self) -> &[f64] {
        &self.edge_betweenness
    }

    /// Precomputed sampling weights.
    pub fn bias(&self) -> &BiasTables {
        &self.bias
    }
}

/// Scales `values` to sum to 1; uniform when the sum is not positive.
fn normalize(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total > 0.0 && total.is_finite() {
        values.iter().map(|&x| x / total).collect()
    } else if values.is_empty() {
        Vec::new()
    } else {
        vec![1.0 / values.len() as f64; values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(xs: &[f64]) -> f64 {
        xs.iter().sum()
    }

    #[test]
    fn test_tables_are_distributions() {
        let g = BipartiteGraph::from_biadjacency(
            3,
            3,
            &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 0), (0, 2)],
        )
        .unwrap();
        let ctx = ProblemContext::new(g);
        let bias = ctx.bias();
        for table in [&bias.prob1, &bias.prob2, &bias.prob3] {
            assert_eq!(table.len(), 6);
            assert!((sum(table) - 1.0).abs() < 1e-9);
        }
        for (v, row) in bias.edge_p.iter().enumerate() {
            assert_eq!(row.len(), ctx.graph().degree(v));
            assert!((sum(row) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_betweenness_falls_back_to_uniform() {
        // A single edge: no vertex lies between two others.
        let g = BipartiteGraph::from_biadjacency(1, 1, &[(0, 0)]).unwrap();
        let ctx = ProblemContext::new(g);
        assert_eq!(ctx.bias().prob1, vec![0.5, 0.5]);
        assert_eq!(ctx.bias().prob2, vec![0.5, 0.5]);
        assert_eq!(ctx.bias().prob3, vec![0.5, 0.5]);
        assert_eq!(ctx.bias().edge_p, vec![vec![1.0], vec![1.0]]);
    }

    #[test]
    fn test_combined_table_is_degree_times_betweenness() {
        // tree: L0 - {U2, U3, U4}, U4 - L1
        let g = BipartiteGraph::from_biadjacency(2, 3, &[(0, 0), (0, 1), (0, 2), (1, 2)]).unwrap();
        let ctx = ProblemContext::new(g);
        let bias = ctx.bias();
        // degrees [3, 1, 1, 1, 2], betweenness [5, 0, 0, 0, 3]
        let expected1 = [0.6, 0.0, 0.0, 0.0, 0.4];
        let expected3 = [15.0 / 21.0, 0.0, 0.0, 0.0, 6.0 / 21.0];
        for v in 0..5 {
            assert!((bias.prob1[v] - expected1[v]).abs() < 1e-12, "prob1[{v}]");
            assert!((bias.prob3[v] - expected3[v]).abs() < 1e-12, "prob3[{v}]");
        }
    }

    #[test]
    fn test_hub_gets_more_weight() {
        let g = BipartiteGraph::from_biadjacency(1, 3, &[(0, 0), (0, 1), (0, 2)]).unwrap();
        let ctx = ProblemContext::new(g);
        let bias = ctx.bias();
        assert!((bias.prob2[0] - 1.0).abs() < 1e-12);
        // the leaves have degree 1 and drop out of the degree table
        assert_eq!(bias.prob1, vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(bias.prob3, vec![1.0, 0.0, 0.0, 0.0]);
        assert!(ctx.projection(Side::Lower).edges().is_empty());
        assert_eq!(ctx.projection(Side::Upper).edges().len(), 3);
    }
}
