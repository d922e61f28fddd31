//! Initial population construction.
//!
//! [`SeedingStrategy::MstDiverse`] starts from a spanning-tree genome (one
//! giant community) and derives one row per dendrogram cut level, so the
//! first generation already spans coarse to fine partitions.

use super::context::ProblemContext;
use super::encoding::Genome;
use crate::error::{BicommError, Result};
use crate::graph::{greedy_modularity, minimum_spanning_tree};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// How the first population is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeedingStrategy {
    /// Every gene uniform in `[1, deg(i)]`.
    Uniform,
    /// Spanning-tree seed diversified by greedy-modularity cuts.
    #[default]
    MstDiverse,
}

impl SeedingStrategy {
    /// Builds `popsize` genomes.
    pub fn seed<R: Rng>(&self, ctx: &ProblemContext, popsize: usize, rng: &mut R) -> Vec<Genome> {
        match self {
            SeedingStrategy::Uniform => (0..popsize).map(|_| uniform_genome(ctx, rng)).collect(),
            SeedingStrategy::MstDiverse => mst_diverse_population(ctx, popsize),
        }
    }
}

impl FromStr for SeedingStrategy {
    type Err = BicommError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" | "random" | "pizzuti" => Ok(SeedingStrategy::Uniform),
            "" | "mst" | "mst-diverse" => Ok(SeedingStrategy::MstDiverse),
            _ => Err(BicommError::unknown("initialization", s)),
        }
    }
}

impl fmt::Display for SeedingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeedingStrategy::Uniform => "uniform",
            SeedingStrategy::MstDiverse => "mst-diverse",
        })
    }
}

/// A genome with every gene uniform in `[1, deg(i)]`.
pub fn uniform_genome<R: Rng>(ctx: &ProblemContext, rng: &mut R) -> Genome {
    (0..ctx.n_var())
        .map(|v| rng.random_range(1..=ctx.upper_bound(v)))
        .collect()
}

/// Genome whose selected edges are exactly a minimum spanning tree under
/// edge betweenness.
///
/// Each tree is oriented away from its lowest vertex: a vertex's gene
/// points at its tree parent, the root keeps gene 0. Vertices the forest
/// does not reach also keep 0.
pub fn mst_genome(ctx: &ProblemContext) -> Genome {
    let graph = ctx.graph();
    let n = graph.vertex_count();
    let tree = minimum_spanning_tree(graph, ctx.edge_betweenness());

    let mut in_tree = vec![false; graph.edge_count()];
    for &e in &tree {
        in_tree[e] = true;
    }

    let mut genome = vec![0; n];
    let mut visited = vec![false; n];
    let mut stack = Vec::with_capacity(n);
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push(root);
        while let Some(parent) = stack.pop() {
            for (&child, &e) in graph
                .neighbors(parent)
                .iter()
                .zip(graph.incident_edges(parent))
            {
                if !in_tree[e] || visited[child] {
                    continue;
                }
                visited[child] = true;
                if let Some(slot) = graph.incident_edges(child).iter().position(|&x| x == e) {
                    genome[child] = slot + 1;
                }
                stack.push(child);
            }
        }
    }
    genome
}

/// The MST seed plus one row per greedy-modularity cut level.
///
/// Row `k − 1` (for `k = 2 ..= min(popsize, n_var)`) is the seed with every
/// gene zeroed whose selected edge crosses a community boundary of the
/// `k`-community cut. Vertices of degree 1 are left untouched. Remaining
/// rows are copies of the seed.
pub fn mst_diverse_population(ctx: &ProblemContext, popsize: usize) -> Vec<Genome> {
    let seed = mst_genome(ctx);
    let mut population = vec![seed.clone(); popsize];
    let max_level = popsize.min(ctx.n_var());
    if max_level < 2 {
        return population;
    }

    let graph = ctx.graph();
    let dendrogram = greedy_modularity(graph);
    for k in 2..=max_level {
        let cut = dendrogram.cut(k);
        let row = &mut population[k - 1];
        for v in 0..graph.vertex_count() {
            if graph.degree(v) <= 1 || row[v] == 0 {
                continue;
            }
            let target = graph.neighbors(v)[row[v] - 1];
            if cut[v] != cut[target] {
                row[v] = 0;
            }
        }
    }

    log::trace!(
        "mst-diverse seeding: {} cut levels over {} rows",
        max_level - 1,
        popsize
    );
    population
}
