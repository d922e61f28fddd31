//! Locus-based adjacency encoding.
//!
//! A genome holds one gene per vertex. Gene `i = 0` means vertex `i`
//! selects no edge; gene `i = k > 0` selects the edge to the `k`-th
//! neighbor in `i`'s adjacency list. The selected edges, taken as
//! undirected, induce a forest-like subgraph whose connected components
//! are the communities.
//!
//! # References
//!
//! - Park & Song (1989), locus-based adjacency representation
//! - Pizzuti (2008), "GA-Net: A Genetic Algorithm for Community Detection
//!   in Social Networks"

use crate::error::{BicommError, Result};
use crate::graph::component_labels;
use petgraph::unionfind::UnionFind;

/// A candidate solution: one gene per vertex, gene `i` in `[0, deg(i)]`.
pub type Genome = Vec<usize>;

/// Assignment of every vertex to a community.
///
/// Community ids are dense (`0..num_communities`) and numbered in order of
/// each community's lowest vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    membership: Vec<usize>,
    count: usize,
}

impl Partition {
    /// Builds a partition from arbitrary labels, renumbering them by first
    /// occurrence.
    pub fn from_labels(labels: &[usize]) -> Self {
        let mut remap = std::collections::HashMap::new();
        let membership = labels
            .iter()
            .map(|&l| {
                let next = remap.len();
                *remap.entry(l).or_insert(next)
            })
            .collect();
        Self {
            membership,
            count: remap.len(),
        }
    }

    /// Community id of every vertex.
    pub fn membership(&self) -> &[usize] {
        &self.membership
    }

    /// Community id of vertex `v`.
    pub fn community_of(&self, v: usize) -> usize {
        self.membership[v]
    }

    /// Number of communities.
    pub fn num_communities(&self) -> usize {
        self.count
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.membership.len()
    }

    /// Whether the partition covers no vertex.
    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    /// Size of each community, indexed by community id.
    pub fn community_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.count];
        for &c in &self.membership {
            sizes[c] += 1;
        }
        sizes
    }
}

/// Checks that `genome` has one gene per vertex, each in `[0, deg(i)]`.
pub fn validate_genome(genome: &[usize], adjacency: &[Vec<usize>]) -> Result<()> {
    if genome.len() != adjacency.len() {
        return Err(BicommError::GenomeLength {
            got: genome.len(),
            expected: adjacency.len(),
        });
    }
    for (vertex, (&gene, neighbors)) in genome.iter().zip(adjacency).enumerate() {
        if gene > neighbors.len() {
            return Err(BicommError::InvalidGene {
                vertex,
                gene,
                degree: neighbors.len(),
            });
        }
    }
    Ok(())
}

/// Decodes a genome into the connected components of its selected edges.
///
/// Every vertex is assigned; vertices touched by no selected edge form
/// singleton communities. Component ids follow the lowest vertex index of
/// each component, so equal genomes always decode to equal partitions.
///
/// # Errors
/// Returns [`BicommError::GenomeLength`] or [`BicommError::InvalidGene`]
/// when the genome violates the encoding contract.
///
/// # Complexity
/// O(V + E) time
///
/// # Example
///
/// ```
/// use u_bicomm::community::decode;
///
/// let adjacency = vec![vec![2, 3], vec![2], vec![0, 1], vec![0]];
/// let p = decode(&[1, 1, 1, 1], &adjacency).unwrap();
/// assert_eq!(p.num_communities(), 1);
///
/// let p = decode(&[0, 0, 0, 0], &adjacency).unwrap();
/// assert_eq!(p.membership(), &[0, 1, 2, 3]);
/// ```
pub fn decode(genome: &[usize], adjacency: &[Vec<usize>]) -> Result<Partition> {
    validate_genome(genome, adjacency)?;

    let mut sets = UnionFind::new(genome.len());
    for (i, &gene) in genome.iter().enumerate() {
        if gene > 0 {
            sets.union(i, adjacency[i][gene - 1]);
        }
    }
    let (membership, count) = component_labels(sets);
    Ok(Partition { membership, count })
}
