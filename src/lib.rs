//! Multi-objective evolutionary community detection for bipartite networks.
//!
//! Community detection is cast as a combinatorial optimization over
//! locus-based genomes and solved with an NSGA-II search:
//!
//! - **Graph model**: validated bipartite graphs, one-mode projections,
//!   betweenness, spanning trees and a greedy-modularity dendrogram.
//! - **Encoding**: one gene per vertex selecting an incident edge; the
//!   connected components of the selected edges are the communities.
//! - **Fitness**: 2, 3 or 4 objectives built from negated modularity of the
//!   graph and its projections, plus the community count.
//! - **Mutation**: uniform, betweenness-biased, or polynomial integer.
//! - **Seeding**: uniform, or a spanning-tree seed diversified by
//!   dendrogram cuts.
//! - **Collation**: a full metric suite per final genome, deduplicated.
//!
//! # Example
//!
//! ```
//! use u_bicomm::detect::Algorithm;
//! use u_bicomm::graph::BipartiteGraph;
//! use u_bicomm::moea::MoeaConfig;
//!
//! let graph = BipartiteGraph::from_biadjacency(
//!     3,
//!     3,
//!     &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 1)],
//! )
//! .unwrap();
//! let config = MoeaConfig::fast().with_seed(42).with_max_generations(10);
//! let run = Algorithm::MulticriteriaGa(config).detect(&graph).unwrap();
//! assert!(!run.records.is_empty());
//! ```
//!
//! # Architecture
//!
//! The [`community`] core is a set of pure functions over an immutable
//! [`community::ProblemContext`]; [`moea`] is the host loop that drives
//! them, and [`detect`] exposes every algorithm behind one call.

pub mod community;
pub mod detect;
pub mod error;
pub mod graph;
pub mod moea;
pub mod random;

pub use error::{BicommError, Result};
