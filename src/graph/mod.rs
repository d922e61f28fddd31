//! Bipartite graph model and the graph services the optimizer consumes.
//!
//! # Key Types
//!
//! - [`BipartiteGraph`]: validated vertex sides, adjacency lists, weights
//! - [`Projection`]: one-mode projection onto a side
//! - [`Dendrogram`]: greedy-modularity merge history
//!
//! # Algorithms
//!
//! - [`betweenness`]: Brandes vertex and edge betweenness
//! - [`minimum_spanning_tree`]: Kruskal with deterministic tie-breaking
//! - [`greedy_modularity`]: Clauset–Newman–Moore agglomeration

mod bipartite;
mod centrality;
mod components;
mod greedy;
mod mst;
mod projection;

pub use bipartite::{BipartiteGraph, Side};
pub use centrality::{betweenness, Betweenness};
pub use components::{component_count, component_labels};
pub use greedy::{greedy_modularity, Dendrogram};
pub use mst::minimum_spanning_tree;
pub use projection::Projection;
