//! Evolutionary community detection on bipartite graphs.
//!
//! A candidate solution is a locus-based [`Genome`]: one gene per vertex
//! selecting one incident edge (or none). Decoding takes the connected
//! components of the selected edges as communities.
//!
//! # Components
//!
//! - [`decode`]: genome to [`Partition`]
//! - [`evaluate`]: objective vector in [`ObjectiveMode`] 2d, 3d or 4d
//! - [`MutationStrategy`]: uniform, centrality-biased, polynomial integer
//! - [`SeedingStrategy`]: uniform or spanning-tree seeded initial population
//! - [`collate`]: full metric suite per genome, deduplicated
//!
//! All of them read a shared, immutable [`ProblemContext`].
//!
//! # References
//!
//! - Pizzuti (2012), "A Multiobjective Genetic Algorithm to Find Communities
//!   in Complex Networks", *IEEE Trans. Evol. Comput.* 16(3)

mod collate;
mod context;
mod encoding;
mod fitness;
pub mod metrics;
mod mutation;
mod seeding;

pub use collate::{collate, dedup, score_partition, ResultRecord};
pub use context::{BiasTables, ProblemContext};
pub use encoding::{decode, validate_genome, Genome, Partition};
pub use fitness::{
    evaluate, evaluate_population, graph_modularity, objectives, projection_modularity,
    ObjectiveMode,
};
pub use mutation::{MutationStrategy, DEFAULT_ETA};
pub use seeding::{mst_diverse_population, mst_genome, uniform_genome, SeedingStrategy};
