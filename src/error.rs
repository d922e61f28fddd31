//! Error types for community detection.
//!
//! Configuration and graph precondition failures are reported before any
//! optimization starts. Genome contract violations raised during a run are
//! fatal as well: genes are never clamped silently.

use thiserror::Error;

/// Unified error type for all `u-bicomm` operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BicommError {
    /// The graph has no vertices.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// The graph has vertices but no edges.
    #[error("graph has no edges")]
    NoEdges,

    /// An edge endpoint does not name a vertex.
    #[error("vertex {vertex} out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    /// An edge joins a vertex to itself.
    #[error("self loop at vertex {0}")]
    SelfLoop(usize),

    /// The same undirected edge was supplied twice.
    #[error("duplicate edge ({0}, {1})")]
    DuplicateEdge(usize, usize),

    /// An edge joins two vertices on the same side.
    #[error("edge ({0}, {1}) does not cross the bipartition")]
    NotBipartite(usize, usize),

    /// The graph splits into more than one connected component.
    #[error("graph is not connected: found {0} components")]
    Disconnected(usize),

    /// A per-vertex or per-edge attribute has the wrong length.
    #[error("{what} has length {got}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// An edge weight is negative or not finite.
    #[error("edge {edge} has invalid weight {weight}")]
    InvalidWeight { edge: usize, weight: f64 },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A mode, strategy or algorithm name was not recognized.
    #[error("unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// A genome does not have one gene per vertex.
    #[error("genome has {got} genes, graph has {expected} vertices")]
    GenomeLength { got: usize, expected: usize },

    /// A gene selects a neighbor that does not exist.
    #[error("gene {gene} at vertex {vertex} outside [0, {degree}]")]
    InvalidGene {
        vertex: usize,
        gene: usize,
        degree: usize,
    },

    /// Hypervolume was requested from a run that kept no history.
    #[error("generation history was not retained; enable keep_history")]
    MissingHistory,

    /// A reference point does not match the objective count.
    #[error("reference point has {got} dimensions, objectives have {expected}")]
    DimensionMismatch { got: usize, expected: usize },
}

impl BicommError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        BicommError::Config(message.into())
    }

    /// Creates an unknown-name error.
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        BicommError::UnknownName {
            kind,
            name: name.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BicommError>;
