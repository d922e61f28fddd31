//! Scoring and deduplication of final genomes.

use super::context::ProblemContext;
use super::encoding::{decode, Genome, Partition};
use super::fitness::{graph_modularity, projection_modularity};
use super::metrics::{
    adjusted_rand_index, barber_modularity, conductance, coverage, gini, murata_modularity,
    performance,
};
use crate::error::Result;
use crate::graph::Side;
use rayon::prelude::*;
use std::collections::HashSet;

/// Full metric suite of one partition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultRecord {
    /// Name of the algorithm that produced the partition.
    pub name: String,
    /// Number of communities.
    pub num_clusters: usize,
    /// Newman modularity of the whole graph.
    pub modularity: f64,
    /// Modularity of the lower projection.
    pub modularity_lower: f64,
    /// Modularity of the upper projection.
    pub modularity_upper: f64,
    /// Barber bimodularity.
    pub bimodularity: f64,
    /// Adjusted Rand index against the ground-truth labels, if any.
    pub adjusted_rand: Option<f64>,
    /// Mean community conductance.
    pub conductance: f64,
    /// Fraction of edges inside communities.
    pub coverage: f64,
    /// Fraction of lower/upper pairs classified correctly.
    pub performance: f64,
    /// Gini index of community sizes.
    pub gini: f64,
    /// Murata bipartite modularity.
    pub murata: f64,
}

impl ResultRecord {
    /// Bit-exact identity of the metric tuple.
    fn key(&self) -> (usize, [u64; 10]) {
        let ari = self.adjusted_rand.map_or(u64::MAX, f64::to_bits);
        (
            self.num_clusters,
            [
                self.modularity.to_bits(),
                self.modularity_lower.to_bits(),
                self.modularity_upper.to_bits(),
                self.bimodularity.to_bits(),
                ari,
                self.conductance.to_bits(),
                self.coverage.to_bits(),
                self.performance.to_bits(),
                self.gini.to_bits(),
                self.murata.to_bits(),
            ],
        )
    }
}

/// Computes every metric of `partition`.
pub fn score_partition(name: &str, partition: &Partition, ctx: &ProblemContext) -> ResultRecord {
    let graph = ctx.graph();
    let membership = partition.membership();
    ResultRecord {
        name: name.to_string(),
        num_clusters: partition.num_communities(),
        modularity: graph_modularity(ctx, partition),
        modularity_lower: projection_modularity(ctx, partition, Side::Lower),
        modularity_upper: projection_modularity(ctx, partition, Side::Upper),
        bimodularity: barber_modularity(graph, membership),
        adjusted_rand: graph
            .labels()
            .map(|truth| adjusted_rand_index(truth, membership)),
        conductance: conductance(graph, membership),
        coverage: coverage(graph, membership),
        performance: performance(graph, membership),
        gini: gini(&partition.community_sizes()),
        murata: murata_modularity(graph, membership),
    }
}

/// Decodes and scores every genome, dropping records whose metric tuple is
/// bit-identical to an earlier one.
///
/// Surviving records keep the order of their first occurrence.
///
/// # Errors
/// Fails if any genome violates the encoding contract.
pub fn collate(
    name: &str,
    genomes: &[Genome],
    ctx: &ProblemContext,
    parallel: bool,
) -> Result<Vec<ResultRecord>> {
    let score = |genome: &Genome| -> Result<ResultRecord> {
        let partition = decode(genome, ctx.graph().adjacency())?;
        Ok(score_partition(name, &partition, ctx))
    };
    let scored: Vec<ResultRecord> = if parallel {
        genomes.par_iter().map(score).collect::<Result<_>>()?
    } else {
        genomes.iter().map(score).collect::<Result<_>>()?
    };

    let total = scored.len();
    let records = dedup(scored);
    log::debug!(
        "collated {} genomes into {} distinct records",
        total,
        records.len()
    );
    Ok(records)
}

/// Keeps the first record of every distinct metric tuple.
pub fn dedup(records: Vec<ResultRecord>) -> Vec<ResultRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.key()))
        .collect()
}
