//! Community detection algorithms behind one entry point.
//!
//! Every [`Algorithm`] variant turns a graph into a fresh [`RunResult`]:
//! scored, deduplicated [`ResultRecord`]s plus, for the evolutionary
//! variant, optional per-generation snapshots.

use crate::community::{
    collate, dedup, score_partition, Partition, ProblemContext, ResultRecord,
};
use crate::error::{BicommError, Result};
use crate::graph::{greedy_modularity, BipartiteGraph};
use crate::moea::{GenerationSnapshot, MoeaConfig, MoeaRunner};
use std::fmt;
use std::str::FromStr;

/// A community detection algorithm and its configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Greedy modularity agglomeration, cut once per community count in
    /// `min_clusters..=max_clusters` (capped at the vertex count).
    FastGreedy {
        /// Smallest community count to report (at least 1).
        min_clusters: usize,
        /// Largest community count to report.
        max_clusters: usize,
    },
    /// Multi-objective evolutionary search over locus-based genomes.
    MulticriteriaGa(MoeaConfig),
}

/// Output of one detection run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Name of the algorithm that produced the records.
    pub algorithm: &'static str,
    /// One record per distinct partition found.
    pub records: Vec<ResultRecord>,
    /// Per-generation snapshots, when the algorithm keeps them.
    pub history: Option<Vec<GenerationSnapshot>>,
}

impl Algorithm {
    /// Default community-count range swept by [`Algorithm::FastGreedy`].
    pub const FAST_GREEDY_CLUSTERS: (usize, usize) = (1, 15);

    /// Greedy agglomeration over the default community-count range.
    pub fn fast_greedy() -> Self {
        let (min_clusters, max_clusters) = Self::FAST_GREEDY_CLUSTERS;
        Algorithm::FastGreedy {
            min_clusters,
            max_clusters,
        }
    }

    /// Short name used in result records.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::FastGreedy { .. } => "fastgreedy",
            Algorithm::MulticriteriaGa(_) => "multicriteria-ga",
        }
    }

    /// Runs the algorithm on `graph`.
    ///
    /// # Errors
    /// Fails on an invalid configuration or community-count range; the
    /// graph itself was validated when it was built.
    pub fn detect(&self, graph: &BipartiteGraph) -> Result<RunResult> {
        let ctx = ProblemContext::new(graph.clone());
        self.detect_in(&ctx)
    }

    /// Runs the algorithm against a prepared context.
    pub fn detect_in(&self, ctx: &ProblemContext) -> Result<RunResult> {
        let name = self.name();
        match self {
            Algorithm::FastGreedy {
                min_clusters,
                max_clusters,
            } => {
                if *min_clusters == 0 || min_clusters > max_clusters {
                    return Err(BicommError::config(format!(
                        "community count range {}..={} is not valid",
                        min_clusters, max_clusters
                    )));
                }
                let dendrogram = greedy_modularity(ctx.graph());
                let upper = (*max_clusters).min(ctx.n_var());
                let records: Vec<ResultRecord> = (*min_clusters..=upper)
                    .map(|k| {
                        let partition = Partition::from_labels(&dendrogram.cut(k));
                        score_partition(name, &partition, ctx)
                    })
                    .collect();
                let records = dedup(records);
                log::info!(
                    "{}: {} cuts between {} and {} communities",
                    name,
                    records.len(),
                    min_clusters,
                    upper
                );
                Ok(RunResult {
                    algorithm: name,
                    records,
                    history: None,
                })
            }
            Algorithm::MulticriteriaGa(config) => {
                let result = MoeaRunner::run(ctx, config)?;
                let records = collate(name, &result.front_genomes(), ctx, config.parallel)?;
                Ok(RunResult {
                    algorithm: name,
                    records,
                    history: result.history,
                })
            }
        }
    }
}

impl FromStr for Algorithm {
    type Err = BicommError;

    /// Parses an algorithm name; every variant gets its default
    /// configuration.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fastgreedy" | "fast-greedy" | "greedy" => Ok(Algorithm::fast_greedy()),
            "multicriteria-ga" | "multicriteria" | "moga" | "ga" => {
                Ok(Algorithm::MulticriteriaGa(MoeaConfig::default()))
            }
            _ => Err(BicommError::unknown("algorithm", s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blocks() -> BipartiteGraph {
        let mut pairs = Vec::new();
        for l in 0..3 {
            for u in 0..3 {
                pairs.push((l, u));
                pairs.push((l + 3, u + 3));
            }
        }
        pairs.push((0, 3));
        BipartiteGraph::from_biadjacency(6, 6, &pairs).unwrap()
    }

    #[test]
    fn test_fastgreedy_sweeps_cluster_counts() {
        let run = Algorithm::fast_greedy().detect(&two_blocks()).unwrap();
        assert_eq!(run.algorithm, "fastgreedy");
        // 1..=15 capped at 12 vertices
        assert_eq!(run.records.len(), 12);
        for (i, r) in run.records.iter().enumerate() {
            assert_eq!(r.num_clusters, i + 1);
        }
        let best = run
            .records
            .iter()
            .max_by(|a, b| a.modularity.total_cmp(&b.modularity))
            .unwrap();
        assert_eq!(best.num_clusters, 2);
        assert!((best.modularity - (18.0 / 19.0 - 0.5)).abs() < 1e-12);
        assert!(run.history.is_none());
    }

    #[test]
    fn test_fastgreedy_respects_range() {
        let algo = Algorithm::FastGreedy {
            min_clusters: 2,
            max_clusters: 4,
        };
        let run = algo.detect(&two_blocks()).unwrap();
        let counts: Vec<usize> = run.records.iter().map(|r| r.num_clusters).collect();
        assert_eq!(counts, vec![2, 3, 4]);
    }

    #[test]
    fn test_fastgreedy_rejects_bad_range() {
        for (min_clusters, max_clusters) in [(0, 3), (5, 2)] {
            let algo = Algorithm::FastGreedy {
                min_clusters,
                max_clusters,
            };
            let err = algo.detect(&two_blocks()).unwrap_err();
            assert!(matches!(err, BicommError::Config(_)));
        }
    }

    #[test]
    fn test_ga_keeps_history_when_asked() {
        let config = MoeaConfig::default()
            .with_population_size(12)
            .with_max_generations(4)
            .with_seed(1)
            .with_history(true);
        let run = Algorithm::MulticriteriaGa(config)
            .detect(&two_blocks())
            .unwrap();
        assert_eq!(run.history.map(|h| h.len()), Some(5));
        assert!(!run.records.is_empty());
        assert!(run.records.iter().all(|r| r.name == "multicriteria-ga"));
    }

    #[test]
    fn test_invalid_config_surfaces() {
        let config = MoeaConfig::default().with_max_generations(0);
        assert!(Algorithm::MulticriteriaGa(config)
            .detect(&two_blocks())
            .is_err());
    }

    #[test]
    fn test_parsing() {
        assert_eq!("greedy".parse::<Algorithm>().unwrap(), Algorithm::fast_greedy());
        assert!(matches!(
            "moga".parse::<Algorithm>().unwrap(),
            Algorithm::MulticriteriaGa(_)
        ));
        let err = "walktrap".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, BicommError::UnknownName { kind: "algorithm", .. }));
        assert_eq!(Algorithm::fast_greedy().to_string(), "fastgreedy");
    }
}
