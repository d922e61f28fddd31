//! Multi-objective fitness of a genome.
//!
//! Modularity terms are negated so that every objective is minimized; the
//! community count is minimized as is.

use super::context::ProblemContext;
use super::encoding::{decode, Partition};
use super::metrics::modularity;
use crate::error::{BicommError, Result};
use crate::graph::Side;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Which objectives to optimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveMode {
    /// `[−Q(graph), k]`
    TwoD,
    /// `[−Q(lower projection), −Q(upper projection), k]`
    #[default]
    ThreeD,
    /// `[−Q(lower projection), −Q(upper projection), −Q(graph), k]`
    FourD,
}

impl ObjectiveMode {
    /// Number of objectives produced.
    pub fn n_objectives(self) -> usize {
        match self {
            ObjectiveMode::TwoD => 2,
            ObjectiveMode::ThreeD => 3,
            ObjectiveMode::FourD => 4,
        }
    }
}

impl FromStr for ObjectiveMode {
    type Err = BicommError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "2d" => Ok(ObjectiveMode::TwoD),
            "3d" => Ok(ObjectiveMode::ThreeD),
            "4d" => Ok(ObjectiveMode::FourD),
            _ => Err(BicommError::unknown("mode", s)),
        }
    }
}

impl fmt::Display for ObjectiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectiveMode::TwoD => "2d",
            ObjectiveMode::ThreeD => "3d",
            ObjectiveMode::FourD => "4d",
        })
    }
}

/// Modularity of the whole graph under `partition`.
pub fn graph_modularity(ctx: &ProblemContext, partition: &Partition) -> f64 {
    let g = ctx.graph();
    modularity(g.vertex_count(), g.weighted_edges(), partition.membership())
}

/// Modularity of the `side` projection under `partition` restricted to it.
pub fn projection_modularity(ctx: &ProblemContext, partition: &Partition, side: Side) -> f64 {
    let projection = ctx.projection(side);
    let restricted = Partition::from_labels(&projection.restrict(partition.membership()));
    modularity(
        projection.len(),
        projection.edges().iter().copied(),
        restricted.membership(),
    )
}

/// Objective vector of an already decoded partition.
pub fn objectives(ctx: &ProblemContext, partition: &Partition, mode: ObjectiveMode) -> Vec<f64> {
    let k = partition.num_communities() as f64;
    match mode {
        ObjectiveMode::TwoD => vec![-graph_modularity(ctx, partition), k],
        ObjectiveMode::ThreeD => vec![
            -projection_modularity(ctx, partition, Side::Lower),
            -projection_modularity(ctx, partition, Side::Upper),
            k,
        ],
        ObjectiveMode::FourD => vec![
            -projection_modularity(ctx, partition, Side::Lower),
            -projection_modularity(ctx, partition, Side::Upper),
            -graph_modularity(ctx, partition),
            k,
        ],
    }
}

/// Decodes `genome` and computes its objective vector.
///
/// # Errors
/// Fails if the genome violates the encoding contract.
pub fn evaluate(ctx: &ProblemContext, genome: &[usize], mode: ObjectiveMode) -> Result<Vec<f64>> {
    let partition = decode(genome, ctx.graph().adjacency())?;
    Ok(objectives(ctx, &partition, mode))
}

/// Evaluates every genome, in parallel when `parallel` is set.
///
/// Output order matches input order.
pub fn evaluate_population(
    ctx: &ProblemContext,
    population: &[Vec<usize>],
    mode: ObjectiveMode,
    parallel: bool,
) -> Result<Vec<Vec<f64>>> {
    if parallel {
        population
            .par_iter()
            .map(|genome| evaluate(ctx, genome, mode))
            .collect()
    } else {
        population
            .iter()
            .map(|genome| evaluate(ctx, genome, mode))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BipartiteGraph;

    fn small_ctx() -> ProblemContext {
        ProblemContext::new(
            BipartiteGraph::from_biadjacency(2, 2, &[(0, 0), (0, 1), (1, 0)]).unwrap(),
        )
    }

    #[test]
    fn test_two_d_single_community() {
        let ctx = small_ctx();
        let obj = evaluate(&ctx, &[1, 1, 1, 1], ObjectiveMode::TwoD).unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj[0], 0.0);
        assert_eq!(obj[1], 1.0);
    }

    #[test]
    fn test_two_d_singletons() {
        let ctx = small_ctx();
        let obj = evaluate(&ctx, &[0, 0, 0, 0], ObjectiveMode::TwoD).unwrap();
        assert_eq!(obj[1], 4.0);
        assert!(obj[0] > 0.0, "singletons have negative modularity");
    }

    #[test]
    fn test_mode_lengths() {
        let ctx = small_ctx();
        for mode in [ObjectiveMode::TwoD, ObjectiveMode::ThreeD, ObjectiveMode::FourD] {
            let obj = evaluate(&ctx, &[1, 1, 0, 0], mode).unwrap();
            assert_eq!(obj.len(), mode.n_objectives());
            assert_eq!(*obj.last().unwrap(), 2.0);
        }
    }

    #[test]
    fn test_four_d_contains_three_d_and_two_d() {
        let ctx = small_ctx();
        let genome = [2, 0, 1, 0];
        let two = evaluate(&ctx, &genome, ObjectiveMode::TwoD).unwrap();
        let three = evaluate(&ctx, &genome, ObjectiveMode::ThreeD).unwrap();
        let four = evaluate(&ctx, &genome, ObjectiveMode::FourD).unwrap();
        assert_eq!(four[0], three[0]);
        assert_eq!(four[1], three[1]);
        assert_eq!(four[2], two[0]);
        assert_eq!(four[3], two[1]);
    }

    #[test]
    fn test_invalid_gene_is_error() {
        let ctx = small_ctx();
        let err = evaluate(&ctx, &[0, 2, 0, 0], ObjectiveMode::TwoD).unwrap_err();
        assert!(matches!(err, BicommError::InvalidGene { vertex: 1, .. }));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ctx = small_ctx();
        let pop = vec![vec![1, 1, 1, 1], vec![0, 0, 0, 0], vec![2, 1, 0, 0]];
        let seq = evaluate_population(&ctx, &pop, ObjectiveMode::FourD, false).unwrap();
        let par = evaluate_population(&ctx, &pop, ObjectiveMode::FourD, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("2d".parse::<ObjectiveMode>().unwrap(), ObjectiveMode::TwoD);
        assert_eq!("4D".parse::<ObjectiveMode>().unwrap(), ObjectiveMode::FourD);
        assert!("5d".parse::<ObjectiveMode>().is_err());
        assert_eq!(ObjectiveMode::ThreeD.to_string(), "3d");
        assert_eq!(ObjectiveMode::default(), ObjectiveMode::ThreeD);
    }
}
