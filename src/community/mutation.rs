//! Mutation operators for locus-based genomes.
//!
//! Every operator keeps gene `i` inside `[0, deg(i)]`. Input genomes are
//! validated first; an out-of-range gene is reported as an error rather
//! than repaired.
//!
//! # Operators
//!
//! - [`MutationStrategy::Uniform`]: per gene with probability `1/n_var`,
//!   a uniform neighbor in `[1, deg(i)]`
//! - [`MutationStrategy::CentralityBiased`]: per gene with probability
//!   `prob2[i]` (vertex betweenness share), a neighbor drawn by edge
//!   betweenness share
//! - [`MutationStrategy::PolynomialInt`]: Deb's polynomial mutation on
//!   `[0, deg(i)]`, rounded to the nearest integer
//!
//! # References
//!
//! - Deb & Goyal (1996), "A combined genetic adaptive search (GeneAS) for
//!   engineering design", polynomial mutation

use super::context::ProblemContext;
use super::encoding::{validate_genome, Genome};
use crate::error::{BicommError, Result};
use crate::random::{stream_rng, weighted_choice};
use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Default distribution index of polynomial mutation.
pub const DEFAULT_ETA: f64 = 20.0;

/// Mutation strategy applied to every offspring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationStrategy {
    /// Uniformly random neighbor, rate `1/n_var`.
    Uniform,
    /// Betweenness-biased vertex and neighbor choice.
    #[default]
    CentralityBiased,
    /// Polynomial integer mutation with distribution index `eta`.
    PolynomialInt {
        /// Larger values keep children closer to the parent gene.
        eta: f64,
    },
}

impl MutationStrategy {
    /// Mutates one genome in place.
    ///
    /// # Errors
    /// Fails if `genome` violates the encoding contract.
    pub fn mutate_genome<R: Rng>(
        &self,
        ctx: &ProblemContext,
        genome: &mut [usize],
        rng: &mut R,
    ) -> Result<()> {
        validate_genome(genome, ctx.graph().adjacency())?;
        match *self {
            MutationStrategy::Uniform => uniform(ctx, genome, rng),
            MutationStrategy::CentralityBiased => centrality_biased(ctx, genome, rng),
            MutationStrategy::PolynomialInt { eta } => polynomial_int(ctx, genome, eta, rng),
        }
        Ok(())
    }

    /// Returns a mutated copy of `population`, same shape.
    ///
    /// Row `r` draws from stream `r` of a generator seeded with `seed`, so
    /// the result is identical with or without `parallel`.
    pub fn apply(
        &self,
        ctx: &ProblemContext,
        population: &[Genome],
        seed: u64,
        parallel: bool,
    ) -> Result<Vec<Genome>> {
        let mutate_row = |(row, genome): (usize, &Genome)| -> Result<Genome> {
            let mut rng = stream_rng(seed, row as u64);
            let mut child = genome.clone();
            self.mutate_genome(ctx, &mut child, &mut rng)?;
            Ok(child)
        };

        if parallel {
            population.par_iter().enumerate().map(mutate_row).collect()
        } else {
            population.iter().enumerate().map(mutate_row).collect()
        }
    }
}

impl FromStr for MutationStrategy {
    type Err = BicommError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" | "baseline" | "pizzuti" => Ok(MutationStrategy::Uniform),
            "" | "centrality" | "primary" => Ok(MutationStrategy::CentralityBiased),
            "polynomial" | "int" | "int_pm" | "int-pm" => {
                Ok(MutationStrategy::PolynomialInt { eta: DEFAULT_ETA })
            }
            _ => Err(BicommError::unknown("mutation", s)),
        }
    }
}

impl fmt::Display for MutationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationStrategy::Uniform => f.write_str("uniform"),
            MutationStrategy::CentralityBiased => f.write_str("centrality"),
            MutationStrategy::PolynomialInt { eta } => write!(f, "polynomial(eta={eta})"),
        }
    }
}

fn uniform<R: Rng>(ctx: &ProblemContext, genome: &mut [usize], rng: &mut R) {
    let rate = 1.0 / genome.len() as f64;
    for (v, gene) in genome.iter_mut().enumerate() {
        if rng.random_range(0.0..1.0) < rate {
            *gene = rng.random_range(1..=ctx.upper_bound(v));
        }
    }
}

fn centrality_biased<R: Rng>(ctx: &ProblemContext, genome: &mut [usize], rng: &mut R) {
    let bias = ctx.bias();
    for (v, gene) in genome.iter_mut().enumerate() {
        if rng.random_range(0.0..1.0) < bias.prob2[v] {
            *gene = weighted_choice(&bias.edge_p[v], rng) + 1;
        }
    }
}

fn polynomial_int<R: Rng>(ctx: &ProblemContext, genome: &mut [usize], eta: f64, rng: &mut R) {
    let rate = 1.0 / genome.len() as f64;
    let mut_pow = 1.0 / (eta + 1.0);

    for (v, gene) in genome.iter_mut().enumerate() {
        if rng.random_range(0.0..1.0) >= rate {
            continue;
        }
        let (yl, yu) = (0.0, ctx.upper_bound(v) as f64);
        if yu <= yl {
            continue;
        }
        let y = *gene as f64;
        let delta1 = (y - yl) / (yu - yl);
        let delta2 = (yu - y) / (yu - yl);
        let r: f64 = rng.random_range(0.0..1.0);

        let deltaq = if r <= 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * r + (1.0 - 2.0 * r) * xy.powf(eta + 1.0);
            val.powf(mut_pow) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - r) + 2.0 * (r - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(mut_pow)
        };

        let mutated = (y + deltaq * (yu - yl)).round().clamp(yl, yu);
        *gene = mutated as usize;
    }
}
