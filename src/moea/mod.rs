//! Multi-objective evolutionary host for locus-based community genomes.
//!
//! An NSGA-II loop that drives the community core: it seeds a population,
//! evaluates it, and per generation calls crossover, the configured
//! mutation strategy and the fitness evaluator, keeping survivors by
//! Pareto rank and crowding distance.
//!
//! # Key Types
//!
//! - [`MoeaConfig`]: population, operators, termination, presets
//! - [`MoeaRunner`]: executes the loop
//! - [`MoeaResult`]: final population, first front and optional history
//!
//! # Submodules
//!
//! - [`operators`]: uniform and two-point crossover on integer genomes
//! - [`multi_objective`]: non-dominated sorting, crowding distance, hypervolume
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Pizzuti (2012), "A Multiobjective Genetic Algorithm to Find Communities
//!   in Complex Networks"

mod config;
pub mod multi_objective;
pub mod operators;
mod runner;
mod selection;

pub use config::{Crossover, MoeaConfig};
pub use runner::{
    objective_bounds, GenerationSnapshot, GenerationStats, MoeaResult, MoeaRunner, REFERENCE_OFFSET,
};
pub use selection::{crowded_better, crowded_tournament};
