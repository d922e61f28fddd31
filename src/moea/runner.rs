//! NSGA-II generational loop over locus-based genomes.
//!
//! [`MoeaRunner`] orchestrates the search: seeding → evaluation →
//! crowded tournament → crossover → mutation → duplicate elimination →
//! rank and crowding survival → repeat.

use super::config::MoeaConfig;
use super::multi_objective::{crowding_distance, hypervolume, non_dominated_sort};
use super::selection::crowded_tournament;
use crate::community::{evaluate_population, Genome, ObjectiveMode, ProblemContext};
use crate::error::{BicommError, Result};
use crate::random::create_rng_opt;
use rand::Rng;
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// The non-dominated front after one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSnapshot {
    /// Evaluations spent so far, including the initial population.
    pub evaluations: usize,
    /// Objective vector of every rank-0 survivor, in population order.
    pub objectives: Vec<Vec<f64>>,
}

impl GenerationSnapshot {
    fn of_front(evaluations: usize, objectives: &[Vec<f64>], ranks: &[usize]) -> Self {
        Self {
            evaluations,
            objectives: objectives
                .iter()
                .zip(ranks)
                .filter(|(_, r)| **r == 0)
                .map(|(o, _)| o.clone())
                .collect(),
        }
    }
}

/// Approximate ideal and nadir points of `mode` on a graph with `n_var`
/// vertices.
///
/// Every negated modularity lies in `[−1, 1]` and the community count in
/// `[1, n_var]`.
pub fn objective_bounds(mode: ObjectiveMode, n_var: usize) -> (Vec<f64>, Vec<f64>) {
    let modularity_terms = mode.n_objectives() - 1;
    let mut ideal = vec![-1.0; modularity_terms];
    let mut nadir = vec![1.0; modularity_terms];
    ideal.push(1.0);
    nadir.push(n_var as f64);
    (ideal, nadir)
}

/// Offset added to the nadir point to form the default reference point.
pub const REFERENCE_OFFSET: f64 = 1e-3;

/// Summary handed to the termination predicate after each generation.
#[derive(Debug, Clone)]
pub struct GenerationStats {
    /// Generation just completed, starting at 1.
    pub generation: usize,
    /// Evaluations spent so far.
    pub evaluations: usize,
    /// Size of the first non-dominated front.
    pub front_size: usize,
    /// Per-objective minimum over the population.
    pub best: Vec<f64>,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct MoeaResult {
    /// Final population.
    pub population: Vec<Genome>,

    /// Objective vector of every member of `population`.
    pub objectives: Vec<Vec<f64>>,

    /// Indices into `population` of the first non-dominated front.
    pub front: Vec<usize>,

    /// Generations executed.
    pub generations: usize,

    /// Genome evaluations performed.
    pub evaluations: usize,

    /// Whether the run stopped on stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Per-generation snapshots, present when `keep_history` was set.
    pub history: Option<Vec<GenerationSnapshot>>,
}

impl MoeaResult {
    /// Genomes of the first front.
    pub fn front_genomes(&self) -> Vec<Genome> {
        self.front
            .iter()
            .map(|&i| self.population[i].clone())
            .collect()
    }

    /// `(evaluations, hypervolume)` for every retained generation.
    ///
    /// # Errors
    /// [`BicommError::MissingHistory`] if the run kept no history;
    /// [`BicommError::DimensionMismatch`] if `reference` does not match the
    /// objective count.
    pub fn hypervolume_history(&self, reference: &[f64]) -> Result<Vec<(usize, f64)>> {
        let history = self.history.as_ref().ok_or(BicommError::MissingHistory)?;
        history
            .iter()
            .map(|snap| Ok((snap.evaluations, hypervolume(&snap.objectives, reference)?)))
            .collect()
    }

    /// Hypervolume history against the default bounds of `mode`.
    ///
    /// Objectives are scaled by [`objective_bounds`] so the ideal maps to 0
    /// and the nadir to 1; the reference point is the unscaled nadir plus
    /// [`REFERENCE_OFFSET`].
    ///
    /// # Errors
    /// As [`hypervolume_history`](Self::hypervolume_history).
    pub fn normalized_hypervolume_history(
        &self,
        mode: ObjectiveMode,
        n_var: usize,
    ) -> Result<Vec<(usize, f64)>> {
        let history = self.history.as_ref().ok_or(BicommError::MissingHistory)?;
        let (ideal, nadir) = objective_bounds(mode, n_var);
        let reference: Vec<f64> = nadir.iter().map(|x| x + REFERENCE_OFFSET).collect();
        let span: Vec<f64> = ideal
            .iter()
            .zip(&nadir)
            .map(|(lo, hi)| if hi > lo { hi - lo } else { 1.0 })
            .collect();

        history
            .iter()
            .map(|snap| {
                let scaled: Vec<Vec<f64>> = snap
                    .objectives
                    .iter()
                    .map(|o| {
                        o.iter()
                            .zip(ideal.iter().zip(&span))
                            .map(|(x, (lo, w))| (x - lo) / w)
                            .collect()
                    })
                    .collect();
                Ok((snap.evaluations, hypervolume(&scaled, &reference)?))
            })
            .collect()
    }
}

/// Executes the evolutionary search.
///
/// # Usage
///
/// ```
/// use u_bicomm::community::ProblemContext;
/// use u_bicomm::graph::BipartiteGraph;
/// use u_bicomm::moea::{MoeaConfig, MoeaRunner};
///
/// let graph = BipartiteGraph::from_biadjacency(2, 2, &[(0, 0), (0, 1), (1, 0)]).unwrap();
/// let ctx = ProblemContext::new(graph);
/// let config = MoeaConfig::default()
///     .with_population_size(8)
///     .with_max_generations(5)
///     .with_seed(42);
/// let result = MoeaRunner::run(&ctx, &config).unwrap();
/// assert!(!result.front.is_empty());
/// ```
pub struct MoeaRunner;

impl MoeaRunner {
    /// Runs the search to completion.
    ///
    /// # Errors
    /// Fails if the configuration is invalid or an operator produces a
    /// malformed genome.
    pub fn run(ctx: &ProblemContext, config: &MoeaConfig) -> Result<MoeaResult> {
        Self::run_with_cancel(ctx, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// When the flag is set, the run stops at the start of the next
    /// generation and returns the current population.
    pub fn run_with_cancel(
        ctx: &ProblemContext,
        config: &MoeaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<MoeaResult> {
        Self::run_until(ctx, config, cancel, |_| false)
    }

    /// Runs the search until `stop` returns `true` for a generation, or a
    /// built-in termination rule fires.
    pub fn run_until<F>(
        ctx: &ProblemContext,
        config: &MoeaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut stop: F,
    ) -> Result<MoeaResult>
    where
        F: FnMut(&GenerationStats) -> bool,
    {
        config.validate()?;
        let started = Instant::now();
        let mut rng = create_rng_opt(config.seed);
        let size = config.population_size;

        log::info!(
            "moea start: {} vertices, population {}, up to {} generations, mode {}, mutation {}, seeding {}",
            ctx.n_var(),
            size,
            config.max_generations,
            config.mode,
            config.mutation,
            config.seeding
        );

        let mut population = config.seeding.seed(ctx, size, &mut rng);
        let mut objectives = evaluate_population(ctx, &population, config.mode, config.parallel)?;
        let mut evaluations = population.len();
        let (mut ranks, mut crowding) = rank_and_crowd(&objectives);

        let mut history = config
            .keep_history
            .then(|| vec![GenerationSnapshot::of_front(evaluations, &objectives, &ranks)]);

        let mut best_first = column_min(&objectives, 0);
        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        for gen in 0..config.max_generations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    log::debug!("time limit reached after {} generations", gen);
                    break;
                }
            }

            // Variation
            let mut offspring: Vec<Genome> = Vec::with_capacity(size);
            while offspring.len() < size {
                let p1 = crowded_tournament(&ranks, &crowding, &mut rng);
                let p2 = crowded_tournament(&ranks, &crowding, &mut rng);
                let (c1, c2) = if rng.random_bool(config.crossover_rate) {
                    config
                        .crossover
                        .apply(&population[p1], &population[p2], &mut rng)
                } else {
                    (population[p1].clone(), population[p2].clone())
                };
                offspring.push(c1);
                if offspring.len() < size {
                    offspring.push(c2);
                }
            }
            let mutation_seed: u64 = rng.random();
            let offspring = config
                .mutation
                .apply(ctx, &offspring, mutation_seed, config.parallel)?;
            let offspring = eliminate_duplicates(&population, offspring);

            let offspring_objectives =
                evaluate_population(ctx, &offspring, config.mode, config.parallel)?;
            evaluations += offspring.len();

            // Survival over parents and offspring
            population.extend(offspring);
            objectives.extend(offspring_objectives);
            let survivors = select_survivors(&objectives, size);
            population = survivors.iter().map(|&i| population[i].clone()).collect();
            objectives = survivors.iter().map(|&i| objectives[i].clone()).collect();
            (ranks, crowding) = rank_and_crowd(&objectives);

            if let Some(h) = history.as_mut() {
                h.push(GenerationSnapshot::of_front(evaluations, &objectives, &ranks));
            }

            generations = gen + 1;
            let stats = GenerationStats {
                generation: generations,
                evaluations,
                front_size: ranks.iter().filter(|&&r| r == 0).count(),
                best: (0..config.mode.n_objectives())
                    .map(|k| column_min(&objectives, k))
                    .collect(),
            };
            log::debug!(
                "generation {}: {} evaluations, front size {}, best {:?}",
                stats.generation,
                stats.evaluations,
                stats.front_size,
                stats.best
            );

            let gen_best = stats.best[0];
            if gen_best < best_first - config.convergence_threshold {
                best_first = gen_best;
                stagnation_counter = 0;
            } else {
                best_first = best_first.min(gen_best);
                stagnation_counter += 1;
            }

            if stop(&stats) {
                break;
            }
            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let front: Vec<usize> = (0..population.len()).filter(|&i| ranks[i] == 0).collect();
        log::info!(
            "moea finished: {} generations, {} evaluations, front size {}{}{}",
            generations,
            evaluations,
            front.len(),
            if stagnated { ", stagnated" } else { "" },
            if cancelled { ", cancelled" } else { "" }
        );

        Ok(MoeaResult {
            population,
            objectives,
            front,
            generations,
            evaluations,
            stagnated,
            cancelled,
            history,
        })
    }
}

/// Pareto rank and within-front crowding distance of every solution.
fn rank_and_crowd(objectives: &[Vec<f64>]) -> (Vec<usize>, Vec<f64>) {
    let sorted = non_dominated_sort(objectives);
    let mut crowding = vec![0.0; objectives.len()];
    for front in &sorted.fronts {
        let front_objectives: Vec<Vec<f64>> =
            front.iter().map(|&i| objectives[i].clone()).collect();
        for (&i, d) in front.iter().zip(crowding_distance(&front_objectives)) {
            crowding[i] = d;
        }
    }
    (sorted.ranks, crowding)
}

/// Indices of the `size` survivors: whole fronts in rank order, the last
/// partial front filled by descending crowding distance.
fn select_survivors(objectives: &[Vec<f64>], size: usize) -> Vec<usize> {
    let sorted = non_dominated_sort(objectives);
    let mut survivors = Vec::with_capacity(size);
    for front in sorted.fronts {
        let room = size - survivors.len();
        if front.len() <= room {
            survivors.extend(front);
        } else {
            let front_objectives: Vec<Vec<f64>> =
                front.iter().map(|&i| objectives[i].clone()).collect();
            let distances = crowding_distance(&front_objectives);
            let mut order: Vec<usize> = (0..front.len()).collect();
            order.sort_by(|&a, &b| {
                distances[b]
                    .partial_cmp(&distances[a])
                    .unwrap_or(CmpOrdering::Equal)
            });
            survivors.extend(order.into_iter().take(room).map(|k| front[k]));
        }
        if survivors.len() == size {
            break;
        }
    }
    survivors
}

/// Drops offspring identical to a parent or to an earlier offspring.
fn eliminate_duplicates(parents: &[Genome], offspring: Vec<Genome>) -> Vec<Genome> {
    let mut seen: HashSet<Genome> = parents.iter().cloned().collect();
    offspring
        .into_iter()
        .filter(|child| seen.insert(child.clone()))
        .collect()
}

fn column_min(objectives: &[Vec<f64>], k: usize) -> f64 {
    objectives
        .iter()
        .map(|o| o[k])
        .fold(f64::INFINITY, f64::min)
}
