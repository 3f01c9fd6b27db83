//! # Parallelism Utilities (CPU Threading)
//!
//! Runs several independent optimizations side by side with `rayon`, e.g. to
//! compare where different starting points end up. Every run owns its own
//! engine and state; nothing is shared between runs.

use crate::config::RunConfig;
use crate::error::DescentError;
use crate::optim::SeedStrategy;
use crate::run::{Run, Trajectory};
use rayon::prelude::*;
use tracing::info;

/// Outcome of one run in a batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub strategy: SeedStrategy,
    pub trajectory: Trajectory,
}

impl BatchResult {
    pub fn final_loss(&self) -> Option<f64> {
        self.trajectory.final_frame().map(|f| f.record.loss)
    }
}

/// Executes one run per strategy in parallel, returning results in input order.
///
/// The configuration is validated once up front, so a bad config fails the
/// whole batch before any run starts.
pub fn run_batch(
    config: &RunConfig,
    strategies: &[SeedStrategy],
) -> Result<Vec<BatchResult>, DescentError> {
    config.validate()?;
    info!(runs = strategies.len(), total_frames = config.total_frames, "starting batch");
    strategies
        .par_iter()
        .map(|&strategy| {
            let run = Run::new(*config, strategy)?;
            Ok::<_, DescentError>(BatchResult {
                strategy,
                trajectory: run.collect_trajectory(),
            })
        })
        .collect()
}

/// Convenience wrapper: one seeded run per seed.
pub fn run_seeds(config: &RunConfig, seeds: &[u64]) -> Result<Vec<BatchResult>, DescentError> {
    let strategies: Vec<SeedStrategy> = seeds.iter().map(|&s| SeedStrategy::Seeded(s)).collect();
    run_batch(config, &strategies)
}

/// Index of the result with the lowest final loss.
pub fn best_of(results: &[BatchResult]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.final_loss().map(|l| (i, l)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}
