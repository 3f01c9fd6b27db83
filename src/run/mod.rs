//! # Run Driver (`run`)
//!
//! Initializes one engine, then yields exactly `total_frames` frames in step
//! order. The consumer pulls frames and renders them; nothing flows back into
//! the optimizer.

use crate::config::RunConfig;
use crate::error::DescentError;
use crate::framing::FramingPolicy;
use crate::landscape::{LossSurface, RuggedBowl};
use crate::optim::{MomentumDescent, Optimizer, SeedStrategy};
use rand::Rng;
use std::iter::FusedIterator;
use tracing::info;

// --- Submodules ---
pub mod frame;
pub mod trajectory;

// --- Re-exports ---
pub use frame::{Frame, Readout};
pub use trajectory::Trajectory;

/// A single run: one engine, one framing policy, a fixed frame budget.
#[derive(Debug, Clone)]
pub struct Run<S: LossSurface = RuggedBowl> {
    engine: MomentumDescent<S>,
    policy: FramingPolicy,
    config: RunConfig,
    initial: Frame,
    remaining: usize,
}

impl Run<RuggedBowl> {
    /// Validates `config` and initializes the engine on the rugged surface.
    /// All configuration errors surface here, before any frame exists.
    pub fn new(config: RunConfig, strategy: SeedStrategy) -> Result<Self, DescentError> {
        Self::on_surface(RuggedBowl, config, strategy)
    }

    /// Like [`Run::new`], drawing the initial parameter from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: RunConfig, rng: &mut R) -> Result<Self, DescentError> {
        config.validate()?;
        let engine = MomentumDescent::initialize_with_rng(config.momentum_params(), rng)?;
        Self::from_engine(config, engine)
    }
}

impl<S: LossSurface> Run<S> {
    pub fn on_surface(
        surface: S,
        config: RunConfig,
        strategy: SeedStrategy,
    ) -> Result<Self, DescentError> {
        config.validate()?;
        let engine = MomentumDescent::on_surface(surface, config.momentum_params(), strategy)?;
        Self::from_engine(config, engine)
    }

    /// Wraps a freshly initialized engine. Its parameters must match
    /// `config` and it must not have stepped yet.
    pub fn from_engine(config: RunConfig, engine: MomentumDescent<S>) -> Result<Self, DescentError> {
        config.validate()?;
        if *engine.params() != config.momentum_params() {
            return Err(DescentError::invalid(
                "engine",
                "parameters differ from the run configuration",
            ));
        }
        if engine.state().step_index != 0 {
            return Err(DescentError::invalid(
                "engine",
                format!("already at step {}, a run starts at step 0", engine.state().step_index),
            ));
        }
        let policy = config.framing_policy()?;
        let half_width = config.domain_half_width;
        policy.check_domain(half_width, engine.surface().loss_bound(half_width))?;
        let record = engine.snapshot();
        let initial = Frame::new(record, policy.frame(&record));
        info!(
            theta0 = record.theta,
            loss0 = record.loss,
            total_frames = config.total_frames,
            learning_rate = config.learning_rate,
            momentum = config.momentum,
            "run initialized"
        );
        Ok(Run {
            engine,
            policy,
            config,
            initial,
            remaining: config.total_frames,
        })
    }

    /// Display state before the first step (step 0).
    pub fn initial_frame(&self) -> Frame {
        self.initial
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn engine(&self) -> &MomentumDescent<S> {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        self.engine.surface()
    }

    /// Frames still to be produced.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Drains the run; the result starts with the initial frame and holds
    /// `total_frames + 1` frames.
    pub fn collect_trajectory(mut self) -> Trajectory {
        let mut trajectory = Trajectory::with_capacity(self.remaining + 1);
        trajectory.push(self.initial);
        trajectory.extend(&mut self);
        trajectory
    }
}

impl<S: LossSurface> Iterator for Run<S> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let record = self.engine.step();
        let frame = Frame::new(record, self.policy.frame(&record));
        if self.remaining == 0 {
            info!(
                steps = record.step_index,
                theta = record.theta,
                loss = record.loss,
                "run complete"
            );
        }
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: LossSurface> ExactSizeIterator for Run<S> {}

impl<S: LossSurface> FusedIterator for Run<S> {}
