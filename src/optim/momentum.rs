//! # Momentum Gradient Descent
//!
//! Classic heavy-ball update on a scalar parameter, followed by a hard clamp
//! into `[-L, L]`:
//!
//! ```text
//! g  = ∇loss(θ)
//! v ← momentum·v − lr·g
//! θ ← clamp(θ + v, −L, L)
//! ```
//!
//! The clamp does not touch the velocity. A parameter pinned at the boundary
//! therefore stays pinned for as long as the accumulated velocity points
//! outward.

use super::{FrameRecord, Optimizer, OptimizerState};
use crate::error::DescentError;
use crate::landscape::{LossSurface, RuggedBowl};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub const DEFAULT_HALF_WIDTH: f64 = 50.0;
pub const DEFAULT_LEARNING_RATE: f64 = 0.002;
pub const DEFAULT_MOMENTUM: f64 = 0.99;

// --- Hyperparameters ---

/// Fixed numerics of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumParams {
    /// `L`: theta is clamped to, and initially drawn from, `[-L, L]`.
    pub half_width: f64,
    pub learning_rate: f64,
    /// Velocity retention coefficient, in `[0, 1)`.
    pub momentum: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        MomentumParams {
            half_width: DEFAULT_HALF_WIDTH,
            learning_rate: DEFAULT_LEARNING_RATE,
            momentum: DEFAULT_MOMENTUM,
        }
    }
}

impl MomentumParams {
    /// Checks the parameter ranges. NaN fails every check.
    pub fn validate(&self) -> Result<(), DescentError> {
        if !(self.half_width.is_finite() && self.half_width > 0.0) {
            return Err(DescentError::invalid(
                "domain_half_width",
                format!("must be finite and > 0, got {}", self.half_width),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(DescentError::invalid(
                "learning_rate",
                format!("must be finite and > 0, got {}", self.learning_rate),
            ));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(DescentError::invalid(
                "momentum",
                format!("must lie in [0, 1), got {}", self.momentum),
            ));
        }
        Ok(())
    }

    fn check_theta(&self, theta: f64) -> Result<(), DescentError> {
        if !(theta.is_finite() && theta.abs() <= self.half_width) {
            return Err(DescentError::invalid(
                "initial_theta",
                format!("must lie in [-{0}, {0}], got {theta}", self.half_width),
            ));
        }
        Ok(())
    }
}

// --- Initial Parameter Draw ---

/// Where the initial parameter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum SeedStrategy {
    /// Uniform draw from an OS-seeded generator; every run differs.
    #[default]
    Entropy,
    /// Uniform draw from a generator seeded with the given value.
    Seeded(u64),
    /// Start exactly here.
    Fixed(f64),
}

// --- Engine ---

/// Momentum gradient descent on a one-dimensional loss surface.
#[derive(Debug, Clone)]
pub struct MomentumDescent<S: LossSurface = RuggedBowl> {
    surface: S,
    params: MomentumParams,
    state: OptimizerState,
}

impl MomentumDescent<RuggedBowl> {
    /// Validates `params` and draws the initial parameter per `strategy` on
    /// the default rugged surface.
    pub fn initialize(params: MomentumParams, strategy: SeedStrategy) -> Result<Self, DescentError> {
        Self::on_surface(RuggedBowl, params, strategy)
    }

    /// Same as [`MomentumDescent::initialize`] with a caller-supplied random source.
    pub fn initialize_with_rng<R: Rng + ?Sized>(
        params: MomentumParams,
        rng: &mut R,
    ) -> Result<Self, DescentError> {
        Self::on_surface_with_rng(RuggedBowl, params, rng)
    }

    /// Resumes from an explicit `(theta, velocity)` pair at step 0.
    pub fn from_state(params: MomentumParams, theta: f64, velocity: f64) -> Result<Self, DescentError> {
        Self::on_surface_from_state(RuggedBowl, params, theta, velocity)
    }
}

impl<S: LossSurface> MomentumDescent<S> {
    /// Creates an engine on an arbitrary surface.
    ///
    /// # Arguments
    /// * `surface`: The loss surface to descend.
    /// * `params`: Domain half width, learning rate and momentum; validated here.
    /// * `strategy`: How the initial parameter is chosen.
    pub fn on_surface(
        surface: S,
        params: MomentumParams,
        strategy: SeedStrategy,
    ) -> Result<Self, DescentError> {
        match strategy {
            SeedStrategy::Entropy => Self::on_surface_with_rng(surface, params, &mut rand::thread_rng()),
            SeedStrategy::Seeded(seed) => {
                Self::on_surface_with_rng(surface, params, &mut StdRng::seed_from_u64(seed))
            }
            SeedStrategy::Fixed(theta) => Self::on_surface_from_state(surface, params, theta, 0.0),
        }
    }

    pub fn on_surface_with_rng<R: Rng + ?Sized>(
        surface: S,
        params: MomentumParams,
        rng: &mut R,
    ) -> Result<Self, DescentError> {
        params.validate()?;
        check_numerics(&surface, &params, 0.0)?;
        let l = params.half_width;
        let theta = rng.gen_range(-l..=l);
        Ok(MomentumDescent {
            surface,
            params,
            state: OptimizerState::new(theta),
        })
    }

    pub fn on_surface_from_state(
        surface: S,
        params: MomentumParams,
        theta: f64,
        velocity: f64,
    ) -> Result<Self, DescentError> {
        params.validate()?;
        params.check_theta(theta)?;
        if !velocity.is_finite() {
            return Err(DescentError::invalid(
                "initial_velocity",
                format!("must be finite, got {velocity}"),
            ));
        }
        check_numerics(&surface, &params, velocity)?;
        Ok(MomentumDescent {
            surface,
            params,
            state: OptimizerState {
                theta,
                velocity,
                step_index: 0,
            },
        })
    }

    pub fn params(&self) -> &MomentumParams {
        &self.params
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Rejects a domain or step size that the surface's bounds say would overflow.
///
/// With `|g| ≤ G` on the domain, the velocity recursion stays within
/// `|v₀| + lr·G / (1 − momentum)`; the check keeps `L` plus twice that
/// finite so `θ + v` can never reach infinity.
fn check_numerics<S: LossSurface>(
    surface: &S,
    params: &MomentumParams,
    velocity: f64,
) -> Result<(), DescentError> {
    let l = params.half_width;
    if let Some(loss_bound) = surface.loss_bound(l) {
        if !loss_bound.is_finite() {
            return Err(DescentError::invalid(
                "domain_half_width",
                format!("loss overflows on [-{l}, {l}]"),
            ));
        }
    }
    if let Some(grad_bound) = surface.gradient_bound(l) {
        if !grad_bound.is_finite() {
            return Err(DescentError::invalid(
                "domain_half_width",
                format!("gradient overflows on [-{l}, {l}]"),
            ));
        }
        let speed = params.learning_rate * grad_bound / (1.0 - params.momentum);
        let reach = l + 2.0 * (velocity.abs() + speed);
        if !reach.is_finite() {
            return Err(DescentError::invalid(
                "learning_rate",
                format!(
                    "{} overflows the update with |gradient| up to {grad_bound} and momentum {}",
                    params.learning_rate, params.momentum
                ),
            ));
        }
    }
    Ok(())
}

impl<S: LossSurface> Optimizer for MomentumDescent<S> {
    fn step(&mut self) -> FrameRecord {
        let MomentumParams {
            half_width,
            learning_rate,
            momentum,
        } = self.params;
        let state = &mut self.state;

        let gradient = self.surface.gradient(state.theta);
        state.velocity = momentum * state.velocity - learning_rate * gradient;

        let unclamped = state.theta + state.velocity;
        state.theta = unclamped.clamp(-half_width, half_width);
        if state.theta != unclamped {
            debug!(
                step = state.step_index + 1,
                theta = state.theta,
                velocity = state.velocity,
                "parameter clamped at domain boundary"
            );
        }
        debug_assert!(
            state.theta.is_finite() && state.velocity.is_finite(),
            "non-finite state after step {}: theta={} velocity={}",
            state.step_index + 1,
            state.theta,
            state.velocity
        );
        state.step_index += 1;

        let record = FrameRecord {
            step_index: state.step_index,
            theta: state.theta,
            loss: self.surface.loss(state.theta),
            gradient,
            velocity: state.velocity,
        };
        trace!(?record, "step");
        record
    }

    fn state(&self) -> &OptimizerState {
        &self.state
    }

    fn snapshot(&self) -> FrameRecord {
        let (loss, gradient) = self.surface.evaluate(self.state.theta);
        FrameRecord {
            step_index: self.state.step_index,
            theta: self.state.theta,
            loss,
            gradient,
            velocity: self.state.velocity,
        }
    }
}
