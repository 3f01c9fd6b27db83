//! # Optimizer State and Frame Records

use serde::{Deserialize, Serialize};

/// Mutable run state, owned by exactly one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerState {
    /// Current parameter, always inside `[-L, L]`.
    pub theta: f64,
    /// Momentum accumulator, unconstrained.
    pub velocity: f64,
    /// Completed updates.
    pub step_index: u64,
}

impl OptimizerState {
    pub fn new(theta: f64) -> Self {
        OptimizerState {
            theta,
            velocity: 0.0,
            step_index: 0,
        }
    }
}

/// Snapshot produced once per step.
///
/// `gradient` is the value used for the update, i.e. evaluated at the
/// parameter *before* the step; `loss` is evaluated at the parameter after it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub step_index: u64,
    pub theta: f64,
    pub loss: f64,
    pub gradient: f64,
    pub velocity: f64,
}

impl FrameRecord {
    /// The plotted point `(theta, loss)`.
    pub fn point(&self) -> (f64, f64) {
        (self.theta, self.loss)
    }

    pub fn is_initial(&self) -> bool {
        self.step_index == 0
    }
}
