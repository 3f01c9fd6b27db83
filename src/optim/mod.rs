//! # Optimization Algorithms (`optim`)
//!
//! The step engine that moves a single scalar parameter across a loss
//! surface, one discrete time step per call, emitting an immutable record of
//! each step.

// --- Submodules ---
pub mod momentum;
pub mod state;

// Re-export optimizers
pub use momentum::{MomentumDescent, MomentumParams, SeedStrategy};
pub use state::{FrameRecord, OptimizerState};

// --- Optimizer Trait ---

/// Base trait for step engines.
pub trait Optimizer {
    /// Performs a single optimization step and returns the record of the
    /// state it produced. Steps cannot fail: all inputs were validated when
    /// the engine was built.
    fn step(&mut self) -> FrameRecord;

    /// Current mutable run state.
    fn state(&self) -> &OptimizerState;

    /// Record describing the current state without advancing it. Before the
    /// first `step()` this is the initial display state (step 0).
    fn snapshot(&self) -> FrameRecord;
}
