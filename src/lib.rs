//! # descent_viz Core Library
//!
//! Momentum gradient descent on a fixed, rugged one-dimensional loss
//! landscape, producing the per-frame data an animation needs: the current
//! parameter, loss, gradient and velocity, plus an auto-framed view window.
//! Drawing and video encoding are left to the consumer.
//!
//! ```no_run
//! use descent_viz::{Run, RunConfig, SeedStrategy};
//!
//! let run = Run::new(RunConfig::from_duration(15, 30), SeedStrategy::Entropy)?;
//! println!("{}", run.initial_frame().readout());
//! for frame in run {
//!     let w = frame.window;
//!     println!("{} -> x in [{:.2}, {:.2}]", frame.step_index(), w.x_min, w.x_max);
//! }
//! # Ok::<(), descent_viz::DescentError>(())
//! ```

pub mod config;
pub mod error;
pub mod framing;
pub mod landscape;
pub mod optim;
pub mod run;
pub mod utils;

pub use config::RunConfig;
pub use error::DescentError;
pub use framing::{FramingPolicy, ViewWindow};
pub use landscape::{LossSurface, RuggedBowl};
pub use optim::{FrameRecord, MomentumDescent, MomentumParams, Optimizer, OptimizerState, SeedStrategy};
pub use run::{Frame, Readout, Run, Trajectory};
