//! # Frames and Readouts
//!
//! The unit handed to a renderer: one optimizer record plus the window it
//! should be drawn in.

use crate::framing::ViewWindow;
use crate::landscape::{LossSurface, TangentSegment};
use crate::optim::FrameRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One output frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub record: FrameRecord,
    pub window: ViewWindow,
}

impl Frame {
    pub fn new(record: FrameRecord, window: ViewWindow) -> Self {
        Frame { record, window }
    }

    pub fn step_index(&self) -> u64 {
        self.record.step_index
    }

    /// Gradient line through the point, using the recorded slope.
    pub fn tangent<S: LossSurface>(&self, surface: &S) -> TangentSegment {
        TangentSegment::with_defaults(surface, self.record.theta, self.record.gradient)
    }

    pub fn readout(&self) -> Readout {
        Readout::from(&self.record)
    }
}

// --- Text Overlay ---

/// Values shown in the on-screen text box.
///
/// `iteration` is the record's `step_index`, so the first stepped frame
/// reads `Iteration: 1`. This intentionally differs from labelling frames by
/// their 0-based position in the animation, which would show `Iteration: 0`
/// for both the initial state and the first step.
///
/// The velocity line is omitted only for an initial state at rest; a
/// non-zero velocity is always shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub iteration: u64,
    pub theta: f64,
    pub loss: f64,
    pub gradient: f64,
    pub velocity: Option<f64>,
}

impl From<&FrameRecord> for Readout {
    fn from(record: &FrameRecord) -> Self {
        Readout {
            iteration: record.step_index,
            theta: record.theta,
            loss: record.loss,
            gradient: record.gradient,
            velocity: (!record.is_initial() || record.velocity != 0.0).then_some(record.velocity),
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Iteration: {}\nθ: {:.4}\nLoss: {:.4}\nGradient: {:.4}",
            self.iteration, self.theta, self.loss, self.gradient
        )?;
        if let Some(v) = self.velocity {
            write!(f, "\nVelocity: {v:.4}")?;
        }
        Ok(())
    }
}
