//! # Auto-Framing (`framing`)
//!
//! Picks the visible coordinate window for each frame so the moving point
//! stays legible: centred horizontally on θ, and biased upward vertically
//! because the point mostly sits near a local minimum.

use crate::error::DescentError;
use crate::optim::FrameRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MARGIN_X: f64 = 2.0;
pub const DEFAULT_MARGIN_Y: f64 = 1.0;
/// Headroom above the point, in units of `margin_y`.
const HEADROOM: f64 = 3.0;

// --- View Window ---

/// Rectangle of data coordinates to show for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewWindow {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    pub fn x_range(&self) -> std::ops::Range<f64> {
        self.x_min..self.x_max
    }

    pub fn y_range(&self) -> std::ops::Range<f64> {
        self.y_min..self.y_max
    }
}

// --- Framing Policy ---

/// Fixed-margin framing around the current point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramingPolicy {
    margin_x: f64,
    margin_y: f64,
}

impl Default for FramingPolicy {
    fn default() -> Self {
        FramingPolicy {
            margin_x: DEFAULT_MARGIN_X,
            margin_y: DEFAULT_MARGIN_Y,
        }
    }
}

impl FramingPolicy {
    /// Creates a policy; both margins must be finite and > 0. Whether they
    /// survive rounding at a given scale is checked by
    /// [`FramingPolicy::check_domain`].
    pub fn new(margin_x: f64, margin_y: f64) -> Result<Self, DescentError> {
        if !(margin_x.is_finite() && margin_x > 0.0) {
            return Err(DescentError::invalid(
                "margin_x",
                format!("must be finite and > 0, got {margin_x}"),
            ));
        }
        if !(margin_y.is_finite() && margin_y > 0.0) {
            return Err(DescentError::invalid(
                "margin_y",
                format!("must be finite and > 0, got {margin_y}"),
            ));
        }
        Ok(FramingPolicy { margin_x, margin_y })
    }

    /// Ensures every window over a domain stays non-degenerate.
    ///
    /// The margins must still be visible after rounding at the largest `|θ|`
    /// (`half_width`) and, when the surface reports one, the largest `|loss|`
    /// (`loss_bound`). Smaller magnitudes have finer spacing, so the extremes
    /// are the only cases to test. The loss side is tested at twice the bound,
    /// since an evaluated loss may round past it into the next binade.
    pub fn check_domain(&self, half_width: f64, loss_bound: Option<f64>) -> Result<(), DescentError> {
        let loss_edge = loss_bound.map(|b| 2.0 * b);
        let edge = self.frame(&FrameRecord {
            step_index: 0,
            theta: half_width,
            loss: loss_edge.unwrap_or(0.0),
            gradient: 0.0,
            velocity: 0.0,
        });
        if !(edge.x_min < edge.x_max && edge.x_min < half_width && half_width < edge.x_max) {
            return Err(DescentError::invalid(
                "margin_x",
                format!("{} is lost to rounding at |θ| = {half_width}", self.margin_x),
            ));
        }
        if let Some(bound) = loss_edge {
            if !(bound.is_finite() && edge.y_min < bound && bound < edge.y_max) {
                return Err(DescentError::invalid(
                    "margin_y",
                    format!("{} is lost to rounding at |loss| = {bound}", self.margin_y),
                ));
            }
        }
        Ok(())
    }

    pub fn margin_x(&self) -> f64 {
        self.margin_x
    }

    pub fn margin_y(&self) -> f64 {
        self.margin_y
    }

    /// Window for one record: `θ ± margin_x` across, `[loss − margin_y, loss + 3·margin_y]` up.
    pub fn frame(&self, record: &FrameRecord) -> ViewWindow {
        ViewWindow {
            x_min: record.theta - self.margin_x,
            x_max: record.theta + self.margin_x,
            y_min: record.loss - self.margin_y,
            y_max: record.loss + HEADROOM * self.margin_y,
        }
    }
}
