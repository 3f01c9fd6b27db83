//! # Landscape Sampling
//!
//! Polyline data a renderer needs besides the moving point: the static loss
//! curve across the whole domain, and the short tangent segment through the
//! current point.

use super::LossSurface;
use crate::error::DescentError;
use ndarray::Array1;

/// Samples used for the full curve when the caller has no preference.
pub const DEFAULT_CURVE_POINTS: usize = 1000;
/// Horizontal reach of the tangent segment on each side of θ.
pub const DEFAULT_TANGENT_HALF_SPAN: f64 = 1.0;
/// Samples along the tangent segment.
pub const DEFAULT_TANGENT_POINTS: usize = 10;

// --- Static Curve ---

/// The loss surface sampled on an even grid over `[-half_width, half_width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeCurve {
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
}

impl LandscapeCurve {
    /// Samples `surface` at `points` evenly spaced abscissae, endpoints included.
    ///
    /// # Arguments
    /// * `surface`: The loss surface to evaluate.
    /// * `half_width`: Half the domain width `L`; must be finite and > 0.
    /// * `points`: Number of samples; at least 2.
    pub fn sample<S: LossSurface>(
        surface: &S,
        half_width: f64,
        points: usize,
    ) -> Result<Self, DescentError> {
        if !(half_width.is_finite() && half_width > 0.0) {
            return Err(DescentError::invalid(
                "domain_half_width",
                format!("must be finite and > 0, got {half_width}"),
            ));
        }
        if points < 2 {
            return Err(DescentError::invalid(
                "points",
                format!("a curve needs at least 2 samples, got {points}"),
            ));
        }
        let xs = Array1::linspace(-half_width, half_width, points);
        let ys = xs.mapv(|x| surface.loss(x));
        Ok(LandscapeCurve { xs, ys })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates `(x, y)` pairs in ascending `x`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Lowest sampled loss and where it occurs.
    pub fn lowest(&self) -> Option<(f64, f64)> {
        self.points()
            .fold(None, |best: Option<(f64, f64)>, (x, y)| match best {
                Some((_, by)) if by <= y => best,
                _ => Some((x, y)),
            })
    }
}

// --- Tangent Segment ---

/// Straight line through `(theta, loss(theta))` with a given slope.
#[derive(Debug, Clone, PartialEq)]
pub struct TangentSegment {
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
    pub slope: f64,
}

impl TangentSegment {
    /// Builds the segment over `[theta - half_span, theta + half_span]`.
    ///
    /// The slope is taken as given rather than recomputed from `surface`: a
    /// frame's recorded gradient belongs to the pre-update parameter, and the
    /// segment shows exactly that value.
    pub fn through<S: LossSurface>(
        surface: &S,
        theta: f64,
        slope: f64,
        half_span: f64,
        points: usize,
    ) -> Self {
        let anchor = surface.loss(theta);
        let points = points.max(2);
        let xs = Array1::linspace(theta - half_span, theta + half_span, points);
        let ys = xs.mapv(|x| anchor + slope * (x - theta));
        TangentSegment { xs, ys, slope }
    }

    /// Segment with the default span and sample count.
    pub fn with_defaults<S: LossSurface>(surface: &S, theta: f64, slope: f64) -> Self {
        Self::through(
            surface,
            theta,
            slope,
            DEFAULT_TANGENT_HALF_SPAN,
            DEFAULT_TANGENT_POINTS,
        )
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}
