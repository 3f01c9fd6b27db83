//! # Loss Landscapes (`landscape`)
//!
//! A loss surface is a pair of pure functions over the real line: the loss
//! value and its exact derivative. Nothing here holds state.

// --- Submodules ---
pub mod rugged;
pub mod sampling;

// --- Re-exports ---
pub use rugged::RuggedBowl;
pub use sampling::{LandscapeCurve, TangentSegment};

// --- Loss Surface Trait ---

/// Base trait for one-dimensional loss surfaces.
///
/// Implementors must be total for finite inputs and `gradient` must be the
/// closed-form derivative of `loss`, not a finite-difference estimate.
pub trait LossSurface {
    /// Loss value at `theta`.
    fn loss(&self, theta: f64) -> f64;

    /// Exact derivative of [`LossSurface::loss`] at `theta`.
    fn gradient(&self, theta: f64) -> f64;

    /// Evaluates both at once.
    fn evaluate(&self, theta: f64) -> (f64, f64) {
        (self.loss(theta), self.gradient(theta))
    }

    /// Upper bound on `|loss(θ)|` for `θ ∈ [-half_width, half_width]`, if known.
    /// Infinite when the loss overflows somewhere in that interval.
    fn loss_bound(&self, _half_width: f64) -> Option<f64> {
        None
    }

    /// Upper bound on `|gradient(θ)|` for `θ ∈ [-half_width, half_width]`, if known.
    fn gradient_bound(&self, _half_width: f64) -> Option<f64> {
        None
    }
}

impl<S: LossSurface + ?Sized> LossSurface for &S {
    fn loss(&self, theta: f64) -> f64 {
        (**self).loss(theta)
    }

    fn gradient(&self, theta: f64) -> f64 {
        (**self).gradient(theta)
    }

    fn loss_bound(&self, half_width: f64) -> Option<f64> {
        (**self).loss_bound(half_width)
    }

    fn gradient_bound(&self, half_width: f64) -> Option<f64> {
        (**self).gradient_bound(half_width)
    }
}
