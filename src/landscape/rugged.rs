//! # Rugged Bowl Surface
//!
//! Three sinusoids of different frequency on top of a shallow quadratic:
//! many local minima close together, with a convex trend that keeps the
//! global picture bowl-shaped.

use super::LossSurface;
use serde::{Deserialize, Serialize};

/// `0.5·sin(3θ) + 0.3·sin(5θ) + 0.2·sin(7θ) + 0.1·θ²`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuggedBowl;

// (amplitude, frequency) of each sinusoidal term.
const TERMS: [(f64, f64); 3] = [(0.5, 3.0), (0.3, 5.0), (0.2, 7.0)];
const QUADRATIC: f64 = 0.1;

impl RuggedBowl {
    pub fn new() -> Self {
        RuggedBowl
    }
}

impl LossSurface for RuggedBowl {
    fn loss(&self, theta: f64) -> f64 {
        let waves: f64 = TERMS
            .iter()
            .map(|&(amp, freq)| amp * (freq * theta).sin())
            .sum();
        waves + QUADRATIC * (theta * theta)
    }

    fn gradient(&self, theta: f64) -> f64 {
        // d/dθ [a·sin(kθ)] = a·k·cos(kθ)
        let waves: f64 = TERMS
            .iter()
            .map(|&(amp, freq)| amp * freq * (freq * theta).cos())
            .sum();
        waves + 2.0 * QUADRATIC * theta
    }

    fn loss_bound(&self, half_width: f64) -> Option<f64> {
        let amplitude: f64 = TERMS.iter().map(|&(amp, _)| amp).sum();
        Some(amplitude + QUADRATIC * (half_width * half_width))
    }

    fn gradient_bound(&self, half_width: f64) -> Option<f64> {
        let amplitude: f64 = TERMS.iter().map(|&(amp, freq)| amp * freq).sum();
        Some(amplitude + 2.0 * QUADRATIC * half_width.abs())
    }
}
