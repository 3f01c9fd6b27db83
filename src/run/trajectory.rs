//! # Trajectory
//!
//! Ordered history of a run: the initial state followed by every stepped frame.

use super::Frame;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    frames: Vec<Frame>,
}

impl Trajectory {
    pub fn new() -> Self {
        Trajectory { frames: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Trajectory {
            frames: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn initial_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn final_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Number of stepped frames (everything after step 0).
    pub fn steps(&self) -> usize {
        self.frames.iter().filter(|f| !f.record.is_initial()).count()
    }

    pub fn thetas(&self) -> Array1<f64> {
        self.frames.iter().map(|f| f.record.theta).collect()
    }

    pub fn losses(&self) -> Array1<f64> {
        self.frames.iter().map(|f| f.record.loss).collect()
    }

    /// Frame with the lowest loss seen so far.
    pub fn best_frame(&self) -> Option<&Frame> {
        self.frames
            .iter()
            .min_by(|a, b| a.record.loss.total_cmp(&b.record.loss))
    }
}

impl FromIterator<Frame> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Trajectory {
            frames: iter.into_iter().collect(),
        }
    }
}

impl Extend<Frame> for Trajectory {
    fn extend<I: IntoIterator<Item = Frame>>(&mut self, iter: I) {
        self.frames.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
