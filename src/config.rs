//! # Run Configuration
//!
//! Everything a run needs is fixed up front and validated before the first
//! frame. `frames_per_second` is pacing metadata for whoever encodes the
//! frames; it never affects the numerics.

use crate::error::DescentError;
use crate::framing::{FramingPolicy, DEFAULT_MARGIN_X, DEFAULT_MARGIN_Y};
use crate::optim::momentum::{DEFAULT_HALF_WIDTH, DEFAULT_LEARNING_RATE, DEFAULT_MOMENTUM};
use crate::optim::MomentumParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TOTAL_FRAMES: usize = 1000;
pub const DEFAULT_FPS: u32 = 15;

/// Recognized options for one run.
///
/// Deserializing goes through the same defaults and validation as
/// [`RunConfig::from_json_str`], whatever the format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RunConfigFile")]
pub struct RunConfig {
    /// `L`: clamp interval and initial sampling range are `[-L, L]`.
    pub domain_half_width: f64,
    pub learning_rate: f64,
    pub momentum: f64,
    /// Exact number of `step()` calls the run performs.
    pub total_frames: usize,
    pub frames_per_second: u32,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            domain_half_width: DEFAULT_HALF_WIDTH,
            learning_rate: DEFAULT_LEARNING_RATE,
            momentum: DEFAULT_MOMENTUM,
            total_frames: DEFAULT_TOTAL_FRAMES,
            frames_per_second: DEFAULT_FPS,
            margin_x: DEFAULT_MARGIN_X,
            margin_y: DEFAULT_MARGIN_Y,
        }
    }
}

impl RunConfig {
    /// Default numerics with the frame count derived from a clip length,
    /// e.g. 15 fps × 30 s = 450 frames.
    pub fn from_duration(frames_per_second: u32, seconds: u32) -> Self {
        RunConfig {
            frames_per_second,
            total_frames: frames_per_second as usize * seconds as usize,
            ..Default::default()
        }
    }

    pub fn momentum_params(&self) -> MomentumParams {
        MomentumParams {
            half_width: self.domain_half_width,
            learning_rate: self.learning_rate,
            momentum: self.momentum,
        }
    }

    pub fn framing_policy(&self) -> Result<FramingPolicy, DescentError> {
        FramingPolicy::new(self.margin_x, self.margin_y)
    }

    /// Delay between frames for playback.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frames_per_second.max(1)))
    }

    /// Playback length of the whole run.
    pub fn duration(&self) -> Duration {
        let nanos = self.frame_interval().as_nanos() as u64;
        Duration::from_nanos(nanos.saturating_mul(self.total_frames as u64))
    }

    /// Checks every option.
    pub fn validate(&self) -> Result<(), DescentError> {
        self.momentum_params().validate()?;
        self.framing_policy()?;
        if self.frames_per_second == 0 {
            return Err(DescentError::invalid("frames_per_second", "must be > 0"));
        }
        Ok(())
    }

    /// Parses a JSON document; absent keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DescentError> {
        let raw: RunConfigFile = serde_json::from_str(json)?;
        raw.try_into()
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DescentError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}

// --- File Form ---

/// On-disk shape of [`RunConfig`]. The frame count is signed here so that a
/// negative value is reported as a configuration error, not a parse error.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RunConfigFile {
    domain_half_width: f64,
    learning_rate: f64,
    momentum: f64,
    total_frames: i64,
    frames_per_second: u32,
    margin_x: f64,
    margin_y: f64,
}

impl Default for RunConfigFile {
    fn default() -> Self {
        let d = RunConfig::default();
        RunConfigFile {
            domain_half_width: d.domain_half_width,
            learning_rate: d.learning_rate,
            momentum: d.momentum,
            total_frames: d.total_frames as i64,
            frames_per_second: d.frames_per_second,
            margin_x: d.margin_x,
            margin_y: d.margin_y,
        }
    }
}

impl TryFrom<RunConfigFile> for RunConfig {
    type Error = DescentError;

    fn try_from(raw: RunConfigFile) -> Result<Self, Self::Error> {
        let total_frames = usize::try_from(raw.total_frames).map_err(|_| {
            DescentError::invalid(
                "total_frames",
                format!("must be >= 0, got {}", raw.total_frames),
            )
        })?;
        let config = RunConfig {
            domain_half_width: raw.domain_half_width,
            learning_rate: raw.learning_rate,
            momentum: raw.momentum,
            total_frames,
            frames_per_second: raw.frames_per_second,
            margin_x: raw.margin_x,
            margin_y: raw.margin_y,
        };
        config.validate()?;
        Ok(config)
    }
}
