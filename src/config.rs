//! Export settings: defaults, JSON loading, environment overrides.
//!
//! Precedence, lowest first: built-in defaults, a JSON settings file, `CIRCLEFX_*` environment
//! variables, then whatever the caller (usually the CLI) sets explicitly.

use crate::compose::pipeline::AnimationOpts;
use crate::compose::sampler::SampleOpts;
use crate::foundation::core::FrameShape;
use crate::foundation::error::{CircleFxError, CircleFxResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`ExportSettings::still_size`].
pub const ENV_STILL_SIZE: &str = "CIRCLEFX_STILL_SIZE";
/// Environment variable overriding [`ExportSettings::gif_size`].
pub const ENV_GIF_SIZE: &str = "CIRCLEFX_GIF_SIZE";
/// Environment variable overriding [`ExportSettings::frame_count`].
pub const ENV_FRAME_COUNT: &str = "CIRCLEFX_FRAME_COUNT";

/// Settings shared by still and animated exports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Still PNG edge length.
    pub still_size: u32,
    /// Animated GIF edge length.
    pub gif_size: u32,
    /// Frames sampled for an animation.
    pub frame_count: u32,
    /// Only this many seconds from the start of a clip are sampled.
    pub max_clip_secs: f64,
    /// GIF frame delay.
    pub frame_delay_ms: u32,
    /// Progress value for the `progress` pattern.
    pub progress: f64,
    /// Frame shape for stills.
    pub shape: FrameShape,
    /// Frame shape for animations.
    pub gif_shape: FrameShape,
    /// Consecutive frame failures tolerated before an animation aborts (`0` = never).
    pub max_consecutive_failures: u32,
    /// Compose animation frames in parallel.
    pub parallel: bool,
    /// Worker threads for parallel composition.
    pub threads: Option<usize>,
    /// Fixed seed for the random patterns.
    pub seed: Option<u64>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            still_size: 1024,
            gif_size: 512,
            frame_count: 12,
            max_clip_secs: 3.0,
            frame_delay_ms: 100,
            progress: 0.75,
            shape: FrameShape::Circle,
            gif_shape: FrameShape::Square,
            max_consecutive_failures: 3,
            parallel: false,
            threads: None,
            seed: None,
        }
    }
}

impl ExportSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(s: &str) -> CircleFxResult<Self> {
        let settings: Self =
            serde_json::from_str(s).map_err(|e| CircleFxError::serde(format!("settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file.
    pub fn from_path(path: &Path) -> CircleFxResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            CircleFxError::validation(format!(
                "failed to read settings '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&s)
    }

    /// Apply `CIRCLEFX_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> CircleFxResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (variable name to value).
    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> CircleFxResult<()> {
        let parse = |key: &str| -> CircleFxResult<Option<u32>> {
            match lookup(key) {
                None => Ok(None),
                Some(raw) => raw.trim().parse::<u32>().map(Some).map_err(|e| {
                    CircleFxError::validation(format!("{key}={raw:?} is not a valid integer: {e}"))
                }),
            }
        };
        if let Some(v) = parse(ENV_STILL_SIZE)? {
            self.still_size = v;
        }
        if let Some(v) = parse(ENV_GIF_SIZE)? {
            self.gif_size = v;
        }
        if let Some(v) = parse(ENV_FRAME_COUNT)? {
            self.frame_count = v;
        }
        self.validate()
    }

    /// Reject values no export can use.
    pub fn validate(&self) -> CircleFxResult<()> {
        if self.still_size == 0 || self.gif_size == 0 {
            return Err(CircleFxError::validation(
                "still_size and gif_size must be >= 1",
            ));
        }
        if self.gif_size > u32::from(u16::MAX) {
            return Err(CircleFxError::validation("gif_size must be <= 65535"));
        }
        if self.frame_count == 0 {
            return Err(CircleFxError::validation("frame_count must be >= 1"));
        }
        if !self.max_clip_secs.is_finite() || self.max_clip_secs <= 0.0 {
            return Err(CircleFxError::validation(
                "max_clip_secs must be finite and > 0",
            ));
        }
        if self.frame_delay_ms == 0 {
            return Err(CircleFxError::validation("frame_delay_ms must be >= 1"));
        }
        if !self.progress.is_finite() {
            return Err(CircleFxError::validation("progress must be finite"));
        }
        if self.threads == Some(0) {
            return Err(CircleFxError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Sampling options for an animated export.
    pub fn sample_opts(&self) -> SampleOpts {
        SampleOpts {
            frame_count: self.frame_count,
            max_duration_secs: self.max_clip_secs,
            max_consecutive_failures: self.max_consecutive_failures,
        }
    }

    /// Full options for an animated export.
    pub fn animation_opts(&self) -> AnimationOpts {
        AnimationOpts {
            size: self.gif_size,
            sample: self.sample_opts(),
            frame_delay_ms: self.frame_delay_ms,
            parallel: self.parallel,
            threads: self.threads,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
