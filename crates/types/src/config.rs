//! Tunable game parameters.
//!
//! Board dimensions and the piece set are fixed; only timing, scoring and the
//! line-clear presentation can be tuned.

use std::fmt;

use serde::Deserialize;

use crate::{
    CLEAR_FADE_FRAMES, CLEAR_FADE_FRAME_MS, COUNT_MAX, INITIAL_SPEED_MS, MINIMUM_SPEED_MS,
    SCORE_ADD, SPEED_STEP_MS,
};

/// Game parameters, deserializable from JSON with every field optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Descent interval at the start of a game
    pub initial_speed_ms: u32,
    /// Floor for the descent interval
    pub minimum_speed_ms: u32,
    /// Interval decrement on counter rollover and on piece delete
    pub speed_step_ms: u32,
    /// The move counter rolls over once it exceeds this value
    pub count_max: u32,
    /// Bonus per cleared line and per counter rollover
    pub score_add: u32,
    /// Fade frames per cleared row; `0` clears rows synchronously
    pub clear_fade_frames: u32,
    /// Length of one fade frame
    pub clear_fade_frame_ms: u32,
    /// Undo rotations that end in an illegal position
    pub checked_rotation: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_speed_ms: INITIAL_SPEED_MS,
            minimum_speed_ms: MINIMUM_SPEED_MS,
            speed_step_ms: SPEED_STEP_MS,
            count_max: COUNT_MAX,
            score_add: SCORE_ADD,
            clear_fade_frames: 0,
            clear_fade_frame_ms: CLEAR_FADE_FRAME_MS,
            checked_rotation: false,
        }
    }
}

impl GameConfig {
    /// Default parameters with the fade animation enabled.
    pub fn animated() -> Self {
        Self {
            clear_fade_frames: CLEAR_FADE_FRAMES,
            ..Self::default()
        }
    }

    pub fn animates_clears(&self) -> bool {
        self.clear_fade_frames > 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_speed_ms == 0 {
            return Err(ConfigError::ZeroMinimumSpeed);
        }
        if self.initial_speed_ms < self.minimum_speed_ms {
            return Err(ConfigError::InitialBelowMinimum {
                initial: self.initial_speed_ms,
                minimum: self.minimum_speed_ms,
            });
        }
        if self.count_max == 0 {
            return Err(ConfigError::ZeroCountMax);
        }
        if self.animates_clears() && self.clear_fade_frame_ms == 0 {
            return Err(ConfigError::ZeroFadeFrame);
        }
        Ok(())
    }
}

/// Why a [`GameConfig`] was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroMinimumSpeed,
    InitialBelowMinimum { initial: u32, minimum: u32 },
    ZeroCountMax,
    ZeroFadeFrame,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::ZeroMinimumSpeed => "zero_minimum_speed",
            ConfigError::InitialBelowMinimum { .. } => "initial_below_minimum",
            ConfigError::ZeroCountMax => "zero_count_max",
            ConfigError::ZeroFadeFrame => "zero_fade_frame",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroMinimumSpeed => "minimum_speed_ms must be at least 1",
            ConfigError::InitialBelowMinimum { .. } => {
                "initial_speed_ms must not be below minimum_speed_ms"
            }
            ConfigError::ZeroCountMax => "count_max must be at least 1",
            ConfigError::ZeroFadeFrame => {
                "clear_fade_frame_ms must be at least 1 when clear_fade_frames is set"
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InitialBelowMinimum { initial, minimum } => write!(
                f,
                "{} ({} < {})",
                self.message(),
                initial,
                minimum
            ),
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}
