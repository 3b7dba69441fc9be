//! Game configuration loading.
//!
//! A config file is a JSON object with any subset of the [`GameConfig`] fields;
//! missing fields keep their defaults and unknown fields are rejected.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::{GameConfig, CLEAR_FADE_FRAMES};

/// Parse and validate a JSON config document.
pub fn parse_config(json: &str) -> Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(json).context("invalid config JSON")?;
    config.validate().context("invalid config values")?;
    Ok(config)
}

/// Load the game configuration.
///
/// Without a path the defaults are used. `animated_clears` turns on the line
/// clear fade with its default frame count unless the file already set one.
pub fn load_config(path: Option<&Path>, animated_clears: bool) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_config(&json).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if animated_clears && !config.animates_clears() {
        config.clear_fade_frames = CLEAR_FADE_FRAMES;
        config.validate().context("invalid config values")?;
    }
    Ok(config)
}
