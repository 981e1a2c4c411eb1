//! Game settings
//!
//! Viewport size and gameplay tuning, handed to the game state at
//! construction. Optionally loaded from a JSON file; missing fields fall
//! back to the defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width in world units
    pub viewport_width: f32,
    /// Viewport height in world units
    pub viewport_height: f32,

    /// Skier start position
    pub skier_start: Vec2,
    /// Rhino start position
    pub rhino_start: Vec2,

    /// Skier speed at the start of a run (also the difficulty floor)
    pub starting_speed: f32,
    /// Rhino seek speed
    pub rhino_speed: f32,

    /// Obstacle spawn chance is one in this many (also the difficulty ceiling)
    pub new_obstacle_chance: u32,
    /// Distance outside the viewport after which obstacles are dropped
    pub retire_margin: f32,

    /// Seed for obstacle placement
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,

            skier_start: Vec2::ZERO,
            rhino_start: Vec2::new(RHINO_START.0, RHINO_START.1),

            starting_speed: STARTING_SPEED,
            rhino_speed: RHINO_SPEED,

            new_obstacle_chance: NEW_OBSTACLE_CHANCE,
            retire_margin: OBSTACLE_RETIRE_MARGIN,

            seed: 0,
        }
    }
}

impl Settings {
    /// Settings for a given viewport size, everything else default
    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Self::default()
        }
    }

    /// Viewport dimensions as (width, height)
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "viewport",
                reason: format!(
                    "must be positive, got {}x{}",
                    self.viewport_width, self.viewport_height
                ),
            });
        }
        if !(self.starting_speed > 0.0) {
            return Err(SettingsError::Invalid {
                field: "starting_speed",
                reason: format!("must be positive, got {}", self.starting_speed),
            });
        }
        if !(self.rhino_speed >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "rhino_speed",
                reason: format!("must not be negative, got {}", self.rhino_speed),
            });
        }
        if self.new_obstacle_chance == 0 {
            return Err(SettingsError::Invalid {
                field: "new_obstacle_chance",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.retire_margin >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "retire_margin",
                reason: format!("must not be negative, got {}", self.retire_margin),
            });
        }
        Ok(())
    }
}
