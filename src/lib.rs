//! Downhill - an endless skiing game with a rhino in pursuit
//!
//! Core modules:
//! - `sim`: Simulation (entities, animation, obstacle field, game loop)
//! - `renderer`: Draw-order composition over a host drawing surface
//! - `assets`: Image identifiers and sprite dimensions
//! - `input`: Key identifiers delivered by the host
//! - `settings`: Viewport size and gameplay tuning

pub mod assets;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, ImageLookup, ImageName, SpriteSheet};
pub use input::Key;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Time each animation frame stays on screen (ms)
    pub const ANIMATION_FRAME_SPEED_MS: f64 = 250.0;
    /// Per-axis divisor for diagonal movement so it matches axial speed
    pub const DIAGONAL_SPEED_REDUCER: f32 = 1.4142;

    /// Skier speed at the start of a run (world units per frame)
    pub const STARTING_SPEED: f32 = 10.0;
    /// Rhino seek speed (world units per frame)
    pub const RHINO_SPEED: f32 = 10.5;
    /// Where the rhino starts, relative to the world origin
    pub const RHINO_START: (f32, f32) = (-500.0, -2000.0);

    /// Obstacles spawn with a one-in-N chance per exposed strip
    pub const NEW_OBSTACLE_CHANCE: u32 = 8;
    /// Minimum spacing between obstacle positions on both axes
    pub const DISTANCE_BETWEEN_OBSTACLES: f32 = 50.0;
    /// Clear gap below the skier's start point
    pub const STARTING_OBSTACLE_GAP: f32 = 100.0;
    /// Initial obstacle count is (w / REDUCER) * (h / REDUCER)
    pub const STARTING_OBSTACLE_REDUCER: f32 = 300.0;
    /// Random positions tried before a spawn is abandoned
    pub const OBSTACLE_PLACEMENT_ATTEMPTS: u32 = 10;
    /// Obstacles further than this outside the viewport are dropped
    pub const OBSTACLE_RETIRE_MARGIN: f32 = 200.0;

    /// Score scale used by the difficulty curves
    pub const DIFFICULTY_SCORE_SCALE: f64 = 1000.0;
    /// Skier speed gained per unit of ln(score / scale)
    pub const SPEED_GROWTH: f64 = 4.0;
    /// Spawn-chance denominator lost per unit of ln(score / scale)
    pub const OBSTACLE_CHANCE_GROWTH: f64 = 2.0;
}

/// Unit vector pointing from `from` toward `to` (zero when they coincide)
#[inline]
pub fn direction_vector(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_vector_is_unit() {
        let dir = direction_vector(Vec2::new(-500.0, -2000.0), Vec2::ZERO);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn test_direction_vector_same_point() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(direction_vector(p, p), Vec2::ZERO);
    }
}
