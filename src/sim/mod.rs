//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time comes in from the host as a timestamp, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (obstacles in placement order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod entity;
pub mod field;
pub mod obstacle;
pub mod rect;
pub mod rhino;
pub mod skier;
pub mod state;
pub mod tick;

pub use animation::{Animation, Animator, FrameStep};
pub use entity::Entity;
pub use field::{ObstacleField, exposed_strips};
pub use obstacle::{Obstacle, ObstacleKind};
pub use rect::Rect;
pub use rhino::{Rhino, RhinoState};
pub use skier::{Direction, Skier, SkierState};
pub use state::GameState;
pub use tick::{obstacle_chance_for_score, speed_for_score, tick, update_difficulty};
