//! Static obstacles and what they do to the skier

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::skier::Skier;
use crate::assets::ImageName;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
    JumpRamp,
}

impl ObstacleKind {
    /// Every kind, in the order random placement draws from
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Tree,
        ObstacleKind::TreeCluster,
        ObstacleKind::Rock1,
        ObstacleKind::Rock2,
        ObstacleKind::JumpRamp,
    ];

    pub fn image(&self) -> ImageName {
        match self {
            ObstacleKind::Tree => ImageName::Tree,
            ObstacleKind::TreeCluster => ImageName::TreeCluster,
            ObstacleKind::Rock1 => ImageName::Rock1,
            ObstacleKind::Rock2 => ImageName::Rock2,
            ObstacleKind::JumpRamp => ImageName::JumpRamp,
        }
    }

    /// Apply this obstacle's effect to a skier touching it
    pub fn collide(&self, skier: &mut Skier) {
        match self {
            // Too tall to clear, airborne or not
            ObstacleKind::Tree | ObstacleKind::TreeCluster => skier.crash(),
            ObstacleKind::Rock1 | ObstacleKind::Rock2 => {
                if !skier.is_jumping() {
                    skier.crash();
                }
            }
            ObstacleKind::JumpRamp => {
                if !skier.is_jumping() {
                    skier.jump();
                }
            }
        }
    }
}

/// An obstacle entity. Never moves, never dies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2) -> Self {
        Self { id, kind, pos }
    }

    pub fn collide(&self, skier: &mut Skier) {
        self.kind.collide(skier);
    }
}

impl Entity for Obstacle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn image(&self) -> ImageName {
        self.kind.image()
    }

    /// Obstacles can't be destroyed
    fn die(&mut self) {}
}
