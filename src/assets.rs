//! Image identifiers and sprite metadata
//!
//! Pixel data lives with the host. The simulation only needs each image's
//! dimensions (for bounds) and a stable identifier (for drawing).

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every image the game can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageName {
    SkierCrash,
    SkierLeft,
    SkierLeftDown,
    SkierDown,
    SkierRightDown,
    SkierRight,
    SkierJump1,
    SkierJump2,
    SkierJump3,
    SkierJump4,
    SkierJump5,
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
    JumpRamp,
    Rhino,
    RhinoRun1,
    RhinoRun2,
    RhinoEat1,
    RhinoEat2,
    RhinoEat3,
    RhinoEat4,
    RhinoCelebrate1,
    RhinoCelebrate2,
}

impl ImageName {
    pub const ALL: [ImageName; 25] = [
        ImageName::SkierCrash,
        ImageName::SkierLeft,
        ImageName::SkierLeftDown,
        ImageName::SkierDown,
        ImageName::SkierRightDown,
        ImageName::SkierRight,
        ImageName::SkierJump1,
        ImageName::SkierJump2,
        ImageName::SkierJump3,
        ImageName::SkierJump4,
        ImageName::SkierJump5,
        ImageName::Tree,
        ImageName::TreeCluster,
        ImageName::Rock1,
        ImageName::Rock2,
        ImageName::JumpRamp,
        ImageName::Rhino,
        ImageName::RhinoRun1,
        ImageName::RhinoRun2,
        ImageName::RhinoEat1,
        ImageName::RhinoEat2,
        ImageName::RhinoEat3,
        ImageName::RhinoEat4,
        ImageName::RhinoCelebrate1,
        ImageName::RhinoCelebrate2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageName::SkierCrash => "skierCrash",
            ImageName::SkierLeft => "skierLeft",
            ImageName::SkierLeftDown => "skierLeftDown",
            ImageName::SkierDown => "skierDown",
            ImageName::SkierRightDown => "skierRightDown",
            ImageName::SkierRight => "skierRight",
            ImageName::SkierJump1 => "skierJump1",
            ImageName::SkierJump2 => "skierJump2",
            ImageName::SkierJump3 => "skierJump3",
            ImageName::SkierJump4 => "skierJump4",
            ImageName::SkierJump5 => "skierJump5",
            ImageName::Tree => "tree",
            ImageName::TreeCluster => "treeCluster",
            ImageName::Rock1 => "rock1",
            ImageName::Rock2 => "rock2",
            ImageName::JumpRamp => "jumpRamp",
            ImageName::Rhino => "rhino",
            ImageName::RhinoRun1 => "rhinoRun1",
            ImageName::RhinoRun2 => "rhinoRun2",
            ImageName::RhinoEat1 => "rhinoEat1",
            ImageName::RhinoEat2 => "rhinoEat2",
            ImageName::RhinoEat3 => "rhinoEat3",
            ImageName::RhinoEat4 => "rhinoEat4",
            ImageName::RhinoCelebrate1 => "rhinoCelebrate1",
            ImageName::RhinoCelebrate2 => "rhinoCelebrate2",
        }
    }

    /// Conventional file location for hosts that load from disk or URL
    pub fn file_name(&self) -> &'static str {
        match self {
            ImageName::SkierCrash => "img/skier_crash.png",
            ImageName::SkierLeft => "img/skier_left.png",
            ImageName::SkierLeftDown => "img/skier_left_down.png",
            ImageName::SkierDown => "img/skier_down.png",
            ImageName::SkierRightDown => "img/skier_right_down.png",
            ImageName::SkierRight => "img/skier_right.png",
            ImageName::SkierJump1 => "img/skier_jump_1.png",
            ImageName::SkierJump2 => "img/skier_jump_2.png",
            ImageName::SkierJump3 => "img/skier_jump_3.png",
            ImageName::SkierJump4 => "img/skier_jump_4.png",
            ImageName::SkierJump5 => "img/skier_jump_5.png",
            ImageName::Tree => "img/tree_1.png",
            ImageName::TreeCluster => "img/tree_cluster.png",
            ImageName::Rock1 => "img/rock_1.png",
            ImageName::Rock2 => "img/rock_2.png",
            ImageName::JumpRamp => "img/jump_ramp.png",
            ImageName::Rhino => "img/rhino_default.png",
            ImageName::RhinoRun1 => "img/rhino_run_left.png",
            ImageName::RhinoRun2 => "img/rhino_run_left_2.png",
            ImageName::RhinoEat1 => "img/rhino_eat_1.png",
            ImageName::RhinoEat2 => "img/rhino_eat_2.png",
            ImageName::RhinoEat3 => "img/rhino_eat_3.png",
            ImageName::RhinoEat4 => "img/rhino_eat_4.png",
            ImageName::RhinoCelebrate1 => "img/rhino_celebrate_1.png",
            ImageName::RhinoCelebrate2 => "img/rhino_celebrate_2.png",
        }
    }
}

/// Resolves an image identifier to its dimensions (width, height).
///
/// `None` is a valid answer: the entity is then invisible and has no bounds.
pub trait ImageLookup {
    fn size(&self, name: ImageName) -> Option<Vec2>;
}

/// Errors raised while loading or validating sprite metadata
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to parse sprite manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sprite manifest is missing {} image(s): {}", .0.len(), join_names(.0))]
    Missing(Vec<ImageName>),
    #[error("image {} has invalid size {width}x{height}", .name.as_str())]
    InvalidSize {
        name: ImageName,
        width: f32,
        height: f32,
    },
}

fn join_names(names: &[ImageName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sprite dimensions keyed by image name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteSheet {
    sizes: HashMap<ImageName, Vec2>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
        }
    }

    /// Dimensions of the stock sprite set
    pub fn standard() -> Self {
        let mut sheet = Self::new();
        sheet
            .insert(ImageName::SkierCrash, 40.0, 28.0)
            .insert(ImageName::SkierLeft, 28.0, 32.0)
            .insert(ImageName::SkierLeftDown, 24.0, 34.0)
            .insert(ImageName::SkierDown, 17.0, 34.0)
            .insert(ImageName::SkierRightDown, 24.0, 34.0)
            .insert(ImageName::SkierRight, 28.0, 32.0)
            .insert(ImageName::SkierJump1, 30.0, 38.0)
            .insert(ImageName::SkierJump2, 32.0, 40.0)
            .insert(ImageName::SkierJump3, 34.0, 36.0)
            .insert(ImageName::SkierJump4, 32.0, 40.0)
            .insert(ImageName::SkierJump5, 30.0, 38.0)
            .insert(ImageName::Tree, 28.0, 30.0)
            .insert(ImageName::TreeCluster, 50.0, 54.0)
            .insert(ImageName::Rock1, 22.0, 11.0)
            .insert(ImageName::Rock2, 23.0, 14.0)
            .insert(ImageName::JumpRamp, 42.0, 14.0)
            .insert(ImageName::Rhino, 56.0, 40.0)
            .insert(ImageName::RhinoRun1, 56.0, 40.0)
            .insert(ImageName::RhinoRun2, 56.0, 40.0)
            .insert(ImageName::RhinoEat1, 58.0, 44.0)
            .insert(ImageName::RhinoEat2, 58.0, 44.0)
            .insert(ImageName::RhinoEat3, 58.0, 44.0)
            .insert(ImageName::RhinoEat4, 58.0, 44.0)
            .insert(ImageName::RhinoCelebrate1, 52.0, 52.0)
            .insert(ImageName::RhinoCelebrate2, 52.0, 52.0);
        sheet
    }

    /// Parse a manifest of the form `{"sizes": {"tree": [28, 30], ...}}`
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let sheet: SpriteSheet = serde_json::from_str(json)?;
        sheet.validate()?;
        Ok(sheet)
    }

    pub fn insert(&mut self, name: ImageName, width: f32, height: f32) -> &mut Self {
        self.sizes.insert(name, Vec2::new(width, height));
        self
    }

    pub fn remove(&mut self, name: ImageName) -> Option<Vec2> {
        self.sizes.remove(&name)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Check every game image is present with a positive size.
    ///
    /// Run before the loop starts; the simulation itself tolerates gaps.
    pub fn validate(&self) -> Result<(), AssetError> {
        let missing: Vec<ImageName> = ImageName::ALL
            .iter()
            .copied()
            .filter(|name| !self.sizes.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(AssetError::Missing(missing));
        }

        // Sorted so the reported image is stable across runs
        let mut names: Vec<_> = self.sizes.keys().copied().collect();
        names.sort();
        for name in names {
            let size = self.sizes[&name];
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(AssetError::InvalidSize {
                    name,
                    width: size.x,
                    height: size.y,
                });
            }
        }
        Ok(())
    }
}

impl ImageLookup for SpriteSheet {
    fn size(&self, name: ImageName) -> Option<Vec2> {
        self.sizes.get(&name).copied()
    }
}
