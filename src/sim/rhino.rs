//! The rhino chases a target and eats it on contact, then celebrates.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, Animator, FrameStep};
use super::entity::Entity;
use crate::assets::{ImageLookup, ImageName};
use crate::direction_vector;

/// Rhino states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RhinoState {
    Running,
    Eating,
    /// Terminal - the run is over
    Celebrating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhinoCue {
    Celebrate,
}

const IMAGES_RUNNING: &[ImageName] = &[ImageName::RhinoRun1, ImageName::RhinoRun2];
const IMAGES_EATING: &[ImageName] = &[
    ImageName::RhinoEat1,
    ImageName::RhinoEat2,
    ImageName::RhinoEat3,
    ImageName::RhinoEat4,
];
const IMAGES_CELEBRATING: &[ImageName] =
    &[ImageName::RhinoCelebrate1, ImageName::RhinoCelebrate2];

fn rhino_animations() -> HashMap<RhinoState, Animation<RhinoCue>> {
    let mut animations = HashMap::new();
    animations.insert(RhinoState::Running, Animation::repeating(IMAGES_RUNNING));
    animations.insert(
        RhinoState::Eating,
        Animation::once(IMAGES_EATING, RhinoCue::Celebrate),
    );
    animations.insert(RhinoState::Celebrating, Animation::repeating(IMAGES_CELEBRATING));
    animations
}

/// The pursuer
#[derive(Debug, Clone)]
pub struct Rhino {
    pub pos: Vec2,
    speed: f32,
    animator: Animator<RhinoState, RhinoCue>,
}

impl Rhino {
    pub fn new(pos: Vec2, speed: f32, now: f64) -> Self {
        Self {
            pos,
            speed,
            animator: Animator::new(
                RhinoState::Running,
                ImageName::Rhino,
                rhino_animations(),
                now,
            ),
        }
    }

    pub fn state(&self) -> RhinoState {
        self.animator.state()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn animator(&self) -> &Animator<RhinoState, RhinoCue> {
        &self.animator
    }

    pub fn is_running(&self) -> bool {
        self.state() == RhinoState::Running
    }

    /// Chase and try to catch `target`, then animate. Only a running rhino moves.
    pub fn update(&mut self, now: f64, target: &mut dyn Entity, images: &dyn ImageLookup) {
        if self.is_running() {
            self.move_toward(target.position());
            self.check_if_caught_target(target, images);
        }
        self.animate(now);
    }

    /// Step straight at `target`, ignoring obstacles
    pub fn move_toward(&mut self, target: Vec2) {
        if !self.is_running() {
            return;
        }
        self.pos += direction_vector(self.pos, target) * self.speed;
    }

    /// Eat the target if the bounding boxes touch. Returns whether it did.
    pub fn check_if_caught_target(
        &mut self,
        target: &mut dyn Entity,
        images: &dyn ImageLookup,
    ) -> bool {
        let (Some(rhino_bounds), Some(target_bounds)) =
            (self.bounds(images), target.bounds(images))
        else {
            return false;
        };
        if !rhino_bounds.intersects(&target_bounds) {
            return false;
        }
        self.caught_target(target);
        true
    }

    fn caught_target(&mut self, target: &mut dyn Entity) {
        log::info!("Rhino caught its target at ({:.0}, {:.0})", self.pos.x, self.pos.y);
        target.die();
        self.animator.set_state(RhinoState::Eating);
    }

    pub fn celebrate(&mut self) {
        self.animator.set_state(RhinoState::Celebrating);
    }

    pub fn animate(&mut self, now: f64) {
        if let FrameStep::Finished(Some(RhinoCue::Celebrate)) = self.animator.animate(now) {
            self.celebrate();
        }
    }
}

impl Entity for Rhino {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn image(&self) -> ImageName {
        self.animator.image()
    }

    /// Nothing can kill the rhino
    fn die(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteSheet;
    use crate::consts::{ANIMATION_FRAME_SPEED_MS, RHINO_SPEED};

    /// Stand-in target that counts deaths
    struct Dummy {
        pos: Vec2,
        deaths: u32,
    }

    impl Entity for Dummy {
        fn position(&self) -> Vec2 {
            self.pos
        }

        fn image(&self) -> ImageName {
            ImageName::SkierDown
        }

        fn die(&mut self) {
            self.deaths += 1;
        }
    }

    fn dummy(x: f32, y: f32) -> Dummy {
        Dummy {
            pos: Vec2::new(x, y),
            deaths: 0,
        }
    }

    #[test]
    fn test_starts_running() {
        let rhino = Rhino::new(Vec2::ZERO, RHINO_SPEED, 0.0);
        assert!(rhino.is_running());
        assert_eq!(rhino.image(), ImageName::RhinoRun1);
        assert!(rhino.animator().is_animating());
    }

    #[test]
    fn test_moves_straight_at_target() {
        let sheet = SpriteSheet::standard();
        let mut rhino = Rhino::new(Vec2::ZERO, 10.0, 0.0);
        let mut target = dummy(300.0, 400.0);
        rhino.update(1.0, &mut target, &sheet);
        assert!((rhino.pos - Vec2::new(6.0, 8.0)).length() < 1e-4);
        assert_eq!(target.deaths, 0);
    }

    #[test]
    fn test_capture_kills_once_and_eats() {
        let sheet = SpriteSheet::standard();
        let mut rhino = Rhino::new(Vec2::new(0.0, -20.0), RHINO_SPEED, 0.0);
        let mut target = dummy(0.0, 0.0);

        rhino.update(1.0, &mut target, &sheet);
        assert_eq!(rhino.state(), RhinoState::Eating);
        assert_eq!(rhino.image(), ImageName::RhinoEat1);
        assert_eq!(target.deaths, 1);

        // Frozen while eating: no more kills, no movement
        let pos = rhino.pos;
        for i in 1..=3 {
            rhino.update(1.0 + i as f64, &mut target, &sheet);
        }
        assert_eq!(rhino.pos, pos);
        assert_eq!(target.deaths, 1);
    }

    #[test]
    fn test_eating_then_celebrating_forever() {
        let sheet = SpriteSheet::standard();
        let mut rhino = Rhino::new(Vec2::ZERO, RHINO_SPEED, 0.0);
        let mut target = dummy(0.0, 0.0);
        rhino.update(1.0, &mut target, &sheet);

        let mut now = 1.0;
        for frame in 1..4 {
            now += ANIMATION_FRAME_SPEED_MS + 1.0;
            rhino.update(now, &mut target, &sheet);
            assert_eq!(rhino.state(), RhinoState::Eating);
            assert_eq!(rhino.animator().frame(), frame);
        }
        now += ANIMATION_FRAME_SPEED_MS + 1.0;
        rhino.update(now, &mut target, &sheet);
        assert_eq!(rhino.state(), RhinoState::Celebrating);
        assert_eq!(rhino.image(), ImageName::RhinoCelebrate1);

        for _ in 0..20 {
            now += ANIMATION_FRAME_SPEED_MS + 1.0;
            rhino.update(now, &mut target, &sheet);
            assert_eq!(rhino.state(), RhinoState::Celebrating);
        }
        assert_eq!(target.deaths, 1);
    }

    #[test]
    fn test_no_capture_without_bounds() {
        let sheet = SpriteSheet::new();
        let mut rhino = Rhino::new(Vec2::ZERO, RHINO_SPEED, 0.0);
        let mut target = dummy(0.0, 0.0);
        assert!(!rhino.check_if_caught_target(&mut target, &sheet));
        assert!(rhino.is_running());
        assert_eq!(target.deaths, 0);
    }

    #[test]
    fn test_reaching_target_position_stops() {
        let mut rhino = Rhino::new(Vec2::new(5.0, 5.0), RHINO_SPEED, 0.0);
        rhino.move_toward(Vec2::new(5.0, 5.0));
        assert_eq!(rhino.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_rhino_is_invulnerable() {
        let mut rhino = Rhino::new(Vec2::ZERO, RHINO_SPEED, 0.0);
        rhino.die();
        assert!(rhino.is_running());
    }
}
