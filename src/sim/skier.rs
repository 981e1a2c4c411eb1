//! The player-controlled skier

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, Animator, FrameStep};
use super::entity::Entity;
use super::field::ObstacleField;
use super::obstacle::ObstacleKind;
use crate::assets::{ImageLookup, ImageName};
use crate::consts::DIAGONAL_SPEED_REDUCER;
use crate::input::Key;

/// Skiing directions, ordered left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    LeftDown,
    Down,
    RightDown,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Left,
        Direction::LeftDown,
        Direction::Down,
        Direction::RightDown,
        Direction::Right,
    ];

    /// One step counter-clockwise, `None` at the left edge
    pub fn turned_left(self) -> Option<Self> {
        match self {
            Direction::Left => None,
            Direction::LeftDown => Some(Direction::Left),
            Direction::Down => Some(Direction::LeftDown),
            Direction::RightDown => Some(Direction::Down),
            Direction::Right => Some(Direction::RightDown),
        }
    }

    /// One step clockwise, `None` at the right edge
    pub fn turned_right(self) -> Option<Self> {
        match self {
            Direction::Left => Some(Direction::LeftDown),
            Direction::LeftDown => Some(Direction::Down),
            Direction::Down => Some(Direction::RightDown),
            Direction::RightDown => Some(Direction::Right),
            Direction::Right => None,
        }
    }

    /// Movement per unit of speed
    pub fn vector(self) -> Vec2 {
        let d = 1.0 / DIAGONAL_SPEED_REDUCER;
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::LeftDown => Vec2::new(-d, d),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::RightDown => Vec2::new(d, d),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Skier states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkierState {
    Left,
    LeftDown,
    Down,
    RightDown,
    Right,
    Jumping,
    Crashed,
    Dead,
}

impl SkierState {
    /// The skiing direction, for the five directional states
    pub fn direction(self) -> Option<Direction> {
        match self {
            SkierState::Left => Some(Direction::Left),
            SkierState::LeftDown => Some(Direction::LeftDown),
            SkierState::Down => Some(Direction::Down),
            SkierState::RightDown => Some(Direction::RightDown),
            SkierState::Right => Some(Direction::Right),
            SkierState::Jumping | SkierState::Crashed | SkierState::Dead => None,
        }
    }
}

impl From<Direction> for SkierState {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => SkierState::Left,
            Direction::LeftDown => SkierState::LeftDown,
            Direction::Down => SkierState::Down,
            Direction::RightDown => SkierState::RightDown,
            Direction::Right => SkierState::Right,
        }
    }
}

/// Follow-ups reported when a skier animation finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkierCue {
    Land,
    Die,
}

const IMAGES_LEFT: &[ImageName] = &[ImageName::SkierLeft];
const IMAGES_LEFT_DOWN: &[ImageName] = &[ImageName::SkierLeftDown];
const IMAGES_DOWN: &[ImageName] = &[ImageName::SkierDown];
const IMAGES_RIGHT_DOWN: &[ImageName] = &[ImageName::SkierRightDown];
const IMAGES_RIGHT: &[ImageName] = &[ImageName::SkierRight];
const IMAGES_JUMPING: &[ImageName] = &[
    ImageName::SkierJump1,
    ImageName::SkierJump2,
    ImageName::SkierJump3,
    ImageName::SkierJump4,
    ImageName::SkierJump5,
];
const IMAGES_CRASHED: &[ImageName] = &[ImageName::SkierCrash];

fn skier_animations() -> HashMap<SkierState, Animation<SkierCue>> {
    let mut animations = HashMap::new();
    animations.insert(SkierState::Left, Animation::repeating(IMAGES_LEFT));
    animations.insert(SkierState::LeftDown, Animation::repeating(IMAGES_LEFT_DOWN));
    animations.insert(SkierState::Down, Animation::repeating(IMAGES_DOWN));
    animations.insert(SkierState::RightDown, Animation::repeating(IMAGES_RIGHT_DOWN));
    animations.insert(SkierState::Right, Animation::repeating(IMAGES_RIGHT));
    animations.insert(SkierState::Jumping, Animation::once(IMAGES_JUMPING, SkierCue::Land));
    animations.insert(SkierState::Crashed, Animation::once(IMAGES_CRASHED, SkierCue::Die));
    // Dead has no animation: the crash (or last) frame stays on screen
    animations
}

/// The player
#[derive(Debug, Clone)]
pub struct Skier {
    pub pos: Vec2,
    /// Base speed (world units per frame)
    speed: f32,
    /// Direction of travel; kept through a jump and restored on landing
    heading: Direction,
    animator: Animator<SkierState, SkierCue>,
}

impl Skier {
    pub fn new(pos: Vec2, speed: f32, now: f64) -> Self {
        Self {
            pos,
            speed,
            heading: Direction::Down,
            animator: Animator::new(
                SkierState::Down,
                ImageName::SkierDown,
                skier_animations(),
                now,
            ),
        }
    }

    pub fn state(&self) -> SkierState {
        self.animator.state()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_base_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn animator(&self) -> &Animator<SkierState, SkierCue> {
        &self.animator
    }

    pub fn is_jumping(&self) -> bool {
        self.state() == SkierState::Jumping
    }

    pub fn is_crashed(&self) -> bool {
        self.state() == SkierState::Crashed
    }

    pub fn is_dead(&self) -> bool {
        self.state() == SkierState::Dead
    }

    /// Skiing or jumping (still moving under the player's control)
    pub fn is_active(&self) -> bool {
        !self.is_crashed() && !self.is_dead()
    }

    /// Whether directional input is accepted right now
    fn can_steer(&self) -> bool {
        self.state().direction().is_some()
    }

    /// Apply a key press. Returns whether the key was consumed.
    pub fn handle_input(&mut self, key: Key) -> bool {
        match key {
            Key::Left => self.turn_left(),
            Key::Right => self.turn_right(),
            Key::Down => self.turn_down(),
            // No skiing uphill
            Key::Up => {}
            Key::Jump => self.jump(),
            Key::Reset | Key::Pause => return false,
        }
        true
    }

    /// Rotate one step left. Already facing left: sidestep left instead.
    pub fn turn_left(&mut self) {
        if !self.can_steer() {
            return;
        }
        match self.heading.turned_left() {
            Some(direction) => self.set_direction(direction),
            None => self.pos.x -= self.speed,
        }
    }

    /// Rotate one step right. Already facing right: sidestep right instead.
    pub fn turn_right(&mut self) {
        if !self.can_steer() {
            return;
        }
        match self.heading.turned_right() {
            Some(direction) => self.set_direction(direction),
            None => self.pos.x += self.speed,
        }
    }

    pub fn turn_down(&mut self) {
        if !self.can_steer() {
            return;
        }
        self.set_direction(Direction::Down);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.heading = direction;
        self.animator.set_state(direction.into());
    }

    /// Take off. Ignored while already airborne or after a crash.
    pub fn jump(&mut self) {
        if !self.can_steer() {
            return;
        }
        log::debug!("Skier jumping at ({:.0}, {:.0})", self.pos.x, self.pos.y);
        self.animator.set_state(SkierState::Jumping);
    }

    /// Touch down, resuming the pre-jump direction
    pub fn land_jump(&mut self) {
        if self.is_jumping() {
            self.animator.set_state(self.heading.into());
        }
    }

    pub fn crash(&mut self) {
        if !self.is_active() {
            return;
        }
        log::info!("Skier crashed at ({:.0}, {:.0})", self.pos.x, self.pos.y);
        self.animator.set_state(SkierState::Crashed);
    }

    /// Per-frame update: move, resolve collisions, animate
    pub fn update(&mut self, now: f64, field: &ObstacleField, images: &dyn ImageLookup) {
        if self.is_active() {
            self.move_skier();
            self.check_if_hit_obstacle(field, images);
        }
        self.animate(now);
    }

    fn move_skier(&mut self) {
        self.pos += self.heading.vector() * self.speed;
    }

    /// Kinds of every obstacle touching the skier, in storage order
    pub fn colliding_obstacles(
        &self,
        field: &ObstacleField,
        images: &dyn ImageLookup,
    ) -> Vec<ObstacleKind> {
        let Some(bounds) = self.bounds(images) else {
            return Vec::new();
        };
        field
            .colliding(&bounds, images)
            .iter()
            .map(|o| o.kind)
            .collect()
    }

    pub fn check_if_hit_obstacle(&mut self, field: &ObstacleField, images: &dyn ImageLookup) {
        let hits = self.colliding_obstacles(field, images);
        self.resolve_collisions(&hits);
    }

    /// Apply each obstacle's effect in the given order
    pub fn resolve_collisions(&mut self, hits: &[ObstacleKind]) {
        for kind in hits {
            kind.collide(self);
        }
    }

    /// Advance the animation and act on whatever it reports
    pub fn animate(&mut self, now: f64) {
        if let FrameStep::Finished(Some(cue)) = self.animator.animate(now) {
            match cue {
                SkierCue::Land => self.land_jump(),
                SkierCue::Die => self.die(),
            }
        }
    }
}

impl Entity for Skier {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn image(&self) -> ImageName {
        self.animator.image()
    }

    fn die(&mut self) {
        if !self.is_dead() {
            log::info!("Skier died at ({:.0}, {:.0})", self.pos.x, self.pos.y);
        }
        self.animator.set_state(SkierState::Dead);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteSheet;
    use crate::consts::ANIMATION_FRAME_SPEED_MS;
    use proptest::prelude::*;

    fn skier() -> Skier {
        Skier::new(Vec2::ZERO, 10.0, 0.0)
    }

    fn index(direction: Direction) -> i32 {
        Direction::ALL.iter().position(|&d| d == direction).unwrap() as i32
    }

    /// Run animation frames until nothing changes
    fn finish_animation(s: &mut Skier, mut now: f64) -> f64 {
        for _ in 0..10 {
            now += ANIMATION_FRAME_SPEED_MS + 1.0;
            s.animate(now);
        }
        now
    }

    #[test]
    fn test_starts_facing_down() {
        let s = skier();
        assert_eq!(s.state(), SkierState::Down);
        assert_eq!(s.heading(), Direction::Down);
        assert_eq!(s.image(), ImageName::SkierDown);
    }

    #[test]
    fn test_turns_one_step_at_a_time() {
        let mut s = skier();
        s.handle_input(Key::Left);
        assert_eq!(s.state(), SkierState::LeftDown);
        assert_eq!(s.image(), ImageName::SkierLeftDown);
        s.handle_input(Key::Left);
        assert_eq!(s.state(), SkierState::Left);
        s.handle_input(Key::Right);
        s.handle_input(Key::Right);
        s.handle_input(Key::Right);
        assert_eq!(s.state(), SkierState::RightDown);
    }

    #[test]
    fn test_turning_into_edge_sidesteps() {
        let mut s = skier();
        s.turn_left();
        s.turn_left();
        assert_eq!(s.heading(), Direction::Left);
        s.turn_left();
        assert_eq!(s.heading(), Direction::Left);
        assert_eq!(s.pos, Vec2::new(-10.0, 0.0));

        for _ in 0..5 {
            s.turn_right();
        }
        assert_eq!(s.heading(), Direction::Right);
        assert_eq!(s.pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_down_snaps_to_down() {
        let mut s = skier();
        s.turn_right();
        s.turn_right();
        assert!(s.handle_input(Key::Down));
        assert_eq!(s.state(), SkierState::Down);
    }

    #[test]
    fn test_up_is_consumed_but_ignored() {
        let mut s = skier();
        s.turn_left();
        assert!(s.handle_input(Key::Up));
        assert_eq!(s.state(), SkierState::LeftDown);
        assert_eq!(s.pos, Vec2::ZERO);
    }

    #[test]
    fn test_game_keys_not_consumed() {
        let mut s = skier();
        assert!(!s.handle_input(Key::Reset));
        assert!(!s.handle_input(Key::Pause));
    }

    #[test]
    fn test_spacebar_jumps() {
        let mut s = skier();
        assert!(s.handle_input(Key::Jump));
        assert!(s.is_jumping());
        assert_eq!(s.image(), ImageName::SkierJump1);
    }

    #[test]
    fn test_no_steering_while_jumping() {
        let mut s = skier();
        s.turn_left();
        s.jump();
        s.handle_input(Key::Left);
        s.handle_input(Key::Right);
        s.handle_input(Key::Down);
        assert!(s.is_jumping());
        assert_eq!(s.heading(), Direction::LeftDown);
        assert_eq!(s.pos, Vec2::ZERO);
    }

    #[test]
    fn test_landing_restores_direction() {
        let mut s = skier();
        s.turn_right();
        s.jump();
        let mut now = 0.0;
        for frame in 1..5 {
            now += ANIMATION_FRAME_SPEED_MS + 1.0;
            s.animate(now);
            assert_eq!(s.animator().frame(), frame);
            assert!(s.is_jumping());
        }
        assert_eq!(s.image(), ImageName::SkierJump5);
        now += ANIMATION_FRAME_SPEED_MS + 1.0;
        s.animate(now);
        assert_eq!(s.state(), SkierState::RightDown);
        assert_eq!(s.image(), ImageName::SkierRightDown);
    }

    #[test]
    fn test_crash_then_dead() {
        let mut s = skier();
        s.crash();
        assert!(s.is_crashed());
        assert_eq!(s.image(), ImageName::SkierCrash);
        assert!(!s.is_dead());

        finish_animation(&mut s, 0.0);
        assert!(s.is_dead());
        assert_eq!(s.image(), ImageName::SkierCrash);
    }

    #[test]
    fn test_no_input_after_crash() {
        let mut s = skier();
        s.crash();
        for key in [Key::Left, Key::Right, Key::Down, Key::Jump] {
            s.handle_input(key);
            assert!(s.is_crashed());
        }
        finish_animation(&mut s, 0.0);
        for key in [Key::Left, Key::Right, Key::Down, Key::Jump] {
            s.handle_input(key);
            assert!(s.is_dead());
        }
        assert_eq!(s.heading(), Direction::Down);
        assert_eq!(s.pos, Vec2::ZERO);
    }

    #[test]
    fn test_crash_does_not_restart() {
        let mut s = skier();
        s.crash();
        let now = finish_animation(&mut s, 0.0);
        assert!(s.is_dead());
        // A dead skier sitting on a tree stays dead
        s.crash();
        s.animate(now + 1000.0);
        assert!(s.is_dead());
    }

    #[test]
    fn test_moves_along_heading() {
        let sheet = SpriteSheet::standard();
        let field = ObstacleField::new(0);
        let mut s = skier();
        s.update(1.0, &field, &sheet);
        assert_eq!(s.pos, Vec2::new(0.0, 10.0));

        s.turn_left();
        s.update(2.0, &field, &sheet);
        let step = 10.0 / DIAGONAL_SPEED_REDUCER;
        assert!((s.pos.x + step).abs() < 1e-4);
        assert!((s.pos.y - (10.0 + step)).abs() < 1e-4);

        s.turn_left();
        s.update(3.0, &field, &sheet);
        assert!((s.pos.x + step + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_keeps_moving_while_jumping() {
        let sheet = SpriteSheet::standard();
        let field = ObstacleField::new(0);
        let mut s = skier();
        s.jump();
        s.update(1.0, &field, &sheet);
        assert_eq!(s.pos, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_crashed_skier_stays_put() {
        let sheet = SpriteSheet::standard();
        let field = ObstacleField::new(0);
        let mut s = skier();
        s.crash();
        s.update(1.0, &field, &sheet);
        assert_eq!(s.pos, Vec2::ZERO);
    }

    #[test]
    fn test_set_base_speed() {
        let sheet = SpriteSheet::standard();
        let field = ObstacleField::new(0);
        let mut s = skier();
        s.set_base_speed(14.0);
        s.update(1.0, &field, &sheet);
        assert_eq!(s.pos, Vec2::new(0.0, 14.0));
    }

    #[test]
    fn test_hits_tree_in_path() {
        let sheet = SpriteSheet::standard();
        let mut field = ObstacleField::new(0);
        field.insert(ObstacleKind::Tree, Vec2::new(0.0, 20.0));
        let mut s = skier();

        s.update(1.0, &field, &sheet);
        assert_eq!(s.colliding_obstacles(&field, &sheet), vec![ObstacleKind::Tree]);
        assert!(s.is_crashed());
    }

    #[test]
    fn test_collision_box_is_half_height() {
        let sheet = SpriteSheet::standard();
        let mut field = ObstacleField::new(0);
        // Tree box spans y 25..40; skier box spans y (pos - 17)..pos
        field.insert(ObstacleKind::Tree, Vec2::new(0.0, 40.0));
        let mut s = skier();

        for (step, y) in [(1, 10.0), (2, 20.0)] {
            s.update(step as f64, &field, &sheet);
            assert_eq!(s.pos, Vec2::new(0.0, y));
            assert!(s.colliding_obstacles(&field, &sheet).is_empty());
            assert_eq!(s.state(), SkierState::Down);
        }

        s.update(3.0, &field, &sheet);
        assert_eq!(s.pos, Vec2::new(0.0, 30.0));
        assert!(s.is_crashed());
    }

    #[test]
    fn test_ramp_collision_jumps() {
        let sheet = SpriteSheet::standard();
        let mut field = ObstacleField::new(0);
        field.insert(ObstacleKind::JumpRamp, Vec2::new(0.0, 12.0));
        let mut s = skier();
        s.update(1.0, &field, &sheet);
        assert!(s.is_jumping());
    }

    #[test]
    fn test_jumping_over_rocks() {
        let mut s = skier();
        s.jump();
        s.resolve_collisions(&[ObstacleKind::Rock1, ObstacleKind::Rock2]);
        assert!(s.is_jumping());

        s.land_jump();
        s.resolve_collisions(&[ObstacleKind::Rock1, ObstacleKind::Rock2]);
        assert!(s.is_crashed());
    }

    #[test]
    fn test_rock_then_tree_while_airborne() {
        let mut s = skier();
        s.jump();
        s.resolve_collisions(&[ObstacleKind::Rock1, ObstacleKind::Tree]);
        assert!(s.is_crashed());
    }

    #[test]
    fn test_ramp_after_tree_is_too_late() {
        let mut s = skier();
        s.resolve_collisions(&[ObstacleKind::TreeCluster, ObstacleKind::JumpRamp]);
        assert!(s.is_crashed());
    }

    #[test]
    fn test_no_image_no_collisions() {
        let mut field = ObstacleField::new(0);
        field.insert(ObstacleKind::Tree, Vec2::ZERO);
        let s = skier();
        assert!(s.colliding_obstacles(&field, &SpriteSheet::new()).is_empty());
    }

    #[test]
    fn test_die_from_any_state() {
        let mut s = skier();
        s.jump();
        s.die();
        assert!(s.is_dead());
        assert_eq!(s.image(), ImageName::SkierJump1);
    }

    proptest! {
        #[test]
        fn prop_turns_move_one_step(turns in proptest::collection::vec(any::<bool>(), 1..40)) {
            let mut s = skier();
            for right in turns {
                let before = index(s.heading());
                s.handle_input(if right { Key::Right } else { Key::Left });
                let after = index(s.heading());
                let expected = if right { (before + 1).min(4) } else { (before - 1).max(0) };
                prop_assert_eq!(after, expected);
                prop_assert_eq!(s.state().direction(), Some(s.heading()));
            }
        }

        #[test]
        fn prop_directional_input_ignored_when_not_steering(
            setup in 0u8..3,
            keys in proptest::collection::vec(0u8..3, 1..20),
        ) {
            let mut s = skier();
            s.turn_right();
            match setup {
                0 => s.jump(),
                1 => s.crash(),
                _ => s.die(),
            }
            let (state, heading, pos) = (s.state(), s.heading(), s.pos);
            for k in keys {
                let key = match k {
                    0 => Key::Left,
                    1 => Key::Right,
                    _ => Key::Down,
                };
                s.handle_input(key);
                prop_assert_eq!(s.state(), state);
                prop_assert_eq!(s.heading(), heading);
                prop_assert_eq!(s.pos, pos);
            }
        }
    }
}
