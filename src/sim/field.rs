//! Obstacle field around the moving viewport
//!
//! Obstacles are placed randomly but reproducibly (seeded RNG) in the
//! regions the viewport uncovers as it follows the skier, and dropped once
//! they fall well outside it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::obstacle::{Obstacle, ObstacleKind};
use super::rect::Rect;
use crate::assets::ImageLookup;
use crate::consts::*;

/// The set of live obstacles
#[derive(Debug, Clone)]
pub struct ObstacleField {
    /// Live obstacles, in placement order (collisions resolve in this order)
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    /// Spawn chance per exposed strip is one in this many
    new_obstacle_chance: u32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            new_obstacle_chance: NEW_OBSTACLE_CHANCE,
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn new_obstacle_chance(&self) -> u32 {
        self.new_obstacle_chance
    }

    /// Set the one-in-N spawn chance (N is at least 1)
    pub fn set_new_obstacle_chance(&mut self, value: u32) {
        self.new_obstacle_chance = value.max(1);
    }

    /// Add an obstacle at an exact position, bypassing spacing rules
    pub fn insert(&mut self, kind: ObstacleKind, pos: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, kind, pos));
        id
    }

    /// Scatter obstacles over the starting view, leaving a clear gap
    /// directly below `start` so the skier can't begin inside one
    pub fn place_initial_obstacles(&mut self, start: Vec2, viewport: Vec2) {
        let count = ((viewport.x / STARTING_OBSTACLE_REDUCER)
            * (viewport.y / STARTING_OBSTACLE_REDUCER))
            .ceil() as usize;

        let top = start.y + STARTING_OBSTACLE_GAP;
        let bottom = start.y + viewport.y / 2.0;
        if bottom < top {
            log::warn!(
                "Viewport height {} leaves no room for initial obstacles",
                viewport.y
            );
            return;
        }
        let area = Rect::new(
            start.x - viewport.x / 2.0,
            top,
            start.x + viewport.x / 2.0,
            bottom,
        );

        let mut placed = 0;
        for _ in 0..count {
            if self.place_random_obstacle(&area) {
                placed += 1;
            }
        }

        self.obstacles.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        log::debug!("Placed {} of {} initial obstacles", placed, count);
    }

    /// Maybe spawn obstacles in the area the viewport just uncovered.
    ///
    /// Horizontal and vertical movement each expose their own strip; every
    /// strip gets one independent one-in-N roll.
    pub fn place_new_obstacle(&mut self, window: &Rect, previous: &Rect) {
        for strip in exposed_strips(window, previous) {
            if !self.rng.random_ratio(1, self.new_obstacle_chance) {
                continue;
            }
            if !self.place_random_obstacle(&strip) {
                log::trace!("No open position in strip {:?}", strip);
            }
        }
    }

    /// Drop obstacles positioned further than `margin` outside `window`.
    ///
    /// The test is on the obstacle's position point, edges inclusive. The
    /// margin exceeds every sprite size, so a dropped obstacle is always
    /// fully off screen.
    pub fn retire_obstacles(&mut self, window: &Rect, margin: f32) {
        let keep = window.expand(margin);
        let before = self.obstacles.len();
        self.obstacles.retain(|o| keep.contains_point(o.pos));
        let retired = before - self.obstacles.len();
        if retired > 0 {
            log::trace!("Retired {} obstacles, {} live", retired, self.obstacles.len());
        }
    }

    /// Obstacles whose bounds touch `bounds`, in storage order
    pub fn colliding(&self, bounds: &Rect, images: &dyn ImageLookup) -> Vec<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.bounds(images).is_some_and(|b| bounds.intersects(&b)))
            .collect()
    }

    /// Place one obstacle of random kind inside `area`; false if every
    /// attempt landed too close to an existing obstacle
    fn place_random_obstacle(&mut self, area: &Rect) -> bool {
        let Some(pos) = self.find_open_position(area) else {
            return false;
        };
        let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];
        let id = self.insert(kind, pos);
        log::trace!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
        true
    }

    fn find_open_position(&mut self, area: &Rect) -> Option<Vec2> {
        for _ in 0..OBSTACLE_PLACEMENT_ATTEMPTS {
            let candidate = Vec2::new(
                self.rng.random_range(area.left..=area.right),
                self.rng.random_range(area.top..=area.bottom),
            );
            if !self.is_crowded(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn is_crowded(&self, pos: Vec2) -> bool {
        self.obstacles.iter().any(|o| {
            (pos.x - o.pos.x).abs() < DISTANCE_BETWEEN_OBSTACLES
                && (pos.y - o.pos.y).abs() < DISTANCE_BETWEEN_OBSTACLES
        })
    }
}

/// Regions of `window` that were not inside `previous`.
///
/// At most one vertical strip (left or right) and one horizontal strip
/// (top or bottom); they may share a corner.
pub fn exposed_strips(window: &Rect, previous: &Rect) -> Vec<Rect> {
    let mut strips = Vec::with_capacity(2);

    if window.left < previous.left {
        strips.push(Rect::new(
            window.left,
            window.top,
            previous.left.min(window.right),
            window.bottom,
        ));
    } else if window.right > previous.right {
        strips.push(Rect::new(
            previous.right.max(window.left),
            window.top,
            window.right,
            window.bottom,
        ));
    }

    if window.top < previous.top {
        strips.push(Rect::new(
            window.left,
            window.top,
            window.right,
            previous.top.min(window.bottom),
        ));
    } else if window.bottom > previous.bottom {
        strips.push(Rect::new(
            window.left,
            previous.bottom.max(window.top),
            window.right,
            window.bottom,
        ));
    }

    strips
}
