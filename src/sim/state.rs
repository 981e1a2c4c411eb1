//! Game state: the entities of the current run plus session-level flags

use super::entity::Entity;
use super::field::ObstacleField;
use super::rect::Rect;
use super::rhino::Rhino;
use super::skier::Skier;
use crate::input::Key;
use crate::settings::Settings;

/// Everything the game loop advances each frame
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Timestamp of the latest frame (ms). Keeps running across resets.
    pub game_time: f64,
    pub paused: bool,
    /// Runs started before the current one
    pub run: u32,
    /// World-space region on screen, centered on the skier
    pub window: Rect,
    pub skier: Skier,
    pub rhino: Rhino,
    pub obstacles: ObstacleField,
}

/// Obstacle seed for a given run, so each run gets its own layout
pub fn run_seed(seed: u64, run: u32) -> u64 {
    seed.wrapping_add((run as u64).wrapping_mul(2654435761))
}

impl GameState {
    /// Start a session at time `now`
    pub fn new(settings: Settings, now: f64) -> Self {
        let mut state = Self {
            skier: Skier::new(settings.skier_start, settings.starting_speed, now),
            rhino: Rhino::new(settings.rhino_start, settings.rhino_speed, now),
            obstacles: ObstacleField::new(run_seed(settings.seed, 0)),
            window: Rect::default(),
            game_time: now,
            paused: false,
            run: 0,
            settings,
        };
        state.populate();
        state
    }

    /// Rebuild skier, rhino and obstacle field for a fresh run. The clock
    /// and pause flag are left alone.
    pub fn reset(&mut self) {
        self.run += 1;
        let now = self.game_time;
        self.skier = Skier::new(self.settings.skier_start, self.settings.starting_speed, now);
        self.rhino = Rhino::new(self.settings.rhino_start, self.settings.rhino_speed, now);
        self.obstacles = ObstacleField::new(run_seed(self.settings.seed, self.run));
        self.populate();
        log::info!("Run {} started", self.run + 1);
    }

    fn populate(&mut self) {
        self.obstacles
            .set_new_obstacle_chance(self.settings.new_obstacle_chance);
        self.window = self.calculate_game_window();
        self.obstacles
            .place_initial_obstacles(self.skier.position(), self.settings.viewport());
    }

    /// Viewport rectangle centered on the skier
    pub fn calculate_game_window(&self) -> Rect {
        Rect::centered(self.skier.position(), self.settings.viewport())
    }

    /// Distance travelled: skier x + y, floored
    pub fn score(&self) -> i64 {
        let pos = self.skier.position();
        (pos.x + pos.y).floor() as i64
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Game-level keys. While paused every key is swallowed.
    pub fn handle_input(&mut self, key: Key) -> bool {
        match key {
            Key::Reset if self.skier.is_dead() => {
                self.reset();
                true
            }
            Key::Pause => {
                self.toggle_pause();
                true
            }
            _ => self.paused,
        }
    }

    /// Route a host key press: game keys first, then the skier.
    /// Returns whether the key was consumed.
    pub fn handle_key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_key(code) else {
            return false;
        };
        self.handle_input(key) || self.skier.handle_input(key)
    }
}
