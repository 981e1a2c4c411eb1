//! Per-frame simulation step
//!
//! One call advances the whole game by one frame. Movement is per frame;
//! only animations look at the clock.

use super::state::GameState;
use crate::assets::ImageLookup;
use crate::consts::*;

/// Advance the game state by one frame at time `now` (ms)
pub fn tick(state: &mut GameState, now: f64, images: &dyn ImageLookup) {
    state.game_time = now;

    let previous = state.window;
    state.window = state.calculate_game_window();

    if state.paused {
        return;
    }

    // Field upkeep around the current view
    state.obstacles.place_new_obstacle(&state.window, &previous);
    state
        .obstacles
        .retire_obstacles(&state.window, state.settings.retire_margin);

    let was_dead = state.skier.is_dead();
    state.skier.update(now, &state.obstacles, images);
    state.rhino.update(now, &mut state.skier, images);

    if !was_dead && state.skier.is_dead() {
        log::info!("Run {} over with score {}", state.run + 1, state.score());
    }

    update_difficulty(state);
}

/// Rescale skier speed and obstacle spawn chance from the current score
pub fn update_difficulty(state: &mut GameState) {
    let score = state.score();

    let speed = speed_for_score(score, state.settings.starting_speed);
    if speed != state.skier.speed() {
        log::debug!("Skier speed {} -> {} at score {}", state.skier.speed(), speed, score);
        state.skier.set_base_speed(speed);
    }

    let chance = obstacle_chance_for_score(score, state.settings.new_obstacle_chance);
    if chance != state.obstacles.new_obstacle_chance() {
        log::debug!("Obstacle chance now 1 in {} at score {}", chance, score);
        state.obstacles.set_new_obstacle_chance(chance);
    }
}

/// Skier speed for a score. Grows logarithmically past the scale score,
/// never below `starting_speed`.
pub fn speed_for_score(score: i64, starting_speed: f32) -> f32 {
    if score <= 0 {
        return starting_speed;
    }
    let growth = (score as f64 / DIFFICULTY_SCORE_SCALE).ln() * SPEED_GROWTH;
    ((starting_speed as f64 + growth).floor() as f32).max(starting_speed)
}

/// One-in-N obstacle chance for a score, between 1 and `max_chance`
pub fn obstacle_chance_for_score(score: i64, max_chance: u32) -> u32 {
    let max_chance = max_chance.max(1);
    if score <= 0 {
        return max_chance;
    }
    let growth = (score as f64 / DIFFICULTY_SCORE_SCALE).ln() * OBSTACLE_CHANCE_GROWTH;
    let chance = (max_chance as f64 - growth).floor();
    chance.clamp(1.0, max_chance as f64) as u32
}
