//! Click hit-testing
//!
//! Clouds are tested first, then power-ups, then bombs, each in spawn order.
//! The first entity whose circle contains the point takes the click.

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Cloud,
    PowerUp,
    Bomb,
}

/// Apply a click at `point` (canvas pixels). Returns the entity kind hit, if any.
pub fn handle_click(state: &mut GameState, point: Vec2) -> Option<Hit> {
    if !state.is_playing() {
        return None;
    }

    if let Some(i) = state.clouds.iter().position(|c| c.contains(point)) {
        state.clouds.remove(i);
        state.score += 1;
        state.emit(GameEvent::CloudPopped);
        return Some(Hit::Cloud);
    }

    if let Some(i) = state.power_ups.iter().position(|p| p.contains(point)) {
        state.power_ups.remove(i);
        state.lives = (state.lives + 1).min(MAX_LIVES);
        state.emit(GameEvent::LifeGained);
        return Some(Hit::PowerUp);
    }

    if let Some(i) = state.bombs.iter().position(|b| b.contains(point)) {
        state.bombs.remove(i);
        state.lives = state.lives.saturating_sub(BOMB_DAMAGE);
        state.emit(GameEvent::BombExploded);
        log::debug!("Bomb clicked, lives now {}", state.lives);
        state.end_if_out_of_lives();
        return Some(Hit::Bomb);
    }

    None
}
