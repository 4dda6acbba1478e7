//! Entity spawning
//!
//! Positions are `uniform[0, 1) * extent`, so a too-small arena pins entities
//! at the origin instead of failing.

use glam::Vec2;
use rand::Rng;

use super::state::{Bomb, Cloud, GameState, PowerUp};
use crate::consts::*;

fn random_pos(state: &mut GameState, max_x: f32, max_y: f32) -> Vec2 {
    let x = state.rng.random::<f32>() * max_x;
    let y = state.rng.random::<f32>() * max_y;
    Vec2::new(x, y)
}

/// Replace the current cloud and drop a bomb right next to it.
///
/// Only one cloud is ever alive: a new cloud evicts the previous one
/// without counting it as missed.
pub fn spawn_cloud(state: &mut GameState, now: f64) {
    let size = CLOUD_SIZE;
    state.clouds.clear();

    let (max_x, max_y) = (state.arena.x - size - CLOUD_BOMB_CLEARANCE, state.arena.y - size);
    let pos = random_pos(state, max_x, max_y);
    let angle = state.rng.random::<f32>() * 360.0;
    state.clouds.push(Cloud {
        pos,
        size,
        created_at: now,
        angle,
    });

    let bomb_x = (pos.x + size + CLOUD_BOMB_GAP).min(state.arena.x - BOMB_SIZE);
    state.bombs.push(Bomb {
        pos: Vec2::new(bomb_x, pos.y),
        size: BOMB_SIZE,
        created_at: now,
    });
}

/// Add a power-up unless lives are already full
pub fn spawn_power_up(state: &mut GameState, now: f64) {
    if state.lives >= MAX_LIVES {
        return;
    }
    let size = POWER_UP_SIZE;
    let (max_x, max_y) = (state.arena.x - size, state.arena.y - size);
    let pos = random_pos(state, max_x, max_y);
    state.power_ups.push(PowerUp {
        pos,
        size,
        created_at: now,
    });
}

/// Add a freestanding bomb (independent of cloud spawns)
pub fn spawn_bomb(state: &mut GameState, now: f64) {
    let size = BOMB_SIZE;
    let (max_x, max_y) = (state.arena.x - size, state.arena.y - size);
    let pos = random_pos(state, max_x, max_y);
    state.bombs.push(Bomb {
        pos,
        size,
        created_at: now,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    fn state() -> GameState {
        GameState::with_arena(42, Difficulty::Normal, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_spawn_cloud_keeps_single_cloud() {
        let mut state = state();
        spawn_cloud(&mut state, 0.0);
        spawn_cloud(&mut state, 10.0);
        spawn_cloud(&mut state, 20.0);
        assert_eq!(state.clouds.len(), 1);
        assert_eq!(state.clouds[0].created_at, 20.0);
        // Every cloud brings a bomb, and bombs are not evicted
        assert_eq!(state.bombs.len(), 3);
    }

    #[test]
    fn test_cloud_bounds_and_paired_bomb() {
        let mut state = state();
        for i in 0..200 {
            spawn_cloud(&mut state, i as f64);
            let cloud = &state.clouds[0];
            assert!(cloud.pos.x >= 0.0 && cloud.pos.x < 800.0 - 50.0 - 50.0);
            assert!(cloud.pos.y >= 0.0 && cloud.pos.y < 600.0 - 50.0);
            assert!(cloud.angle >= 0.0 && cloud.angle < 360.0);

            let bomb = state.bombs.last().unwrap();
            assert_eq!(bomb.pos.y, cloud.pos.y);
            assert_eq!(bomb.pos.x, (cloud.pos.x + 50.0 + 10.0).min(760.0));
            assert_eq!(bomb.created_at, cloud.created_at);
        }
    }

    #[test]
    fn test_paired_bomb_clamped_to_right_edge() {
        // Narrow arena: cloud room is tiny, bomb must stay on screen
        let mut state = GameState::with_arena(9, Difficulty::Normal, Vec2::new(120.0, 300.0));
        spawn_cloud(&mut state, 0.0);
        let bomb = &state.bombs[0];
        assert!(bomb.pos.x <= 120.0 - BOMB_SIZE);
    }

    #[test]
    fn test_power_up_suppressed_at_max_lives() {
        let mut state = state();
        state.lives = MAX_LIVES;
        spawn_power_up(&mut state, 0.0);
        assert!(state.power_ups.is_empty());

        state.lives = MAX_LIVES - 1;
        spawn_power_up(&mut state, 0.0);
        assert_eq!(state.power_ups.len(), 1);
    }

    #[test]
    fn test_bombs_append_in_spawn_order() {
        let mut state = state();
        spawn_bomb(&mut state, 1.0);
        spawn_bomb(&mut state, 2.0);
        assert_eq!(state.bombs.len(), 2);
        assert_eq!(state.bombs[0].created_at, 1.0);
        assert_eq!(state.bombs[1].created_at, 2.0);
        for bomb in &state.bombs {
            assert!(bomb.pos.x >= 0.0 && bomb.pos.x < 760.0);
            assert!(bomb.pos.y >= 0.0 && bomb.pos.y < 560.0);
        }
    }

    #[test]
    fn test_same_seed_same_positions() {
        let mut a = state();
        let mut b = state();
        spawn_cloud(&mut a, 0.0);
        spawn_cloud(&mut b, 0.0);
        assert_eq!(a.clouds, b.clouds);
    }
}
