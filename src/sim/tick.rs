//! Per-frame update and countdown
//!
//! `tick` runs once per animation frame with the frame's timestamp; there is
//! no fixed timestep, elapsed time is measured against stored timestamps.

use super::difficulty::update_escalation;
use super::spawn::{spawn_bomb, spawn_cloud, spawn_power_up};
use super::state::{GameEvent, GamePhase, GameState};

/// What the countdown shows after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownFrame {
    Number(u8),
    /// Last frame; play has started
    Go,
}

/// Advance the countdown by one step (one interval tick).
///
/// Returns `None` outside the countdown. After `Go` the caller should cancel
/// the interval that drives this.
pub fn countdown_step(state: &mut GameState) -> Option<CountdownFrame> {
    let GamePhase::Countdown { remaining } = state.phase else {
        return None;
    };

    if remaining == 0 {
        state.phase = GamePhase::Playing;
        state.emit(GameEvent::Go);
        log::info!("Countdown finished, playing");
        Some(CountdownFrame::Go)
    } else {
        state.phase = GamePhase::Countdown {
            remaining: remaining - 1,
        };
        state.emit(GameEvent::CountdownTick(remaining));
        Some(CountdownFrame::Number(remaining))
    }
}

fn due(last: Option<f64>, now: f64, interval: f64) -> bool {
    last.is_none_or(|t| now - t > interval)
}

/// Advance the session to `now` (ms). Does nothing unless playing.
pub fn tick(state: &mut GameState, now: f64) {
    if !state.is_playing() {
        return;
    }

    update_escalation(state);

    if due(state.timers.cloud, now, state.intervals.cloud_ms) {
        spawn_cloud(state, now);
        state.timers.cloud = Some(now);
    }
    if due(state.timers.power_up, now, state.intervals.power_up_ms) {
        spawn_power_up(state, now);
        state.timers.power_up = Some(now);
    }
    if due(state.timers.bomb, now, state.intervals.bomb_ms) {
        spawn_bomb(state, now);
        state.timers.bomb = Some(now);
    }

    expire_entities(state, now);

    state.end_if_out_of_lives();
}

/// Drop entities past their lifetime. Missed clouds cost a life in super fast mode.
fn expire_entities(state: &mut GameState, now: f64) {
    let before = state.clouds.len();
    state.clouds.retain(|c| !c.is_expired(now));
    let missed = before - state.clouds.len();

    if state.super_fast {
        for _ in 0..missed {
            state.lives = state.lives.saturating_sub(1);
            state.emit(GameEvent::CloudMissed);
            log::debug!("Cloud missed, lives now {}", state.lives);
        }
    }

    state.power_ups.retain(|p| !p.is_expired(now));
    state.bombs.retain(|b| !b.is_expired(now));
}
