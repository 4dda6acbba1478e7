//! Difficulty presets and the score-driven escalation used by Easy

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Named difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    /// Value used by the `<select>` options and settings JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Insane => "insane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "insane" => Some(Difficulty::Insane),
            _ => None,
        }
    }

    /// Like `from_str`, but unknown names fall back to `Normal`
    pub fn from_name(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using normal", s);
            Difficulty::Normal
        })
    }

    /// Spawn intervals fixed by this preset
    pub fn intervals(&self) -> SpawnIntervals {
        match self {
            Difficulty::Easy => SpawnIntervals::new(3500.0, 3000.0, 4000.0),
            Difficulty::Normal => SpawnIntervals::new(2500.0, 800.0, 5000.0),
            Difficulty::Hard => SpawnIntervals::new(1800.0, 500.0, 6000.0),
            Difficulty::Insane => SpawnIntervals::new(1200.0, 300.0, 8000.0),
        }
    }
}

/// Milliseconds between spawns, per entity kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnIntervals {
    pub cloud_ms: f64,
    pub bomb_ms: f64,
    pub power_up_ms: f64,
}

impl SpawnIntervals {
    pub const fn new(cloud_ms: f64, bomb_ms: f64, power_up_ms: f64) -> Self {
        Self {
            cloud_ms,
            bomb_ms,
            power_up_ms,
        }
    }
}

/// Easy escalates once the score passes these thresholds
pub const EASY_MEDIUM_SCORE: u64 = 10;
pub const EASY_SUPER_FAST_SCORE: u64 = 50;

/// Cloud/bomb intervals for the escalated Easy tiers (power-ups keep the preset)
const EASY_MEDIUM_CLOUD_MS: f64 = 1200.0;
const EASY_MEDIUM_BOMB_MS: f64 = 600.0;
const EASY_SUPER_FAST_CLOUD_MS: f64 = 600.0;
const EASY_SUPER_FAST_BOMB_MS: f64 = 250.0;

/// Interval set currently applied under Easy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasyTier {
    #[default]
    Base,
    Medium,
    /// Latched until the difficulty is re-selected or the game restarts
    SuperFast,
}

/// Re-evaluate the Easy tier from the current score. Runs every Playing frame.
pub fn update_escalation(state: &mut GameState) {
    if state.difficulty != Difficulty::Easy {
        return;
    }

    let score = state.score;
    if score >= EASY_SUPER_FAST_SCORE {
        if state.easy_tier != EasyTier::SuperFast {
            state.intervals.cloud_ms = EASY_SUPER_FAST_CLOUD_MS;
            state.intervals.bomb_ms = EASY_SUPER_FAST_BOMB_MS;
            state.easy_tier = EasyTier::SuperFast;
            state.super_fast = true;
            log::info!("Super fast mode on at score {}", score);
        }
    } else if score >= EASY_MEDIUM_SCORE {
        if state.easy_tier == EasyTier::Base {
            state.intervals.cloud_ms = EASY_MEDIUM_CLOUD_MS;
            state.intervals.bomb_ms = EASY_MEDIUM_BOMB_MS;
            state.easy_tier = EasyTier::Medium;
            state.super_fast = false;
            log::debug!("Easy speed-up at score {}", score);
        }
    } else if state.easy_tier == EasyTier::Medium {
        let base = Difficulty::Easy.intervals();
        state.intervals.cloud_ms = base.cloud_ms;
        state.intervals.bomb_ms = base.bomb_ms;
        state.easy_tier = EasyTier::Base;
        state.super_fast = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn easy_state(score: u64) -> GameState {
        let mut state = GameState::new(7, Difficulty::Easy);
        state.score = score;
        state
    }

    #[test]
    fn test_preset_intervals() {
        let expected = [
            (Difficulty::Easy, 3500.0, 3000.0, 4000.0),
            (Difficulty::Normal, 2500.0, 800.0, 5000.0),
            (Difficulty::Hard, 1800.0, 500.0, 6000.0),
            (Difficulty::Insane, 1200.0, 300.0, 8000.0),
        ];
        for (level, cloud, bomb, power_up) in expected {
            let mut state = GameState::new(1, Difficulty::Normal);
            state.set_difficulty(level);
            assert_eq!(state.intervals, SpawnIntervals::new(cloud, bomb, power_up));
            assert!(!state.super_fast);
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_normal() {
        assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Normal);
        assert_eq!(Difficulty::from_name(""), Difficulty::Normal);
        assert_eq!(Difficulty::from_name(" Hard "), Difficulty::Hard);
    }

    #[test]
    fn test_easy_medium_tier() {
        let mut state = easy_state(10);
        update_escalation(&mut state);
        assert_eq!(state.easy_tier, EasyTier::Medium);
        assert_eq!(state.intervals.cloud_ms, 1200.0);
        assert_eq!(state.intervals.bomb_ms, 600.0);
        assert_eq!(state.intervals.power_up_ms, 4000.0);
        assert!(!state.super_fast);
    }

    #[test]
    fn test_easy_super_fast_tier() {
        let mut state = easy_state(50);
        update_escalation(&mut state);
        assert_eq!(state.easy_tier, EasyTier::SuperFast);
        assert_eq!(state.intervals.cloud_ms, 600.0);
        assert_eq!(state.intervals.bomb_ms, 250.0);
        assert_eq!(state.intervals.power_up_ms, 4000.0);
        assert!(state.super_fast);
    }

    #[test]
    fn test_easy_thresholds_in_sequence() {
        let mut state = easy_state(0);
        update_escalation(&mut state);
        assert_eq!(state.intervals, Difficulty::Easy.intervals());

        state.score = 9;
        update_escalation(&mut state);
        assert_eq!(state.easy_tier, EasyTier::Base);

        state.score = 10;
        update_escalation(&mut state);
        assert_eq!(state.easy_tier, EasyTier::Medium);

        state.score = 49;
        update_escalation(&mut state);
        assert_eq!(state.easy_tier, EasyTier::Medium);
        assert!(!state.super_fast);

        state.score = 50;
        update_escalation(&mut state);
        assert!(state.super_fast);
    }

    #[test]
    fn test_super_fast_latch_released_by_reselect() {
        let mut state = easy_state(60);
        update_escalation(&mut state);
        assert!(state.super_fast);

        // Re-evaluation keeps the latch
        update_escalation(&mut state);
        assert!(state.super_fast);

        state.set_difficulty(Difficulty::Easy);
        assert!(!state.super_fast);
        assert_eq!(state.easy_tier, EasyTier::Base);
        assert_eq!(state.intervals, Difficulty::Easy.intervals());

        // Score is still high, so the next frame latches again
        update_escalation(&mut state);
        assert!(state.super_fast);
    }

    #[test]
    fn test_other_levels_never_escalate() {
        for level in [Difficulty::Normal, Difficulty::Hard, Difficulty::Insane] {
            let mut state = GameState::new(3, level);
            state.score = 500;
            update_escalation(&mut state);
            assert_eq!(state.intervals, level.intervals());
            assert!(!state.super_fast);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Difficulty::Insane).unwrap();
        assert_eq!(json, "\"insane\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }

    proptest! {
        #[test]
        fn prop_unknown_names_are_normal(name in "[a-z]{7,12}") {
            prop_assert_eq!(Difficulty::from_name(&name), Difficulty::Normal);
        }

        #[test]
        fn prop_super_fast_only_at_fifty(score in 0u64..200) {
            let mut state = easy_state(score);
            update_escalation(&mut state);
            prop_assert_eq!(state.super_fast, score >= EASY_SUPER_FAST_SCORE);
        }
    }
}
