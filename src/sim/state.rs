//! Game state and core entity types
//!
//! Everything the loop, spawner and click handler mutate lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::{Difficulty, EasyTier, SpawnIntervals};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Pre-game countdown; `remaining` is the next number to show (0 = "Gooo!")
    Countdown { remaining: u8 },
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Side effects reported to the shell (sounds, panels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CountdownTick(u8),
    Go,
    CloudPopped,
    LifeGained,
    BombExploded,
    /// A cloud expired while super fast mode was on
    CloudMissed,
    GameOver { score: u64 },
}

/// Shared geometry for the circular hit region of a square sprite
fn center_of(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}

fn hit(pos: Vec2, size: f32, point: Vec2) -> bool {
    center_of(pos, size).distance(point) < size / 2.0
}

/// The scoring target
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub created_at: f64,
    /// Rotation (degrees)
    pub angle: f32,
}

impl Cloud {
    pub fn center(&self) -> Vec2 {
        center_of(self.pos, self.size)
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) > CLOUD_LIFETIME_MS
    }

    pub fn contains(&self, point: Vec2) -> bool {
        hit(self.pos, self.size, point)
    }
}

/// Extra-life pickup
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: f32,
    pub created_at: f64,
}

impl PowerUp {
    pub fn center(&self) -> Vec2 {
        center_of(self.pos, self.size)
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) > POWER_UP_LIFETIME_MS
    }

    pub fn contains(&self, point: Vec2) -> bool {
        hit(self.pos, self.size, point)
    }
}

/// Hazard; clicking one costs two lives
#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    pub pos: Vec2,
    pub size: f32,
    pub created_at: f64,
}

impl Bomb {
    pub fn center(&self) -> Vec2 {
        center_of(self.pos, self.size)
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) > BOMB_LIFETIME_MS
    }

    pub fn contains(&self, point: Vec2) -> bool {
        hit(self.pos, self.size, point)
    }
}

/// Time of the last spawn per kind (ms). `None` spawns on the next frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimers {
    pub cloud: Option<f64>,
    pub power_up: Option<f64>,
    pub bomb: Option<f64>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub score: u64,
    /// Always within 0..=MAX_LIVES
    pub lives: u8,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Active spawn intervals (preset, possibly escalated under Easy)
    pub intervals: SpawnIntervals,
    pub easy_tier: EasyTier,
    /// Faster spawns, and missed clouds cost a life
    pub super_fast: bool,
    pub timers: SpawnTimers,
    /// Spawn order is preserved; at most one cloud at a time
    pub clouds: Vec<Cloud>,
    pub power_ups: Vec<PowerUp>,
    pub bombs: Vec<Bomb>,
    /// Drawing surface size (pixels)
    pub arena: Vec2,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in countdown with the default arena size
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self::with_arena(
            seed,
            difficulty,
            Vec2::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT),
        )
    }

    pub fn with_arena(seed: u64, difficulty: Difficulty, arena: Vec2) -> Self {
        let mut state = Self {
            score: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Countdown {
                remaining: COUNTDOWN_START,
            },
            difficulty,
            intervals: difficulty.intervals(),
            easy_tier: EasyTier::Base,
            super_fast: false,
            timers: SpawnTimers::default(),
            clouds: Vec::new(),
            power_ups: Vec::new(),
            bombs: Vec::new(),
            arena,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.set_difficulty(difficulty);
        state
    }

    /// Apply a preset. Clears the Easy escalation and super fast mode but
    /// leaves the session running.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.intervals = difficulty.intervals();
        self.easy_tier = EasyTier::Base;
        self.super_fast = false;
        log::info!("Difficulty set to {}", difficulty.as_str());
    }

    /// Reset everything and re-enter the countdown
    pub fn restart(&mut self, difficulty: Difficulty) {
        self.clouds.clear();
        self.power_ups.clear();
        self.bombs.clear();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.timers = SpawnTimers::default();
        self.events.clear();
        self.phase = GamePhase::Countdown {
            remaining: COUNTDOWN_START,
        };
        self.set_difficulty(difficulty);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Queue an event for the shell
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events (oldest first)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter GameOver once lives run out. Returns true on the transition.
    pub(crate) fn end_if_out_of_lives(&mut self) -> bool {
        if self.lives > 0 || self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.emit(GameEvent::GameOver { score: self.score });
        log::info!("Game over with score {}", self.score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1, Difficulty::Hard);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.phase, GamePhase::Countdown { remaining: 3 });
        assert_eq!(state.intervals, Difficulty::Hard.intervals());
        assert!(state.clouds.is_empty() && state.power_ups.is_empty() && state.bombs.is_empty());
    }

    #[test]
    fn test_hit_region_is_circle_inside_square() {
        let bomb = Bomb {
            pos: Vec2::new(100.0, 100.0),
            size: 40.0,
            created_at: 0.0,
        };
        assert_eq!(bomb.center(), Vec2::new(120.0, 120.0));
        assert!(bomb.contains(Vec2::new(120.0, 120.0)));
        assert!(bomb.contains(Vec2::new(139.0, 120.0)));
        // Exactly on the radius is a miss
        assert!(!bomb.contains(Vec2::new(140.0, 120.0)));
        // Square corner is outside the circle
        assert!(!bomb.contains(Vec2::new(101.0, 101.0)));
    }

    #[test]
    fn test_expiry_is_strictly_after_lifetime() {
        let cloud = Cloud {
            pos: Vec2::ZERO,
            size: CLOUD_SIZE,
            created_at: 1000.0,
            angle: 0.0,
        };
        assert!(!cloud.is_expired(4000.0));
        assert!(cloud.is_expired(4000.5));

        let power_up = PowerUp {
            pos: Vec2::ZERO,
            size: POWER_UP_SIZE,
            created_at: 0.0,
        };
        assert!(!power_up.is_expired(1000.0));
        assert!(power_up.is_expired(1001.0));

        let bomb = Bomb {
            pos: Vec2::ZERO,
            size: BOMB_SIZE,
            created_at: 0.0,
        };
        assert!(!bomb.is_expired(5000.0));
        assert!(bomb.is_expired(5001.0));
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(5, Difficulty::Easy);
        state.phase = GamePhase::GameOver;
        state.score = 70;
        state.lives = 0;
        state.super_fast = true;
        state.timers.cloud = Some(123.0);
        state.bombs.push(Bomb {
            pos: Vec2::ZERO,
            size: BOMB_SIZE,
            created_at: 0.0,
        });
        state.emit(GameEvent::BombExploded);

        state.restart(Difficulty::Insane);

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.phase, GamePhase::Countdown { remaining: 3 });
        assert!(state.bombs.is_empty());
        assert!(state.timers.cloud.is_none());
        assert!(!state.super_fast);
        assert_eq!(state.difficulty, Difficulty::Insane);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_emitted_once() {
        let mut state = GameState::new(5, Difficulty::Normal);
        state.phase = GamePhase::Playing;
        state.lives = 0;
        assert!(state.end_if_out_of_lives());
        assert!(!state.end_if_out_of_lives());
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 0 }]);
    }
}
