//! Deterministic game logic
//!
//! Everything that decides what happens in a session lives here:
//! - Timestamps come in as arguments (ms), never read from a clock
//! - Seeded RNG only
//! - Entity vectors keep spawn order
//! - No rendering, audio or DOM access; side effects go out as `GameEvent`s

pub mod difficulty;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, EasyTier, SpawnIntervals, update_escalation};
pub use input::{Hit, handle_click};
pub use spawn::{spawn_bomb, spawn_cloud, spawn_power_up};
pub use state::{Bomb, Cloud, GameEvent, GamePhase, GameState, PowerUp, SpawnTimers};
pub use tick::{CountdownFrame, countdown_step, tick};
