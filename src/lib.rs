//! Sky Tap - click the clouds before they drift away
//!
//! Core modules:
//! - `sim`: Deterministic game logic (entities, spawning, difficulty, clicks)
//! - `settings`: Player preferences persisted in LocalStorage
//! - `renderer`: Canvas 2D drawing (animation math everywhere, drawing on web)
//! - `audio`: Procedural sound cues (web only)
//! - `platform`: Browser timers and animation frames (web only)

pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena size used when the host canvas reports no size
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Entity sizes (pixels, bounding square edge)
    pub const CLOUD_SIZE: f32 = 50.0;
    pub const POWER_UP_SIZE: f32 = 40.0;
    pub const BOMB_SIZE: f32 = 40.0;
    /// Horizontal room kept right of a cloud for its paired bomb
    pub const CLOUD_BOMB_CLEARANCE: f32 = 50.0;
    /// Gap between a cloud and its paired bomb
    pub const CLOUD_BOMB_GAP: f32 = 10.0;

    /// Entity lifetimes (ms)
    pub const CLOUD_LIFETIME_MS: f64 = 3000.0;
    pub const POWER_UP_LIFETIME_MS: f64 = 1000.0;
    pub const BOMB_LIFETIME_MS: f64 = 5000.0;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    pub const BOMB_DAMAGE: u8 = 2;

    /// Countdown before play starts (shows 3, 2, 1, then "Gooo!")
    pub const COUNTDOWN_START: u8 = 3;
    pub const COUNTDOWN_STEP_MS: i32 = 1000;
}
