//! Catchfall - a falling-object catcher arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (catcher, falling objects, round clock, session state machine)
//! - `renderer`: WebGPU rendering of the read-only frame view
//! - `platform`: Browser/native time sources and key mapping
//! - `config`: Data-driven game tuning
//! - `highscores`: In-memory leaderboard

pub mod config;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use highscores::HighScores;
pub use sim::{GameSession, RenderFrame};

/// Game configuration constants (reference tuning)
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Gap between the catcher and the bottom edge
    pub const FLOOR_GAP: f32 = 40.0;

    /// Catcher defaults
    pub const CATCHER_WIDTH: f32 = 100.0;
    pub const CATCHER_HEIGHT: f32 = 10.0;
    /// Horizontal distance covered per tick
    pub const CATCHER_VELOCITY: f32 = 5.0;

    /// Falling object edge length
    pub const OBJECT_SIZE: f32 = 20.0;

    /// Round length
    pub const ROUND_DURATION_MS: u64 = 30_000;
    /// Clock refresh cadence (1 Hz)
    pub const CLOCK_TICK_MS: u64 = 1_000;
    /// "Get ready" grace period after a reset
    pub const RESET_DELAY_MS: u64 = 1_000;

    /// Fall speed (pixels per tick)
    pub const INITIAL_SPEED: f32 = 1.0;
    pub const SPEED_STEP: f32 = 0.1;
    pub const SPEED_CAP: f32 = 10.0;
    /// Speed escalates whenever the score becomes a multiple of this
    pub const SPEED_EVERY: u32 = 10;

    /// Spawn cadence
    pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 1_500;
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 50;
    pub const SPAWN_INTERVAL_FLOOR_MS: u64 = 300;
    /// Spawn cadence escalates whenever the score becomes a multiple of this
    pub const SPAWN_EVERY: u32 = 5;

    /// Nominal frame period used by headless drivers (~60 Hz)
    pub const FRAME_MS: u64 = 16;
}
