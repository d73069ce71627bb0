//! Ong Jump - A side-scrolling stone-jumping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions, round state)
//! - `renderer`: Framework-agnostic render sinks (vertex batch, retained scene)
//! - `platform`: Time source and input event collection
//! - `game`: Session orchestration (rounds, best score, settings, audio cues)
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{AssetError, PersistenceError};
pub use game::Session;
pub use highscores::ScoreTracker;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Nominal frame time at the target rate (ms). Obstacle motion is normalised to this.
    pub const REFERENCE_FRAME_MS: f32 = 16.67;
    /// Largest dt a real clock may report, so a stalled frame can't teleport obstacles
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 560.0;
    /// Road height below the ground baseline
    pub const ROAD_HEIGHT: f32 = 120.0;
    /// Ground baseline (y grows downward)
    pub const GROUND_Y: f32 = SCREEN_HEIGHT - ROAD_HEIGHT;

    /// Player defaults - fixed column, feet on the baseline
    pub const PLAYER_X: f32 = 140.0;
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;

    /// Stone defaults
    pub const STONE_WIDTH: f32 = 60.0;
    pub const STONE_HEIGHT: f32 = 32.0;

    /// Physics (per tick, not dt-scaled)
    pub const GRAVITY: f32 = 1.2;
    pub const JUMP_VELOCITY: f32 = -13.0;
    pub const JUMP_COOLDOWN_TICKS: u32 = 8;

    /// Difficulty
    pub const INITIAL_SPEED: f32 = 6.0;
    /// Speed gained per elapsed millisecond
    pub const SPEED_INCREASE_RATE: f32 = 0.0009;
    pub const MAX_SPEED: f32 = 13.0;

    /// Scoring
    pub const DISTANCE_SCALE: f64 = 100.0;
    pub const SCORE_DIVISOR: f64 = 10.0;

    /// Highscore file (plain decimal text)
    pub const HIGHSCORE_FILE: &str = "highscore.txt";
    /// Player preferences file
    pub const SETTINGS_FILE: &str = "settings.json";
    /// Optional balance overrides
    pub const TUNING_FILE: &str = "tuning.json";
}
