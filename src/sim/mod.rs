//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded or injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod rng;
pub mod shape;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Collider;
pub use rng::{RandomSource, ScriptedRandom, seeded};
pub use shape::{Mask, Rect};
pub use spawn::{SpawnPolicy, next_interval, spawn_x};
pub use state::{
    DifficultyState, GameEvent, Obstacle, ObstacleSet, ObstacleView, PlayerState, RoundConfig,
    RoundPhase, ScoreState, SimulationSnapshot,
};
pub use tick::{Simulation, TickInput};
