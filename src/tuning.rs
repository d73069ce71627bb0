//! Data-driven game balance
//!
//! Every constant that shapes difficulty lives in [`Tuning`]. Changing values
//! re-tunes the game without altering the shape of any algorithm. The table
//! can be overridden from a JSON file; missing fields keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Full parameter table for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub ground_y: f32,

    // === Player ===
    /// Horizontal centre of the player column
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub jump_cooldown_ticks: u32,

    // === Difficulty ===
    pub initial_speed: f32,
    /// Speed gained per millisecond of play
    pub speed_increase_rate: f32,
    pub max_speed: f32,
    /// Frame time that obstacle motion is normalised against (ms)
    pub reference_frame_ms: f32,

    // === Obstacles ===
    pub stone_width: f32,
    pub stone_height: f32,
    /// Spawned base speed = current speed * factor + jitter * uniform[0, 1)
    pub obstacle_speed_factor: f32,
    pub obstacle_speed_jitter: f32,
    /// Obstacles are culled once their right edge is this far past x = 0
    pub despawn_margin: f32,

    // === Spawning ===
    pub first_interval_min_ms: u32,
    pub first_interval_max_ms: u32,
    /// min interval = max(floor_min, base_min - speed * min_slope)
    pub interval_base_min_ms: f32,
    pub interval_min_slope: f32,
    pub interval_floor_min_ms: f32,
    /// max interval = max(floor_max, base_max - speed * max_slope)
    pub interval_base_max_ms: f32,
    pub interval_max_slope: f32,
    pub interval_floor_max_ms: f32,
    pub min_gap: u32,
    pub max_gap: u32,

    // === Scoring ===
    pub distance_scale: f64,
    pub score_divisor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            ground_y: GROUND_Y,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            jump_cooldown_ticks: JUMP_COOLDOWN_TICKS,

            initial_speed: INITIAL_SPEED,
            speed_increase_rate: SPEED_INCREASE_RATE,
            max_speed: MAX_SPEED,
            reference_frame_ms: REFERENCE_FRAME_MS,

            stone_width: STONE_WIDTH,
            stone_height: STONE_HEIGHT,
            obstacle_speed_factor: 0.85,
            obstacle_speed_jitter: 1.0,
            despawn_margin: 0.0,

            // Stones spawn further apart on the first one
            first_interval_min_ms: 1400,
            first_interval_max_ms: 1800,
            interval_base_min_ms: 1800.0,
            interval_min_slope: 80.0,
            interval_floor_min_ms: 700.0,
            interval_base_max_ms: 2200.0,
            interval_max_slope: 100.0,
            interval_floor_max_ms: 1100.0,
            min_gap: 220,
            max_gap: 340,

            distance_scale: DISTANCE_SCALE,
            score_divisor: SCORE_DIVISOR,
        }
    }
}

impl Tuning {
    /// Load overrides from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No tuning overrides at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Tuning>(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides from {}", path.display());
                tuning.validated()
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values that would break an invariant (inverted ranges, zero divisors)
    pub fn validated(mut self) -> Self {
        if self.first_interval_min_ms > self.first_interval_max_ms {
            std::mem::swap(
                &mut self.first_interval_min_ms,
                &mut self.first_interval_max_ms,
            );
        }
        if self.min_gap > self.max_gap {
            std::mem::swap(&mut self.min_gap, &mut self.max_gap);
        }
        if self.initial_speed <= 0.0 {
            log::warn!("initial_speed must be positive, resetting");
            self.initial_speed = INITIAL_SPEED;
        }
        if self.max_speed < self.initial_speed {
            self.max_speed = self.initial_speed;
        }
        if self.speed_increase_rate < 0.0 {
            self.speed_increase_rate = 0.0;
        }
        if self.reference_frame_ms <= 0.0 {
            self.reference_frame_ms = REFERENCE_FRAME_MS;
        }
        if self.score_divisor <= 0.0 {
            self.score_divisor = SCORE_DIVISOR;
        }
        self.despawn_margin = self.despawn_margin.max(0.0);
        self
    }

    /// Spawn interval bounds (ms) at the given speed, floored so gaps stay fair
    pub fn interval_bounds(&self, speed: f32) -> (u32, u32) {
        let min = (self.interval_base_min_ms - speed * self.interval_min_slope)
            .max(self.interval_floor_min_ms)
            .max(0.0) as u32;
        let max = (self.interval_base_max_ms - speed * self.interval_max_slope)
            .max(self.interval_floor_max_ms)
            .max(0.0) as u32;
        (min, max.max(min))
    }
}
