//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame is reachable from here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::Rect;
use crate::tuning::Tuning;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// Waiting for a start command (menu)
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Collided; terminal until an explicit reset
    Ended,
}

/// Per-round start configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Seed for the spawn RNG
    pub seed: u64,
    /// Night backdrop (cosmetic, carried so renderers don't need global state)
    pub night_mode: bool,
}

impl RoundConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            night_mode: false,
        }
    }
}

/// Things that happened during a tick, drained by audio and the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Jumped,
    ObstacleSpawned { id: u32, x: f32 },
    Collided { obstacle_id: u32 },
}

/// The runner. `bottom` is the y of the sprite's feet and never goes below the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub bottom: f32,
    pub vel_y: f32,
    pub on_ground: bool,
    /// Ticks before another jump is accepted
    pub jump_cooldown: u32,
}

impl PlayerState {
    pub fn on_ground(ground_y: f32) -> Self {
        Self {
            bottom: ground_y,
            vel_y: 0.0,
            on_ground: true,
            jump_cooldown: 0,
        }
    }

    /// One fixed-step physics update: gravity, integer-pixel motion, landing, cooldown
    pub fn integrate(&mut self, tuning: &Tuning) {
        self.vel_y += tuning.gravity;
        // Whole-pixel steps, truncated toward zero
        self.bottom += self.vel_y.trunc();

        if self.bottom >= tuning.ground_y {
            self.bottom = tuning.ground_y;
            self.vel_y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        self.jump_cooldown = self.jump_cooldown.saturating_sub(1);
    }

    /// Try to jump. Returns true if the jump was accepted.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if !self.on_ground || self.jump_cooldown > 0 {
            return false;
        }
        self.vel_y = tuning.jump_velocity;
        self.on_ground = false;
        self.jump_cooldown = tuning.jump_cooldown_ticks;
        true
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::from_midbottom(
            tuning.player_x,
            self.bottom,
            Vec2::new(tuning.player_width, tuning.player_height),
        )
    }
}

/// A stone sliding toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub size: Vec2,
    /// Random part of the base speed, drawn once at spawn
    pub speed_offset: f32,
    /// Pixels per reference frame, fixed at spawn; scaled by current / initial speed
    pub base_speed: f32,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.size.x
    }

    /// Stones sit on the ground baseline
    pub fn rect(&self, ground_y: f32) -> Rect {
        Rect::new(self.x, ground_y - self.size.y, self.size.x, self.size.y)
    }

    /// Frame-time normalised motion so wall-clock speed is frame-rate independent
    pub fn advance(&mut self, speed_ratio: f32, dt_ms: f32, reference_frame_ms: f32) {
        self.x -= self.base_speed * speed_ratio * (dt_ms / reference_frame_ms);
    }
}

/// Live obstacles in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    items: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.items.push(obstacle);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.items.iter().find(|o| o.id == id)
    }

    /// Right edge of the rightmost obstacle
    pub fn rightmost_edge(&self) -> Option<f32> {
        self.items.iter().map(Obstacle::right).reduce(f32::max)
    }

    /// Drop everything whose right edge is more than `margin` past the left screen edge
    pub fn cull_offscreen(&mut self, margin: f32) -> usize {
        let before = self.items.len();
        self.items.retain(|o| o.right() >= -margin);
        before - self.items.len()
    }
}

/// Game speed; only ever ramps up within a round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub speed: f32,
}

impl DifficultyState {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            speed: initial_speed,
        }
    }

    pub fn ramp(&mut self, dt_ms: f32, tuning: &Tuning) {
        let next = self.speed + tuning.speed_increase_rate * dt_ms.max(0.0);
        self.speed = next.min(tuning.max_speed).max(self.speed);
    }
}

/// Distance travelled and the score derived from it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub distance: f64,
    pub score: u64,
}

impl ScoreState {
    pub fn accrue(&mut self, speed: f32, dt_ms: f32, tuning: &Tuning) {
        self.distance += speed as f64 * (dt_ms.max(0.0) as f64 / 1000.0) * tuning.distance_scale;
        self.score = (self.distance / tuning.score_divisor).floor() as u64;
    }
}

/// Read-only view handed to render sinks after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub phase: RoundPhase,
    pub tick: u64,
    pub elapsed_ms: f64,
    pub player: Rect,
    pub player_vel_y: f32,
    pub on_ground: bool,
    pub obstacles: Vec<ObstacleView>,
    pub speed: f32,
    pub distance: f64,
    pub score: u64,
    pub night_mode: bool,
}

/// Obstacle geometry as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub rect: Rect,
}
