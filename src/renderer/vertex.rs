//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (screen pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Bytes per vertex in an uploaded buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const SKY_DAY: [f32; 4] = [0.8, 0.9, 1.0, 1.0];
    pub const SKY_NIGHT: [f32; 4] = [0.08, 0.09, 0.18, 1.0];
    pub const SUN: [f32; 4] = [1.0, 0.9, 0.31, 1.0];
    pub const SUN_CORE: [f32; 4] = [1.0, 1.0, 0.7, 1.0];
    pub const MOON: [f32; 4] = [0.86, 0.86, 1.0, 1.0];
    pub const MOON_SHADOW: [f32; 4] = [0.16, 0.16, 0.31, 1.0];
    pub const ROAD: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
    pub const ROAD_SEAM: [f32; 4] = [0.22, 0.22, 0.22, 1.0];
    pub const ROAD_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.16];
    pub const STONE: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.8, 0.2, 1.0];
    pub const GAME_OVER_TINT: [f32; 4] = [0.07, 0.07, 0.07, 0.6];
}
