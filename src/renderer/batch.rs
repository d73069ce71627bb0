//! Immediate-mode sink: a fresh triangle list every frame
//!
//! The output is a plain `Vertex` slice in screen pixels, ready to be cast
//! with `bytemuck` and uploaded by whatever GPU or software backend hosts it.

use glam::Vec2;

use super::parallax::{Parallax, ROAD_TILE_WIDTH};
use super::shapes;
use super::vertex::{Vertex, colors};
use super::{Frame, RenderSink};
use crate::consts::{ROAD_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{Rect, RoundPhase};

/// Celestial body position (top right)
const SKY_BODY: Vec2 = Vec2::new(SCREEN_WIDTH - 120.0, 90.0);

#[derive(Debug)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    parallax: Parallax,
    screen: Vec2,
    ground_y: f32,
    last_tick: Option<u64>,
    frames: u64,
}

impl VertexBatch {
    pub fn new(ground_y: f32) -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            parallax: Parallax::new(SCREEN_WIDTH),
            screen: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            ground_y,
            last_tick: None,
            frames: 0,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }

    fn draw_sky(&mut self, night: bool) {
        let sky = if night { colors::SKY_NIGHT } else { colors::SKY_DAY };
        let layer = self.parallax.background;
        let height = self.ground_y;
        // Two copies of the backdrop cover the wrap seam
        self.vertices
            .extend(shapes::rect(&Rect::new(layer.offset, 0.0, layer.width, height), sky));
        self.vertices.extend(shapes::rect(
            &Rect::new(layer.offset + layer.width, 0.0, layer.width, height),
            sky,
        ));

        if night {
            self.vertices
                .extend(shapes::circle(SKY_BODY, 32.0, colors::MOON, 32));
            self.vertices.extend(shapes::circle(
                SKY_BODY + Vec2::new(10.0, 0.0),
                24.0,
                colors::MOON_SHADOW,
                32,
            ));
        } else {
            self.vertices
                .extend(shapes::circle(SKY_BODY, 38.0, colors::SUN, 32));
            self.vertices
                .extend(shapes::circle(SKY_BODY, 28.0, colors::SUN_CORE, 32));
        }
    }

    fn draw_road(&mut self) {
        self.vertices.extend(shapes::tiled_strip(
            self.parallax.road.offset,
            ROAD_TILE_WIDTH,
            self.ground_y,
            ROAD_HEIGHT,
            self.screen.x,
            colors::ROAD,
            colors::ROAD_SEAM,
        ));
        // Shadow line just above the road
        self.vertices.extend(shapes::rect(
            &Rect::new(0.0, self.ground_y - 8.0, self.screen.x, 8.0),
            colors::ROAD_SHADOW,
        ));
    }
}

impl RenderSink for VertexBatch {
    fn present(&mut self, frame: &Frame<'_>) {
        let s = frame.snapshot;
        if s.phase == RoundPhase::Running && self.last_tick != Some(s.tick) {
            self.parallax.advance(s.speed);
        }
        self.last_tick = Some(s.tick);
        self.frames += 1;

        self.vertices.clear();
        self.draw_sky(s.night_mode);
        self.draw_road();

        for obstacle in &s.obstacles {
            self.vertices
                .extend(shapes::rect(&obstacle.rect, colors::STONE));
        }

        if frame.placeholder_player {
            self.vertices.extend(shapes::ellipse(
                s.player.center(),
                s.player.size / 2.0,
                colors::PLAYER,
                24,
            ));
        } else {
            self.vertices
                .extend(shapes::rect(&s.player, colors::PLAYER));
        }

        if s.phase == RoundPhase::Ended {
            self.vertices.extend(shapes::rect(
                &Rect::new(0.0, 0.0, self.screen.x, self.screen.y),
                colors::GAME_OVER_TINT,
            ));
        }
    }
}
