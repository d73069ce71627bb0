//! Rendering adapters
//!
//! The simulation knows nothing about pixels. A render sink receives a
//! read-only frame after each tick and turns it into whatever its backend
//! needs. Two sinks ship with the crate:
//! - `VertexBatch`: immediate mode, rebuilds a triangle list every frame
//! - `SceneTree`: retained mode, keeps a node tree and redraws only on change

pub mod batch;
pub mod parallax;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use parallax::{Parallax, ScrollLayer};
pub use scene::{NodeKey, SceneNode, SceneTree};
pub use vertex::Vertex;

use crate::sim::SimulationSnapshot;

/// Everything a sink may draw for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub snapshot: &'a SimulationSnapshot,
    pub best: u64,
    /// Present when the FPS counter is enabled
    pub fps: Option<u32>,
    /// Draw the player as an ellipse (no sprite available)
    pub placeholder_player: bool,
}

/// Receives one frame per tick, strictly after the tick completes
pub trait RenderSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Discards frames (headless runs)
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

/// HUD text lines shared by both adapters
pub fn hud_lines(frame: &Frame<'_>) -> Vec<String> {
    use crate::sim::RoundPhase;

    let s = frame.snapshot;
    let mut lines = vec![
        format!("Score: {}", s.score),
        format!("Speed: {:.2}", s.speed),
        format!("High: {}", frame.best.max(s.score)),
    ];
    if let Some(fps) = frame.fps {
        lines.push(format!("FPS: {}", fps));
    }
    match s.phase {
        RoundPhase::Idle => lines.push("Press SPACE to start".to_string()),
        RoundPhase::Running => {}
        RoundPhase::Ended => lines.push("GAME OVER - press SPACE to play again".to_string()),
    }
    lines
}
