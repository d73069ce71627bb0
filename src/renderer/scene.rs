//! Retained-mode sink: a keyed node tree updated in place
//!
//! Each frame is diffed against the tree. Nodes are inserted, moved or
//! removed, and the revision only bumps when something actually changed, so
//! a host widget toolkit redraws on state change rather than every tick.

use std::collections::BTreeMap;

use super::parallax::Parallax;
use super::vertex::colors;
use super::{Frame, RenderSink, hud_lines};
use crate::consts::SCREEN_WIDTH;
use crate::sim::{Rect, RoundPhase};

/// Stable identity of a node across frames (ordering = draw order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey {
    Background,
    Road,
    Stone(u32),
    Player,
    Hud(u8),
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Tiled image layer scrolled by `offset`
    Layer {
        texture: &'static str,
        offset: f32,
    },
    Sprite {
        texture: &'static str,
        rect: Rect,
        color: [f32; 4],
    },
    Label {
        text: String,
        line: u8,
    },
}

#[derive(Debug)]
pub struct SceneTree {
    nodes: BTreeMap<NodeKey, SceneNode>,
    parallax: Parallax,
    last_tick: Option<u64>,
    revision: u64,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            parallax: Parallax::new(SCREEN_WIDTH),
            last_tick: None,
            revision: 0,
        }
    }

    /// Bumped every time the tree changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(&key)
    }

    /// Nodes in draw order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn upsert(&mut self, key: NodeKey, node: SceneNode) -> bool {
        match self.nodes.get(&key) {
            Some(existing) if *existing == node => false,
            _ => {
                self.nodes.insert(key, node);
                true
            }
        }
    }

    /// Build the wanted node set for a frame
    fn desired(&self, frame: &Frame<'_>) -> BTreeMap<NodeKey, SceneNode> {
        let s = frame.snapshot;
        let mut wanted = BTreeMap::new();

        wanted.insert(
            NodeKey::Background,
            SceneNode::Layer {
                texture: if s.night_mode { "bg_night.png" } else { "bg_day.png" },
                offset: self.parallax.background.offset,
            },
        );
        wanted.insert(
            NodeKey::Road,
            SceneNode::Layer {
                texture: "road.png",
                offset: self.parallax.road.offset,
            },
        );
        for o in &s.obstacles {
            wanted.insert(
                NodeKey::Stone(o.id),
                SceneNode::Sprite {
                    texture: "stone.png",
                    rect: o.rect,
                    color: colors::STONE,
                },
            );
        }
        wanted.insert(
            NodeKey::Player,
            SceneNode::Sprite {
                texture: "ong.png",
                rect: s.player,
                color: colors::PLAYER,
            },
        );
        for (i, text) in hud_lines(frame).into_iter().enumerate() {
            let line = i as u8;
            wanted.insert(NodeKey::Hud(line), SceneNode::Label { text, line });
        }
        if s.phase == RoundPhase::Ended {
            wanted.insert(
                NodeKey::GameOver,
                SceneNode::Label {
                    text: format!("GAME OVER  Score: {}  Highscore: {}", s.score, frame.best),
                    line: u8::MAX,
                },
            );
        }
        wanted
    }
}

impl RenderSink for SceneTree {
    fn present(&mut self, frame: &Frame<'_>) {
        let s = frame.snapshot;
        if s.phase == RoundPhase::Running && self.last_tick != Some(s.tick) {
            self.parallax.advance(s.speed);
        }
        self.last_tick = Some(s.tick);

        let wanted = self.desired(frame);
        let before = self.nodes.len();
        self.nodes.retain(|key, _| wanted.contains_key(key));
        let mut changed = self.nodes.len() != before;

        for (key, node) in wanted {
            changed |= self.upsert(key, node);
        }

        if changed {
            self.revision += 1;
        }
    }
}
