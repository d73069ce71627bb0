//! Wrapping scroll offsets for the background and road layers

use serde::{Deserialize, Serialize};

/// Background moves at this fraction of the world scroll
pub const BACKGROUND_FACTOR: f32 = 0.12;
/// World scroll fed to the background, relative to game speed
pub const BACKGROUND_SHIFT: f32 = 0.4;
/// Road tile width (px)
pub const ROAD_TILE_WIDTH: f32 = 400.0;

/// One horizontally repeating layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayer {
    /// x of the first copy, always in `(-width, 0]`
    pub offset: f32,
    pub width: f32,
    pub factor: f32,
}

impl ScrollLayer {
    pub fn new(width: f32, factor: f32) -> Self {
        Self {
            offset: 0.0,
            width,
            factor,
        }
    }

    pub fn scroll(&mut self, shift: f32) {
        if self.width <= 0.0 {
            return;
        }
        self.offset -= shift * self.factor;
        self.offset = self.offset.rem_euclid(self.width);
        if self.offset > 0.0 {
            self.offset -= self.width;
        }
    }
}

/// Background + road scroll state, advanced once per rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    pub background: ScrollLayer,
    pub road: ScrollLayer,
}

impl Parallax {
    pub fn new(screen_width: f32) -> Self {
        Self {
            background: ScrollLayer::new(screen_width, BACKGROUND_FACTOR),
            road: ScrollLayer::new(ROAD_TILE_WIDTH, 1.0),
        }
    }

    pub fn advance(&mut self, speed: f32) {
        self.background.scroll(speed * BACKGROUND_SHIFT);
        self.road.scroll(speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_wraps() {
        let mut layer = ScrollLayer::new(400.0, 1.0);
        layer.scroll(150.0);
        assert_eq!(layer.offset, -150.0);
        layer.scroll(300.0);
        assert_eq!(layer.offset, -50.0);
        for _ in 0..1000 {
            layer.scroll(13.0);
            assert!(layer.offset > -400.0 && layer.offset <= 0.0);
        }
    }

    #[test]
    fn test_background_is_slower_than_road() {
        let mut p = Parallax::new(1000.0);
        p.advance(10.0);
        assert!((p.background.offset - -0.48).abs() < 1e-3);
        assert_eq!(p.road.offset, -10.0);
    }
}
