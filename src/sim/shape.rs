//! Collision shapes: axis-aligned rectangles and per-pixel opacity masks
//!
//! Screen space: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle whose bottom edge is centred on `(center_x, bottom)`
    pub fn from_midbottom(center_x: f32, bottom: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(center_x - size.x / 2.0, bottom - size.y),
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap test; touching edges do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Opaque-pixel mask of a sprite at its declared on-screen size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Row-major opacity bits
    bits: Vec<bool>,
}

impl Mask {
    /// Fully opaque mask (behaves like the bounding box)
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build from row-major bits; `None` if the length doesn't match
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Option<Self> {
        (bits.len() == (width * height) as usize).then_some(Self {
            width,
            height,
            bits,
        })
    }

    /// Build from RGBA8 pixels, treating alpha above `threshold` as opaque
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8], threshold: u8) -> Option<Self> {
        if rgba.len() != (width * height * 4) as usize {
            return None;
        }
        let bits = rgba.chunks_exact(4).map(|px| px[3] > threshold).collect();
        Some(Self {
            width,
            height,
            bits,
        })
    }

    /// Parse the text mask format: one line per row, `#` opaque, `.` transparent
    pub fn parse(text: &str) -> Result<Self, String> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err("mask has no rows".to_string());
        };
        let width = first.chars().count();

        let mut bits = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(format!("row {} has a different width", y));
            }
            for c in row.chars() {
                match c {
                    '#' => bits.push(true),
                    '.' => bits.push(false),
                    other => return Err(format!("unexpected character {:?} in row {}", other, y)),
                }
            }
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            bits,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Nearest-neighbour resample to a new size (sprites are scaled to their declared size)
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height.max(1) as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width.max(1) as u64) as u32;
                bits.push(self.get(sx, sy));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Do any opaque pixels overlap when `other`'s top-left sits at `offset` from ours?
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width as i32).min(dx + other.width as i32);
        let y_end = (self.height as i32).min(dy + other.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return true;
                }
            }
        }
        false
    }
}
