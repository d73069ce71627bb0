//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering a rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Filled ellipse (placeholder player sprite)
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Copies of a tile of `tile_width` starting at `offset`, enough to cover `[0, screen_width)`
pub fn tiled_strip(
    offset: f32,
    tile_width: f32,
    y: f32,
    height: f32,
    screen_width: f32,
    color: [f32; 4],
    seam_color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if tile_width <= 0.0 {
        return vertices;
    }
    let mut x = offset;
    while x < screen_width {
        vertices.extend(rect(&Rect::new(x, y, tile_width, height), color));
        vertices.extend(rect(&Rect::new(x, y, 2.0, height), seam_color));
        x += tile_width;
    }
    vertices
}
