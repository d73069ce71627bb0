//! Player vs obstacle collision detection
//!
//! Bounding boxes are the broad phase. When both sprites carry an opacity mask
//! the overlap is confirmed pixel by pixel, so transparent corners of the
//! sprites never end a round.

use super::shape::{Mask, Rect};
use super::state::ObstacleSet;

/// Collision shapes for the two sprite kinds
#[derive(Debug, Clone, Default)]
pub struct Collider {
    player_mask: Option<Mask>,
    obstacle_mask: Option<Mask>,
}

impl Collider {
    /// Bounding-box only
    pub fn aabb() -> Self {
        Self::default()
    }

    pub fn with_masks(player_mask: Option<Mask>, obstacle_mask: Option<Mask>) -> Self {
        Self {
            player_mask,
            obstacle_mask,
        }
    }

    /// True when pixel-precise tests are in use
    pub fn uses_masks(&self) -> bool {
        self.player_mask.is_some() && self.obstacle_mask.is_some()
    }

    /// First obstacle (in spawn order) touching the player, if any
    pub fn check(&self, player: &Rect, obstacles: &ObstacleSet, ground_y: f32) -> Option<u32> {
        obstacles
            .iter()
            .find(|o| self.shapes_overlap(player, &o.rect(ground_y)))
            .map(|o| o.id)
    }

    /// Overlap test for one pair of placed shapes
    pub fn shapes_overlap(&self, player: &Rect, obstacle: &Rect) -> bool {
        if !player.intersects(obstacle) {
            return false;
        }
        match (&self.player_mask, &self.obstacle_mask) {
            (Some(pm), Some(om)) => {
                // Masks live on the integer pixel grid
                let dx = (obstacle.left().round() - player.left().round()) as i32;
                let dy = (obstacle.top().round() - player.top().round()) as i32;
                pm.overlaps(om, (dx, dy))
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use glam::Vec2;

    fn set_with(x: f32) -> ObstacleSet {
        let mut set = ObstacleSet::new();
        set.push(Obstacle {
            id: 7,
            x,
            size: Vec2::new(60.0, 32.0),
            speed_offset: 0.0,
            base_speed: 5.0,
        });
        set
    }

    #[test]
    fn test_aabb_hit_and_miss() {
        let collider = Collider::aabb();
        let player = Rect::new(100.0, 360.0, 80.0, 80.0);
        assert_eq!(collider.check(&player, &set_with(150.0), 440.0), Some(7));
        assert_eq!(collider.check(&player, &set_with(180.0), 440.0), None);

        // Jumped clear of the stone
        let airborne = Rect::new(100.0, 300.0, 80.0, 80.0);
        assert_eq!(collider.check(&airborne, &set_with(150.0), 440.0), None);
    }

    #[test]
    fn test_mask_ignores_transparent_corner() {
        // Player: only the left half opaque
        let mut rows = String::new();
        for _ in 0..80 {
            rows.push_str(&"#".repeat(40));
            rows.push_str(&".".repeat(40));
            rows.push('\n');
        }
        let player_mask = Mask::parse(&rows).unwrap();
        let collider = Collider::with_masks(Some(player_mask), Some(Mask::filled(60, 32)));
        assert!(collider.uses_masks());

        let player = Rect::new(100.0, 360.0, 80.0, 80.0);
        // Stone overlaps only the transparent right half
        assert_eq!(collider.check(&player, &set_with(150.0), 440.0), None);
        // Stone reaches into the opaque half
        assert_eq!(collider.check(&player, &set_with(130.0), 440.0), Some(7));
    }

    #[test]
    fn test_falls_back_to_aabb_without_both_masks() {
        let collider = Collider::with_masks(None, Some(Mask::filled(60, 32)));
        assert!(!collider.uses_masks());
        let player = Rect::new(100.0, 360.0, 80.0, 80.0);
        assert_eq!(collider.check(&player, &set_with(170.0), 440.0), Some(7));
    }
}
