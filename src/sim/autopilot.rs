//! Idle/demo mode - the game plays itself
//!
//! Jumps when the nearest stone ahead is about to reach the player. Used by
//! the headless runner and as an attract-mode input source.

use super::state::SimulationSnapshot;
use crate::tuning::Tuning;

/// Ticks of warning before a stone reaches the player's leading edge
const LEAD_TICKS: f32 = 4.0;

/// Should the autopilot press jump this tick?
pub fn wants_jump(snapshot: &SimulationSnapshot, tuning: &Tuning) -> bool {
    if !snapshot.on_ground {
        return false;
    }

    let player = &snapshot.player;
    let Some(nearest) = snapshot
        .obstacles
        .iter()
        .filter(|o| o.rect.right() > player.left())
        .map(|o| o.rect.left() - player.right())
        .reduce(f32::min)
    else {
        return false;
    };

    // Approximate per-tick closing speed of a freshly spawned stone
    let ratio = snapshot.speed / tuning.initial_speed;
    let per_tick = snapshot.speed * tuning.obstacle_speed_factor * ratio;
    nearest <= per_tick * LEAD_TICKS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::Rect;
    use crate::sim::state::{ObstacleView, RoundPhase};

    fn snapshot_with(stone_x: Option<f32>, on_ground: bool) -> SimulationSnapshot {
        SimulationSnapshot {
            phase: RoundPhase::Running,
            tick: 10,
            elapsed_ms: 166.7,
            player: Rect::new(100.0, 360.0, 80.0, 80.0),
            player_vel_y: 0.0,
            on_ground,
            obstacles: stone_x
                .map(|x| ObstacleView {
                    id: 1,
                    rect: Rect::new(x, 408.0, 60.0, 32.0),
                })
                .into_iter()
                .collect(),
            speed: 6.0,
            distance: 0.0,
            score: 0,
            night_mode: false,
        }
    }

    #[test]
    fn test_jumps_when_stone_is_close() {
        let tuning = Tuning::default();
        assert!(wants_jump(&snapshot_with(Some(190.0), true), &tuning));
        assert!(!wants_jump(&snapshot_with(Some(600.0), true), &tuning));
        assert!(!wants_jump(&snapshot_with(None, true), &tuning));
    }

    #[test]
    fn test_no_jump_mid_air_or_for_passed_stones() {
        let tuning = Tuning::default();
        assert!(!wants_jump(&snapshot_with(Some(190.0), false), &tuning));
        // Stone already behind the player
        assert!(!wants_jump(&snapshot_with(Some(0.0), true), &tuning));
    }
}
