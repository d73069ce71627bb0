//! Obstacle spawning policy
//!
//! A countdown timer decides *when*, the rightmost live obstacle decides *where*.
//! Intervals shrink with speed but are floored, and every new stone keeps at
//! least `min_gap` pixels of clearance from the one before it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Obstacle, ObstacleSet};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Milliseconds until the next spawn
    timer_ms: f32,
    next_id: u32,
}

impl SpawnPolicy {
    /// Fresh policy for a round; the first interval is drawn from the "first" range
    pub fn new(tuning: &Tuning, rng: &mut impl RandomSource) -> Self {
        let first = rng.int_inclusive(tuning.first_interval_min_ms, tuning.first_interval_max_ms);
        Self {
            timer_ms: first as f32,
            next_id: 1,
        }
    }

    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Count down by `elapsed_ms`; on expiry build one obstacle and re-arm the timer.
    /// At most one obstacle per call.
    pub fn maybe_spawn(
        &mut self,
        obstacles: &ObstacleSet,
        current_speed: f32,
        elapsed_ms: f32,
        tuning: &Tuning,
        rng: &mut impl RandomSource,
    ) -> Option<Obstacle> {
        self.timer_ms -= elapsed_ms.max(0.0);
        if self.timer_ms > 0.0 {
            return None;
        }

        let obstacle = self.spawn(obstacles, current_speed, tuning, rng);
        self.timer_ms = next_interval(current_speed, tuning, rng) as f32;
        Some(obstacle)
    }

    fn spawn(
        &mut self,
        obstacles: &ObstacleSet,
        current_speed: f32,
        tuning: &Tuning,
        rng: &mut impl RandomSource,
    ) -> Obstacle {
        let gap = rng.int_inclusive(tuning.min_gap, tuning.max_gap);
        let x = spawn_x(obstacles, gap as f32, tuning.screen_width);
        let speed_offset = rng.unit() * tuning.obstacle_speed_jitter;

        let id = self.next_id;
        self.next_id += 1;

        Obstacle {
            id,
            x,
            size: Vec2::new(tuning.stone_width, tuning.stone_height),
            speed_offset,
            base_speed: current_speed * tuning.obstacle_speed_factor + speed_offset,
        }
    }
}

/// Next spawn interval (ms): uniform in the speed-dependent floored range
pub fn next_interval(speed: f32, tuning: &Tuning, rng: &mut impl RandomSource) -> u32 {
    let (min, max) = tuning.interval_bounds(speed);
    rng.int_inclusive(min, max)
}

/// Never on screen, never closer than `gap` to the rightmost live obstacle.
/// With no obstacles the rightmost edge counts as the screen edge.
pub fn spawn_x(obstacles: &ObstacleSet, gap: f32, screen_width: f32) -> f32 {
    let last_right = obstacles.rightmost_edge().unwrap_or(screen_width);
    screen_width.max(last_right + gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, seeded};

    fn stone(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            size: Vec2::new(60.0, 32.0),
            speed_offset: 0.0,
            base_speed: 5.1,
        }
    }

    #[test]
    fn test_first_interval_in_range() {
        let tuning = Tuning::default();
        let mut rng = seeded(1);
        for _ in 0..100 {
            let policy = SpawnPolicy::new(&tuning, &mut rng);
            assert!((1400.0..=1800.0).contains(&policy.timer_ms()));
        }
    }

    #[test]
    fn test_spawn_waits_for_timer() {
        let tuning = Tuning::default();
        let mut rng = ScriptedRandom::new(vec![1500, 300, 1400], vec![0.25]);
        let mut policy = SpawnPolicy::new(&tuning, &mut rng);
        let set = ObstacleSet::new();

        assert!(policy.maybe_spawn(&set, 6.0, 1000.0, &tuning, &mut rng).is_none());
        assert!(policy.maybe_spawn(&set, 6.0, 499.0, &tuning, &mut rng).is_none());
        let o = policy
            .maybe_spawn(&set, 6.0, 1.0, &tuning, &mut rng)
            .expect("timer expired");

        // Empty set: screen edge + gap
        assert_eq!(o.x, 1300.0);
        assert_eq!(o.id, 1);
        assert_eq!(o.speed_offset, 0.25);
        assert!((o.base_speed - (6.0 * 0.85 + 0.25)).abs() < 1e-5);
        // Re-armed from the speed-6 range [1320, 1600], scripted 1400
        assert_eq!(policy.timer_ms(), 1400.0);
    }

    #[test]
    fn test_spawn_respects_rightmost_obstacle() {
        let mut set = ObstacleSet::new();
        set.push(stone(1, 900.0));
        set.push(stone(2, 1200.0));
        // Rightmost edge 1260, gap 220
        assert_eq!(spawn_x(&set, 220.0, 1000.0), 1480.0);

        let mut far_left = ObstacleSet::new();
        far_left.push(stone(1, 100.0));
        // Never spawns on screen
        assert_eq!(spawn_x(&far_left, 220.0, 1000.0), 1000.0);
    }

    #[test]
    fn test_one_spawn_per_call_even_with_huge_dt() {
        let tuning = Tuning::default();
        let mut rng = seeded(3);
        let mut policy = SpawnPolicy::new(&tuning, &mut rng);
        let set = ObstacleSet::new();
        assert!(policy.maybe_spawn(&set, 6.0, 60_000.0, &tuning, &mut rng).is_some());
        assert!(policy.timer_ms() > 0.0);
    }

    #[test]
    fn test_ids_increase() {
        let tuning = Tuning::default();
        let mut rng = seeded(9);
        let mut policy = SpawnPolicy::new(&tuning, &mut rng);
        let mut set = ObstacleSet::new();
        for expected in 1..=3 {
            let o = policy
                .maybe_spawn(&set, 6.0, 10_000.0, &tuning, &mut rng)
                .unwrap();
            assert_eq!(o.id, expected);
            set.push(o);
        }
    }
}
