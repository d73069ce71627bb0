//! Per-tick simulation step
//!
//! Core game loop that advances a round deterministically. Order within a
//! tick: difficulty ramp, distance, player physics, jump, obstacle motion and
//! culling, spawning, collision.

use rand_pcg::Pcg32;

use super::collision::Collider;
use super::rng::{RandomSource, seeded};
use super::spawn::SpawnPolicy;
use super::state::{
    DifficultyState, GameEvent, ObstacleSet, ObstacleView, PlayerState, RoundConfig, RoundPhase,
    ScoreState, SimulationSnapshot,
};
use crate::tuning::Tuning;

/// Input commands for a single tick, collected since the previous one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
}

/// One round of play: player, obstacles, difficulty and score
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    tuning: Tuning,
    config: RoundConfig,
    rng: R,
    collider: Collider,
    phase: RoundPhase,
    tick: u64,
    elapsed_ms: f64,
    player: PlayerState,
    obstacles: ObstacleSet,
    difficulty: DifficultyState,
    score: ScoreState,
    spawner: SpawnPolicy,
    collided_with: Option<u32>,
    events: Vec<GameEvent>,
}

impl Simulation<Pcg32> {
    /// Idle simulation whose RNG is seeded from the round config
    pub fn new(tuning: Tuning, config: RoundConfig) -> Self {
        Self::with_rng(tuning, config, seeded(config.seed))
    }

    /// Reseed from a new config and start running
    pub fn start_round(&mut self, config: RoundConfig) {
        self.config = config;
        self.rng = seeded(config.seed);
        self.start();
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Idle simulation drawing from an injected random source
    pub fn with_rng(tuning: Tuning, config: RoundConfig, mut rng: R) -> Self {
        let spawner = SpawnPolicy::new(&tuning, &mut rng);
        Self {
            player: PlayerState::on_ground(tuning.ground_y),
            obstacles: ObstacleSet::new(),
            difficulty: DifficultyState::new(tuning.initial_speed),
            score: ScoreState::default(),
            spawner,
            tuning,
            config,
            rng,
            collider: Collider::aabb(),
            phase: RoundPhase::Idle,
            tick: 0,
            elapsed_ms: 0.0,
            collided_with: None,
            events: Vec::new(),
        }
    }

    pub fn set_collider(&mut self, collider: Collider) {
        self.collider = collider;
    }

    /// Switch day/night outside a round; a running round keeps its mode
    pub fn set_night_mode(&mut self, night_mode: bool) {
        if self.phase != RoundPhase::Running {
            self.config.night_mode = night_mode;
        }
    }

    /// Idle → Running (or a fresh Running round from any phase). Resets all round state.
    pub fn start(&mut self) {
        self.reset();
        self.phase = RoundPhase::Running;
        self.events.push(GameEvent::RoundStarted);
        log::info!(
            "Round started (seed {}, {} mode)",
            self.config.seed,
            if self.config.night_mode { "night" } else { "day" }
        );
    }

    /// Back to Idle with a clean slate
    pub fn reset(&mut self) {
        self.player = PlayerState::on_ground(self.tuning.ground_y);
        self.obstacles.clear();
        self.difficulty = DifficultyState::new(self.tuning.initial_speed);
        self.score = ScoreState::default();
        self.spawner = SpawnPolicy::new(&self.tuning, &mut self.rng);
        self.phase = RoundPhase::Idle;
        self.tick = 0;
        self.elapsed_ms = 0.0;
        self.collided_with = None;
        self.events.clear();
    }

    /// Advance one tick. Does nothing unless the round is Running.
    pub fn advance(&mut self, dt_ms: f32, input: TickInput) -> SimulationSnapshot {
        if self.phase == RoundPhase::Running {
            self.step(sanitize_dt(dt_ms), input);
        }
        self.snapshot()
    }

    fn step(&mut self, dt_ms: f32, input: TickInput) {
        let tuning = &self.tuning;
        self.tick += 1;
        self.elapsed_ms += dt_ms as f64;

        self.difficulty.ramp(dt_ms, tuning);
        let speed = self.difficulty.speed;
        self.score.accrue(speed, dt_ms, tuning);

        // Fixed-step player physics; the jump is resolved after integration so an
        // accepted jump leaves exactly the jump velocity at the end of this tick
        self.player.integrate(tuning);
        if input.jump && self.player.jump(tuning) {
            self.events.push(GameEvent::Jumped);
        }

        // dt-proportional obstacle motion
        let ratio = speed / tuning.initial_speed;
        for obstacle in self.obstacles.iter_mut() {
            obstacle.advance(ratio, dt_ms, tuning.reference_frame_ms);
        }
        self.obstacles.cull_offscreen(tuning.despawn_margin);

        if let Some(obstacle) =
            self.spawner
                .maybe_spawn(&self.obstacles, speed, dt_ms, tuning, &mut self.rng)
        {
            log::debug!(
                "Spawned stone {} at x={:.1} (base speed {:.2})",
                obstacle.id,
                obstacle.x,
                obstacle.base_speed
            );
            self.events.push(GameEvent::ObstacleSpawned {
                id: obstacle.id,
                x: obstacle.x,
            });
            self.obstacles.push(obstacle);
        }

        let player_rect = self.player.rect(tuning);
        if let Some(id) = self
            .collider
            .check(&player_rect, &self.obstacles, tuning.ground_y)
        {
            self.phase = RoundPhase::Ended;
            self.collided_with = Some(id);
            self.events.push(GameEvent::Collided { obstacle_id: id });
            log::info!(
                "Round ended: hit stone {} at tick {}, score {}",
                id,
                self.tick,
                self.score.score
            );
        }
    }

    /// Read-only view for render sinks
    pub fn snapshot(&self) -> SimulationSnapshot {
        let ground_y = self.tuning.ground_y;
        SimulationSnapshot {
            phase: self.phase,
            tick: self.tick,
            elapsed_ms: self.elapsed_ms,
            player: self.player.rect(&self.tuning),
            player_vel_y: self.player.vel_y,
            on_ground: self.player.on_ground,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    rect: o.rect(ground_y),
                })
                .collect(),
            speed: self.difficulty.speed,
            distance: self.score.distance,
            score: self.score.score,
            night_mode: self.config.night_mode,
        }
    }

    /// Events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut ObstacleSet {
        &mut self.obstacles
    }

    pub fn speed(&self) -> f32 {
        self.difficulty.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.difficulty.speed = speed.clamp(0.0, self.tuning.max_speed);
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut ScoreState {
        &mut self.score
    }

    pub fn collided_with(&self) -> Option<u32> {
        self.collided_with
    }
}

/// Negative or non-finite frame times count as zero
fn sanitize_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_FRAME_MS;
    use crate::sim::state::Obstacle;
    use glam::Vec2;

    fn running(seed: u64) -> Simulation {
        let mut sim = Simulation::new(Tuning::default(), RoundConfig::new(seed));
        sim.start();
        sim
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut sim = Simulation::new(Tuning::default(), RoundConfig::new(1));
        let snap = sim.advance(REFERENCE_FRAME_MS, TickInput::default());
        assert_eq!(snap.phase, RoundPhase::Idle);
        assert_eq!(snap.tick, 0);
        assert_eq!(snap.distance, 0.0);
    }

    #[test]
    fn test_jump_from_ground_same_tick() {
        let mut sim = running(5);
        assert_eq!(sim.speed(), 6.0);
        let snap = sim.advance(REFERENCE_FRAME_MS, TickInput { jump: true });
        assert_eq!(snap.player_vel_y, -13.0);
        assert!(!snap.on_ground);
        assert!(sim.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_jump_ignored_mid_air() {
        let mut sim = running(5);
        sim.advance(REFERENCE_FRAME_MS, TickInput { jump: true });
        let mut twin = sim.clone();

        let a = sim.advance(REFERENCE_FRAME_MS, TickInput { jump: true });
        let b = twin.advance(REFERENCE_FRAME_MS, TickInput::default());
        assert_eq!(a.player_vel_y, b.player_vel_y);
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_obstacle_leaves_and_is_removed() {
        // Player column parked off screen so nothing can end the round
        let tuning = Tuning {
            player_x: -5000.0,
            ..Default::default()
        };
        let mut sim = Simulation::new(tuning, RoundConfig::new(11));
        sim.start();
        sim.set_speed(13.0);
        sim.obstacles_mut().push(Obstacle {
            id: 999,
            x: 1000.0,
            size: Vec2::new(60.0, 32.0),
            speed_offset: 0.0,
            base_speed: 13.0 * 0.85,
        });

        let mut last_x = 1000.0;
        for _ in 0..500 {
            let snap = sim.advance(REFERENCE_FRAME_MS, TickInput::default());
            assert_eq!(snap.phase, RoundPhase::Running);
            assert_eq!(snap.speed, 13.0);
            if let Some(o) = sim.obstacles().get(999) {
                last_x = o.x;
            }
        }
        assert!(last_x < 0.0);
        assert!(sim.obstacles().get(999).is_none());
    }

    #[test]
    fn test_collision_ends_round_and_freezes_state() {
        let mut sim = running(21);
        let player_left = sim.player().rect(sim.tuning()).left();
        sim.obstacles_mut().push(Obstacle {
            id: 42,
            x: player_left + 10.0,
            size: Vec2::new(60.0, 32.0),
            speed_offset: 0.0,
            base_speed: 0.0,
        });

        let snap = sim.advance(REFERENCE_FRAME_MS, TickInput::default());
        assert_eq!(snap.phase, RoundPhase::Ended);
        assert_eq!(sim.collided_with(), Some(42));

        let frozen = sim.snapshot();
        let count = sim.obstacles().len();
        for _ in 0..200 {
            let snap = sim.advance(1000.0, TickInput { jump: true });
            assert_eq!(snap, frozen);
        }
        assert_eq!(sim.obstacles().len(), count);
    }

    #[test]
    fn test_start_resets_round() {
        let mut sim = running(3);
        for _ in 0..100 {
            sim.advance(REFERENCE_FRAME_MS, TickInput::default());
        }
        sim.start();
        let snap = sim.snapshot();
        assert_eq!(snap.phase, RoundPhase::Running);
        assert_eq!(snap.tick, 0);
        assert_eq!(snap.speed, 6.0);
        assert_eq!(snap.distance, 0.0);
        assert!(snap.obstacles.is_empty());
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut sim = running(3);
        let snap = sim.advance(f32::NAN, TickInput::default());
        assert_eq!(snap.speed, 6.0);
        let snap = sim.advance(-100.0, TickInput::default());
        assert_eq!(snap.distance, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        for i in 0..2000 {
            let input = TickInput { jump: i % 37 == 0 };
            let sa = a.advance(REFERENCE_FRAME_MS, input);
            let sb = b.advance(REFERENCE_FRAME_MS, input);
            assert_eq!(sa, sb);
        }
    }
}
