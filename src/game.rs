//! Session orchestration
//!
//! A `Session` strings rounds together: it maps input events onto the round
//! state machine, records the best score when a round ends, persists
//! preference toggles and turns simulation events into audio cues.

use std::path::PathBuf;

use crate::assets::AssetCatalog;
use crate::audio::{AudioManager, Cue, SoundEffect};
use crate::highscores::{RoundResult, ScoreTracker};
use crate::persistence::ScoreStore;
use crate::platform::{InputEvent, InputQueue, PendingInput};
use crate::renderer::{Frame, RenderSink};
use crate::settings::Settings;
use crate::sim::{RoundConfig, RoundPhase, Simulation, SimulationSnapshot, TickInput};
use crate::tuning::Tuning;

/// FPS is averaged over this many frames
const FPS_WINDOW: usize = 60;

/// Result of one session tick
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub snapshot: SimulationSnapshot,
    pub cues: Vec<Cue>,
    /// Set on the tick a round ends
    pub result: Option<RoundResult>,
}

pub struct Session<S> {
    sim: Simulation,
    tracker: ScoreTracker<S>,
    settings: Settings,
    settings_path: Option<PathBuf>,
    audio: AudioManager,
    input: InputQueue,
    base_seed: u64,
    /// Rounds started so far (also the id of the current round)
    round: u64,
    last_result: Option<RoundResult>,
    quit_requested: bool,
    placeholder_player: bool,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(
        tuning: Tuning,
        settings: Settings,
        store: S,
        audio: AudioManager,
        base_seed: u64,
    ) -> Self {
        let config = RoundConfig {
            seed: base_seed,
            night_mode: settings.night_mode,
        };
        Self {
            sim: Simulation::new(tuning.validated(), config),
            tracker: ScoreTracker::load(store),
            settings,
            settings_path: None,
            audio,
            input: InputQueue::new(),
            base_seed,
            round: 0,
            last_result: None,
            quit_requested: false,
            placeholder_player: false,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Persist settings changes to `path`
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Use the catalog's collision shapes and placeholder flags
    pub fn use_assets(&mut self, assets: &AssetCatalog) {
        let collider = assets.collider(self.sim.tuning());
        self.sim.set_collider(collider);
        self.placeholder_player = assets.player.is_placeholder();
    }

    /// Queue a host event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Tick with whatever input was queued since the last one
    pub fn tick(&mut self, dt_ms: f32) -> TickOutput {
        let pending = self.input.drain();
        self.step(dt_ms, pending)
    }

    /// Apply one tick's worth of commands, then advance the simulation
    pub fn step(&mut self, dt_ms: f32, input: PendingInput) -> TickOutput {
        let phase = self.sim.phase();
        let mut jump = false;

        if input.toggle_mode {
            if phase == RoundPhase::Running {
                log::debug!("Mode toggle ignored mid-round");
            } else {
                self.toggle_night_mode();
            }
        }

        if input.pause_or_quit {
            match phase {
                RoundPhase::Running | RoundPhase::Ended => {
                    if phase == RoundPhase::Running {
                        log::info!("Round {} abandoned", self.round);
                    }
                    self.sim.reset();
                }
                RoundPhase::Idle => {
                    log::info!("Quit requested");
                    self.quit_requested = true;
                }
            }
        } else if input.jump {
            match phase {
                RoundPhase::Running => jump = true,
                RoundPhase::Idle | RoundPhase::Ended => self.start_round(),
            }
        }

        let snapshot = self.sim.advance(dt_ms, TickInput { jump });
        let events = self.sim.drain_events();
        let mut cues = self.audio.cues_for(&events);

        let mut result = None;
        if phase == RoundPhase::Running && snapshot.phase == RoundPhase::Ended {
            let r = self.tracker.on_round_end(self.round, snapshot.score);
            log::info!(
                "Round {} over: score {}, best {}{}",
                self.round,
                r.score,
                r.best,
                if r.improved { " (new best)" } else { "" }
            );
            cues.extend(self.audio.play(SoundEffect::GameOver));
            self.last_result = Some(r);
            result = Some(r);
        }

        TickOutput {
            snapshot,
            cues,
            result,
        }
    }

    fn start_round(&mut self) {
        self.round += 1;
        let config = RoundConfig {
            seed: self.base_seed.wrapping_add(self.round),
            night_mode: self.settings.night_mode,
        };
        self.last_result = None;
        self.sim.start_round(config);
    }

    fn toggle_night_mode(&mut self) {
        self.update_settings(|s| s.night_mode = !s.night_mode);
        log::info!(
            "Switched to {} mode",
            if self.settings.night_mode { "night" } else { "day" }
        );
    }

    /// Change preferences: audio gains follow at once, night mode applies from
    /// the next round (or the idle screen), and the file is saved when set
    pub fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.settings);
        self.audio.apply_settings(&self.settings);
        self.sim.set_night_mode(self.settings.night_mode);
        if let Some(path) = &self.settings_path
            && let Err(e) = self.settings.save(path)
        {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Record a presented frame at `time_ms` for the FPS counter
    pub fn record_frame(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    /// Hand the latest snapshot to a render sink
    pub fn present(&self, snapshot: &SimulationSnapshot, sink: &mut dyn RenderSink) {
        sink.present(&Frame {
            snapshot,
            best: self.tracker.best(),
            fps: self.settings.show_fps.then_some(self.fps),
            placeholder_player: self.placeholder_player,
        });
    }

    pub fn phase(&self) -> RoundPhase {
        self.sim.phase()
    }

    pub fn best(&self) -> u64 {
        self.tracker.best()
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn store(&self) -> &S {
        self.tracker.store()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
