//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (`TimeSource`)
//! - Input events, collected between ticks and applied all at once

use std::time::Instant;

use crate::consts::{MAX_FRAME_MS, REFERENCE_FRAME_MS};

/// Supplies the elapsed milliseconds since the previous tick
pub trait TimeSource {
    fn elapsed_ms(&mut self) -> f32;
}

/// Wall clock, capped so a stalled frame can't fling obstacles across the screen
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
    max_frame_ms: f32,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn elapsed_ms(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32() * 1000.0;
        self.last = now;
        if dt > self.max_frame_ms {
            log::warn!(
                "Frame took {:.1}ms, capping to {}ms",
                dt,
                self.max_frame_ms
            );
        }
        dt.min(self.max_frame_ms)
    }
}

/// Constant dt; used by the headless runner and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt_ms: f32,
}

impl FixedClock {
    pub fn new(dt_ms: f32) -> Self {
        Self { dt_ms }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(REFERENCE_FRAME_MS)
    }
}

impl TimeSource for FixedClock {
    fn elapsed_ms(&mut self) -> f32 {
        self.dt_ms
    }
}

/// Replays a recorded sequence of frame times, then repeats the last one
#[derive(Debug, Clone)]
pub struct ReplayClock {
    frames: Vec<f32>,
    cursor: usize,
}

impl ReplayClock {
    pub fn new(frames: Vec<f32>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl TimeSource for ReplayClock {
    fn elapsed_ms(&mut self) -> f32 {
        let Some(last) = self.frames.last().copied() else {
            return REFERENCE_FRAME_MS;
        };
        let dt = self.frames.get(self.cursor).copied().unwrap_or(last);
        self.cursor += 1;
        dt
    }
}

/// Discrete input events delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    JumpRequested,
    PauseOrQuitRequested,
    ToggleModeRequested,
    /// Anything the game doesn't understand; ignored
    Unrecognized(String),
}

impl InputEvent {
    /// Default key bindings (space / escape / n)
    pub fn from_key(key: &str) -> Self {
        match key.to_lowercase().as_str() {
            "space" | "spacebar" | " " | "up" | "w" => InputEvent::JumpRequested,
            "escape" | "esc" | "q" => InputEvent::PauseOrQuitRequested,
            "n" | "m" => InputEvent::ToggleModeRequested,
            other => InputEvent::Unrecognized(other.to_string()),
        }
    }
}

/// Commands accumulated since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub jump: bool,
    pub pause_or_quit: bool,
    pub toggle_mode: bool,
}

impl PendingInput {
    pub fn is_empty(&self) -> bool {
        !(self.jump || self.pause_or_quit || self.toggle_mode)
    }
}

/// Collects events between ticks; `drain` hands them over atomically
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: PendingInput,
    ignored: u64,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::JumpRequested => self.pending.jump = true,
            InputEvent::PauseOrQuitRequested => self.pending.pause_or_quit = true,
            // Two toggles in one tick cancel out
            InputEvent::ToggleModeRequested => self.pending.toggle_mode = !self.pending.toggle_mode,
            InputEvent::Unrecognized(key) => {
                self.ignored += 1;
                log::trace!("Ignoring unrecognized input {:?}", key);
            }
        }
    }

    pub fn drain(&mut self) -> PendingInput {
        std::mem::take(&mut self.pending)
    }

    /// Number of events dropped as unrecognized
    pub fn ignored(&self) -> u64 {
        self.ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputEvent::from_key("Space"), InputEvent::JumpRequested);
        assert_eq!(InputEvent::from_key("Escape"), InputEvent::PauseOrQuitRequested);
        assert_eq!(InputEvent::from_key("n"), InputEvent::ToggleModeRequested);
        assert_eq!(
            InputEvent::from_key("F12"),
            InputEvent::Unrecognized("f12".to_string())
        );
    }

    #[test]
    fn test_queue_drains_atomically() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::JumpRequested);
        queue.push(InputEvent::JumpRequested);
        queue.push(InputEvent::Unrecognized("x".into()));

        let input = queue.drain();
        assert!(input.jump);
        assert!(!input.pause_or_quit);
        assert_eq!(queue.ignored(), 1);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_double_toggle_cancels() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::ToggleModeRequested);
        queue.push(InputEvent::ToggleModeRequested);
        assert!(!queue.drain().toggle_mode);
    }

    #[test]
    fn test_clocks() {
        let mut fixed = FixedClock::default();
        assert_eq!(fixed.elapsed_ms(), REFERENCE_FRAME_MS);

        let mut replay = ReplayClock::new(vec![10.0, 20.0]);
        assert_eq!(replay.elapsed_ms(), 10.0);
        assert_eq!(replay.elapsed_ms(), 20.0);
        assert_eq!(replay.elapsed_ms(), 20.0);

        let mut system = SystemClock::new();
        let dt = system.elapsed_ms();
        assert!((0.0..=MAX_FRAME_MS).contains(&dt));
    }
}
