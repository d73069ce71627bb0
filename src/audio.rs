//! Audio cues
//!
//! Maps simulation events to sound effects. Playback itself belongs to the
//! host; this layer decides which cue fires and at what gain, and stays
//! silent for any cue whose file is missing.

use std::path::Path;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Player hit a stone
    Hit,
    /// Round over (plays once on the results screen)
    GameOver,
    /// Looping background music
    Music,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Jump,
        SoundEffect::Hit,
        SoundEffect::GameOver,
        SoundEffect::Music,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump.wav",
            SoundEffect::Hit => "hit.wav",
            SoundEffect::GameOver => "score.wav",
            SoundEffect::Music => "bgm.wav",
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundEffect::Jump => 0,
            SoundEffect::Hit => 1,
            SoundEffect::GameOver => 2,
            SoundEffect::Music => 3,
        }
    }
}

/// A cue ready for the host to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub gain: f32,
    pub looping: bool,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    available: [bool; 4],
    sfx_gain: f32,
    music_gain: f32,
}

impl AudioManager {
    /// Probe `root` for each sound file; missing ones stay silent
    pub fn new(root: &Path, settings: &Settings) -> Self {
        let mut available = [false; 4];
        for effect in SoundEffect::ALL {
            let path = root.join(effect.file_name());
            available[effect.index()] = path.is_file();
            if !available[effect.index()] {
                log::warn!("Sound {} not found - cue disabled", path.display());
            }
        }
        Self {
            available,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
        }
    }

    /// Every cue enabled (tests, hosts with built-in sounds)
    pub fn with_all(settings: &Settings) -> Self {
        Self {
            available: [true; 4],
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_gain = settings.sfx_gain();
        self.music_gain = settings.music_gain();
    }

    /// Cue for an effect, `None` when silent
    pub fn play(&self, effect: SoundEffect) -> Option<Cue> {
        let (gain, looping) = match effect {
            SoundEffect::Music => (self.music_gain, true),
            _ => (self.sfx_gain, false),
        };
        if !self.available[effect.index()] || gain <= 0.0 {
            return None;
        }
        log::debug!("Audio cue {:?} at gain {:.2}", effect, gain);
        Some(Cue {
            effect,
            gain,
            looping,
        })
    }

    /// Cues triggered by one tick's events
    pub fn cues_for(&self, events: &[GameEvent]) -> Vec<Cue> {
        events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Jumped => self.play(SoundEffect::Jump),
                GameEvent::Collided { .. } => self.play(SoundEffect::Hit),
                GameEvent::RoundStarted => self.play(SoundEffect::Music),
                GameEvent::ObstacleSpawned { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_are_silent() {
        let audio = AudioManager::new(Path::new("/no/such/sound/dir"), &Settings::default());
        for effect in SoundEffect::ALL {
            assert!(audio.play(effect).is_none());
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let audio = AudioManager::with_all(&Settings::default());
        let cues = audio.cues_for(&[
            GameEvent::RoundStarted,
            GameEvent::ObstacleSpawned { id: 1, x: 1200.0 },
            GameEvent::Jumped,
            GameEvent::Collided { obstacle_id: 1 },
        ]);
        let effects: Vec<_> = cues.iter().map(|c| c.effect).collect();
        assert_eq!(
            effects,
            vec![SoundEffect::Music, SoundEffect::Jump, SoundEffect::Hit]
        );
        assert!(cues[0].looping);
    }

    #[test]
    fn test_muted_is_silent() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let audio = AudioManager::with_all(&settings);
        assert!(audio.play(SoundEffect::Jump).is_none());
    }
}
