//! Sound intents
//!
//! The simulation never plays audio itself. It raises `GameEvent`s; the
//! session maps them to `SoundEffect`s and hands them to whatever
//! `AudioSink` the host provides. Fire-and-forget, no acknowledgement.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// The two alternating menace cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenaceCue {
    Low,
    High,
}

impl MenaceCue {
    pub fn other(self) -> Self {
        match self {
            MenaceCue::Low => MenaceCue::High,
            MenaceCue::High => MenaceCue::Low,
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player shot leaves the ship
    Shoot,
    /// Enemy destroyed
    EnemyExplode,
    /// Shelter brick knocked out
    ShelterDamage,
    /// Ship hit
    PlayerExplode,
    /// Wave cleared
    WaveClear,
    /// Run lost
    GameOver,
    /// Ambient heartbeat
    Menace(MenaceCue),
}

/// Procedural tone description a synthesizer can render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_ms: u32,
}

impl SoundEffect {
    /// Map a simulation event to its sound, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::EnemyExplode),
            GameEvent::ShelterDamaged => Some(SoundEffect::ShelterDamage),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerExplode),
            GameEvent::WaveCleared { .. } => Some(SoundEffect::WaveClear),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        }
    }

    pub fn tone(self) -> Tone {
        let (freq_hz, duration_ms) = match self {
            SoundEffect::Shoot => (880.0, 80),
            SoundEffect::EnemyExplode => (120.0, 250),
            SoundEffect::ShelterDamage => (300.0, 60),
            SoundEffect::PlayerExplode => (80.0, 600),
            SoundEffect::WaveClear => (660.0, 400),
            SoundEffect::GameOver => (200.0, 900),
            SoundEffect::Menace(MenaceCue::Low) => (55.0, 150),
            SoundEffect::Menace(MenaceCue::High) => (65.0, 150),
        };
        Tone {
            freq_hz,
            duration_ms,
        }
    }
}

/// Host-provided audio output
pub trait AudioSink: Send {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs what would have played
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        let tone = effect.tone();
        log::trace!(
            "sfx {:?}: {:.0} Hz for {} ms at {:.2}",
            effect,
            tone.freq_hz,
            tone.duration_ms,
            volume
        );
    }
}

/// Sink that keeps every effect, for embedding hosts and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    played: Arc<Mutex<Vec<SoundEffect>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything played so far
    pub fn played(&self) -> Vec<SoundEffect> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        if let Ok(mut played) = self.played.lock() {
            played.push(effect);
        }
    }
}

/// Volume policy in front of a sink
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever sounds a batch of events calls for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::from_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_map_to_effects() {
        let events = [
            GameEvent::ShotFired,
            GameEvent::EnemyDestroyed { row: 0, column: 3 },
            GameEvent::PlayerHit { lives_left: 2 },
        ];
        let sink = RecordingSink::new();
        let mut audio = AudioManager::new(Box::new(sink.clone()));
        audio.play_events(&events);
        assert_eq!(
            sink.played(),
            vec![
                SoundEffect::Shoot,
                SoundEffect::EnemyExplode,
                SoundEffect::PlayerExplode
            ]
        );
    }

    #[test]
    fn test_muted_manager_plays_nothing() {
        let sink = RecordingSink::new();
        let mut audio = AudioManager::new(Box::new(sink.clone()));
        audio.set_muted(true);
        audio.play(SoundEffect::Shoot);
        audio.set_muted(false);
        audio.set_master_volume(0.0);
        audio.play(SoundEffect::Shoot);
        assert!(sink.played().is_empty());
    }

    #[test]
    fn test_menace_cues_alternate() {
        assert_eq!(MenaceCue::Low.other(), MenaceCue::High);
        assert_ne!(
            SoundEffect::Menace(MenaceCue::Low).tone(),
            SoundEffect::Menace(MenaceCue::High).tone()
        );
    }
}
