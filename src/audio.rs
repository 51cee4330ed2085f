//! Audio collaborator
//!
//! Turns simulation events into procedurally described sound cues. The
//! actual synthesis lives behind [`AudioBackend`]; with no backend every
//! call is a no-op and the simulation never notices.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Player dropped into a slide
    Slide,
    /// Coin collected
    Coin,
    /// Shield picked up
    ShieldPickup,
    /// Shield absorbed an obstacle
    ShieldBlock,
    /// Run ended
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    Noise,
}

/// One oscillator voice: exponential pitch sweep with a decaying gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Seconds after the cue fires
    pub delay: f32,
    pub duration: f32,
    pub gain: f32,
}

impl Tone {
    const fn new(waveform: Waveform, freq_start: f32, freq_end: f32, duration: f32, gain: f32) -> Self {
        Self {
            waveform,
            freq_start,
            freq_end,
            delay: 0.0,
            duration,
            gain,
        }
    }

    const fn after(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}

impl SoundEffect {
    /// Cue for a simulation event (music control events have none)
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::JumpStarted => Some(SoundEffect::Jump),
            GameEvent::SlideStarted => Some(SoundEffect::Slide),
            GameEvent::CoinCollected => Some(SoundEffect::Coin),
            GameEvent::ShieldCollected => Some(SoundEffect::ShieldPickup),
            GameEvent::ShieldBlocked => Some(SoundEffect::ShieldBlock),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::MusicStart | GameEvent::MusicStop => None,
        }
    }

    /// Voices that make up this cue
    pub fn tones(self) -> Vec<Tone> {
        match self {
            // Whoosh up
            SoundEffect::Jump => vec![Tone::new(Waveform::Triangle, 200.0, 600.0, 0.2, 0.3)],
            // Low scrape
            SoundEffect::Slide => vec![
                Tone::new(Waveform::Noise, 800.0, 300.0, 0.3, 0.2),
                Tone::new(Waveform::Sine, 120.0, 80.0, 0.2, 0.2),
            ],
            // Two-note chime
            SoundEffect::Coin => vec![
                Tone::new(Waveform::Square, 988.0, 988.0, 0.08, 0.15),
                Tone::new(Waveform::Square, 1319.0, 1319.0, 0.2, 0.15).after(0.08),
            ],
            // Rising arpeggio
            SoundEffect::ShieldPickup => [400.0, 500.0, 600.0, 800.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| Tone::new(Waveform::Triangle, f, f, 0.4, 0.25).after(i as f32 * 0.08))
                .collect(),
            // Metallic clang
            SoundEffect::ShieldBlock => vec![
                Tone::new(Waveform::Sine, 80.0, 40.0, 0.3, 0.5),
                Tone::new(Waveform::Square, 400.0, 200.0, 0.25, 0.25),
            ],
            // Sad descending
            SoundEffect::GameOver => [400.0, 350.0, 300.0, 200.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| Tone::new(Waveform::Sine, f, f, 0.4, 0.3).after(i as f32 * 0.2))
                .collect(),
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Play a cue's voices at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, tones: &[Tone], volume: f32);
    /// Start or stop the background loop
    fn set_music(&mut self, playing: bool, volume: f32);
}

/// Backend that only reports cues through the logger
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, tones: &[Tone], volume: f32) {
        log::debug!("♪ {:?} ({} voices, vol {:.2})", effect, tones.len(), volume);
    }

    fn set_music(&mut self, playing: bool, volume: f32) {
        log::debug!("♪ music {} (vol {:.2})", if playing { "on" } else { "off" }, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        }
    }

    /// Take volumes and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect, &effect.tones(), vol);
    }

    fn set_music(&mut self, playing: bool) {
        if self.music_playing == playing {
            return;
        }
        self.music_playing = playing;
        let vol = self.effective_volume(self.music_volume);
        if let Some(backend) = self.backend.as_mut() {
            backend.set_music(playing, vol);
        }
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MusicStart => self.set_music(true),
            GameEvent::MusicStop => self.set_music(false),
            _ => {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.play(effect);
                }
            }
        }
    }

    /// Stop anything still scheduled
    pub fn shutdown(&mut self) {
        self.set_music(false);
    }
}
