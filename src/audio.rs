//! Sound cues
//!
//! Every `Sound` the simulation emits maps to a single enveloped beep.
//! On wasm32 `AudioManager` plays them through the Web Audio API.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, Sound};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Synthesis parameters for one cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beep {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Optional end frequency for a pitch sweep (Hz)
    pub sweep_to: Option<f32>,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
    /// Peak gain before volume settings
    pub gain: f32,
}

impl Beep {
    pub fn for_sound(sound: Sound) -> Self {
        match sound {
            Sound::Shoot => Beep {
                freq: 880.0,
                sweep_to: None,
                duration: 0.06,
                waveform: Waveform::Square,
                gain: 0.06,
            },
            Sound::EnemyShoot => Beep {
                freq: 330.0,
                sweep_to: Some(220.0),
                duration: 0.07,
                waveform: Waveform::Triangle,
                gain: 0.04,
            },
            Sound::Explosion => Beep {
                freq: 180.0,
                sweep_to: Some(50.0),
                duration: 0.25,
                waveform: Waveform::Sawtooth,
                gain: 0.12,
            },
            Sound::Hit => Beep {
                freq: 220.0,
                sweep_to: Some(110.0),
                duration: 0.2,
                waveform: Waveform::Square,
                gain: 0.12,
            },
            Sound::LevelClear => Beep {
                freq: 523.0,
                sweep_to: Some(1046.0),
                duration: 0.35,
                waveform: Waveform::Sine,
                gain: 0.1,
            },
            Sound::GameOver => Beep {
                freq: 220.0,
                sweep_to: Some(55.0),
                duration: 0.8,
                waveform: Waveform::Sawtooth,
                gain: 0.12,
            },
        }
    }

    /// Gain after applying a volume multiplier
    pub fn scaled_gain(&self, volume: f32) -> f32 {
        self.gain * volume.clamp(0.0, 1.0)
    }
}

/// Sounds carried by a tick's events, in order
pub fn sounds(events: &[GameEvent]) -> impl Iterator<Item = Sound> + '_ {
    events.iter().filter_map(|event| match event {
        GameEvent::Sound { sound } => Some(*sound),
        _ => None,
    })
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Beep, Waveform};
    use crate::settings::Settings;
    use crate::sim::Sound;

    impl From<Waveform> for OscillatorType {
        fn from(waveform: Waveform) -> Self {
            match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        pub fn set_muted(&mut self, muted: bool, settings: &Settings) {
            self.volume = if muted { 0.0 } else { settings.effective_volume() };
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, sound: Sound) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let beep = Beep::for_sound(sound);
            let Some((osc, gain)) = create_osc(ctx, beep.freq, beep.waveform.into()) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + f64::from(beep.duration);

            gain.gain()
                .set_value_at_time(beep.scaled_gain(self.volume), t)
                .ok();
            gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();
            if let Some(target) = beep.sweep_to {
                osc.frequency().set_value_at_time(beep.freq, t).ok();
                osc.frequency().exponential_ramp_to_value_at_time(target, end).ok();
            }

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }

    /// Create an oscillator wired through a gain node
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}
