//! Audio system
//!
//! Procedurally generated sound effects - no external files needed!
//! Each [`SoundCue`] maps to a short list of oscillator tones; the wasm build
//! plays them through the Web Audio API, native builds stay silent.

use crate::sim::SoundCue;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator note with an exponential fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Base frequency (Hz)
    pub freq: f32,
    /// Random extra frequency in [0, jitter)
    pub jitter: f32,
    pub wave: Waveform,
    /// Seconds
    pub duration: f32,
    /// Peak gain
    pub volume: f32,
    /// Seconds after the trigger
    pub delay: f32,
}

const fn tone(freq: f32, wave: Waveform, duration: f32) -> Tone {
    Tone {
        freq,
        jitter: 0.0,
        wave,
        duration,
        volume: 0.1,
        delay: 0.0,
    }
}

/// Notes played for a cue
pub fn recipe(cue: SoundCue) -> Vec<Tone> {
    use Waveform::*;
    match cue {
        SoundCue::Pop => vec![Tone {
            jitter: 200.0,
            ..tone(600.0, Sine, 0.1)
        }],
        SoundCue::Good => vec![
            tone(800.0, Sine, 0.15),
            Tone {
                delay: 0.1,
                ..tone(1200.0, Sine, 0.15)
            },
        ],
        SoundCue::Bad => vec![tone(150.0, Sawtooth, 0.3)],
        SoundCue::Level => vec![
            tone(400.0, Sine, 0.2),
            Tone {
                delay: 0.15,
                ..tone(600.0, Sine, 0.2)
            },
            Tone {
                delay: 0.3,
                ..tone(800.0, Sine, 0.4)
            },
        ],
        SoundCue::Boss => vec![tone(100.0, Square, 0.5)],
        SoundCue::Click => vec![Tone {
            volume: 0.05,
            ..tone(2000.0, Triangle, 0.05)
        }],
    }
}

/// Something that can play cues. Implementations must swallow their own errors.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
    /// Unlock playback after a user gesture
    fn resume(&mut self) {}
}

/// Silent sink
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio {
    enabled: bool,
}

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Sink that remembers what it was asked to play (headless runs, tests)
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    enabled: bool,
    played: std::rc::Rc<std::cell::RefCell<Vec<SoundCue>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self {
            enabled: true,
            played: Default::default(),
        }
    }

    /// Shared view of the cue log (stays valid after the sink is boxed)
    pub fn log(&self) -> std::rc::Rc<std::cell::RefCell<Vec<SoundCue>>> {
        self.played.clone()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        if self.enabled {
            self.played.borrow_mut().push(cue);
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{AudioSink, Tone, Waveform, recipe};
    use crate::sim::SoundCue;

    impl From<Waveform> for OscillatorType {
        fn from(wave: Waveform) -> Self {
            match wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Web Audio backed sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        enabled: bool,
    }

    impl WebAudio {
        pub fn new(enabled: bool) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                enabled,
            }
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(tone.wave.into());
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time() + tone.delay as f64;
            let end = t + tone.duration as f64;
            let freq = tone.freq + tone.jitter * js_sys::Math::random() as f32;

            osc.frequency().set_value_at_time(freq, t).ok()?;
            gain.gain().set_value_at_time(tone.volume, t).ok()?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(end).ok()?;
            Some(())
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: SoundCue) {
            if !self.enabled {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            for tone in recipe(cue) {
                if self.play_tone(ctx, &tone).is_none() {
                    log::debug!("Dropped {} tone", cue.as_str());
                }
            }
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn resume(&mut self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_has_audible_notes() {
        for cue in [
            SoundCue::Pop,
            SoundCue::Good,
            SoundCue::Bad,
            SoundCue::Level,
            SoundCue::Boss,
            SoundCue::Click,
        ] {
            let tones = recipe(cue);
            assert!(!tones.is_empty(), "{}", cue.as_str());
            assert!(tones.iter().all(|t| t.freq > 0.0 && t.duration > 0.0 && t.volume > 0.0));
        }
    }

    #[test]
    fn test_level_fanfare_is_staggered() {
        let delays: Vec<f32> = recipe(SoundCue::Level).iter().map(|t| t.delay).collect();
        assert_eq!(delays, [0.0, 0.15, 0.3]);
    }

    #[test]
    fn test_recording_sink_respects_enabled() {
        let mut sink = RecordingAudio::new();
        let log = sink.log();
        sink.play(SoundCue::Pop);
        sink.set_enabled(false);
        sink.play(SoundCue::Bad);
        assert_eq!(*log.borrow(), [SoundCue::Pop]);
    }
}
