//! Bounce tones
//!
//! The simulation only describes a [`Tone`]; a [`ToneSink`] plays it. In the
//! browser that is the Web Audio [`AudioManager`], procedurally generated, no
//! sound files needed.

use crate::consts::*;

/// A short sine tone with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz
    pub frequency: f32,
    /// Length in seconds
    pub duration: f64,
    /// Gain at the start of the tone
    pub peak_gain: f32,
    /// Gain the envelope decays to by the end
    pub floor_gain: f32,
}

impl Tone {
    /// Bounce tone for a ball hue: 0..360 degrees maps linearly onto 200..800 Hz
    pub fn for_hue(hue: u16) -> Self {
        Self {
            frequency: TONE_BASE_HZ + (hue as f32 / 360.0) * TONE_SPAN_HZ,
            duration: TONE_DURATION,
            peak_gain: TONE_PEAK_GAIN,
            floor_gain: TONE_FLOOR_GAIN,
        }
    }
}

/// Anything that can play (or record) tones. Fire-and-forget.
pub trait ToneSink {
    fn play_tone(&mut self, tone: Tone);
}

/// Recording sink, used headless and in tests
impl ToneSink for Vec<Tone> {
    fn play_tone(&mut self, tone: Tone) {
        self.push(tone);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Tone, ToneSink};

    /// Audio manager backed by a Web Audio context
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

    impl ToneSink for AudioManager {
        fn play_tone(&mut self, tone: Tone) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, tone.frequency, OscillatorType::Sine)
            else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(tone.peak_gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(tone.floor_gain, t + tone.duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_frequency_mapping() {
        assert_eq!(Tone::for_hue(0).frequency, 200.0);
        assert_eq!(Tone::for_hue(180).frequency, 500.0);
        assert!((Tone::for_hue(330).frequency - 750.0).abs() < 1e-3);
    }

    #[test]
    fn test_tone_envelope() {
        let tone = Tone::for_hue(90);
        assert_eq!(tone.duration, 0.1);
        assert_eq!(tone.peak_gain, 0.3);
        assert_eq!(tone.floor_gain, 0.01);
    }

    #[test]
    fn test_vec_sink_records() {
        let mut sink: Vec<Tone> = Vec::new();
        sink.play_tone(Tone::for_hue(30));
        sink.play_tone(Tone::for_hue(60));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1], Tone::for_hue(60));
    }
}
