//! Sample-rate validation and engine defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::envelope::AdsrParams;
use crate::dsp::oscillator::Waveform;
use crate::error::SynthError;

/// Sample rate used when a caller does not supply one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// A sample rate that has been checked to be strictly positive.
///
/// Every operation that divides by the rate goes through this type, so the
/// check lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRate(u32);

impl SampleRate {
    pub fn new(sample_rate: i32) -> Result<Self, SynthError> {
        if sample_rate <= 0 {
            log::debug!("rejecting sample rate {}", sample_rate);
            return Err(SynthError::InvalidSampleRate { sample_rate });
        }
        Ok(Self(sample_rate as u32))
    }

    /// Validate an unsigned rate. Rates beyond `i32::MAX` saturate.
    pub fn from_hz(hz: u32) -> Result<Self, SynthError> {
        Self::new(hz.min(i32::MAX as u32) as i32)
    }

    #[inline]
    pub fn hz(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Convert a duration in seconds to a whole number of samples.
    ///
    /// Rounds to nearest. Non-positive and NaN durations give zero.
    pub fn samples_for(self, seconds: f32) -> usize {
        let samples = (seconds as f64 * self.as_f64()).round();
        if samples > 0.0 {
            samples as usize
        } else {
            0
        }
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_RATE)
    }
}

/// Settings for the streaming [`Synthesizer`](crate::synth::Synthesizer).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: u32,
    pub waveform: Waveform,
    pub envelope: AdsrParams,
}

impl SynthConfig {
    pub fn with_sample_rate(sample_rate: i32) -> Result<Self, SynthError> {
        let rate = SampleRate::new(sample_rate)?;
        Ok(Self {
            sample_rate: rate.hz(),
            ..Self::default()
        })
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            waveform: Waveform::Sine,
            // quick attack, short decay, 80% sustain, medium release
            envelope: AdsrParams::new(0.01, 0.1, 0.8, 0.3),
        }
    }
}
