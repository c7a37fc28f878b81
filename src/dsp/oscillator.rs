/*
Oscillators
===========

An oscillator turns a frequency into a repeating waveform. Everything here is
driven by a phase angle that sweeps 0 → 2π once per cycle.

Vocabulary
----------

  phase        Position within one cycle, in radians [0, 2π).

  increment    How far the phase moves per sample:
                   increment = 2π × frequency / sample_rate

  sample rate  Samples per second. At 44.1 kHz a 441 Hz sine takes exactly
               100 samples per cycle.


Buffer Generation vs Streaming
------------------------------

`generate_sine_wave` / `generate_wave` compute sample i directly from its
index:

    sample[i] = shape(2π × frequency × i / sample_rate)

so there is no accumulated rounding and any sample can be computed without
the ones before it. The output length is fixed before the loop starts:

    len = round(duration_seconds × sample_rate)

`Oscillator` is the streaming form used by the synthesizer. It keeps a phase
accumulator and wraps it back into [0, 2π) every sample so the value never
grows large enough to lose precision.


Shapes
------

    SINE       sin(phase)
    SQUARE     +1 while sin(phase) ≥ 0, otherwise -1
    SAW        rises linearly -1 → +1 over the cycle, then snaps back
    TRIANGLE   -1 → +1 over the first half, +1 → -1 over the second

Negative frequencies run the phase backwards. For the direct generators that
mirrors the waveform (sin(-x) = -sin(x)); zero frequency holds the phase at 0.
No amplitude scaling is applied.
*/

use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SampleRate;
use crate::error::SynthError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Saw,
    Triangle,
}

impl Waveform {
    /// Map a numeric waveform id: 1 = square, 2 = saw, 3 = triangle,
    /// anything else = sine.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Waveform::Square,
            2 => Waveform::Saw,
            3 => Waveform::Triangle,
            _ => Waveform::Sine,
        }
    }

    /// Evaluate the waveform at a phase in radians.
    ///
    /// Phases outside [0, 2π) are wrapped first.
    #[inline]
    pub fn sample_at(self, phase: f64) -> f32 {
        let phase = phase.rem_euclid(TAU);
        let value = match self {
            Waveform::Sine => phase.sin(),
            Waveform::Square => {
                if phase.sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * (phase / TAU) - 1.0,
            Waveform::Triangle => {
                let half = TAU / 2.0;
                if phase < half {
                    -1.0 + 2.0 * (phase / half)
                } else {
                    1.0 - 2.0 * ((phase - half) / half)
                }
            }
        };
        value as f32
    }
}

/// Generate `round(duration_seconds × sample_rate)` samples of a sine wave.
///
/// A non-positive duration gives an empty buffer. Fails only when
/// `sample_rate` is not positive.
pub fn generate_sine_wave(
    frequency: f32,
    duration_seconds: f32,
    sample_rate: i32,
) -> Result<Vec<f32>, SynthError> {
    generate_wave(Waveform::Sine, frequency, duration_seconds, sample_rate)
}

/// Generate a buffer of any [`Waveform`]; see [`generate_sine_wave`].
pub fn generate_wave(
    waveform: Waveform,
    frequency: f32,
    duration_seconds: f32,
    sample_rate: i32,
) -> Result<Vec<f32>, SynthError> {
    generate_wave_with_phase(waveform, frequency, duration_seconds, sample_rate, 0.0)
}

/// [`generate_wave`] starting at `phase` radians instead of zero.
pub fn generate_wave_with_phase(
    waveform: Waveform,
    frequency: f32,
    duration_seconds: f32,
    sample_rate: i32,
    phase: f32,
) -> Result<Vec<f32>, SynthError> {
    let rate = SampleRate::new(sample_rate)?;
    let len = rate.samples_for(duration_seconds);
    let radians_per_sample = TAU * frequency as f64 / rate.as_f64();
    let start = phase as f64;

    let samples = (0..len)
        .map(|i| {
            let phase = start + radians_per_sample * i as f64;
            match waveform {
                // direct sin keeps negative frequencies phase-reversed
                Waveform::Sine => phase.sin() as f32,
                _ => waveform.sample_at(phase),
            }
        })
        .collect();
    Ok(samples)
}

/// Phase-accumulating oscillator for streaming synthesis.
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    frequency: f32,
    phase: f64,
    increment: f64,
    sample_rate: SampleRate,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32, sample_rate: SampleRate) -> Self {
        Self {
            waveform,
            frequency,
            phase: 0.0,
            increment: TAU * frequency as f64 / sample_rate.as_f64(),
            sample_rate,
        }
    }

    #[inline]
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.increment = TAU * frequency as f64 / self.sample_rate.as_f64();
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current phase in radians, always within [0, 2π).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Restart the cycle at phase 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Advance the phase by an arbitrary angle, keeping it wrapped.
    ///
    /// The synthesizer uses this for FM, where the per-sample step changes
    /// every sample.
    #[inline]
    pub fn advance(&mut self, radians: f64) {
        self.phase = (self.phase + radians).rem_euclid(TAU);
    }

    /// Output at the current phase without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.waveform.sample_at(self.phase)
    }

    /// Output the current sample, then advance by one sample period.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let out = self.current();
        self.advance(self.increment);
        out
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
