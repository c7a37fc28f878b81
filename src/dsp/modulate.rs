//! Amplitude and frequency modulation over sample buffers.

/*
Amplitude and Frequency Modulation
==================================

Both techniques combine a CARRIER (the signal you hear) with a MODULATOR
(the signal doing the controlling). Here the modulator is always a buffer of
samples the caller has already rendered, typically a sine from
`generate_sine_wave`.


Amplitude Modulation (AM)
-------------------------

The modulator scales the carrier's loudness:

    out[i] = carrier[i] × (1 + depth × modulator[i])

  depth = 0     identity, the carrier passes through bit-for-bit
  depth = 0.5   a ±1 modulator swings the gain between 0.5 and 1.5
  depth = 1     gain swings 0 → 2; the carrier fully vanishes at the troughs
  depth > 1     the gain goes negative and the carrier flips polarity
  depth < 0     same as positive depth with an inverted modulator

With a slow modulator (< 20 Hz) this is tremolo. At audio rate it adds two
sidebands at carrier ± modulator frequency.

Length policy: the output has min(carrier.len(), modulator.len()) samples.
The shorter buffer decides. Samples of the longer buffer beyond that point
have no partner and are dropped rather than padded.


Frequency Modulation (FM)
-------------------------

The modulator bends the carrier's instantaneous frequency:

    f[i]     = carrier_freq + mod_index × modulator[i]
    phase[0] = 0
    phase[i] = phase[i-1] + 2π × f[i] / sample_rate     (i ≥ 1)
    out[i]   = sin(phase[i])

Note that f[0] never contributes: the first sample is sin(0) = 0 and each
later sample adds its own instantaneous frequency on top of the previous
phase.

mod_index is in Hz of deviation per unit of modulator. mod_index = 0 gives a
plain sine at carrier_freq.

Phase Accumulation
------------------

Each phase depends on the one before it, so the loop runs strictly in index
order with the accumulator carried as a local variable. It is kept in f64 and
wrapped into [0, 2π) every step; sin() is periodic, so wrapping changes
nothing audible but keeps precision flat over long buffers.

A parallel version would first compute the per-sample increments, take a
prefix sum over them, and only then evaluate sin() per sample.
*/

use std::f64::consts::TAU;

use crate::config::SampleRate;
use crate::error::SynthError;

/// Amplitude-modulate `carrier` by `modulator`.
///
/// Output length is `min(carrier.len(), modulator.len())`; the shorter
/// buffer wins. `depth == 0.0` returns the (truncated) carrier unchanged.
pub fn apply_am(carrier: &[f32], modulator: &[f32], depth: f32) -> Vec<f32> {
    carrier
        .iter()
        .zip(modulator)
        .map(|(&c, &m)| c * (1.0 + depth * m))
        .collect()
}

/// Frequency-modulate a sine carrier at `carrier_freq` with `modulator`.
///
/// Output length is `modulator.len()`. Fails only when `sample_rate` is not
/// positive.
pub fn apply_fm(
    carrier_freq: f32,
    modulator: &[f32],
    mod_index: f32,
    sample_rate: i32,
) -> Result<Vec<f32>, SynthError> {
    let rate = SampleRate::new(sample_rate)?;
    let radians_per_hz = TAU / rate.as_f64();

    let mut out = Vec::with_capacity(modulator.len());
    let mut phase = 0.0_f64;

    for (i, &m) in modulator.iter().enumerate() {
        if i > 0 {
            let instantaneous = carrier_freq as f64 + mod_index as f64 * m as f64;
            phase = (phase + radians_per_hz * instantaneous).rem_euclid(TAU);
        }
        out.push(phase.sin() as f32);
    }

    Ok(out)
}
