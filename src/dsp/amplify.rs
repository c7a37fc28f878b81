//! Gain and level helpers.

/*
Gain and Level
==============

Multiplying a buffer by another buffer (or by a constant) is how every stage
in this crate shapes amplitude: AM is a carrier times (1 + depth × modulator),
the ADSR shaper is the input times a per-sample multiplier, and the
synthesizer's voice output is an oscillator times its envelope.

Two level measurements summarise a rendered buffer:

  peak   largest absolute sample value. 1.0 is full scale; above that the
         caller has to clip or normalise before playback.

  RMS    root-mean-square, sqrt(mean(x²)). Tracks perceived loudness better
         than peak. A full-scale sine has RMS 1/√2 ≈ 0.707.

Nothing here clamps. Values outside [-1, 1] pass through untouched.
*/

/// Multiply two buffers sample-by-sample into `out`.
///
/// Writes `min(signal.len(), modulator.len(), out.len())` samples and leaves
/// the rest of `out` untouched.
#[inline]
pub fn multiply(signal: &[f32], modulator: &[f32], out: &mut [f32]) {
    for ((o, &s), &m) in out.iter_mut().zip(signal).zip(modulator) {
        *o = s * m;
    }
}

/// Multiply `signal` by `modulator` in place.
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    for (s, &m) in signal.iter_mut().zip(modulator) {
        *s *= m;
    }
}

/// Scale every sample by a constant.
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    signal.iter_mut().for_each(|s| *s *= gain);
}

/// Largest absolute sample value, `0.0` for an empty buffer.
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
}

/// Root-mean-square level, `0.0` for an empty buffer.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum: f64 = signal.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / signal.len() as f64).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::generate_sine_wave;

    #[test]
    fn multiply_stops_at_shortest() {
        let signal = [1.0, 0.5, -0.5, -1.0];
        let modulator = [1.0, 0.5];
        let mut out = [9.0; 4];

        multiply(&signal, &modulator, &mut out);

        assert_eq!(out, [1.0, 0.25, 9.0, 9.0]);
    }

    #[test]
    fn in_place_and_gain() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        multiply_in_place(&mut signal, &[0.5; 4]);
        assert_eq!(signal, [0.5, 0.25, -0.25, -0.5]);

        apply_gain(&mut signal, 2.0);
        assert_eq!(signal, [1.0, 0.5, -0.5, -1.0]);
    }

    #[test]
    fn peak_ignores_sign() {
        assert_eq!(peak(&[0.2, -0.9, 0.5]), 0.9);
        assert_eq!(peak(&[]), 0.0);
    }

    #[test]
    fn full_scale_sine_rms() {
        let sine = generate_sine_wave(100.0, 1.0, 8_000).unwrap();
        assert!((rms(&sine) - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
        assert_eq!(rms(&[]), 0.0);
    }
}
