//! Spectrum and pitch measurement for rendered buffers.
//!
//! These are inspection tools: they let tests and the CLI check what a
//! synthesis chain actually produced (which frequency dominates, what pitch
//! a buffer carries) without listening to it.

use std::fmt;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::config::SampleRate;
use crate::error::SynthError;

/// Shortest lag, in samples, the autocorrelation search considers.
pub const MIN_PITCH_LAG: usize = 10;

/// Reusable FFT magnitude analyzer for a fixed power-of-two length.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(len: usize) -> Result<Self, AnalysisError> {
        if !len.is_power_of_two() {
            return Err(AnalysisError::NotPowerOfTwo { len });
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(len);

        Ok(Self {
            fft,
            scratch: vec![Complex::new(0.0, 0.0); len],
            magnitudes: vec![0.0; len / 2],
        })
    }

    pub fn len(&self) -> usize {
        self.scratch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scratch.is_empty()
    }

    /// Magnitudes of bins `0..len/2` for `buffer`.
    pub fn process(&mut self, buffer: &[f32]) -> Result<&[f32], AnalysisError> {
        if buffer.len() != self.scratch.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: self.scratch.len(),
                actual: buffer.len(),
            });
        }

        for (bin, &sample) in self.scratch.iter_mut().zip(buffer) {
            *bin = Complex::new(sample, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (mag, bin) in self.magnitudes.iter_mut().zip(&self.scratch) {
            *mag = bin.norm();
        }
        Ok(&self.magnitudes)
    }
}

/// FFT magnitudes of the first `len/2` bins. `samples.len()` must be a
/// non-zero power of two.
pub fn magnitude_spectrum(samples: &[f32]) -> Result<Vec<f32>, AnalysisError> {
    let mut analyzer = SpectrumAnalyzer::new(samples.len())?;
    Ok(analyzer.process(samples)?.to_vec())
}

/// Centre frequency of the strongest non-DC bin.
///
/// Resolution is `sample_rate / samples.len()`. Returns `0.0` when every
/// non-DC bin is silent.
pub fn dominant_frequency(samples: &[f32], sample_rate: i32) -> Result<f32, AnalysisError> {
    let rate = SampleRate::new(sample_rate)?;
    let spectrum = magnitude_spectrum(samples)?;

    let peak = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, &mag)| mag > 0.0)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(bin, _)| bin);

    Ok(match peak {
        Some(bin) => bin as f32 * rate.as_f32() / samples.len() as f32,
        None => 0.0,
    })
}

/// Estimate pitch by autocorrelation.
///
/// Searches lags `MIN_PITCH_LAG..=len/2` for the strongest positive
/// correlation and reports `sample_rate / lag`. `None` when the buffer is
/// too short or nothing correlates.
pub fn autocorrelation_pitch(
    samples: &[f32],
    sample_rate: i32,
) -> Result<Option<f32>, AnalysisError> {
    let rate = SampleRate::new(sample_rate)?;
    let max_lag = samples.len() / 2;

    let mut best_lag = None;
    let mut best_correlation = 0.0_f64;

    for lag in MIN_PITCH_LAG..=max_lag {
        let correlation: f64 = samples
            .iter()
            .zip(&samples[lag..])
            .map(|(&a, &b)| a as f64 * b as f64)
            .sum();

        if correlation > best_correlation {
            best_correlation = correlation;
            best_lag = Some(lag);
        }
    }

    Ok(best_lag.map(|lag| rate.as_f32() / lag as f32))
}

/// Errors from spectrum and pitch analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// FFT input must be a non-zero power of two long.
    NotPowerOfTwo { len: usize },
    /// Buffer does not match the analyzer's planned length.
    LengthMismatch { expected: usize, actual: usize },
    Synth(SynthError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NotPowerOfTwo { len } => {
                write!(f, "FFT size must be a power of two, got {}", len)
            }
            AnalysisError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Buffer length mismatch: expected {} samples, got {}",
                    expected, actual
                )
            }
            AnalysisError::Synth(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Synth(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SynthError> for AnalysisError {
    fn from(err: SynthError) -> Self {
        AnalysisError::Synth(err)
    }
}
