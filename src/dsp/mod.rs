//! Signal-processing primitives over flat sample buffers.
//!
//! Every buffer function here borrows its inputs, allocates its output once
//! at the final length, and keeps no state between calls. The streaming
//! types (`Oscillator`, `Envelope`) are the per-sample building blocks the
//! synthesizer voice is made of.

/// Gain multiplication and level measurement.
pub mod amplify;
/// ADSR envelopes, both buffer-shaping and gate-driven.
pub mod envelope;
/// Amplitude and frequency modulation.
pub mod modulate;
/// Waveform generation.
pub mod oscillator;

pub use envelope::{AdsrParams, EnvelopeStage};
pub use oscillator::Waveform;
