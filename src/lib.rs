//! Audio-synthesis primitives over flat `f32` sample buffers.
//!
//! The five core operations are pure functions: they borrow their inputs and
//! return a freshly allocated buffer whose length is fixed by the arguments.
//!
//! ```
//! use ozsynth::{apply_adsr, apply_am, generate_sine_wave, note_to_frequency};
//!
//! let rate = 44_100;
//! let carrier = generate_sine_wave(note_to_frequency(69), 0.5, rate)?;
//! let tremolo = generate_sine_wave(6.0, 0.5, rate)?;
//! let shaped = apply_adsr(&apply_am(&carrier, &tremolo, 0.3), rate, 0.01, 0.1, 0.7, 0.2)?;
//! assert_eq!(shaped.len(), 22_050);
//! # Ok::<(), ozsynth::SynthError>(())
//! ```

pub mod analysis; // FFT spectrum and pitch estimation
pub mod config;
pub mod dsp;
pub mod error;
pub mod pitch;
pub mod synth; // Streaming single-voice engine

pub use config::{SampleRate, SynthConfig, DEFAULT_SAMPLE_RATE};
pub use dsp::envelope::apply_adsr;
pub use dsp::modulate::{apply_am, apply_fm};
pub use dsp::oscillator::generate_sine_wave;
pub use error::SynthError;
pub use pitch::note_to_frequency;
