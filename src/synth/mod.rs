// Purpose: single-voice streaming engine built from the dsp primitives

pub mod voice;

pub use voice::{ModulationMode, Synthesizer};
