//! Benchmarks for individual buffer operations.

mod amplify;
mod envelope;
mod modulate;
mod oscillator;

pub use amplify::bench_amplify;
pub use envelope::bench_envelope;
pub use modulate::bench_modulate;
pub use oscillator::bench_oscillator;
