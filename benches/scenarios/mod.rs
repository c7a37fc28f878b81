//! Full note renders.
//!
//! These chain the buffer operations the way a caller builds a sound, and
//! compare that against the streaming voice producing the same length.

mod voices;

pub use voices::bench_voices;
