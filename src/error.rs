//! Error types for the synthesis core.
//!
//! The numeric operations are total over their parameters. The one
//! precondition they enforce is a usable sample rate, so that is the only
//! failure the core reports.

use std::fmt;

/// Errors returned by the synthesis operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthError {
    /// The sample rate was zero or negative and cannot index a buffer.
    InvalidSampleRate { sample_rate: i32 },
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::InvalidSampleRate { sample_rate } => {
                write!(
                    f,
                    "Invalid sample rate: expected a positive rate in Hz, got {}",
                    sample_rate
                )
            }
        }
    }
}

impl std::error::Error for SynthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_rate() {
        let err = SynthError::InvalidSampleRate { sample_rate: -48_000 };
        assert!(err.to_string().contains("-48000"));
    }
}
