/*
Pitch Conversion
================

MIDI numbers every semitone from 0 (C-1) to 127 (G9). The tuning reference is
A4 = note 69 = 440 Hz, and equal temperament spaces each semitone by the same
ratio, the twelfth root of two:

    f = 440 × 2^((note - 69) / 12)

    note   name   Hz
    57     A3     220.0
    60     C4     261.63   (middle C)
    69     A4     440.0
    81     A5     880.0

Whole octaves are split off and applied as an exact power of two, so every
A (and any note a whole number of octaves from another) lands on the bit-exact
doubling or halving of its neighbour. Only the semitone remainder goes
through `powf`.

Note names use sharps when printed ("C#4") and accept either accidental when
parsed ("Db4" == "C#4" == 61). The octave number follows scientific pitch
notation: note = 12 × (octave + 1) + semitone.
*/

use std::fmt;

/// Tuning reference note (A4).
pub const A4_NOTE: i32 = 69;
/// Tuning reference frequency in Hz.
pub const A4_FREQ: f32 = 440.0;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert a MIDI note number to frequency in Hz.
///
/// Total over `i32`; extreme notes saturate to `0.0` or `inf` the way the
/// formula naturally does.
///
/// ```
/// use ozsynth::note_to_frequency;
/// assert_eq!(note_to_frequency(69), 440.0);
/// assert_eq!(note_to_frequency(81), 880.0);
/// assert_eq!(note_to_frequency(57), 220.0);
/// ```
pub fn note_to_frequency(note: i32) -> f32 {
    let offset = note as i64 - A4_NOTE as i64;
    let octaves = offset.div_euclid(12);
    let semitones = offset.rem_euclid(12);

    let octave_ratio = 2.0_f32.powi(octaves.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    let semitone_ratio = 2.0_f32.powf(semitones as f32 / 12.0);
    A4_FREQ * octave_ratio * semitone_ratio
}

/// Nearest MIDI note to a frequency, or `None` for non-positive input.
pub fn frequency_to_note(frequency: f32) -> Option<i32> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }
    let note = 12.0 * (frequency / A4_FREQ).log2() + A4_NOTE as f32;
    Some(note.round() as i32)
}

/// Name of a note using sharps, e.g. `61` → `"C#4"`.
pub fn note_name(note: i32) -> String {
    let index = note.rem_euclid(12) as usize;
    let octave = note.div_euclid(12) - 1;
    format!("{}{}", NOTE_NAMES[index], octave)
}

/// Parse a note name such as `"A4"`, `"c#3"`, `"Bb2"` or `"C-1"`.
pub fn parse_note_name(name: &str) -> Result<i32, PitchError> {
    let name = name.trim();
    let mut chars = name.chars();

    let letter = chars.next().ok_or(PitchError::Empty)?;
    let semitone: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(PitchError::UnknownLetter(letter)),
    };

    let rest = chars.as_str();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };

    let bad_octave = || PitchError::BadOctave(octave_str.to_string());
    let octave: i32 = octave_str.parse().map_err(|_| bad_octave())?;

    octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|n| n.checked_add(semitone + accidental))
        .ok_or_else(bad_octave)
}

/// Frequency of a named note.
pub fn name_to_frequency(name: &str) -> Result<f32, PitchError> {
    parse_note_name(name).map(note_to_frequency)
}

/// Errors from parsing a note name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PitchError {
    Empty,
    UnknownLetter(char),
    BadOctave(String),
}

impl fmt::Display for PitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchError::Empty => write!(f, "Empty note name"),
            PitchError::UnknownLetter(c) => {
                write!(f, "Unknown note letter '{}': expected A-G", c)
            }
            PitchError::BadOctave(s) => write!(f, "Invalid octave '{}'", s),
        }
    }
}

impl std::error::Error for PitchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a440_reference() {
        assert_eq!(note_to_frequency(69), 440.0);
    }

    #[test]
    fn octaves_are_exact() {
        assert_eq!(note_to_frequency(81), 880.0);
        assert_eq!(note_to_frequency(57), 220.0);
        assert_eq!(note_to_frequency(45), 110.0);
        assert_eq!(note_to_frequency(93), 1760.0);
    }

    #[test]
    fn middle_c() {
        assert!((note_to_frequency(60) - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn semitones_are_monotonic() {
        for note in 0..127 {
            assert!(note_to_frequency(note + 1) > note_to_frequency(note));
        }
    }

    #[test]
    fn extreme_notes_do_not_panic() {
        assert_eq!(note_to_frequency(i32::MIN), 0.0);
        assert!(note_to_frequency(i32::MAX).is_infinite());
    }

    #[test]
    fn frequency_to_note_rounds_to_nearest() {
        assert_eq!(frequency_to_note(440.0), Some(69));
        assert_eq!(frequency_to_note(435.0), Some(69));
        assert_eq!(frequency_to_note(261.63), Some(60));
        assert_eq!(frequency_to_note(0.0), None);
        assert_eq!(frequency_to_note(-10.0), None);
    }

    #[test]
    fn note_to_frequency_roundtrips_through_nearest_note() {
        for note in 0..=127 {
            assert_eq!(frequency_to_note(note_to_frequency(note)), Some(note));
        }
    }

    #[test]
    fn names() {
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(-1), "B-2");
    }

    #[test]
    fn parses_names() {
        assert_eq!(parse_note_name("A4"), Ok(69));
        assert_eq!(parse_note_name("c#4"), Ok(61));
        assert_eq!(parse_note_name("Db4"), Ok(61));
        assert_eq!(parse_note_name("C-1"), Ok(0));
        assert_eq!(parse_note_name("B3"), Ok(59));
    }

    #[test]
    fn rejects_bad_names() {
        assert_eq!(parse_note_name(""), Err(PitchError::Empty));
        assert_eq!(parse_note_name("H4"), Err(PitchError::UnknownLetter('H')));
        assert_eq!(
            parse_note_name("A"),
            Err(PitchError::BadOctave(String::new()))
        );
    }

    #[test]
    fn octave_overflow_is_rejected() {
        assert_eq!(
            parse_note_name("C2147483647"),
            Err(PitchError::BadOctave("2147483647".to_string()))
        );
        assert_eq!(
            parse_note_name("B-178956971"),
            Err(PitchError::BadOctave("-178956971".to_string()))
        );
        assert_eq!(parse_note_name("Cb-1"), Ok(-1));
    }

    #[test]
    fn name_to_frequency_matches_note_number() {
        assert_eq!(name_to_frequency("A5"), Ok(880.0));
    }
}
