// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Equal-tempered pitch naming used by the frequency report

use std::fmt;

/// Concert pitch A4 in Hz
pub const CONCERT_A4_HZ: f64 = 440.0;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Closest twelve-tone equal temperament note to a frequency
#[derive(Debug, Clone, PartialEq)]
pub struct NoteMatch {
    /// Note name with octave, e.g. `G3`
    pub name: String,
    /// Exact frequency of the matched note
    pub note_hz: f64,
    /// Signed distance from the matched note in cents
    pub cents: f64,
}

impl fmt::Display for NoteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2} Hz, {:+.1} cents)",
            self.name, self.note_hz, self.cents
        )
    }
}

/// Find the nearest note to `frequency_hz` relative to A4 = 440 Hz.
///
/// Returns `None` for non-positive or non-finite frequencies.
pub fn nearest_note(frequency_hz: f64) -> Option<NoteMatch> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return None;
    }

    let semitones = 12.0 * (frequency_hz / CONCERT_A4_HZ).log2();
    let nearest = semitones.round() as i64;
    // A is the 9th semitone above C
    let from_c = nearest + 9;
    let name = NOTE_NAMES[from_c.rem_euclid(12) as usize];
    let octave = 4 + from_c.div_euclid(12);

    Some(NoteMatch {
        name: format!("{}{}", name, octave),
        note_hz: CONCERT_A4_HZ * 2f64.powf(nearest as f64 / 12.0),
        cents: (semitones - nearest as f64) * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_notes() {
        assert_eq!(nearest_note(440.0).unwrap().name, "A4");
        assert_eq!(nearest_note(261.63).unwrap().name, "C4");
        assert_eq!(nearest_note(196.0).unwrap().name, "G3");
        assert_eq!(nearest_note(27.5).unwrap().name, "A0");
    }

    #[test]
    fn test_polaris_is_slightly_flat_g3() {
        let note = nearest_note(195.648).unwrap();
        assert_eq!(note.name, "G3");
        assert!(note.cents < 0.0 && note.cents > -5.0);
        assert!((note.note_hz - 196.0).abs() < 0.01);
    }

    #[test]
    fn test_rejects_non_physical_frequency() {
        assert!(nearest_note(0.0).is_none());
        assert!(nearest_note(-10.0).is_none());
        assert!(nearest_note(f64::NAN).is_none());
    }
}
