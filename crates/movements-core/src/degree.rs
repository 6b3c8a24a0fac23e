//! Degree selection: chord numerals 1-8 to a scale of chords

use crate::scale::ScaleId;
use crate::state::{BASS_OCTAVE_OFFSET, ChordState, OCTAVE, REFERENCE_PITCH};

/// Major scale offsets from the key root, used for chord numerals
pub const MAJOR_KEY: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Roman numerals for degrees 1-8
pub const NUMERALS: [&str; 8] = ["I", "ii", "iii", "IV", "V", "vi", "vii°", "I"];

/// Scale of chords and root offset for a chord numeral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeEntry {
    pub scale: ScaleId,
    /// Semitones above the key root
    pub root_offset: i32,
}

/// Fixed degree table. Degree 8 is degree 1 an octave up.
///
/// # Panics
/// On a degree outside 1..=8; run requests through [`clamp_degree`] first.
pub fn degree_entry(degree: u8) -> DegreeEntry {
    let (scale, root_offset) = match degree {
        1 => (ScaleId::MajorSixth, MAJOR_KEY[0]),
        2 => (ScaleId::MinorSeventh, MAJOR_KEY[1]),
        3 => (ScaleId::MinorSeventh, MAJOR_KEY[2]),
        4 => (ScaleId::MajorSixth, MAJOR_KEY[3]),
        5 => (ScaleId::DominantSeventh, MAJOR_KEY[4]),
        6 => (ScaleId::MinorSeventh, MAJOR_KEY[5]),
        7 => (ScaleId::MinorSeventhFlatFive, MAJOR_KEY[6]),
        8 => (ScaleId::MajorSixth, MAJOR_KEY[0] + OCTAVE),
        other => panic!("degree {other} outside 1..=8 reached the degree table"),
    };
    DegreeEntry { scale, root_offset }
}

/// Out-of-range requests fall back to degree 1
pub fn clamp_degree(requested: i32) -> u8 {
    if (1..=8).contains(&requested) {
        requested as u8
    } else {
        1
    }
}

impl ChordState {
    /// Select a chord numeral.
    ///
    /// Undoes any family transformation, clears the off-chord lock, then
    /// reapplies whichever colorations are switched on.
    pub fn select_degree(&mut self, requested: i32) {
        self.reset_family_transformations();

        let degree = clamp_degree(requested);
        let entry = degree_entry(degree);
        let diatonic_root = self.key_root + entry.root_offset;

        self.chord_degree = degree;
        self.scale = entry.scale;
        self.scale_root = diatonic_root;
        self.bass_pitch = diatonic_root - REFERENCE_PITCH + BASS_OCTAVE_OFFSET;
        self.off_chord_lock = false;

        self.apply_colorations();
    }

    /// Reselect the current degree, which restores its plain scale
    pub(crate) fn reselect_degree(&mut self) {
        self.select_degree(self.chord_degree as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_table() {
        let expected = [
            (1, ScaleId::MajorSixth, 60),
            (2, ScaleId::MinorSeventh, 62),
            (3, ScaleId::MinorSeventh, 64),
            (4, ScaleId::MajorSixth, 65),
            (5, ScaleId::DominantSeventh, 67),
            (6, ScaleId::MinorSeventh, 69),
            (7, ScaleId::MinorSeventhFlatFive, 71),
            (8, ScaleId::MajorSixth, 72),
        ];
        let mut state = ChordState::new();
        for (degree, scale, root) in expected {
            state.select_degree(degree);
            assert_eq!(state.chord_degree(), degree as u8);
            assert_eq!(state.scale(), scale, "degree {degree}");
            assert_eq!(state.scale_root(), root, "degree {degree}");
            assert_eq!(state.bass_pitch(), root - 24, "degree {degree}");
        }
    }

    #[test]
    fn test_out_of_range_degrees_fall_back_to_one() {
        let mut state = ChordState::new();
        for requested in [0, 9, -3, 100, i32::MIN, i32::MAX] {
            state.select_degree(5);
            state.select_degree(requested);
            assert_eq!(state.chord_degree(), 1, "requested {requested}");
            assert_eq!(state.scale(), ScaleId::MajorSixth);
            assert!((1..=8).contains(&state.chord_degree()));
        }
    }

    #[test]
    fn test_select_clears_off_chord_lock() {
        let mut state = ChordState::new();
        state.lock_off_chord();
        state.select_degree(3);
        assert!(!state.off_chord_lock());
    }

    #[test]
    fn test_select_respects_key_root() {
        let mut state = ChordState::with_key_root(57);
        state.select_degree(5);
        assert_eq!(state.scale_root(), 64);
        assert_eq!(state.bass_pitch(), 40);
    }
}
