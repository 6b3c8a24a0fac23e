//! Colorations: dominant, alternate and pretty substitutions
//!
//! Each coloration is a flag. The scale of chords is always rebuilt from the
//! plain degree with the active colorations layered in a fixed order
//! (alternate, dominant, pretty), so switching one off restores exactly what
//! was there before it was switched on.

use crate::degree::{DegreeEntry, MAJOR_KEY};
use crate::family::Step;
use crate::scale::{Family, ScaleId};
use crate::state::{ChordState, OCTAVE};

/// Alternate scale of chords per degree: another root's sixth-diminished scale
pub fn alternate_entry(degree: u8) -> DegreeEntry {
    let (scale, root_offset) = match degree {
        // Cmaj6 -> Gmaj6/C (Cmaj9)
        1 => (ScaleId::MajorSixthFromFifth, MAJOR_KEY[1]),
        // Dmin7 -> Cmaj6/D (Dmin11)
        2 => (ScaleId::MajorSixthFromThird, MAJOR_KEY[2]),
        // Emin7 -> Cmaj6/E
        3 => (ScaleId::MajorSixthFromThird, MAJOR_KEY[2]),
        // Fmaj6 -> Cmaj6/F (Fmaj9)
        4 => (ScaleId::MajorSixthFromFifth, MAJOR_KEY[4]),
        // G7 -> Dmin6/G
        5 => (ScaleId::MinorSixthFromFifth, MAJOR_KEY[5]),
        // Amin7 -> Gmaj6/A (Amin11)
        6 => (ScaleId::MajorSixthFromThird, MAJOR_KEY[6]),
        // Bmin7b5 -> G7/B
        7 => (ScaleId::DominantSeventhFromThird, MAJOR_KEY[6]),
        8 => (ScaleId::MajorSixthFromFifth, MAJOR_KEY[1] + OCTAVE),
        other => panic!("degree {other} outside 1..=8 reached the alternate table"),
    };
    DegreeEntry { scale, root_offset }
}

/// Dominant seventh scale on the same root.
///
/// Always the root-position dominant: a rotated source scale (a minor
/// seventh, say) drops its rotation, so the chord sounds as a plain seventh
/// chord on the current root.
pub fn dominant_counterpart(scale: ScaleId) -> Option<ScaleId> {
    match scale.family() {
        Family::MajorSixth | Family::MinorSixth | Family::DominantSeventh => Some(ScaleId::DominantSeventh),
        Family::DominantSeventhFlatFive => Some(ScaleId::DominantSeventhFlatFive),
        Family::Diminished => None,
    }
}

/// The scale's own diminished seventh chord becomes the chord: diminished
/// scale at the same rotation, rooted on the scale's second note.
pub fn pretty_step(scale: ScaleId) -> Option<Step> {
    if !scale.in_lattice() {
        return None;
    }
    Some(Step {
        scale: ScaleId::from_parts(Family::Diminished, scale.rotation()),
        root_delta: scale.pitch_classes()[1] as i32,
    })
}

impl ChordState {
    pub fn toggle_dominant(&mut self) {
        self.dominant = !self.dominant;
        self.reselect_degree();
    }

    pub fn toggle_alternate(&mut self) {
        self.alternate = !self.alternate;
        self.reselect_degree();
    }

    pub fn toggle_pretty(&mut self) {
        self.pretty = !self.pretty;
        self.reselect_degree();
    }

    pub fn set_dominant(&mut self, on: bool) {
        if self.dominant != on {
            self.toggle_dominant();
        }
    }

    pub fn set_alternate(&mut self, on: bool) {
        if self.alternate != on {
            self.toggle_alternate();
        }
    }

    pub fn set_pretty(&mut self, on: bool) {
        if self.pretty != on {
            self.toggle_pretty();
        }
    }

    /// Only off-chord (diminished) tones lead until the next degree or "on"
    pub fn lock_off_chord(&mut self) {
        self.off_chord_lock = true;
    }

    /// Back to the plain chord of the current degree
    pub fn lock_on_chord(&mut self) {
        self.alternate = false;
        self.dominant = false;
        self.pretty = false;
        self.reselect_degree();
    }

    pub(crate) fn apply_colorations(&mut self) {
        if self.alternate {
            let entry = alternate_entry(self.chord_degree);
            self.scale = entry.scale;
            self.scale_root = self.key_root + entry.root_offset;
        }
        if self.dominant {
            let Some(scale) = dominant_counterpart(self.scale) else {
                panic!("no dominant counterpart for {:?}", self.scale);
            };
            self.scale = scale;
        }
        if self.pretty {
            let Some(step) = pretty_step(self.scale) else {
                panic!("no pretty substitution for {:?}", self.scale);
            };
            self.scale = step.scale;
            self.scale_root += step.root_delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(state: &ChordState) -> (ScaleId, i32) {
        (state.scale(), state.scale_root())
    }

    #[test]
    fn test_dominant_toggle_is_idempotent_for_every_degree() {
        for degree in 1..=8 {
            let mut state = ChordState::new();
            state.select_degree(degree);
            let before = snapshot(&state);
            state.toggle_dominant();
            assert!(state.dominant());
            state.toggle_dominant();
            assert!(!state.dominant());
            assert_eq!(snapshot(&state), before, "degree {degree}");
        }
    }

    #[test]
    fn test_alternate_toggle_is_idempotent_for_every_degree() {
        for degree in 1..=8 {
            let mut state = ChordState::new();
            state.select_degree(degree);
            let before = snapshot(&state);
            state.toggle_alternate();
            assert_ne!(snapshot(&state), before, "degree {degree}");
            state.toggle_alternate();
            assert_eq!(snapshot(&state), before, "degree {degree}");
        }
    }

    #[test]
    fn test_pretty_toggle_is_idempotent_for_every_degree() {
        for degree in 1..=8 {
            let mut state = ChordState::new();
            state.select_degree(degree);
            let before = snapshot(&state);
            state.toggle_pretty();
            assert_eq!(state.scale().family(), Family::Diminished);
            state.toggle_pretty();
            assert_eq!(snapshot(&state), before, "degree {degree}");
        }
    }

    #[test]
    fn test_dominant_drops_rotation() {
        for id in [
            ScaleId::MajorSixthFromThird,
            ScaleId::MinorSeventh,
            ScaleId::MinorSixthFromFifth,
            ScaleId::DominantSeventh,
        ] {
            assert_eq!(dominant_counterpart(id), Some(ScaleId::DominantSeventh), "{id:?}");
        }
        assert_eq!(dominant_counterpart(ScaleId::Diminished), None);
    }

    #[test]
    fn test_dominant_keeps_root() {
        let mut state = ChordState::new();
        state.select_degree(2);
        state.toggle_dominant();
        assert_eq!(snapshot(&state), (ScaleId::DominantSeventh, 62));
    }

    #[test]
    fn test_alternate_table() {
        let mut state = ChordState::new();
        state.toggle_alternate();
        assert_eq!(snapshot(&state), (ScaleId::MajorSixthFromFifth, 62));
        state.select_degree(5);
        assert!(state.alternate());
        assert_eq!(snapshot(&state), (ScaleId::MinorSixthFromFifth, 69));
        state.select_degree(8);
        assert_eq!(snapshot(&state), (ScaleId::MajorSixthFromFifth, 74));
    }

    #[test]
    fn test_colorations_survive_degree_changes() {
        let mut state = ChordState::new();
        state.toggle_dominant();
        for degree in 1..=8 {
            state.select_degree(degree);
            assert!(state.dominant());
            assert_eq!(state.scale(), ScaleId::DominantSeventh, "degree {degree}");
        }
    }

    #[test]
    fn test_alternate_then_dominant_layering() {
        let mut state = ChordState::new();
        state.toggle_alternate();
        state.toggle_dominant();
        // Alternate root (D) with the dominant scale on it
        assert_eq!(snapshot(&state), (ScaleId::DominantSeventh, 62));
        state.toggle_alternate();
        assert_eq!(snapshot(&state), (ScaleId::DominantSeventh, 60));
    }

    #[test]
    fn test_pretty_uses_scale_diminished() {
        // C6 -> diminished on D: D F Ab B become the chord tones
        let mut state = ChordState::new();
        state.toggle_pretty();
        assert_eq!(snapshot(&state), (ScaleId::Diminished, 62));
        let tones: Vec<i32> = [0, 2, 4, 6]
            .iter()
            .map(|&i| state.pitch_classes()[i] as i32 + state.scale_root())
            .collect();
        assert_eq!(tones, vec![62, 65, 68, 71]);
    }

    #[test]
    fn test_toggle_while_family_active_resets_family() {
        let mut state = ChordState::new();
        state.family_down();
        state.toggle_dominant();
        assert_eq!(state.family(), None);
        assert_eq!(snapshot(&state), (ScaleId::DominantSeventh, 60));
    }

    #[test]
    fn test_set_is_noop_when_already_in_state() {
        let mut state = ChordState::new();
        state.set_alternate(true);
        let on = snapshot(&state);
        state.set_alternate(true);
        assert_eq!(snapshot(&state), on);
        state.set_alternate(false);
        assert_eq!(snapshot(&state), (ScaleId::MajorSixth, 60));
    }

    #[test]
    fn test_on_chord_clears_everything() {
        let mut state = ChordState::new();
        state.select_degree(6);
        state.toggle_alternate();
        state.toggle_pretty();
        state.lock_off_chord();
        state.lock_on_chord();
        assert!(!state.has_coloration());
        assert!(!state.off_chord_lock());
        assert_eq!(snapshot(&state), (ScaleId::MinorSeventh, 69));
    }
}
