//! Family lattice: moving between related scales of chords
//!
//! Up and down move the scale of chords a minor third while the root (and
//! so the bass) moves by at most a semitone through the 1-3-5-6/7 cycle.
//! Across swaps major sixth with minor sixth and dominant seventh with its
//! flat-five relative at the same rotation. The diminished family has no
//! lattice entries.

use crate::scale::{Family, Rotation, ScaleId};
use crate::state::{ChordState, FamilyMove};

/// Where a scale goes under one family move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub scale: ScaleId,
    pub root_delta: i32,
}

type Entry = Option<(Family, Rotation, i32)>;

fn up_entry(family: Family, rotation: Rotation) -> Entry {
    use Family as F;
    use Rotation as R;
    let (next, delta) = match (family, rotation) {
        (F::MajorSixth, R::Root) => (R::Seventh, 0),
        (F::MajorSixth, R::Third) => (R::Root, -1),
        (F::MajorSixth, R::Fifth) => (R::Third, 0),
        (F::MajorSixth, R::Seventh) => (R::Fifth, 1),

        (F::MinorSixth, R::Root) => (R::Seventh, 0),
        (F::MinorSixth, R::Third) => (R::Root, 0),
        (F::MinorSixth, R::Fifth) => (R::Third, -1),
        (F::MinorSixth, R::Seventh) => (R::Fifth, 1),

        (F::DominantSeventh, R::Root) => (R::Seventh, 1),
        (F::DominantSeventh, R::Third) => (R::Root, -1),
        (F::DominantSeventh, R::Fifth) => (R::Third, 0),
        (F::DominantSeventh, R::Seventh) => (R::Fifth, 0),

        (F::DominantSeventhFlatFive, R::Root) => (R::Seventh, 1),
        (F::DominantSeventhFlatFive, R::Third) => (R::Root, -1),
        (F::DominantSeventhFlatFive, R::Fifth) => (R::Third, 1),
        (F::DominantSeventhFlatFive, R::Seventh) => (R::Fifth, -1),

        (F::Diminished, _) => return None,
    };
    Some((family, next, delta))
}

fn down_entry(family: Family, rotation: Rotation) -> Entry {
    use Family as F;
    use Rotation as R;
    let (next, delta) = match (family, rotation) {
        (F::MajorSixth, R::Root) => (R::Third, 1),
        (F::MajorSixth, R::Third) => (R::Fifth, 0),
        (F::MajorSixth, R::Fifth) => (R::Seventh, -1),
        (F::MajorSixth, R::Seventh) => (R::Root, 0),

        (F::MinorSixth, R::Root) => (R::Third, 0),
        (F::MinorSixth, R::Third) => (R::Fifth, 1),
        (F::MinorSixth, R::Fifth) => (R::Seventh, -1),
        (F::MinorSixth, R::Seventh) => (R::Root, 0),

        (F::DominantSeventh, R::Root) => (R::Third, 1),
        (F::DominantSeventh, R::Third) => (R::Fifth, 0),
        (F::DominantSeventh, R::Fifth) => (R::Seventh, 0),
        (F::DominantSeventh, R::Seventh) => (R::Root, -1),

        (F::DominantSeventhFlatFive, R::Root) => (R::Third, 1),
        (F::DominantSeventhFlatFive, R::Third) => (R::Fifth, -1),
        (F::DominantSeventhFlatFive, R::Fifth) => (R::Seventh, 1),
        (F::DominantSeventhFlatFive, R::Seventh) => (R::Root, -1),

        (F::Diminished, _) => return None,
    };
    Some((family, next, delta))
}

fn across_entry(family: Family, rotation: Rotation) -> Entry {
    use Family as F;
    use Rotation as R;
    let (other, delta) = match (family, rotation) {
        // C6/E <-> Cm6/Eb: only the third moves
        (F::MajorSixth, R::Third) => (F::MinorSixth, -1),
        (F::MinorSixth, R::Third) => (F::MajorSixth, 1),
        (F::MajorSixth, _) => (F::MinorSixth, 0),
        (F::MinorSixth, _) => (F::MajorSixth, 0),

        // G7/D <-> G7b5/Db: only the fifth moves
        (F::DominantSeventh, R::Fifth) => (F::DominantSeventhFlatFive, -1),
        (F::DominantSeventhFlatFive, R::Fifth) => (F::DominantSeventh, 1),
        (F::DominantSeventh, _) => (F::DominantSeventhFlatFive, 0),
        (F::DominantSeventhFlatFive, _) => (F::DominantSeventh, 0),

        (F::Diminished, _) => return None,
    };
    Some((other, rotation, delta))
}

/// Table lookup for one move, `None` outside the lattice
pub fn step_for(mv: FamilyMove, scale: ScaleId) -> Option<Step> {
    let (family, rotation) = scale.parts();
    let entry = match mv {
        FamilyMove::Up => up_entry(family, rotation),
        FamilyMove::Down => down_entry(family, rotation),
        FamilyMove::Across => across_entry(family, rotation),
    };
    entry.map(|(family, rotation, root_delta)| Step {
        scale: ScaleId::from_parts(family, rotation),
        root_delta,
    })
}

/// The move that undoes `mv`
pub fn inverse(mv: FamilyMove) -> FamilyMove {
    match mv {
        FamilyMove::Up => FamilyMove::Down,
        FamilyMove::Down => FamilyMove::Up,
        FamilyMove::Across => FamilyMove::Across,
    }
}

impl ChordState {
    /// Family a minor third up
    pub fn family_up(&mut self) {
        self.enter_family(FamilyMove::Up);
    }

    /// Family a minor third down
    pub fn family_down(&mut self) {
        self.enter_family(FamilyMove::Down);
    }

    /// Relative family at the same rotation
    pub fn family_across(&mut self) {
        self.enter_family(FamilyMove::Across);
    }

    /// Undo whichever family move is active and clear its marker
    pub fn reset_family_transformations(&mut self) {
        if let Some(mv) = self.family.take() {
            self.apply_step(inverse(mv));
        }
    }

    fn enter_family(&mut self, mv: FamilyMove) {
        if self.family != Some(mv) {
            self.reset_family_transformations();
        }
        if self.has_coloration() {
            self.alternate = false;
            self.dominant = false;
            self.pretty = false;
            self.reselect_degree();
        }
        // Pressing the same move twice holds it
        if self.family.is_none() {
            self.apply_step(mv);
            self.family = Some(mv);
        }
    }

    fn apply_step(&mut self, mv: FamilyMove) {
        let Some(step) = step_for(mv, self.scale) else {
            panic!("family lattice has no {mv:?} entry for {:?}", self.scale);
        };
        self.scale = step.scale;
        self.scale_root += step.root_delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice() -> impl Iterator<Item = ScaleId> {
        ScaleId::ALL.into_iter().filter(|id| id.in_lattice())
    }

    #[test]
    fn test_lattice_has_sixteen_entries_per_direction() {
        for mv in [FamilyMove::Up, FamilyMove::Down, FamilyMove::Across] {
            let mapped = ScaleId::ALL
                .into_iter()
                .filter(|&id| step_for(mv, id).is_some())
                .count();
            assert_eq!(mapped, 16, "{mv:?}");
        }
    }

    #[test]
    fn test_up_and_down_are_permutations_within_a_family() {
        for mv in [FamilyMove::Up, FamilyMove::Down] {
            let mut targets: Vec<ScaleId> = lattice().map(|id| step_for(mv, id).unwrap().scale).collect();
            for id in lattice() {
                assert_eq!(step_for(mv, id).unwrap().scale.family(), id.family());
                assert_ne!(step_for(mv, id).unwrap().scale, id);
            }
            targets.sort_by_key(|id| id.key());
            targets.dedup();
            assert_eq!(targets.len(), 16);
        }
    }

    #[test]
    fn test_up_then_reset_restores_every_scale() {
        for id in lattice() {
            let mut state = ChordState::with_scale(id, 60);
            state.family_up();
            assert!(state.family_up_active());
            state.reset_family_transformations();
            assert_eq!((state.scale(), state.scale_root()), (id, 60), "{id:?}");
            assert_eq!(state.family(), None);
        }
    }

    #[test]
    fn test_down_then_reset_restores_every_scale() {
        for id in lattice() {
            let mut state = ChordState::with_scale(id, 64);
            state.family_down();
            state.reset_family_transformations();
            assert_eq!((state.scale(), state.scale_root()), (id, 64), "{id:?}");
        }
    }

    #[test]
    fn test_across_is_an_involution() {
        for id in lattice() {
            let step = step_for(FamilyMove::Across, id).unwrap();
            let back = step_for(FamilyMove::Across, step.scale).unwrap();
            assert_eq!(back.scale, id);
            assert_eq!(step.root_delta + back.root_delta, 0, "{id:?}");
            assert_eq!(step.scale.rotation(), id.rotation());
        }
    }

    #[test]
    fn test_major_sixth_family_moves() {
        // C6 up -> Cm7 (Eb6 from its sixth), down -> A6 from C#
        let mut state = ChordState::new();
        state.family_up();
        assert_eq!((state.scale(), state.scale_root()), (ScaleId::MinorSeventh, 60));

        state.family_down();
        assert!(state.family_down_active());
        assert!(!state.family_up_active());
        assert_eq!((state.scale(), state.scale_root()), (ScaleId::MajorSixthFromThird, 61));

        state.family_across();
        assert!(state.family_across_active());
        assert_eq!((state.scale(), state.scale_root()), (ScaleId::MinorSixth, 60));
    }

    #[test]
    fn test_repeated_move_holds() {
        let mut state = ChordState::new();
        state.family_up();
        state.family_up();
        assert_eq!((state.scale(), state.scale_root()), (ScaleId::MinorSeventh, 60));
    }

    #[test]
    fn test_family_move_drops_colorations() {
        let mut state = ChordState::new();
        state.select_degree(2);
        state.toggle_dominant();
        state.family_up();
        assert!(!state.dominant());
        assert_eq!(state.scale(), ScaleId::MajorSixthFromFifth);
        assert_eq!(state.scale_root(), 63);
    }

    #[test]
    fn test_family_move_from_pretty_state() {
        let mut state = ChordState::new();
        state.toggle_pretty();
        assert!(!state.scale().in_lattice());
        state.family_across();
        assert!(!state.pretty());
        assert_eq!(state.scale(), ScaleId::MinorSixth);
    }

    #[test]
    fn test_select_degree_resets_family() {
        let mut state = ChordState::new();
        state.select_degree(5);
        state.family_down();
        state.select_degree(1);
        assert_eq!(state.family(), None);
        assert_eq!((state.scale(), state.scale_root()), (ScaleId::MajorSixth, 60));
    }

    #[test]
    #[should_panic(expected = "family lattice has no")]
    fn test_unmapped_scale_panics() {
        let mut state = ChordState::with_scale(ScaleId::Diminished, 60);
        state.family_up();
    }
}
