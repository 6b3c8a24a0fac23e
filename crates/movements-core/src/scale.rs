//! Scale table: the named sixth/seventh-diminished scales

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MovementsError;

/// Eight pitch classes relative to the scale's own root, ascending.
pub type PitchClassScale = [u8; 8];

/// Number of notes in every scale of chords
pub const SCALE_LEN: usize = 8;

// ============================================================================
// Families and rotations
// ============================================================================

/// A collection of four chord tones plus a diminished seventh chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    MajorSixth,
    MinorSixth,
    DominantSeventh,
    DominantSeventhFlatFive,
    Diminished,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::MajorSixth,
        Family::MinorSixth,
        Family::DominantSeventh,
        Family::DominantSeventhFlatFive,
        Family::Diminished,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MajorSixth => "Major 6th",
            Self::MinorSixth => "Minor 6th",
            Self::DominantSeventh => "Dominant 7th",
            Self::DominantSeventhFlatFive => "Dominant 7th b5",
            Self::Diminished => "Diminished",
        }
    }
}

/// Which chord tone of the family the scale starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Root,
    Third,
    Fifth,
    /// The sixth for the sixth families, the seventh for the others
    Seventh,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::Root, Rotation::Third, Rotation::Fifth, Rotation::Seventh];

    /// Index into the family's base scale where this rotation starts
    pub fn base_index(&self) -> usize {
        match self {
            Self::Root => 0,
            Self::Third => 2,
            Self::Fifth => 4,
            Self::Seventh => 6,
        }
    }
}

// ============================================================================
// Scale ids
// ============================================================================

/// One of the twenty named scales of chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleId {
    MajorSixth,
    MajorSixthFromThird,
    MajorSixthFromFifth,
    /// Major sixth diminished from the sixth
    MinorSeventh,

    MinorSixth,
    MinorSixthFromThird,
    MinorSixthFromFifth,
    /// Minor sixth diminished from the sixth
    MinorSeventhFlatFive,

    DominantSeventh,
    DominantSeventhFromThird,
    DominantSeventhFromFifth,
    DominantSeventhFromSeventh,

    DominantSeventhFlatFive,
    DominantSeventhFlatFiveFromThird,
    DominantSeventhFlatFiveFromFifth,
    DominantSeventhFlatFiveFromSeventh,

    /// Whole-half diminished, aka dominant roots and their diminished
    Diminished,
    DiminishedFromThird,
    DiminishedFromFifth,
    DiminishedFromSeventh,
}

impl ScaleId {
    pub const ALL: [ScaleId; 20] = [
        ScaleId::MajorSixth,
        ScaleId::MajorSixthFromThird,
        ScaleId::MajorSixthFromFifth,
        ScaleId::MinorSeventh,
        ScaleId::MinorSixth,
        ScaleId::MinorSixthFromThird,
        ScaleId::MinorSixthFromFifth,
        ScaleId::MinorSeventhFlatFive,
        ScaleId::DominantSeventh,
        ScaleId::DominantSeventhFromThird,
        ScaleId::DominantSeventhFromFifth,
        ScaleId::DominantSeventhFromSeventh,
        ScaleId::DominantSeventhFlatFive,
        ScaleId::DominantSeventhFlatFiveFromThird,
        ScaleId::DominantSeventhFlatFiveFromFifth,
        ScaleId::DominantSeventhFlatFiveFromSeventh,
        ScaleId::Diminished,
        ScaleId::DiminishedFromThird,
        ScaleId::DiminishedFromFifth,
        ScaleId::DiminishedFromSeventh,
    ];

    /// Pitch classes of this scale relative to its root
    pub fn pitch_classes(&self) -> &'static PitchClassScale {
        match self {
            Self::MajorSixth => &[0, 2, 4, 5, 7, 8, 9, 11],
            Self::MajorSixthFromThird => &[0, 1, 3, 4, 5, 7, 8, 10],
            Self::MajorSixthFromFifth => &[0, 1, 2, 4, 5, 7, 9, 10],
            Self::MinorSeventh => &[0, 2, 3, 5, 7, 8, 10, 11],

            Self::MinorSixth => &[0, 2, 3, 5, 7, 8, 9, 11],
            Self::MinorSixthFromThird => &[0, 2, 4, 5, 6, 8, 9, 11],
            Self::MinorSixthFromFifth => &[0, 1, 2, 4, 5, 7, 8, 10],
            Self::MinorSeventhFlatFive => &[0, 2, 3, 5, 6, 8, 10, 11],

            Self::DominantSeventh => &[0, 2, 4, 5, 7, 8, 10, 11],
            Self::DominantSeventhFromThird => &[0, 1, 3, 4, 6, 7, 8, 10],
            Self::DominantSeventhFromFifth => &[0, 1, 3, 4, 5, 7, 9, 10],
            Self::DominantSeventhFromSeventh => &[0, 1, 2, 4, 6, 7, 9, 10],

            // Tritone-symmetric: the fifth rotation repeats the root, the seventh the third
            Self::DominantSeventhFlatFive => &[0, 2, 4, 5, 6, 8, 10, 11],
            Self::DominantSeventhFlatFiveFromThird => &[0, 1, 2, 4, 6, 7, 8, 10],
            Self::DominantSeventhFlatFiveFromFifth => &[0, 2, 4, 5, 6, 8, 10, 11],
            Self::DominantSeventhFlatFiveFromSeventh => &[0, 1, 2, 4, 6, 7, 8, 10],

            // Minor-third symmetric: every rotation is the same collection
            Self::Diminished
            | Self::DiminishedFromThird
            | Self::DiminishedFromFifth
            | Self::DiminishedFromSeventh => &[0, 2, 3, 5, 6, 8, 9, 11],
        }
    }

    pub fn family(&self) -> Family {
        self.parts().0
    }

    pub fn rotation(&self) -> Rotation {
        self.parts().1
    }

    /// Split into (family, rotation)
    pub fn parts(&self) -> (Family, Rotation) {
        use Family as F;
        use Rotation as R;
        match self {
            Self::MajorSixth => (F::MajorSixth, R::Root),
            Self::MajorSixthFromThird => (F::MajorSixth, R::Third),
            Self::MajorSixthFromFifth => (F::MajorSixth, R::Fifth),
            Self::MinorSeventh => (F::MajorSixth, R::Seventh),
            Self::MinorSixth => (F::MinorSixth, R::Root),
            Self::MinorSixthFromThird => (F::MinorSixth, R::Third),
            Self::MinorSixthFromFifth => (F::MinorSixth, R::Fifth),
            Self::MinorSeventhFlatFive => (F::MinorSixth, R::Seventh),
            Self::DominantSeventh => (F::DominantSeventh, R::Root),
            Self::DominantSeventhFromThird => (F::DominantSeventh, R::Third),
            Self::DominantSeventhFromFifth => (F::DominantSeventh, R::Fifth),
            Self::DominantSeventhFromSeventh => (F::DominantSeventh, R::Seventh),
            Self::DominantSeventhFlatFive => (F::DominantSeventhFlatFive, R::Root),
            Self::DominantSeventhFlatFiveFromThird => (F::DominantSeventhFlatFive, R::Third),
            Self::DominantSeventhFlatFiveFromFifth => (F::DominantSeventhFlatFive, R::Fifth),
            Self::DominantSeventhFlatFiveFromSeventh => (F::DominantSeventhFlatFive, R::Seventh),
            Self::Diminished => (F::Diminished, R::Root),
            Self::DiminishedFromThird => (F::Diminished, R::Third),
            Self::DiminishedFromFifth => (F::Diminished, R::Fifth),
            Self::DiminishedFromSeventh => (F::Diminished, R::Seventh),
        }
    }

    /// Inverse of [`ScaleId::parts`]
    pub fn from_parts(family: Family, rotation: Rotation) -> Self {
        use Family as F;
        use Rotation as R;
        match (family, rotation) {
            (F::MajorSixth, R::Root) => Self::MajorSixth,
            (F::MajorSixth, R::Third) => Self::MajorSixthFromThird,
            (F::MajorSixth, R::Fifth) => Self::MajorSixthFromFifth,
            (F::MajorSixth, R::Seventh) => Self::MinorSeventh,
            (F::MinorSixth, R::Root) => Self::MinorSixth,
            (F::MinorSixth, R::Third) => Self::MinorSixthFromThird,
            (F::MinorSixth, R::Fifth) => Self::MinorSixthFromFifth,
            (F::MinorSixth, R::Seventh) => Self::MinorSeventhFlatFive,
            (F::DominantSeventh, R::Root) => Self::DominantSeventh,
            (F::DominantSeventh, R::Third) => Self::DominantSeventhFromThird,
            (F::DominantSeventh, R::Fifth) => Self::DominantSeventhFromFifth,
            (F::DominantSeventh, R::Seventh) => Self::DominantSeventhFromSeventh,
            (F::DominantSeventhFlatFive, R::Root) => Self::DominantSeventhFlatFive,
            (F::DominantSeventhFlatFive, R::Third) => Self::DominantSeventhFlatFiveFromThird,
            (F::DominantSeventhFlatFive, R::Fifth) => Self::DominantSeventhFlatFiveFromFifth,
            (F::DominantSeventhFlatFive, R::Seventh) => Self::DominantSeventhFlatFiveFromSeventh,
            (F::Diminished, R::Root) => Self::Diminished,
            (F::Diminished, R::Third) => Self::DiminishedFromThird,
            (F::Diminished, R::Fifth) => Self::DiminishedFromFifth,
            (F::Diminished, R::Seventh) => Self::DiminishedFromSeventh,
        }
    }

    /// Position of a pitch class in this scale, if present
    pub fn index_of(&self, pitch_class: i32) -> Option<usize> {
        self.pitch_classes()
            .iter()
            .position(|&pc| pc as i32 == pitch_class)
    }

    /// Whether family up/down/across are defined for this scale
    pub fn in_lattice(&self) -> bool {
        self.family() != Family::Diminished
    }

    /// Quality word used in chord labels
    pub fn quality(&self) -> &'static str {
        match self {
            Self::MajorSixth | Self::MajorSixthFromThird | Self::MajorSixthFromFifth => "major",
            Self::MinorSeventh
            | Self::MinorSixth
            | Self::MinorSixthFromThird
            | Self::MinorSixthFromFifth
            | Self::MinorSeventhFlatFive => "minor",
            Self::DominantSeventh
            | Self::DominantSeventhFromThird
            | Self::DominantSeventhFromFifth
            | Self::DominantSeventhFromSeventh
            | Self::DominantSeventhFlatFive
            | Self::DominantSeventhFlatFiveFromThird
            | Self::DominantSeventhFlatFiveFromFifth
            | Self::DominantSeventhFlatFiveFromSeventh => "dominant",
            Self::Diminished
            | Self::DiminishedFromThird
            | Self::DiminishedFromFifth
            | Self::DiminishedFromSeventh => "diminished",
        }
    }

    /// Stable snake_case identifier, same as the serde name
    pub fn key(&self) -> &'static str {
        match self {
            Self::MajorSixth => "major_sixth",
            Self::MajorSixthFromThird => "major_sixth_from_third",
            Self::MajorSixthFromFifth => "major_sixth_from_fifth",
            Self::MinorSeventh => "minor_seventh",
            Self::MinorSixth => "minor_sixth",
            Self::MinorSixthFromThird => "minor_sixth_from_third",
            Self::MinorSixthFromFifth => "minor_sixth_from_fifth",
            Self::MinorSeventhFlatFive => "minor_seventh_flat_five",
            Self::DominantSeventh => "dominant_seventh",
            Self::DominantSeventhFromThird => "dominant_seventh_from_third",
            Self::DominantSeventhFromFifth => "dominant_seventh_from_fifth",
            Self::DominantSeventhFromSeventh => "dominant_seventh_from_seventh",
            Self::DominantSeventhFlatFive => "dominant_seventh_flat_five",
            Self::DominantSeventhFlatFiveFromThird => "dominant_seventh_flat_five_from_third",
            Self::DominantSeventhFlatFiveFromFifth => "dominant_seventh_flat_five_from_fifth",
            Self::DominantSeventhFlatFiveFromSeventh => "dominant_seventh_flat_five_from_seventh",
            Self::Diminished => "diminished",
            Self::DiminishedFromThird => "diminished_from_third",
            Self::DiminishedFromFifth => "diminished_from_fifth",
            Self::DiminishedFromSeventh => "diminished_from_seventh",
        }
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (family, rotation) = self.parts();
        match family {
            Family::Diminished => f.write_str(family.name())?,
            _ => write!(f, "{} diminished", family.name())?,
        }
        match rotation {
            Rotation::Root => Ok(()),
            Rotation::Third => f.write_str(" from 3rd"),
            Rotation::Fifth => f.write_str(" from 5th"),
            Rotation::Seventh => match family {
                Family::MajorSixth | Family::MinorSixth => f.write_str(" from 6th"),
                _ => f.write_str(" from 7th"),
            },
        }
    }
}

impl FromStr for ScaleId {
    type Err = MovementsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ScaleId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| MovementsError::UnknownScale(s.to_string()))
    }
}

/// Look up a scale's pitch classes
pub fn lookup(id: ScaleId) -> &'static PitchClassScale {
    id.pitch_classes()
}

/// Rotate a scale so it starts at `index`, re-rooted to 0. Checks the
/// rotation literals against their family base.
#[cfg(test)]
fn rotate(scale: &PitchClassScale, index: usize) -> PitchClassScale {
    let start = scale[index % SCALE_LEN];
    let mut out = [0u8; SCALE_LEN];
    for (k, slot) in out.iter_mut().enumerate() {
        let pc = scale[(index + k) % SCALE_LEN];
        *slot = (pc + 12 - start) % 12;
    }
    out
}
