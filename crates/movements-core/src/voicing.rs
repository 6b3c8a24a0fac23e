//! Voicing engine: contrary and oblique motion
//!
//! Contrary motion harmonizes a lower voice moving away from a static pivot.
//! The distance between the two (in scale steps, plus whole octaves) picks a
//! chord width, and the width picks which stacked thirds survive so the
//! result climbs the ladder Unison, Third, Triad, Shell, Octave, Drop 2,
//! Drop 3, Drop 2&4, Double Octave.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scale::{PitchClassScale, SCALE_LEN};
use crate::state::{clamp_pitch, ChordState, OCTAVE};

/// Two octaves of stacked thirds
pub const MAX_CHORD_WIDTH: u32 = 9;

// ============================================================================
// Voicing stages
// ============================================================================

/// Named chord density, keyed by chord width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoicingStage {
    Unison,
    Third,
    Triad,
    Shell,
    Octave,
    Drop2,
    Drop3,
    Drop2And4,
    DoubleOctave,
}

impl VoicingStage {
    pub const ALL: [VoicingStage; 9] = [
        VoicingStage::Unison,
        VoicingStage::Third,
        VoicingStage::Triad,
        VoicingStage::Shell,
        VoicingStage::Octave,
        VoicingStage::Drop2,
        VoicingStage::Drop3,
        VoicingStage::Drop2And4,
        VoicingStage::DoubleOctave,
    ];

    pub fn from_width(width: u32) -> Option<Self> {
        match width {
            1 => Some(Self::Unison),
            2 => Some(Self::Third),
            3 => Some(Self::Triad),
            4 => Some(Self::Shell),
            5 => Some(Self::Octave),
            6 => Some(Self::Drop2),
            7 => Some(Self::Drop3),
            8 => Some(Self::Drop2And4),
            9 => Some(Self::DoubleOctave),
            _ => None,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Unison => 1,
            Self::Third => 2,
            Self::Triad => 3,
            Self::Shell => 4,
            Self::Octave => 5,
            Self::Drop2 => 6,
            Self::Drop3 => 7,
            Self::Drop2And4 => 8,
            Self::DoubleOctave => 9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unison => "Unison",
            Self::Third => "Third",
            Self::Triad => "Triad",
            Self::Shell => "Shell",
            Self::Octave => "Octave",
            Self::Drop2 => "Drop 2",
            Self::Drop3 => "Drop 3",
            Self::Drop2And4 => "Drop 2&4",
            Self::DoubleOctave => "Double Octave",
        }
    }

    /// 1-based generated steps that do not sound at this width
    pub fn dropped_steps(&self) -> &'static [u32] {
        match self {
            Self::Unison | Self::Third | Self::Triad => &[],
            Self::Shell => &[3],
            Self::Octave => &[2],
            Self::Drop2 => &[2, 5],
            Self::Drop3 => &[2, 3, 5],
            Self::Drop2And4 => &[2, 4, 5, 7],
            Self::DoubleOctave => &[2, 3, 5, 7, 8],
        }
    }
}

impl fmt::Display for VoicingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Voicing
// ============================================================================

/// Ascending pitches to sound, possibly none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voicing {
    pub notes: Vec<i32>,
    /// Ladder stage for contrary-motion voicings, `None` for placeholders
    pub stage: Option<VoicingStage>,
}

impl Voicing {
    /// Hold silence
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    fn placeholder(notes: Vec<i32>) -> Self {
        Self { notes, stage: None }
    }
}

/// Chord width from the scale-step distance between target and pivot
pub fn chord_width(target_index: usize, pivot_index: usize, octave_spread: u32) -> u32 {
    let steps = (pivot_index as i32 - target_index as i32).rem_euclid(SCALE_LEN as i32) as u32;
    octave_spread
        .saturating_mul(SCALE_LEN as u32)
        .saturating_add(1 + steps)
        .min(MAX_CHORD_WIDTH)
}

/// Contrary motion over an explicit scale, root and pivot.
///
/// Returns `[pivot]` when the target is at or above the pivot, and an empty
/// voicing when either pitch lies outside the scale. All three pitches are
/// first clamped to `PITCH_LIMIT`.
pub fn contrary_motion(scale: &PitchClassScale, root: i32, pivot: i32, target: i32) -> Voicing {
    let (root, pivot, target) = (clamp_pitch(root), clamp_pitch(pivot), clamp_pitch(target));
    if target >= pivot {
        return Voicing {
            notes: vec![pivot],
            stage: Some(VoicingStage::Unison),
        };
    }

    let index_of = |pitch: i32| {
        let pc = (pitch - root).rem_euclid(OCTAVE);
        scale.iter().position(|&s| s as i32 == pc)
    };
    let (Some(i), Some(j)) = (index_of(target), index_of(pivot)) else {
        return Voicing::silent();
    };

    let spread = pivot.abs_diff(target) / OCTAVE as u32;
    let width = chord_width(i, j, spread);
    let Some(stage) = VoicingStage::from_width(width) else {
        return Voicing::silent();
    };
    let dropped = stage.dropped_steps();

    // First candidate lands exactly on the target
    let mut base = root + OCTAVE * (target - root - scale[i] as i32).div_euclid(OCTAVE);
    let mut previous: Option<i32> = None;
    let mut notes = Vec::with_capacity(4);

    for step in 1..=width {
        let index = (i + 2 * (step as usize - 1)) % SCALE_LEN;
        let mut candidate = scale[index] as i32 + base;
        if let Some(prev) = previous {
            while candidate <= prev {
                base += OCTAVE;
                candidate += OCTAVE;
            }
        }
        previous = Some(candidate);
        if !dropped.contains(&step) {
            notes.push(candidate);
        }
    }

    Voicing {
        notes,
        stage: Some(stage),
    }
}

impl ChordState {
    /// Contrary motion from the state's pivot down to `target`
    pub fn contrary_motion(&self, target: i32) -> Voicing {
        contrary_motion(self.pitch_classes(), self.scale_root, self.pivot_pitch, target)
    }

    /// Move the static voice. Produces nothing until the next contrary sample.
    pub fn set_pivot(&mut self, pivot: i32) {
        self.pivot_pitch = clamp_pitch(pivot);
    }

    /// Move the pivot and re-voice the last contrary target against it,
    /// or fall back to the plain triad when there has been none.
    pub fn oblique_motion(&mut self, pivot: i32) -> Voicing {
        self.set_pivot(pivot);
        match self.last_target {
            Some(target) => self.contrary_motion(target),
            None => self.triad(),
        }
    }

    /// Scale steps 0, 2, 4, 6 on the scale root
    pub fn root_position_chord(&self) -> Voicing {
        Voicing::placeholder(self.stacked(&[0, 2, 4, 6]))
    }

    /// Scale steps 0, 2, 4 on the scale root
    pub fn triad(&self) -> Voicing {
        Voicing::placeholder(self.stacked(&[0, 2, 4]))
    }

    fn stacked(&self, steps: &[usize]) -> Vec<i32> {
        let scale = self.pitch_classes();
        steps
            .iter()
            .map(|&step| self.scale_root + scale[step] as i32)
            .collect()
    }
}
