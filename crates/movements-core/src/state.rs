//! Chord state: the session's current harmonic position

use serde::{Deserialize, Serialize};

use crate::scale::{PitchClassScale, ScaleId};

/// Semitones in an octave
pub const OCTAVE: i32 = 12;
/// Middle C, the reference for roots and the default pivot
pub const REFERENCE_PITCH: i32 = 60;
/// Bass notes sit this far above the key-relative root offset (C2 for C)
pub const BASS_OCTAVE_OFFSET: i32 = OCTAVE * 3;
/// Pitches the engine holds lie within `-PITCH_LIMIT..=PITCH_LIMIT`. Far
/// outside any instrument, and far enough inside `i32` that voicing
/// arithmetic cannot overflow.
pub const PITCH_LIMIT: i32 = 1 << 16;

pub(crate) fn clamp_pitch(pitch: i32) -> i32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Which family transformation is currently applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyMove {
    Up,
    Down,
    Across,
}

impl FamilyMove {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Across => "⇄",
        }
    }
}

/// The single mutable record of a session.
///
/// Everything else in the engine is a function of this plus explicit
/// arguments. At most one family transformation is active at a time, which
/// `family: Option<FamilyMove>` enforces by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordState {
    pub(crate) scale: ScaleId,
    pub(crate) scale_root: i32,
    pub(crate) pivot_pitch: i32,
    pub(crate) chord_degree: u8,
    pub(crate) key_root: i32,
    pub(crate) bass_pitch: i32,
    pub(crate) off_chord_lock: bool,
    pub(crate) alternate: bool,
    pub(crate) dominant: bool,
    pub(crate) pretty: bool,
    pub(crate) family: Option<FamilyMove>,
    /// Last contrary-motion target requested through the motion mapper
    pub(crate) last_target: Option<i32>,
}

impl Default for ChordState {
    fn default() -> Self {
        Self {
            scale: ScaleId::MajorSixth,
            scale_root: REFERENCE_PITCH,
            pivot_pitch: REFERENCE_PITCH,
            chord_degree: 1,
            key_root: REFERENCE_PITCH,
            bass_pitch: BASS_OCTAVE_OFFSET,
            off_chord_lock: false,
            alternate: false,
            dominant: false,
            pretty: false,
            family: None,
            last_target: None,
        }
    }
}

impl ChordState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session in another key; degree 1 is selected against `key_root`
    pub fn with_key_root(key_root: i32) -> Self {
        let mut state = Self {
            key_root: clamp_pitch(key_root),
            ..Default::default()
        };
        state.select_degree(1);
        state
    }

    /// Test fixture: an explicit scale and root, the rest default
    #[cfg(test)]
    pub(crate) fn with_scale(scale: ScaleId, scale_root: i32) -> Self {
        Self {
            scale,
            scale_root,
            ..Default::default()
        }
    }

    pub fn scale(&self) -> ScaleId {
        self.scale
    }

    /// Pitch classes of the active scale
    pub fn pitch_classes(&self) -> &'static PitchClassScale {
        self.scale.pitch_classes()
    }

    pub fn scale_root(&self) -> i32 {
        self.scale_root
    }

    pub fn pivot_pitch(&self) -> i32 {
        self.pivot_pitch
    }

    pub fn chord_degree(&self) -> u8 {
        self.chord_degree
    }

    pub fn key_root(&self) -> i32 {
        self.key_root
    }

    pub fn bass_pitch(&self) -> i32 {
        self.bass_pitch
    }

    pub fn off_chord_lock(&self) -> bool {
        self.off_chord_lock
    }

    pub fn alternate(&self) -> bool {
        self.alternate
    }

    pub fn dominant(&self) -> bool {
        self.dominant
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn family(&self) -> Option<FamilyMove> {
        self.family
    }

    pub fn family_up_active(&self) -> bool {
        self.family == Some(FamilyMove::Up)
    }

    pub fn family_down_active(&self) -> bool {
        self.family == Some(FamilyMove::Down)
    }

    pub fn family_across_active(&self) -> bool {
        self.family == Some(FamilyMove::Across)
    }

    pub fn last_target(&self) -> Option<i32> {
        self.last_target
    }

    /// Any of alternate / dominant / pretty is on
    pub fn has_coloration(&self) -> bool {
        self.alternate || self.dominant || self.pretty
    }

    /// Pitch class of `pitch` measured from the scale root
    pub fn pitch_class(&self, pitch: i32) -> i32 {
        (i64::from(pitch) - i64::from(self.scale_root)).rem_euclid(i64::from(OCTAVE)) as i32
    }

    /// Shift key, scale root and bass by one octave up; stops at the pitch limit
    pub fn octave_up(&mut self) {
        self.shift_octave(OCTAVE);
    }

    /// Shift key, scale root and bass by one octave down
    pub fn octave_down(&mut self) {
        self.shift_octave(-OCTAVE);
    }

    fn shift_octave(&mut self, semitones: i32) {
        if (self.key_root + semitones).abs() > PITCH_LIMIT {
            return;
        }
        self.key_root += semitones;
        self.scale_root += semitones;
        self.bass_pitch += semitones;
    }
}
