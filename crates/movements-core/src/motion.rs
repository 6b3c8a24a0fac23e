//! Motion mapper: two-axis control samples to voicings
//!
//! Roll drives contrary motion below the pivot, pitch moves the pivot
//! (oblique motion). Inside the deadzone the plain chord of the degree sounds.

use serde::{Deserialize, Serialize};

use crate::error::{MovementsError, Result};
use crate::state::{clamp_pitch, ChordState, OCTAVE};
use crate::voicing::Voicing;

/// Normalized control sample, each axis roughly in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub roll: f64,
    pub pitch: f64,
}

impl MotionSample {
    pub fn new(roll: f64, pitch: f64) -> Self {
        Self { roll, pitch }
    }

    /// Non-finite axes read as centered, the rest are clamped to [-1, 1]
    fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            roll: clean(self.roll),
            pitch: clean(self.pitch),
        }
    }
}

/// Mapper constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Both axes below this magnitude count as centered
    pub deadzone: f64,
    /// Semitones of contrary motion at full roll
    pub roll_span: i32,
    /// Semitones of pivot travel across the full pitch range
    pub pivot_span: i32,
    /// Pivot for pitch -1, before the scale root's pitch class is added
    pub pivot_base: i32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            deadzone: 0.05,
            roll_span: 72,
            pivot_span: 24,
            pivot_base: 60,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(MovementsError::InvalidConfig(format!(
                "deadzone {} outside [0, 1)",
                self.deadzone
            )));
        }
        if self.roll_span <= 0 {
            return Err(MovementsError::InvalidConfig(format!(
                "roll_span must be positive, got {}",
                self.roll_span
            )));
        }
        if self.pivot_span <= 0 {
            return Err(MovementsError::InvalidConfig(format!(
                "pivot_span must be positive, got {}",
                self.pivot_span
            )));
        }
        Ok(())
    }
}

/// Which axis a sample was routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionBranch {
    Deadzone,
    Contrary,
    Pivot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionResult {
    pub voicing: Voicing,
    pub branch: MotionBranch,
    /// Set when the sample moved the pivot
    pub new_pivot: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct MotionMapper {
    config: MotionConfig,
}

impl MotionMapper {
    pub fn new(config: MotionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn map(&self, state: &mut ChordState, sample: MotionSample) -> MotionResult {
        let MotionSample { roll, pitch } = sample.sanitized();
        let deadzone = self.config.deadzone;

        if roll.abs() < deadzone && pitch.abs() < deadzone {
            return MotionResult {
                voicing: state.root_position_chord(),
                branch: MotionBranch::Deadzone,
                new_pivot: None,
            };
        }

        if roll.abs() >= pitch.abs() {
            let travel = (roll * f64::from(self.config.roll_span)).floor() as i32;
            let mut target = clamp_pitch(state.pivot_pitch().saturating_sub(travel));
            if state.off_chord_lock() {
                target = state.off_chord_tone_at_or_below(target);
            }
            state.last_target = Some(target);
            return MotionResult {
                voicing: state.contrary_motion(target),
                branch: MotionBranch::Contrary,
                new_pivot: None,
            };
        }

        let rise = ((pitch + 1.0) * f64::from(self.config.pivot_span)).floor() as i32;
        let pivot = state
            .scale_root()
            .rem_euclid(OCTAVE)
            .saturating_add(rise)
            .saturating_add(self.config.pivot_base);
        state.set_pivot(pivot);
        MotionResult {
            voicing: state.root_position_chord(),
            branch: MotionBranch::Pivot,
            new_pivot: Some(state.pivot_pitch()),
        }
    }
}

impl ChordState {
    /// Nearest pitch at or below `pitch` on an odd scale index (the
    /// diminished passing tones). Every scale has four, so this is always
    /// within an octave.
    pub fn off_chord_tone_at_or_below(&self, pitch: i32) -> i32 {
        (0..OCTAVE)
            .map(|down| pitch.saturating_sub(down))
            .find(|&p| {
                self.scale
                    .index_of(self.pitch_class(p))
                    .is_some_and(|index| index % 2 == 1)
            })
            .unwrap_or(pitch)
    }
}
