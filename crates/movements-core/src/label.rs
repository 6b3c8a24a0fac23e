//! Human-readable chord labels for display collaborators

use crate::degree::NUMERALS;
use crate::state::ChordState;

/// Shown while only passing tones may lead
pub const OFF_CHORD_LABEL: &str = "Off (No Chord)";

impl ChordState {
    /// Numeral, active modifiers, family marker and quality, e.g. `V7 alt ↑ dominant`
    pub fn label(&self) -> String {
        if self.off_chord_lock {
            return OFF_CHORD_LABEL.to_string();
        }

        let mut label = NUMERALS[(self.chord_degree as usize - 1) % NUMERALS.len()].to_string();
        if self.dominant {
            label.push('7');
        }
        if self.alternate {
            label.push_str(" alt");
        }
        if self.pretty {
            label.push_str(" (pretty)");
        }
        if let Some(mv) = self.family {
            label.push(' ');
            label.push_str(mv.symbol());
        }
        label.push(' ');
        label.push_str(self.scale.quality());
        label
    }
}
