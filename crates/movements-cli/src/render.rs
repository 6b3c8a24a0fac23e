//! Text rendering for terminal output

use movements_core::{ScaleId, Voicing};
use movements_services::EngineUpdate;

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B"];

/// Scientific pitch name, middle C = C4
pub fn note_name(pitch: i32) -> String {
    let name = NOTE_NAMES[pitch.rem_euclid(12) as usize];
    format!("{name}{}", pitch.div_euclid(12) - 1)
}

pub fn note_list(notes: impl IntoIterator<Item = i32>) -> String {
    let names: Vec<String> = notes.into_iter().map(note_name).collect();
    if names.is_empty() {
        "(silence)".to_string()
    } else {
        names.join(" ")
    }
}

pub fn update_line(update: &EngineUpdate) -> String {
    let event = update
        .event
        .as_ref()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "snapshot".to_string());
    let bass = update
        .output
        .bass
        .map(|b| format!(" / {}", note_name(b as i32)))
        .unwrap_or_default();
    format!(
        "{event:<16} {:<24} {:<14} {}{bass}",
        update.response.label,
        update.output.stage_name(),
        note_list(update.output.notes.iter().map(|&n| n as i32)),
    )
}

pub fn ladder_line(target: i32, voicing: &Voicing) -> String {
    let stage = voicing.stage.map(|s| s.name()).unwrap_or("-");
    format!("{:<5} {stage:<14} {}", note_name(target), note_list(voicing.notes.iter().copied()))
}

pub fn scale_line(id: ScaleId) -> String {
    let classes: Vec<String> = id.pitch_classes().iter().map(|pc| pc.to_string()).collect();
    format!("{:<40} {:<32} [{}]", id.key(), id.to_string(), classes.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(59), "B3");
        assert_eq!(note_name(21), "A0");
        assert_eq!(note_name(0), "C-1");
    }

    #[test]
    fn test_note_list() {
        assert_eq!(note_list([60, 64, 67]), "C4 E4 G4");
        assert_eq!(note_list(Vec::new()), "(silence)");
    }

    #[test]
    fn test_scale_line_lists_pitch_classes() {
        let line = scale_line(ScaleId::MajorSixth);
        assert!(line.starts_with("major_sixth "));
        assert!(line.ends_with("[0, 2, 4, 5, 7, 8, 9, 11]"));
    }
}
