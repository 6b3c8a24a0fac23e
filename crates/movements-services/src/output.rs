//! Output boundary towards audio and display collaborators

use crossbeam_channel::{Sender, TrySendError};
use movements_core::{Response, VoicingStage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// MIDI-range notes ready for a synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteOutput {
    pub notes: Vec<u8>,
    pub bass: Option<u8>,
    pub label: String,
    pub stage: Option<VoicingStage>,
}

impl NoteOutput {
    /// Apply `transpose`, clamp to 0..=127 and drop the bass when disabled
    pub fn from_response(response: &Response, transpose: i32, bass: bool) -> Self {
        let to_midi = |pitch: i32| pitch.saturating_add(transpose).clamp(0, 127) as u8;
        let mut notes: Vec<u8> = response.voicing.notes.iter().map(|&p| to_midi(p)).collect();
        // Clamping can fold extreme voicings onto the same key
        notes.dedup();
        Self {
            notes,
            bass: bass.then(|| to_midi(response.bass)),
            label: response.label.clone(),
            stage: response.voicing.stage,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn stage_name(&self) -> &'static str {
        self.stage.map(|s| s.name()).unwrap_or("-")
    }
}

/// Receives every voicing the engine produces
pub trait VoicingSink: Send {
    fn present(&mut self, output: &NoteOutput);

    /// Nothing should sound
    fn silence(&mut self);
}

/// Logs each voicing through tracing
#[derive(Debug, Default)]
pub struct LogSink {
    presented: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl VoicingSink for LogSink {
    fn present(&mut self, output: &NoteOutput) {
        self.presented += 1;
        info!(
            notes = ?output.notes,
            bass = ?output.bass,
            stage = output.stage_name(),
            label = %output.label,
            "Voicing"
        );
    }

    fn silence(&mut self) {
        debug!("Silence");
    }
}

/// What a [`ChannelSink`] forwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkMessage {
    Present(NoteOutput),
    Silence,
}

/// Forwards voicings to another thread, dropping them when the receiver lags
pub struct ChannelSink {
    tx: Sender<SinkMessage>,
}

impl ChannelSink {
    pub fn new(tx: Sender<SinkMessage>) -> Self {
        Self { tx }
    }

    fn send(&self, message: SinkMessage) {
        match self.tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("Output channel full, dropping voicing"),
            Err(TrySendError::Disconnected(_)) => debug!("Output channel closed"),
        }
    }
}

impl VoicingSink for ChannelSink {
    fn present(&mut self, output: &NoteOutput) {
        self.send(SinkMessage::Present(output.clone()));
    }

    fn silence(&mut self) {
        self.send(SinkMessage::Silence);
    }
}

/// Route one output: silent voicings become [`VoicingSink::silence`]
pub fn deliver(sink: &mut dyn VoicingSink, output: &NoteOutput) {
    if output.is_silent() {
        sink.silence();
    } else {
        sink.present(output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use movements_core::Voicing;

    fn response(notes: Vec<i32>) -> Response {
        Response {
            voicing: Voicing {
                notes,
                stage: Some(VoicingStage::Triad),
            },
            bass: 36,
            pivot: 60,
            degree: 1,
            label: "I major".into(),
        }
    }

    #[test]
    fn test_transpose_and_bass() {
        let output = NoteOutput::from_response(&response(vec![57, 60, 64]), 2, true);
        assert_eq!(output.notes, vec![59, 62, 66]);
        assert_eq!(output.bass, Some(38));
        assert_eq!(output.stage_name(), "Triad");

        let output = NoteOutput::from_response(&response(vec![57, 60, 64]), 0, false);
        assert_eq!(output.bass, None);
    }

    #[test]
    fn test_clamp_to_midi_range() {
        let output = NoteOutput::from_response(&response(vec![120, 126, 131, 135]), 0, true);
        assert_eq!(output.notes, vec![120, 126, 127]);

        let output = NoteOutput::from_response(&response(vec![60]), -100, true);
        assert_eq!(output.notes, vec![0]);
        assert_eq!(output.bass, Some(0));
    }

    #[test]
    fn test_deliver_routes_silence() {
        let (tx, rx) = bounded(4);
        let mut sink = ChannelSink::new(tx);

        deliver(&mut sink, &NoteOutput::from_response(&response(vec![]), 0, true));
        deliver(&mut sink, &NoteOutput::from_response(&response(vec![60]), 0, true));

        assert_eq!(rx.try_recv().unwrap(), SinkMessage::Silence);
        assert!(matches!(rx.try_recv().unwrap(), SinkMessage::Present(o) if o.notes == vec![60]));
    }

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let (tx, rx) = bounded(1);
        let mut sink = ChannelSink::new(tx);
        sink.silence();
        sink.silence();
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_log_sink_counts() {
        let mut sink = LogSink::new();
        deliver(&mut sink, &NoteOutput::from_response(&response(vec![60, 64]), 0, true));
        deliver(&mut sink, &NoteOutput::from_response(&response(vec![]), 0, true));
        assert_eq!(sink.presented(), 1);
    }
}
