//! Session: one chord state driven by discrete events and motion samples
//!
//! Every event returns a [`Response`]. Discrete events re-voice the most
//! recent motion sample against the new harmony, so a degree change while
//! the controller is tilted sounds straight away.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MovementsError, Result};
use crate::motion::{MotionConfig, MotionMapper, MotionSample};
use crate::state::ChordState;
use crate::voicing::Voicing;

// ============================================================================
// Events
// ============================================================================

/// How a coloration event sets its flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Switch {
    On,
    Off,
    #[default]
    Toggle,
}

impl Switch {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            "toggle" => Some(Self::Toggle),
            _ => None,
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            Self::On => " on",
            Self::Off => " off",
            Self::Toggle => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Degree {
        degree: i32,
    },
    Dominant {
        #[serde(default)]
        switch: Switch,
    },
    Alternate {
        #[serde(default)]
        switch: Switch,
    },
    Pretty {
        #[serde(default)]
        switch: Switch,
    },
    FamilyUp,
    FamilyDown,
    FamilyAcross,
    ResetFamily,
    OffChord,
    OnChord,
    OctaveUp,
    OctaveDown,
    Motion {
        roll: f64,
        pitch: f64,
    },
    Pivot {
        pitch: i32,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Degree { .. } => "degree",
            Self::Dominant { .. } => "dominant",
            Self::Alternate { .. } => "alternate",
            Self::Pretty { .. } => "pretty",
            Self::FamilyUp => "family_up",
            Self::FamilyDown => "family_down",
            Self::FamilyAcross => "family_across",
            Self::ResetFamily => "reset_family",
            Self::OffChord => "off_chord",
            Self::OnChord => "on_chord",
            Self::OctaveUp => "octave_up",
            Self::OctaveDown => "octave_down",
            Self::Motion { .. } => "motion",
            Self::Pivot { .. } => "pivot",
        }
    }

    /// Whether this event changes harmony rather than feeding the controller
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::Motion { .. } | Self::Pivot { .. })
    }
}

fn parse_arg<T: FromStr>(event: &'static str, word: Option<&str>) -> Result<T> {
    let word = word.ok_or_else(|| MovementsError::InvalidArgument {
        event,
        value: String::new(),
    })?;
    word.parse().map_err(|_| MovementsError::InvalidArgument {
        event,
        value: word.to_string(),
    })
}

impl FromStr for Event {
    type Err = MovementsError;

    /// Text form: `1`..`8`, `dom|alt|pretty [on|off|toggle]`, `up`, `down`,
    /// `across`, `reset`, `on`, `off`, `oct+`, `oct-`, `motion <roll> <pitch>`,
    /// `pivot <n>`.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let Some(head) = words.next() else {
            return Err(MovementsError::UnknownEvent(s.to_string()));
        };

        let switch = |words: &mut std::str::SplitWhitespace<'_>, event: &'static str| match words.next() {
            None => Ok(Switch::Toggle),
            Some(word) => Switch::parse(word).ok_or_else(|| MovementsError::InvalidArgument {
                event,
                value: word.to_string(),
            }),
        };

        let event = match head {
            "dom" | "dominant" => Event::Dominant {
                switch: switch(&mut words, "dominant")?,
            },
            "alt" | "alternate" => Event::Alternate {
                switch: switch(&mut words, "alternate")?,
            },
            "pretty" => Event::Pretty {
                switch: switch(&mut words, "pretty")?,
            },
            "up" => Event::FamilyUp,
            "down" => Event::FamilyDown,
            "across" => Event::FamilyAcross,
            "reset" => Event::ResetFamily,
            "off" => Event::OffChord,
            "on" => Event::OnChord,
            "oct+" => Event::OctaveUp,
            "oct-" => Event::OctaveDown,
            "motion" => Event::Motion {
                roll: parse_arg("motion", words.next())?,
                pitch: parse_arg("motion", words.next())?,
            },
            "pivot" => Event::Pivot {
                pitch: parse_arg("pivot", words.next())?,
            },
            numeral => match numeral.parse::<i32>() {
                Ok(degree) => Event::Degree { degree },
                Err(_) => return Err(MovementsError::UnknownEvent(s.trim().to_string())),
            },
        };

        if words.next().is_some() {
            return Err(MovementsError::UnknownEvent(s.trim().to_string()));
        }
        Ok(event)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degree { degree } => write!(f, "{degree}"),
            Self::Dominant { switch } => write!(f, "dom{}", switch.suffix()),
            Self::Alternate { switch } => write!(f, "alt{}", switch.suffix()),
            Self::Pretty { switch } => write!(f, "pretty{}", switch.suffix()),
            Self::FamilyUp => f.write_str("up"),
            Self::FamilyDown => f.write_str("down"),
            Self::FamilyAcross => f.write_str("across"),
            Self::ResetFamily => f.write_str("reset"),
            Self::OffChord => f.write_str("off"),
            Self::OnChord => f.write_str("on"),
            Self::OctaveUp => f.write_str("oct+"),
            Self::OctaveDown => f.write_str("oct-"),
            Self::Motion { roll, pitch } => write!(f, "motion {roll} {pitch}"),
            Self::Pivot { pitch } => write!(f, "pivot {pitch}"),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// What the audio and display collaborators receive after every event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub voicing: Voicing,
    pub bass: i32,
    pub pivot: i32,
    pub degree: u8,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: ChordState,
    mapper: MotionMapper,
    last_sample: Option<MotionSample>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session in the given key with custom mapper constants
    pub fn with_config(key_root: i32, motion: MotionConfig) -> Result<Self> {
        Ok(Self {
            state: ChordState::with_key_root(key_root),
            mapper: MotionMapper::new(motion)?,
            last_sample: None,
        })
    }

    pub fn state(&self) -> &ChordState {
        &self.state
    }

    pub fn last_sample(&self) -> Option<MotionSample> {
        self.last_sample
    }

    pub fn apply(&mut self, event: &Event) -> Response {
        let voicing = match *event {
            Event::Motion { roll, pitch } => {
                let sample = MotionSample::new(roll, pitch);
                self.last_sample = Some(sample);
                self.mapper.map(&mut self.state, sample).voicing
            }
            Event::Pivot { pitch } => self.state.oblique_motion(pitch),
            _ => {
                self.apply_discrete(event);
                self.revoice()
            }
        };
        self.respond(voicing)
    }

    /// Response for the current state without changing it
    pub fn current(&self) -> Response {
        let voicing = match self.state.last_target() {
            Some(target) if self.last_sample.is_some() => self.state.contrary_motion(target),
            _ => self.state.root_position_chord(),
        };
        self.respond(voicing)
    }

    fn apply_discrete(&mut self, event: &Event) {
        let state = &mut self.state;
        match *event {
            Event::Degree { degree } => state.select_degree(degree),
            Event::Dominant { switch } => match switch {
                Switch::On => state.set_dominant(true),
                Switch::Off => state.set_dominant(false),
                Switch::Toggle => state.toggle_dominant(),
            },
            Event::Alternate { switch } => match switch {
                Switch::On => state.set_alternate(true),
                Switch::Off => state.set_alternate(false),
                Switch::Toggle => state.toggle_alternate(),
            },
            Event::Pretty { switch } => match switch {
                Switch::On => state.set_pretty(true),
                Switch::Off => state.set_pretty(false),
                Switch::Toggle => state.toggle_pretty(),
            },
            Event::FamilyUp => state.family_up(),
            Event::FamilyDown => state.family_down(),
            Event::FamilyAcross => state.family_across(),
            Event::ResetFamily => state.reset_family_transformations(),
            Event::OffChord => state.lock_off_chord(),
            Event::OnChord => state.lock_on_chord(),
            Event::OctaveUp => state.octave_up(),
            Event::OctaveDown => state.octave_down(),
            Event::Motion { .. } | Event::Pivot { .. } => {}
        }
    }

    fn revoice(&mut self) -> Voicing {
        match self.last_sample {
            Some(sample) => self.mapper.map(&mut self.state, sample).voicing,
            None => self.state.root_position_chord(),
        }
    }

    fn respond(&self, voicing: Voicing) -> Response {
        Response {
            voicing,
            bass: self.state.bass_pitch(),
            pivot: self.state.pivot_pitch(),
            degree: self.state.chord_degree(),
            label: self.state.label(),
        }
    }
}
