//! movements-core: sixth-diminished chord engine driven by motion

pub mod coloration;
pub mod degree;
mod error;
pub mod family;
mod label;
pub mod motion;
pub mod scale;
mod session;
mod state;
pub mod voicing;

pub use coloration::{alternate_entry, dominant_counterpart, pretty_step};
pub use degree::{clamp_degree, degree_entry, DegreeEntry, MAJOR_KEY, NUMERALS};
pub use error::{MovementsError, Result};
pub use family::{inverse, step_for, Step};
pub use label::OFF_CHORD_LABEL;
pub use motion::{MotionBranch, MotionConfig, MotionMapper, MotionResult, MotionSample};
pub use scale::{lookup, Family, PitchClassScale, Rotation, ScaleId};
pub use session::{Event, Response, Session, Switch};
pub use state::{ChordState, FamilyMove, BASS_OCTAVE_OFFSET, OCTAVE, PITCH_LIMIT, REFERENCE_PITCH};
pub use voicing::{chord_width, Voicing, VoicingStage, MAX_CHORD_WIDTH};
