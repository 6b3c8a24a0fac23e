//! movements-services: configuration, sensor front end and engine service

pub mod config;
pub mod engine_service;
pub mod orientation;
pub mod output;

pub use config::{config_path, load_config, load_from, save_to, ConfigError, MovementsConfig};
pub use engine_service::{EngineCommand, EngineService, EngineServiceError, EngineUpdate};
pub use orientation::{Orientation, OrientationNormalizer, SampleThrottle, SensorConfig, SignPolicy};
pub use output::{deliver, ChannelSink, LogSink, NoteOutput, SinkMessage, VoicingSink};
