//! Orientation sensor front end: degrees in, normalized motion samples out

use std::time::{Duration, Instant};

use movements_core::MotionSample;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which tilt direction of each axis reaches the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPolicy {
    #[default]
    Both,
    NegativeOnly,
    PositiveOnly,
}

impl SignPolicy {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Both => value,
            Self::NegativeOnly => value.min(0.0),
            Self::PositiveOnly => value.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub sign: SignPolicy,
    /// Roll (gamma) degrees mapped to full scale
    pub roll_range_deg: f64,
    /// Pitch (beta) degrees mapped to full scale
    pub pitch_range_deg: f64,
    /// Minimum spacing between accepted samples
    pub throttle_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sign: SignPolicy::Both,
            roll_range_deg: 90.0,
            pitch_range_deg: 90.0,
            throttle_ms: 50,
        }
    }
}

/// One raw reading from a device orientation sensor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    /// Left/right tilt in degrees
    pub gamma: f64,
    /// Front/back tilt in degrees
    pub beta: f64,
}

#[derive(Debug, Clone)]
pub struct OrientationNormalizer {
    sign: SignPolicy,
    roll_range: f64,
    pitch_range: f64,
}

impl OrientationNormalizer {
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            sign: config.sign,
            roll_range: config.roll_range_deg.abs().max(f64::EPSILON),
            pitch_range: config.pitch_range_deg.abs().max(f64::EPSILON),
        }
    }

    pub fn normalize(&self, reading: Orientation) -> MotionSample {
        let axis = |degrees: f64, range: f64| {
            if !degrees.is_finite() {
                return 0.0;
            }
            self.sign.apply(degrees.clamp(-range, range) / range)
        };
        MotionSample {
            roll: axis(reading.gamma, self.roll_range),
            pitch: axis(reading.beta, self.pitch_range),
        }
    }
}

impl Default for OrientationNormalizer {
    fn default() -> Self {
        Self::new(&SensorConfig::default())
    }
}

/// Drops samples that arrive sooner than the interval after the last accepted one
#[derive(Debug, Clone)]
pub struct SampleThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl SampleThrottle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn from_config(config: &SensorConfig) -> Self {
        Self::new(Duration::from_millis(config.throttle_ms))
    }

    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.interval {
                trace!("Sample throttled");
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
