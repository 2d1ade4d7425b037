use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single location fix reported by the sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Radius of uncertainty in meters.
    pub horizontal_accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, horizontal_accuracy: f64) -> Self {
        Self {
            coordinate: Coordinate {
                latitude,
                longitude,
            },
            altitude: None,
            horizontal_accuracy,
            timestamp: Utc::now(),
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accuracy {
    BestForNavigation,
    Best,
    NearestTenMeters,
    HundredMeters,
    Kilometer,
    ThreeKilometers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityProfile {
    Other,
    AutomotiveNavigation,
    Fitness,
    OtherNavigation,
    Airborne,
}

/// Settings handed to the sensor once, at broker construction.
///
/// The broker does not interpret these; ports apply what they support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub desired_accuracy: Accuracy,
    pub activity: ActivityProfile,
    /// Minimum movement in meters between reported fixes.
    pub distance_filter_m: f64,
    pub background_updates: bool,
    pub pauses_automatically: bool,
    pub shows_background_indicator: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            desired_accuracy: Accuracy::Best,
            activity: ActivityProfile::Fitness,
            distance_filter_m: 10.0,
            background_updates: true,
            pauses_automatically: false,
            shows_background_indicator: true,
        }
    }
}

/// Raw failure reported by the sensor driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("platform location error {code}: {message}")]
    Platform { code: i64, message: String },
    #[error("sensor error: {0}")]
    Other(String),
}

impl SensorError {
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        SensorError::Platform {
            code,
            message: message.into(),
        }
    }

    pub fn classify(&self) -> SensorFailure {
        match self {
            SensorError::Platform { code: 0, .. } => SensorFailure::PositionUnavailable,
            SensorError::Platform { code: 1, .. } => {
                SensorFailure::PermissionRevokedDuringOperation
            }
            _ => SensorFailure::Unknown,
        }
    }
}

/// How the broker reacts to a sensor failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFailure {
    /// Access was revoked while updates were running; halts the broker.
    PermissionRevokedDuringOperation,
    /// No fix could be obtained right now; logged only.
    PositionUnavailable,
    /// Anything else; logged only.
    Unknown,
}
