use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::authorization::{AllowedStatusSet, AuthorizationRequestLevel, DeniedPrompt};
use crate::channel::MAX_EVENT_CAPACITY;
use crate::error::{LocationError, LocationResult};
use crate::sensor::SensorConfig;

pub const BROKER_CONFIG_FILENAME: &str = "location.json";
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Construction-time settings for a [`crate::LocationBroker`].
///
/// Platform-dependent values are resolved by the caller (see
/// [`crate::sensor::default_broker_config`]) and never re-derived inside
/// the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub default_request_level: AuthorizationRequestLevel,
    #[serde(default)]
    pub allowed_statuses: AllowedStatusSet,
    #[serde(default)]
    pub sensor: SensorConfig,
    /// Buffered values per event subscriber before it starts lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    #[serde(default)]
    pub denied_prompt: DeniedPrompt,
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl BrokerConfig {
    pub fn new(default_request_level: AuthorizationRequestLevel) -> Self {
        Self {
            default_request_level,
            allowed_statuses: AllowedStatusSet::default(),
            sensor: SensorConfig::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            denied_prompt: DeniedPrompt::default(),
        }
    }

    pub fn from_json_str(data: &str) -> LocationResult<Self> {
        let config: BrokerConfig = serde_json::from_str(data).map_err(|error| {
            LocationError::Config(format!("failed to parse broker config: {error}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> LocationResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|error| {
            LocationError::Config(format!(
                "failed to read broker config {}: {error}",
                path.display()
            ))
        })?;
        Self::from_json_str(&data)
    }

    pub fn save(&self, path: &Path) -> LocationResult<()> {
        let data = serde_json::to_string_pretty(self).map_err(|error| {
            LocationError::Config(format!(
                "failed to serialize broker config {}: {error}",
                path.display()
            ))
        })?;
        std::fs::write(path, data).map_err(|error| {
            LocationError::Config(format!(
                "failed to write broker config {}: {error}",
                path.display()
            ))
        })
    }

    fn validate(&self) -> LocationResult<()> {
        if self.event_capacity == 0 {
            return Err(LocationError::Config(
                "event_capacity must be greater than zero".to_string(),
            ));
        }
        if self.event_capacity > MAX_EVENT_CAPACITY {
            return Err(LocationError::Config(format!(
                "event_capacity must not exceed {MAX_EVENT_CAPACITY}"
            )));
        }
        let distance = self.sensor.distance_filter_m;
        if distance.is_nan() || distance < 0.0 {
            return Err(LocationError::Config(
                "sensor.distance_filter_m must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
