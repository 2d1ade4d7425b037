use super::{SensorPort, WeakDelegate};
use crate::authorization::AuthorizationRequestLevel;
use crate::error::{LocationError, LocationResult};
use crate::sensor::types::SensorConfig;

/// Port for platforms without a location driver.
///
/// Every operation fails with [`LocationError::Unsupported`]; no callbacks
/// are ever delivered.
#[derive(Debug, Default)]
pub struct PortableSensor;

impl PortableSensor {
    pub fn new() -> Self {
        Self
    }
}

impl SensorPort for PortableSensor {
    fn id(&self) -> &str {
        "unsupported"
    }

    fn set_delegate(&self, _delegate: WeakDelegate) {}

    fn configure(&self, _config: &SensorConfig) -> LocationResult<()> {
        Err(sensor_not_supported("configure"))
    }

    fn request_permission(&self, _level: AuthorizationRequestLevel) -> LocationResult<()> {
        Err(sensor_not_supported("request_permission"))
    }

    fn start_updates(&self) -> LocationResult<()> {
        Err(sensor_not_supported("start_updates"))
    }

    fn stop_updates(&self) -> LocationResult<()> {
        Err(sensor_not_supported("stop_updates"))
    }
}

fn sensor_not_supported(operation: &str) -> LocationError {
    LocationError::Unsupported(format!("location sensor not supported: {operation}"))
}
