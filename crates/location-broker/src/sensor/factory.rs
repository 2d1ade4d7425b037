use std::sync::Arc;

use super::adapters::SharedSensor;
use crate::authorization::AuthorizationRequestLevel;
use crate::config::BrokerConfig;

/// Sensor port for the current target.
///
/// No native driver ships with this crate; hosts with one implement
/// [`super::SensorPort`] and pass it to the broker directly.
pub fn default_sensor() -> SharedSensor {
    Arc::new(super::adapters::portable::PortableSensor::new())
}

/// Mobile platforms only grant foreground access by default.
pub fn default_request_level() -> AuthorizationRequestLevel {
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        AuthorizationRequestLevel::WhenInUse
    }

    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        AuthorizationRequestLevel::Always
    }
}

pub fn default_broker_config() -> BrokerConfig {
    BrokerConfig::new(default_request_level())
}
