use std::sync::{Arc, Weak};

use crate::authorization::{AuthorizationRequestLevel, AuthorizationStatus};
use crate::error::{LocationError, LocationResult};

use super::types::{Position, SensorConfig, SensorError};

/// Capability interface over a platform location driver.
///
/// Operations are fire-and-forget: results arrive later through the
/// registered [`SensorDelegate`]. Drivers deliver callbacks one at a time.
pub trait SensorPort: Send + Sync {
    fn id(&self) -> &str {
        "unsupported"
    }

    /// Register the receiver of permission, position and failure callbacks.
    fn set_delegate(&self, delegate: WeakDelegate);

    fn configure(&self, _config: &SensorConfig) -> LocationResult<()> {
        Err(LocationError::Unsupported("configure".to_string()))
    }
    fn request_permission(&self, _level: AuthorizationRequestLevel) -> LocationResult<()> {
        Err(LocationError::Unsupported("request_permission".to_string()))
    }
    fn start_updates(&self) -> LocationResult<()> {
        Err(LocationError::Unsupported("start_updates".to_string()))
    }
    fn stop_updates(&self) -> LocationResult<()> {
        Err(LocationError::Unsupported("stop_updates".to_string()))
    }
}

pub type SharedSensor = Arc<dyn SensorPort>;

/// Callback slots a [`SensorPort`] delivers into.
pub trait SensorDelegate: Send + Sync {
    fn on_permission_changed(&self, status: AuthorizationStatus);

    fn on_position_received(&self, position: Position);

    /// Drivers may batch fixes; only the most recent one is kept.
    fn on_positions_received(&self, mut positions: Vec<Position>) {
        if let Some(position) = positions.pop() {
            self.on_position_received(position);
        }
    }

    fn on_failure(&self, error: SensorError);
}

/// Delegates are held weakly so a port never keeps its broker alive.
pub type WeakDelegate = Weak<dyn SensorDelegate>;

pub mod memory;
pub mod portable;
