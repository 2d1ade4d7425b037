//! In-memory sensor port driven by the host.

use parking_lot::Mutex;

use super::{SensorDelegate, SensorPort, WeakDelegate};
use crate::authorization::{AuthorizationRequestLevel, AuthorizationStatus};
use crate::error::LocationResult;
use crate::sensor::types::{Position, SensorConfig, SensorError};

/// Calls the broker made into the port.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorCalls {
    pub configured: Option<SensorConfig>,
    pub permission_requests: Vec<AuthorizationRequestLevel>,
    pub start_updates: usize,
    pub stop_updates: usize,
}

/// Sensor port with no driver behind it.
///
/// Records every call and lets the host deliver callbacks with the
/// `deliver_*` methods, as a platform driver would.
#[derive(Default)]
pub struct MemorySensor {
    delegate: Mutex<Option<WeakDelegate>>,
    calls: Mutex<SensorCalls>,
}

impl MemorySensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> SensorCalls {
        self.calls.lock().clone()
    }

    pub fn is_updating(&self) -> bool {
        let calls = self.calls.lock();
        calls.start_updates > calls.stop_updates
    }

    pub fn deliver_permission(&self, status: AuthorizationStatus) {
        if let Some(delegate) = self.delegate() {
            delegate.on_permission_changed(status);
        }
    }

    pub fn deliver_position(&self, position: Position) {
        if let Some(delegate) = self.delegate() {
            delegate.on_position_received(position);
        }
    }

    pub fn deliver_positions(&self, positions: Vec<Position>) {
        if let Some(delegate) = self.delegate() {
            delegate.on_positions_received(positions);
        }
    }

    pub fn deliver_failure(&self, error: SensorError) {
        if let Some(delegate) = self.delegate() {
            delegate.on_failure(error);
        }
    }

    // The lock is released before the delegate runs; delegates call back
    // into the port.
    fn delegate(&self) -> Option<std::sync::Arc<dyn SensorDelegate>> {
        let weak = self.delegate.lock().clone();
        weak.and_then(|weak| weak.upgrade())
    }
}

impl SensorPort for MemorySensor {
    fn id(&self) -> &str {
        "memory"
    }

    fn set_delegate(&self, delegate: WeakDelegate) {
        *self.delegate.lock() = Some(delegate);
    }

    fn configure(&self, config: &SensorConfig) -> LocationResult<()> {
        self.calls.lock().configured = Some(config.clone());
        Ok(())
    }

    fn request_permission(&self, level: AuthorizationRequestLevel) -> LocationResult<()> {
        self.calls.lock().permission_requests.push(level);
        Ok(())
    }

    fn start_updates(&self) -> LocationResult<()> {
        self.calls.lock().start_updates += 1;
        Ok(())
    }

    fn stop_updates(&self) -> LocationResult<()> {
        self.calls.lock().stop_updates += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingDelegate {
        statuses: Mutex<Vec<AuthorizationStatus>>,
        positions: Mutex<Vec<Position>>,
        failures: Mutex<Vec<SensorError>>,
    }

    impl SensorDelegate for RecordingDelegate {
        fn on_permission_changed(&self, status: AuthorizationStatus) {
            self.statuses.lock().push(status);
        }

        fn on_position_received(&self, position: Position) {
            self.positions.lock().push(position);
        }

        fn on_failure(&self, error: SensorError) {
            self.failures.lock().push(error);
        }
    }

    fn attach(sensor: &MemorySensor) -> Arc<RecordingDelegate> {
        let delegate = Arc::new(RecordingDelegate::default());
        let weak = Arc::downgrade(&delegate);
        sensor.set_delegate(weak);
        delegate
    }

    #[test]
    fn records_port_calls() {
        let sensor = MemorySensor::new();
        sensor.configure(&SensorConfig::default()).expect("configure");
        sensor
            .request_permission(AuthorizationRequestLevel::Always)
            .expect("request");
        sensor.start_updates().expect("start");
        assert!(sensor.is_updating());
        sensor.stop_updates().expect("stop");

        let calls = sensor.calls();
        assert_eq!(calls.configured, Some(SensorConfig::default()));
        assert_eq!(
            calls.permission_requests,
            vec![AuthorizationRequestLevel::Always]
        );
        assert_eq!(calls.start_updates, 1);
        assert_eq!(calls.stop_updates, 1);
        assert!(!sensor.is_updating());
    }

    #[test]
    fn delivers_callbacks_to_delegate() {
        let sensor = MemorySensor::new();
        let delegate = attach(&sensor);

        sensor.deliver_permission(AuthorizationStatus::AuthorizedLimited);
        sensor.deliver_position(Position::new(1.0, 2.0, 5.0));
        sensor.deliver_failure(SensorError::from_code(0, "no fix"));

        assert_eq!(
            *delegate.statuses.lock(),
            vec![AuthorizationStatus::AuthorizedLimited]
        );
        assert_eq!(delegate.positions.lock().len(), 1);
        assert_eq!(delegate.failures.lock().len(), 1);
    }

    #[test]
    fn batch_delivery_keeps_last_fix_only() {
        let sensor = MemorySensor::new();
        let delegate = attach(&sensor);

        sensor.deliver_positions(vec![
            Position::new(1.0, 1.0, 5.0),
            Position::new(2.0, 2.0, 5.0),
        ]);
        sensor.deliver_positions(Vec::new());

        let positions = delegate.positions.lock();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].coordinate.latitude, 2.0);
    }

    #[test]
    fn dropped_delegate_is_ignored() {
        let sensor = MemorySensor::new();
        drop(attach(&sensor));

        sensor.deliver_permission(AuthorizationStatus::Denied);
    }
}
