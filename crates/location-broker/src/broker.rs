use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};
use tokio::sync::{broadcast, watch};
use tokio_stream::Stream;

use crate::authorization::denied::invoke_guarded;
use crate::authorization::{
    AuthorizationRequestLevel, AuthorizationState, AuthorizationStatus, SettingsPrompt,
    SettingsPromptHandler, SharedDeniedHandler,
};
use crate::channel::{EventChannel, LatestChannel};
use crate::config::BrokerConfig;
use crate::error::NotAuthorizedError;
use crate::sensor::{Position, SensorDelegate, SensorError, SensorFailure, SharedSensor, WeakDelegate};

/// Permission-gated front for a location sensor.
///
/// Arms the sensor only when authorization allows it and republishes each
/// accepted fix on two channels:
/// - the event channel, edge-triggered, published first
/// - the latest-value channel, committed second and replayed to late
///   subscribers
///
/// Event observers therefore still read the previous fix from
/// [`LocationBroker::latest`] while they run.
///
/// Arming, disarming and publishing all run under one lifecycle lock, so a
/// fix is never published after `stop()` returns and a denial that races
/// `start()` always leaves the sensor stopped. The lock is reentrant: a
/// driver may deliver callbacks synchronously from `start_updates`, and
/// observers may call `stop()`.
pub struct LocationBroker {
    sensor: SharedSensor,
    denied_handler: SharedDeniedHandler,
    default_request_level: AuthorizationRequestLevel,
    lifecycle: ReentrantMutex<()>,
    state: Mutex<BrokerState>,
    latest: LatestChannel<Position>,
    events: EventChannel<Position>,
}

struct BrokerState {
    authorization: AuthorizationState,
    active: bool,
}

impl LocationBroker {
    /// Create a broker and register it as the sensor's delegate.
    ///
    /// The sensor configuration from `config` is applied once here.
    pub fn new(
        sensor: SharedSensor,
        denied_handler: SharedDeniedHandler,
        config: BrokerConfig,
    ) -> Arc<Self> {
        if let Err(error) = sensor.configure(&config.sensor) {
            tracing::warn!(sensor = sensor.id(), %error, "sensor rejected configuration");
        }

        let broker = Arc::new(Self {
            sensor,
            denied_handler,
            default_request_level: config.default_request_level,
            lifecycle: ReentrantMutex::new(()),
            state: Mutex::new(BrokerState {
                authorization: AuthorizationState::new(config.allowed_statuses),
                active: false,
            }),
            latest: LatestChannel::new(),
            events: EventChannel::new(config.event_capacity),
        });

        let weak: Weak<Self> = Arc::downgrade(&broker);
        let delegate: WeakDelegate = weak;
        broker.sensor.set_delegate(delegate);
        broker
    }

    /// Create a broker whose denial handler shows the configured settings
    /// prompt.
    pub fn with_settings_prompt(
        sensor: SharedSensor,
        prompt: Arc<dyn SettingsPrompt>,
        config: BrokerConfig,
    ) -> Arc<Self> {
        let handler = SettingsPromptHandler::new(prompt, config.denied_prompt.clone());
        Self::new(sensor, Arc::new(handler), config)
    }

    /// Request access at the configured default level.
    pub fn request_authorization(&self) {
        self.request_authorization_with(self.default_request_level);
    }

    /// Request access at `level`.
    ///
    /// Once access is denied the platform will not prompt again, so the
    /// denial handler runs instead of a new request.
    pub fn request_authorization_with(&self, level: AuthorizationRequestLevel) {
        if self.is_denied() {
            self.notify_denied();
            return;
        }
        if let Err(error) = self.sensor.request_permission(level) {
            tracing::warn!(?level, %error, "failed to request location authorization");
        }
    }

    /// Request the access that would grant `target`.
    ///
    /// Only the two authorized statuses can be requested; anything else is
    /// logged and ignored.
    pub fn request_authorization_for(&self, target: AuthorizationStatus) {
        if self.is_denied() {
            self.notify_denied();
            return;
        }
        match AuthorizationRequestLevel::for_status(target) {
            Some(level) => self.request_authorization_with(level),
            None => tracing::warn!(
                status = target.name(),
                "only `when in use` and `always` authorization can be requested"
            ),
        }
    }

    /// Start delivering positions.
    ///
    /// Fails when a reported status is outside the allowed set. If no status
    /// has been reported yet the sensor is armed anyway: the first permission
    /// callback usually lands shortly after construction, and the sensor
    /// refuses on its own if access is missing.
    pub fn start(&self) -> Result<(), NotAuthorizedError> {
        self.request_authorization();

        let _lifecycle = self.lifecycle.lock();
        {
            let mut state = self.state.lock();
            let authorization = &state.authorization;
            if authorization.is_known() {
                if !authorization.is_sufficient() {
                    return Err(NotAuthorizedError {
                        status: authorization.status(),
                    });
                }
            } else {
                tracing::warn!(
                    "no location authorization status reported yet; starting updates anyway"
                );
            }
            if state.active {
                return Ok(());
            }
            state.active = true;
        }

        match self.sensor.start_updates() {
            Ok(()) => tracing::info!(sensor = self.sensor.id(), "location updates started"),
            Err(error) => {
                tracing::warn!(%error, "failed to start location updates");
                self.state.lock().active = false;
            }
        }
        Ok(())
    }

    /// Stop delivering positions. Does nothing when already inactive.
    pub fn stop(&self) {
        let _lifecycle = self.lifecycle.lock();
        let was_active = std::mem::replace(&mut self.state.lock().active, false);
        if !was_active {
            return;
        }
        match self.sensor.stop_updates() {
            Ok(()) => tracing::info!(sensor = self.sensor.id(), "location updates stopped"),
            Err(error) => tracing::warn!(%error, "failed to stop location updates"),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    pub fn latest(&self) -> Option<Position> {
        self.latest.latest()
    }

    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.state.lock().authorization.status()
    }

    /// Whether the sensor has reported any status since construction.
    pub fn is_authorization_known(&self) -> bool {
        self.state.lock().authorization.is_known()
    }

    pub fn subscribe_latest(&self) -> watch::Receiver<Option<Position>> {
        self.latest.subscribe()
    }

    pub fn latest_stream(&self) -> impl Stream<Item = Option<Position>> {
        self.latest.stream()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<Position> {
        self.events.subscribe()
    }

    pub fn event_stream(&self) -> impl Stream<Item = Position> {
        self.events.stream()
    }

    /// Run `observer` inline for every accepted fix, before it is committed.
    pub fn observe_events<F>(&self, observer: F)
    where
        F: Fn(&Position) + Send + Sync + 'static,
    {
        self.events.observe(observer);
    }

    pub fn subscribe_status(&self) -> watch::Receiver<AuthorizationStatus> {
        self.state.lock().authorization.subscribe()
    }

    fn is_denied(&self) -> bool {
        self.state.lock().authorization.is_denied()
    }

    fn notify_denied(&self) {
        tracing::info!("location access denied; invoking denial handler");
        invoke_guarded(self.denied_handler.as_ref());
    }

    fn halt_and_notify(&self) {
        self.stop();
        self.notify_denied();
    }
}

impl SensorDelegate for LocationBroker {
    fn on_permission_changed(&self, status: AuthorizationStatus) {
        tracing::debug!(status = status.name(), "location authorization changed");
        self.state.lock().authorization.update(status);
        if status == AuthorizationStatus::Denied {
            self.halt_and_notify();
        }
    }

    fn on_position_received(&self, position: Position) {
        let _lifecycle = self.lifecycle.lock();
        if !self.is_active() {
            tracing::debug!("ignoring position delivered while inactive");
            return;
        }
        self.events.publish(position.clone());
        self.latest.commit(position);
    }

    fn on_failure(&self, error: SensorError) {
        match error.classify() {
            SensorFailure::PermissionRevokedDuringOperation => {
                tracing::warn!(%error, "location access revoked during operation");
                self.halt_and_notify();
            }
            SensorFailure::PositionUnavailable => {
                tracing::warn!(%error, "location sensor is unable to retrieve a location");
            }
            SensorFailure::Unknown => {
                tracing::warn!(%error, "location sensor failed with unknown error");
            }
        }
    }
}

impl fmt::Debug for LocationBroker {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        formatter
            .debug_struct("LocationBroker")
            .field("sensor", &self.sensor.id())
            .field("active", &state.active)
            .field("authorization", &state.authorization.status())
            .field("default_request_level", &self.default_request_level)
            .finish()
    }
}
