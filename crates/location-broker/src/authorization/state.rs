//! Current authorization status cell.

use tokio::sync::watch;

use super::status::{AllowedStatusSet, AuthorizationStatus};

/// Holds the most recent status reported by the sensor.
///
/// The status is unknown until the first permission callback fires; reads
/// report `NotDetermined` in the meantime. Every update is broadcast to
/// status subscribers, whether or not anyone is listening.
#[derive(Debug)]
pub struct AuthorizationState {
    current: Option<AuthorizationStatus>,
    allowed: AllowedStatusSet,
    notifier: watch::Sender<AuthorizationStatus>,
}

impl AuthorizationState {
    pub fn new(allowed: AllowedStatusSet) -> Self {
        let (notifier, _) = watch::channel(AuthorizationStatus::NotDetermined);
        Self {
            current: None,
            allowed,
            notifier,
        }
    }

    pub fn status(&self) -> AuthorizationStatus {
        self.current.unwrap_or(AuthorizationStatus::NotDetermined)
    }

    /// Whether a permission callback has been received since construction.
    pub fn is_known(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_sufficient(&self) -> bool {
        self.current
            .is_some_and(|status| self.allowed.contains(status))
    }

    pub fn is_denied(&self) -> bool {
        self.current == Some(AuthorizationStatus::Denied)
    }

    pub fn allowed(&self) -> &AllowedStatusSet {
        &self.allowed
    }

    /// Record a status reported by the sensor. No validation is applied.
    pub fn update(&mut self, status: AuthorizationStatus) {
        self.current = Some(status);
        self.notifier.send_replace(status);
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthorizationStatus> {
        self.notifier.subscribe()
    }
}
