//! Reaction to a denied authorization.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::LocationResult;

/// Invoked whenever the broker observes a `Denied` status.
///
/// Implementations must not block. Panics are caught and logged by the
/// broker; they never reach the caller.
pub trait DeniedAuthorizationHandler: Send + Sync {
    fn on_denied(&self);
}

impl<F> DeniedAuthorizationHandler for F
where
    F: Fn() + Send + Sync,
{
    fn on_denied(&self) {
        self()
    }
}

pub type SharedDeniedHandler = Arc<dyn DeniedAuthorizationHandler>;

/// Platform collaborator that asks the user to open the system settings.
pub trait SettingsPrompt: Send + Sync {
    fn present(&self, prompt: &DeniedPrompt) -> LocationResult<()>;
}

/// Text shown by the settings prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeniedPrompt {
    pub title: String,
    pub message: String,
}

impl Default for DeniedPrompt {
    fn default() -> Self {
        Self {
            title: "Enable Location Access".to_string(),
            message: "The location access for this app is set to 'never'. Enable location \
                      access in the application settings. Go to Settings now?"
                .to_string(),
        }
    }
}

/// Default handler: presents a "go to settings" prompt.
pub struct SettingsPromptHandler {
    prompt: Arc<dyn SettingsPrompt>,
    text: DeniedPrompt,
}

impl SettingsPromptHandler {
    pub fn new(prompt: Arc<dyn SettingsPrompt>, text: DeniedPrompt) -> Self {
        Self { prompt, text }
    }
}

impl DeniedAuthorizationHandler for SettingsPromptHandler {
    fn on_denied(&self) {
        if let Err(error) = self.prompt.present(&self.text) {
            tracing::warn!(%error, "failed to present location settings prompt");
        }
    }
}

/// Run the handler, swallowing and logging a panic.
pub(crate) fn invoke_guarded(handler: &dyn DeniedAuthorizationHandler) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.on_denied()));
    if outcome.is_err() {
        tracing::error!("denied authorization handler panicked");
    }
}
