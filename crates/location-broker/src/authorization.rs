//! Authorization state machine and denial handling.

pub mod denied;
pub mod state;
pub mod status;

pub use denied::{
    DeniedAuthorizationHandler, DeniedPrompt, SettingsPrompt, SettingsPromptHandler,
    SharedDeniedHandler,
};
pub use state::AuthorizationState;
pub use status::{AllowedStatusSet, AuthorizationRequestLevel, AuthorizationStatus};
