//! Permission-gated location broker.
//!
//! Wraps a platform location sensor behind [`sensor::SensorPort`], enforces
//! the authorization state machine before arming it, and republishes
//! accepted fixes on an edge-triggered event channel and a replay-of-one
//! latest-value channel.

pub mod authorization;
pub mod broker;
pub mod channel;
pub mod config;
pub mod error;
pub mod sensor;

pub use crate::authorization::{
    AllowedStatusSet, AuthorizationRequestLevel, AuthorizationStatus, DeniedAuthorizationHandler,
    SettingsPrompt,
};
pub use crate::broker::LocationBroker;
pub use crate::config::BrokerConfig;
pub use crate::error::{LocationError, LocationResult, NotAuthorizedError};
pub use crate::sensor::{Position, SensorDelegate, SensorPort};
