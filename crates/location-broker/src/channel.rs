//! Notification channels for accepted positions.
//!
//! Two policies share one publish site in the broker:
//! - [`EventChannel`]: edge-triggered, no replay to late subscribers.
//! - [`LatestChannel`]: replay-of-one, late subscribers see the current value.

pub mod event;
pub mod latest;

pub use event::{EventChannel, MAX_EVENT_CAPACITY};
pub use latest::LatestChannel;
