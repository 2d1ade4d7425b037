mod adapters;
pub mod factory;
pub mod types;

pub use adapters::memory::{MemorySensor, SensorCalls};
pub use adapters::portable::PortableSensor;
pub use adapters::{SensorDelegate, SensorPort, SharedSensor, WeakDelegate};
pub use factory::{default_broker_config, default_request_level, default_sensor};
pub use types::{
    Accuracy, ActivityProfile, Coordinate, Position, SensorConfig, SensorError, SensorFailure,
};
