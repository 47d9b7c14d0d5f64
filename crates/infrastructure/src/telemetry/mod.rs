//! Logging and tracing setup

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_tracing};
