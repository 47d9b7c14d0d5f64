//! Application layer - Use cases and orchestration
//!
//! Turns a search request into a list of nearby food venues: keyword
//! expansion, candidate fetching through [`ports::PoiSourcePort`],
//! filtering and deduplication, and time-bounded memoization of the
//! result. Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
