//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod clock;
mod geocoding_port;
mod keyword_expander_port;
mod poi_source_port;

pub use clock::{Clock, ManualClock, SystemClock};
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodedLocation, GeocodingPort};
#[cfg(test)]
pub use keyword_expander_port::MockKeywordExpanderPort;
pub use keyword_expander_port::KeywordExpanderPort;
#[cfg(test)]
pub use poi_source_port::MockPoiSourcePort;
pub use poi_source_port::{PoiSourcePort, RawPoiRecord};
