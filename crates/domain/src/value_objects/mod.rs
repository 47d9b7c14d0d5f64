//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod osm_id;
mod search_keyword;
mod travel_mode;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use osm_id::{ElementKind, OsmId};
pub use search_keyword::SearchKeyword;
pub use travel_mode::TravelMode;
