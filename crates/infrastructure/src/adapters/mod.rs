//! Adapters implementing application ports

mod nominatim_adapter;
mod overpass_adapter;

pub use nominatim_adapter::NominatimGeocoder;
pub use overpass_adapter::OverpassPoiSource;
