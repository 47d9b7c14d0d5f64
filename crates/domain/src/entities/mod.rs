//! Domain entities

mod point_of_interest;

pub use point_of_interest::{ADDRESS_PLACEHOLDER, PointOfInterest};
