//! Domain layer for FoodRadar
//!
//! Contains the point-of-interest entity, value objects, and the text
//! matching rules used to decide whether a venue fits a search.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod matching;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use matching::{matches_attribute, matches_keywords, normalize};
pub use value_objects::*;
