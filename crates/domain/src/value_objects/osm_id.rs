//! OpenStreetMap element identifier

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// OSM element type
///
/// Numeric ids are only unique within one element type, so the type is
/// part of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A single point
    Node,
    /// A line or closed area
    Way,
    /// A group of elements (multipolygons etc.)
    Relation,
    /// Type not reported by the source
    Unknown,
}

impl ElementKind {
    /// Parse the `type` field of an Overpass element
    #[must_use]
    pub fn from_osm_type(value: &str) -> Self {
        match value {
            "node" => Self::Node,
            "way" => Self::Way,
            "relation" => Self::Relation,
            _ => Self::Unknown,
        }
    }

    /// Lower-case name as used by OSM
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable identifier of a venue, e.g. `node/123456`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OsmId {
    kind: ElementKind,
    id: i64,
}

impl OsmId {
    /// Create a new identifier
    #[must_use]
    pub const fn new(kind: ElementKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// Element type
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Numeric id within the element type
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Link to the element on openstreetmap.org
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://www.openstreetmap.org/{}/{}", self.kind, self.id)
    }
}

impl fmt::Display for OsmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

impl FromStr for OsmId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('/')
            .ok_or_else(|| DomainError::InvalidIdentifier(s.to_string()))?;
        let kind = ElementKind::from_osm_type(kind);
        if kind == ElementKind::Unknown {
            return Err(DomainError::InvalidIdentifier(s.to_string()));
        }
        let id = id
            .parse()
            .map_err(|_| DomainError::InvalidIdentifier(s.to_string()))?;
        Ok(Self { kind, id })
    }
}
