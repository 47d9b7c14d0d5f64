//! Travel mode value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// How the user intends to reach a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// On foot
    #[default]
    Walking,
    /// By bicycle
    Cycling,
    /// By car or motorbike
    Driving,
}

impl TravelMode {
    /// Average speed assumed for time estimates, in km/h
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        match self {
            Self::Walking => 5.0,
            Self::Cycling => 15.0,
            Self::Driving => 30.0,
        }
    }

    /// Estimated travel time in whole minutes (rounded up, at least 1)
    #[must_use]
    pub fn estimate_minutes(&self, distance_m: f64) -> u32 {
        let minutes = (distance_m.max(0.0) * 60.0 / (self.speed_kmh() * 1000.0)).ceil();
        (minutes as u32).max(1)
    }

    /// Lower-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Driving => "driving",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walking" | "walk" | "foot" => Ok(Self::Walking),
            "cycling" | "bike" | "bicycle" => Ok(Self::Cycling),
            "driving" | "drive" | "car" => Ok(Self::Driving),
            other => Err(DomainError::InvalidTravelMode(other.to_string())),
        }
    }
}
