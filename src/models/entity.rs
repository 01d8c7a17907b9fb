//! Named establishments and their ranked distances.

use super::CoordinatePoint;

/// An establishment whose postcode has been resolved to a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Display name, not necessarily unique
    pub name: String,
    pub location: CoordinatePoint,
}

impl Entity {
    pub fn new(name: impl Into<String>, location: CoordinatePoint) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// One row of ranking output.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub name: String,
    pub distance_km: f64,
}

impl RankedResult {
    pub fn new(name: impl Into<String>, distance_km: f64) -> Self {
        Self {
            name: name.into(),
            distance_km,
        }
    }
}

impl std::fmt::Display for RankedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  -  {:.2} km", self.name, self.distance_km)
    }
}
