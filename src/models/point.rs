//! Planar coordinate points keyed by postcode.

use geo::Point;

/// Lookup key for a postcode: lowercase with all whitespace removed.
pub fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A postcode location on the planar grid.
///
/// `east` and `north` are offsets in meters from the grid origin.
/// `latitude` and `longitude` are carried through for display only and are
/// never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatePoint {
    /// Postcode as written in the source
    pub postcode: String,
    pub east: f64,
    pub north: f64,
    pub latitude: String,
    pub longitude: String,
}

impl CoordinatePoint {
    pub fn new(
        postcode: impl Into<String>,
        east: f64,
        north: f64,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            postcode: postcode.into(),
            east,
            north,
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Build a point from raw text fields, parsing the planar offsets.
    ///
    /// Returns a description of the offending field on failure.
    pub fn parse(
        postcode: &str,
        east: &str,
        north: &str,
        latitude: &str,
        longitude: &str,
    ) -> Result<Self, String> {
        Ok(Self::new(
            postcode,
            parse_offset("east", east)?,
            parse_offset("north", north)?,
            latitude,
            longitude,
        ))
    }

    pub fn key(&self) -> String {
        normalize_postcode(&self.postcode)
    }

    pub fn planar(&self) -> Point<f64> {
        Point::new(self.east, self.north)
    }
}

fn parse_offset(field: &str, raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{} value {:?} is not a number", field, raw))?;
    if !value.is_finite() {
        return Err(format!("{} value {:?} is not finite", field, raw));
    }
    Ok(value)
}
