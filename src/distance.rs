//! Flat-grid distance between coordinate points.
//!
//! Offsets are treated as a Cartesian plane with no projection correction,
//! which only holds over short ranges.

use geo::{Distance, Euclidean};

use crate::models::CoordinatePoint;

const METERS_PER_KM: f64 = 1000.0;

/// Straight-line distance between two points in kilometers.
pub fn distance_km(a: &CoordinatePoint, b: &CoordinatePoint) -> f64 {
    Euclidean.distance(a.planar(), b.planar()) / METERS_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(east: f64, north: f64) -> CoordinatePoint {
        CoordinatePoint::new("ST10 1UF", east, north, "52.976801", "-2.004769")
    }

    #[test]
    fn test_distance_along_axis() {
        let origin = point(500_000.0, 500_000.0);
        let target = point(200_000.0, 500_000.0);
        assert_eq!(distance_km(&target, &origin), 300.0);
    }

    #[test]
    fn test_distance_symmetric_and_zero() {
        let a = point(550_000.0, 550_000.0);
        let b = point(700_000.0, 412_345.5);
        assert_eq!(distance_km(&a, &b), distance_km(&b, &a));
        assert_eq!(distance_km(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_diagonal() {
        let a = point(0.0, 0.0);
        let b = point(3_000.0, 4_000.0);
        assert!((distance_km(&a, &b) - 5.0).abs() < 1e-12);
    }
}
