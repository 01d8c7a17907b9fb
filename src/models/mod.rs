//! Core data models for the nearby search.

pub mod entity;
pub mod point;

pub use entity::{Entity, RankedResult};
pub use point::{normalize_postcode, CoordinatePoint};
