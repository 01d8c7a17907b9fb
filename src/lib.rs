//! Pubfinder - nearest establishments by planar distance from a postcode
//!
//! This library provides the lookup, catalog and ranking stages used by the
//! `pubfinder` binary.

pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
pub mod models;
pub mod postcodes;
pub mod ranker;
pub mod search;
pub mod source;

pub use catalog::CatalogSource;
pub use error::{FinderError, Result};
pub use models::{CoordinatePoint, Entity, RankedResult};
pub use postcodes::{PostcodeFile, PostcodeIndex, PostcodeLookup};
pub use ranker::{rank, BoundedRanker};
pub use search::{find_nearest, SearchOutcome};
