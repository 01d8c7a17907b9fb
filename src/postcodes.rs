//! Postcode to coordinate resolution.
//!
//! Two strategies share the [`PostcodeLookup`] contract: [`PostcodeFile`]
//! rescans the source on every call, [`PostcodeIndex`] loads it once into a
//! keyed map.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use tracing::{debug, info};

use crate::error::{FinderError, Result};
use crate::models::{normalize_postcode, CoordinatePoint};
use crate::source::{fields, open_records, record_line};

/// Number of columns in a coordinate record:
/// `postcode, east, north, latitude, longitude`.
const COORDINATE_FIELDS: usize = 5;

/// Resolves a postcode to its coordinate point.
pub trait PostcodeLookup {
    /// Find the first record whose normalized postcode equals `postcode`.
    fn lookup(&self, postcode: &str) -> Result<CoordinatePoint>;
}

impl<L: PostcodeLookup + ?Sized> PostcodeLookup for &L {
    fn lookup(&self, postcode: &str) -> Result<CoordinatePoint> {
        (**self).lookup(postcode)
    }
}

/// Linear scan over a coordinate file, reopened for every lookup.
#[derive(Debug, Clone)]
pub struct PostcodeFile {
    path: PathBuf,
}

impl PostcodeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PostcodeLookup for PostcodeFile {
    fn lookup(&self, postcode: &str) -> Result<CoordinatePoint> {
        let wanted = normalize_postcode(postcode);
        let mut reader = open_records(&self.path)?;

        for result in reader.records() {
            let record = result.map_err(|source| FinderError::Csv {
                path: self.path.clone(),
                source,
            })?;
            // Only the postcode column is needed to reject a row
            let Some(stored) = record.get(0) else {
                continue;
            };
            if normalize_postcode(stored) != wanted {
                continue;
            }

            let point = parse_point(&record, &self.path)?;
            debug!("Found {}", postcode);
            return Ok(point);
        }

        Err(FinderError::PostcodeNotFound {
            postcode: postcode.to_string(),
        })
    }
}

/// All coordinate records held in memory, keyed by normalized postcode.
#[derive(Debug, Clone, Default)]
pub struct PostcodeIndex {
    points: HashMap<String, CoordinatePoint>,
}

impl PostcodeIndex {
    /// Scan a coordinate file once and index every record.
    ///
    /// The first record for a repeated postcode wins, matching the order a
    /// [`PostcodeFile`] scan would find them in.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading postcode index from {}", path.display());

        let mut reader = open_records(path)?;
        let mut points = HashMap::new();

        for result in reader.records() {
            let record = result.map_err(|source| FinderError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            let point = parse_point(&record, path)?;
            points.entry(point.key()).or_insert(point);
        }

        info!("Loaded {} postcodes", points.len());
        Ok(Self { points })
    }

    pub fn from_points(points: impl IntoIterator<Item = CoordinatePoint>) -> Self {
        let mut index = Self::default();
        for point in points {
            index.points.entry(point.key()).or_insert(point);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PostcodeLookup for PostcodeIndex {
    fn lookup(&self, postcode: &str) -> Result<CoordinatePoint> {
        match self.points.get(&normalize_postcode(postcode)) {
            Some(point) => {
                debug!("Found {}", postcode);
                Ok(point.clone())
            }
            None => Err(FinderError::PostcodeNotFound {
                postcode: postcode.to_string(),
            }),
        }
    }
}

fn parse_point(record: &csv::StringRecord, path: &Path) -> Result<CoordinatePoint> {
    let [postcode, east, north, latitude, longitude] =
        fields::<COORDINATE_FIELDS>(record, path)?;
    CoordinatePoint::parse(postcode, east, north, latitude, longitude).map_err(|reason| {
        FinderError::MalformedRecord {
            path: path.to_path_buf(),
            line: record_line(record),
            reason,
        }
    })
}
