//! End-to-end nearby search: resolve the origin, stream the catalog, rank.

use tracing::debug;

use crate::catalog::CatalogSource;
use crate::error::Result;
use crate::models::{CoordinatePoint, RankedResult};
use crate::postcodes::PostcodeLookup;
use crate::ranker::rank;

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub origin: CoordinatePoint,
    pub results: Vec<RankedResult>,
}

/// Find the entities in `catalog` closest to `reference`.
///
/// Failing to resolve `reference` is fatal, unlike catalog entries with
/// unknown postcodes which are skipped.
pub fn find_nearest<L: PostcodeLookup>(
    lookup: &L,
    reference: &str,
    catalog: CatalogSource,
    max_return: usize,
    max_distance: f64,
) -> Result<SearchOutcome> {
    let origin = lookup.lookup(reference)?;
    debug!(
        "Origin {} at ({}, {})",
        origin.postcode, origin.latitude, origin.longitude
    );

    let entities = catalog.entities(lookup)?;
    let results = rank(entities, &origin, max_return, max_distance)?;

    Ok(SearchOutcome { origin, results })
}
