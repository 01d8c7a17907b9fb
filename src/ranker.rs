//! Bounded top-N ranking by distance from an origin.
//!
//! Only the best `max_return` candidates are ever held. Once the buffer is
//! full a candidate has to beat the current worst entry to get in, so the
//! whole stream never needs sorting.

use tracing::debug;

use crate::distance::distance_km;
use crate::error::Result;
use crate::models::{CoordinatePoint, Entity, RankedResult};

/// Sorted buffer of the closest candidates seen so far.
#[derive(Debug, Clone)]
pub struct BoundedRanker {
    max_return: usize,
    max_distance: f64,
    results: Vec<RankedResult>,
}

impl BoundedRanker {
    pub fn new(max_return: usize, max_distance: f64) -> Self {
        Self {
            max_return,
            max_distance,
            results: Vec::with_capacity(max_return.min(1024)),
        }
    }

    /// Offer a candidate, returning whether it was kept.
    ///
    /// Candidates at or beyond `max_distance` are dropped. Equal distances
    /// keep the order they were offered in, so a full buffer never swaps its
    /// worst entry for a tie.
    pub fn offer(&mut self, name: &str, distance_km: f64) -> bool {
        if distance_km >= self.max_distance || self.max_return == 0 {
            return false;
        }
        if self.results.len() >= self.max_return {
            match self.worst() {
                Some(worst) if distance_km < worst => {}
                _ => return false,
            }
        }

        let at = self
            .results
            .partition_point(|r| r.distance_km <= distance_km);
        self.results.insert(at, RankedResult::new(name, distance_km));
        self.results.truncate(self.max_return);
        true
    }

    /// Distance of the last entry currently held.
    pub fn worst(&self) -> Option<f64> {
        self.results.last().map(|r| r.distance_km)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<RankedResult> {
        self.results
    }
}

/// Rank a stream of entities by distance from `origin`.
///
/// The first error yielded by the stream aborts ranking.
pub fn rank<I>(
    entities: I,
    origin: &CoordinatePoint,
    max_return: usize,
    max_distance: f64,
) -> Result<Vec<RankedResult>>
where
    I: IntoIterator<Item = Result<Entity>>,
{
    let mut ranker = BoundedRanker::new(max_return, max_distance);
    let mut seen = 0usize;

    for entity in entities {
        let entity = entity?;
        seen += 1;
        let distance = distance_km(&entity.location, origin);
        ranker.offer(&entity.name, distance);
    }

    debug!("Ranked {} entities, kept {}", seen, ranker.len());
    Ok(ranker.into_results())
}
