//! Catalog of named establishments, resolved lazily against a postcode lookup.

use std::path::PathBuf;

use csv::StringRecordsIntoIter;
use tracing::info;

use crate::error::{FinderError, Result};
use crate::models::Entity;
use crate::postcodes::PostcodeLookup;
use crate::source::{fields, open_records};

/// Number of columns in a catalog record: `name, postcode`.
const CATALOG_FIELDS: usize = 2;

/// Where catalog entities come from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Headerless `name, postcode` file, resolved record by record
    File(PathBuf),
    /// Entities that already carry their location
    Resolved(Vec<Entity>),
}

impl CatalogSource {
    /// Catalog backed by a file on disk.
    ///
    /// A missing path is accepted here and reported when the catalog is read;
    /// a path that exists but is not a regular file is rejected immediately.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() && !path.is_file() {
            return Err(FinderError::InvalidInputShape {
                path,
                reason: "not a regular file".to_string(),
            });
        }
        Ok(CatalogSource::File(path))
    }

    pub fn resolved(entities: Vec<Entity>) -> Self {
        CatalogSource::Resolved(entities)
    }

    /// Start streaming entities.
    ///
    /// File catalogs resolve each postcode through `lookup` as the iterator
    /// advances. Entries whose postcode is unknown are logged and skipped;
    /// any other failure is yielded once and ends the stream.
    pub fn entities<L: PostcodeLookup>(self, lookup: L) -> Result<Entities<L>> {
        let inner = match self {
            CatalogSource::File(path) => {
                let records = open_records(&path)?.into_records();
                Inner::File(FileEntities {
                    path,
                    records,
                    lookup,
                    done: false,
                })
            }
            CatalogSource::Resolved(entities) => Inner::Resolved(entities.into_iter()),
        };
        Ok(Entities { inner })
    }
}

/// Lazy stream of catalog entities.
pub struct Entities<L> {
    inner: Inner<L>,
}

enum Inner<L> {
    File(FileEntities<L>),
    Resolved(std::vec::IntoIter<Entity>),
}

struct FileEntities<L> {
    path: PathBuf,
    records: StringRecordsIntoIter<Box<dyn std::io::Read>>,
    lookup: L,
    done: bool,
}

impl<L: PostcodeLookup> FileEntities<L> {
    fn resolve(&self, record: &csv::StringRecord) -> Result<Option<Entity>> {
        let [name, postcode] = fields::<CATALOG_FIELDS>(record, &self.path)?;
        match self.lookup.lookup(postcode) {
            Ok(location) => Ok(Some(Entity::new(name, location))),
            Err(e) if e.is_not_found() => {
                info!("Skipping {} - postcode {} not found", name, postcode);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl<L: PostcodeLookup> Iterator for FileEntities<L> {
    type Item = Result<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(source) => {
                    self.done = true;
                    return Some(Err(FinderError::Csv {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };

            match self.resolve(&record) {
                Ok(Some(entity)) => return Some(Ok(entity)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<L: PostcodeLookup> Iterator for Entities<L> {
    type Item = Result<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::File(file) => file.next(),
            Inner::Resolved(entities) => entities.next().map(Ok),
        }
    }
}
