//! SQLite-backed catalog store.
//!
//! The database carries three tables, each read in `position` order where a
//! position exists:
//!
//! - `aspects(position INTEGER, name TEXT, description TEXT NULL)`
//! - `destinations(position INTEGER, name TEXT, region TEXT, url TEXT NULL)`
//! - `destination_scores(destination TEXT, aspect TEXT, score REAL)`

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::{Aspect, Catalog, CatalogError, DestinationRecord, Taxonomy};

use super::{CatalogStore, CatalogStoreError};

const ASPECTS_SQL: &str = "SELECT name, description FROM aspects ORDER BY position";
const DESTINATIONS_SQL: &str = "SELECT name, region, url FROM destinations ORDER BY position";
const SCORES_SQL: &str = "SELECT destination, aspect, score FROM destination_scores";

/// Read-only catalog store backed by a `SQLite` database.
///
/// The catalog is read and validated when the store is opened, so a store
/// that opened successfully always yields a catalog.
pub struct SqliteCatalogStore {
    catalog: Catalog,
}

impl fmt::Debug for SqliteCatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogStore")
            .field("destinations", &self.catalog.len())
            .field("aspects", &self.catalog.taxonomy().len())
            .finish_non_exhaustive()
    }
}

impl SqliteCatalogStore {
    /// Open the database read-only and load its catalog.
    ///
    /// # Errors
    /// Returns [`CatalogStoreError`] when the database cannot be opened or
    /// queried, or when its rows violate the catalog invariants.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, CatalogStoreError> {
        let path = database_path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| CatalogStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = read_catalog(&connection)?;
        log::debug!(
            "loaded SQLite catalog from {} with {} destinations",
            path.display(),
            catalog.len()
        );
        Ok(Self { catalog })
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn load_catalog(&self) -> Result<Catalog, CatalogStoreError> {
        Ok(self.catalog.clone())
    }
}

fn query_error(operation: &'static str) -> impl Fn(rusqlite::Error) -> CatalogStoreError {
    move |source| CatalogStoreError::Query { operation, source }
}

fn read_catalog(connection: &Connection) -> Result<Catalog, CatalogStoreError> {
    let taxonomy = Taxonomy::new(read_aspects(connection)?)?;
    let records = read_destinations(connection)?;
    Ok(Catalog::new(taxonomy, records)?)
}

fn read_aspects(connection: &Connection) -> Result<Vec<Aspect>, CatalogStoreError> {
    let mut statement = connection
        .prepare(ASPECTS_SQL)
        .map_err(query_error("prepare aspect selection"))?;
    let rows = statement
        .query_map([], |row| {
            let name: String = row.get(0)?;
            let description: Option<String> = row.get(1)?;
            Ok((name, description))
        })
        .map_err(query_error("query aspects"))?;

    let mut aspects = Vec::new();
    for row in rows {
        let (name, description) = row.map_err(query_error("read aspect row"))?;
        aspects.push(Aspect::new(name, description)?);
    }
    Ok(aspects)
}

fn read_destinations(connection: &Connection) -> Result<Vec<DestinationRecord>, CatalogStoreError> {
    let mut statement = connection
        .prepare(DESTINATIONS_SQL)
        .map_err(query_error("prepare destination selection"))?;
    let rows = statement
        .query_map([], |row| {
            let name: String = row.get(0)?;
            let region: String = row.get(1)?;
            let url: Option<String> = row.get(2)?;
            Ok((name, region, url))
        })
        .map_err(query_error("query destinations"))?;

    let mut records = Vec::new();
    let mut positions = HashMap::new();
    for row in rows {
        let (name, region, url) = row.map_err(query_error("read destination row"))?;
        if positions.insert(name.clone(), records.len()).is_some() {
            return Err(CatalogError::DuplicateDestination { name }.into());
        }
        records.push(DestinationRecord {
            name,
            region,
            scores: BTreeMap::new(),
            url,
        });
    }

    let mut statement = connection
        .prepare(SCORES_SQL)
        .map_err(query_error("prepare score selection"))?;
    let scores = statement
        .query_map([], |row| {
            let destination: String = row.get(0)?;
            let aspect: String = row.get(1)?;
            let score: f64 = row.get(2)?;
            Ok((destination, aspect, score))
        })
        .map_err(query_error("query destination scores"))?;

    for row in scores {
        let (destination, aspect, score) = row.map_err(query_error("read score row"))?;
        let record = positions
            .get(&destination)
            .and_then(|&position| records.get_mut(position))
            .ok_or(CatalogStoreError::UnknownScoredDestination { destination })?;
        record.scores.insert(aspect, score);
    }
    Ok(records)
}
