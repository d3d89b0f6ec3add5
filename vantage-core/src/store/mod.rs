//! Catalog stores supplying the taxonomy and destination table.
//!
//! The `CatalogStore` trait defines a read-only source for a validated
//! [`Catalog`]. Stores are consulted once per session; the resulting catalog
//! is then shared, unmodified, by every scoring run.

use thiserror::Error;

use crate::{Catalog, CatalogError, TaxonomyError};

#[cfg(feature = "serde")]
mod json;
#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "serde")]
pub use json::{CatalogDocument, JsonCatalogStore};
#[cfg(feature = "store-sqlite")]
pub use sqlite::SqliteCatalogStore;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogStoreError {
    /// Reading the catalog payload failed.
    #[error("failed to read catalog: {source}")]
    Read {
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The JSON payload could not be decoded.
    #[cfg(feature = "serde")]
    #[error("failed to parse catalog JSON: {source}")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Opening the `SQLite` database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open SQLite catalog at {path}: {source}")]
    OpenDatabase {
        /// Requested database path.
        path: std::path::PathBuf,
        /// Source error from `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing or executing a catalog query failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to query {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error from `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A score row referenced a destination with no destination row.
    #[error("scores reference unknown destination {destination:?}")]
    UnknownScoredDestination {
        /// Destination named by the orphaned score row.
        destination: String,
    },
    /// The stored aspects did not form a valid taxonomy.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
    /// The stored destinations did not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read-only access to a destination catalog.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use vantage_core::{Catalog, CatalogStore, CatalogStoreError, DestinationRecord, Taxonomy};
///
/// struct FixedStore;
///
/// impl CatalogStore for FixedStore {
///     fn load_catalog(&self) -> Result<Catalog, CatalogStoreError> {
///         let taxonomy = Taxonomy::from_names(["nature"])?;
///         let record = DestinationRecord {
///             name: "Kamikochi".into(),
///             region: "Chubu".into(),
///             scores: BTreeMap::from([("nature".into(), 1.0)]),
///             url: None,
///         };
///         Ok(Catalog::new(taxonomy, vec![record])?)
///     }
/// }
///
/// let catalog = FixedStore.load_catalog().expect("catalog loads");
/// assert!(catalog.destination("Kamikochi").is_some());
/// ```
pub trait CatalogStore {
    /// Load and validate the catalog.
    ///
    /// # Errors
    /// Returns [`CatalogStoreError`] when the source is unreadable or its
    /// contents violate the catalog invariants.
    fn load_catalog(&self) -> Result<Catalog, CatalogStoreError>;
}
