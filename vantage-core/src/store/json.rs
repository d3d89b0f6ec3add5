//! JSON catalog documents.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{Aspect, Catalog, DestinationRecord, Taxonomy};

use super::{CatalogStore, CatalogStoreError};

/// On-disk shape of a JSON catalog.
///
/// ```json
/// {
///   "aspects": [{ "name": "hot spring", "description": "..." }],
///   "destinations": [
///     { "name": "Kusatsu", "region": "Kanto", "scores": { "hot spring": 0.9 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Aspects in taxonomy order.
    pub aspects: Vec<Aspect>,
    /// Destinations in catalog order.
    pub destinations: Vec<DestinationRecord>,
}

impl CatalogDocument {
    /// Capture a validated catalog as a document.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let taxonomy = catalog.taxonomy();
        let destinations = catalog
            .destinations()
            .iter()
            .map(|destination| DestinationRecord {
                name: destination.name().to_owned(),
                region: destination.region().to_owned(),
                scores: taxonomy
                    .names()
                    .map(str::to_owned)
                    .zip(destination.scores().iter().copied())
                    .collect(),
                url: destination.url().map(str::to_owned),
            })
            .collect();
        Self {
            aspects: taxonomy.aspects().to_vec(),
            destinations,
        }
    }
}

/// Catalog store backed by a parsed JSON document.
///
/// # Examples
/// ```
/// use vantage_core::{CatalogStore, JsonCatalogStore};
///
/// let json = r#"{
///     "aspects": [{ "name": "nature" }],
///     "destinations": [{ "name": "Oze", "region": "Kanto", "scores": { "nature": 4.0 } }]
/// }"#;
/// let store = JsonCatalogStore::from_reader(json.as_bytes()).expect("valid JSON");
/// let catalog = store.load_catalog().expect("valid catalog");
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCatalogStore {
    document: CatalogDocument,
}

impl JsonCatalogStore {
    /// Parse a catalog document from `reader`.
    ///
    /// # Errors
    /// Returns [`CatalogStoreError::Read`] or [`CatalogStoreError::Parse`]
    /// when the payload cannot be read or decoded.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogStoreError> {
        let mut payload = String::new();
        reader
            .read_to_string(&mut payload)
            .map_err(|source| CatalogStoreError::Read { source })?;
        let document = serde_json::from_str(&payload)
            .map_err(|source| CatalogStoreError::Parse { source })?;
        Ok(Self { document })
    }

    /// Wrap an already-decoded document.
    #[must_use]
    pub const fn from_document(document: CatalogDocument) -> Self {
        Self { document }
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load_catalog(&self) -> Result<Catalog, CatalogStoreError> {
        let taxonomy = Taxonomy::new(self.document.aspects.clone())?;
        let catalog = Catalog::new(taxonomy, self.document.destinations.clone())?;
        log::debug!(
            "loaded JSON catalog with {} destinations over {} aspects",
            catalog.len(),
            catalog.taxonomy().len()
        );
        Ok(catalog)
    }
}
