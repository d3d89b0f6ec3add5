//! Test-only catalog fixtures and an in-memory `CatalogStore`.

use std::collections::BTreeMap;

use crate::{Aspect, Catalog, CatalogStore, CatalogStoreError, DestinationRecord, Taxonomy};

/// Aspects of [`sample_catalog`], in taxonomy order.
pub const SAMPLE_ASPECTS: [&str; 6] = ["shrine", "hot spring", "nature", "food", "history", "art"];

const SAMPLE_ROWS: [(&str, &str, [f64; 6]); 16] = [
    ("Nikko", "Kanto", [4.8, 2.0, 3.9, 1.5, 4.5, 3.0]),
    ("Hakone", "Kanto", [2.1, 4.9, 3.8, 2.5, 2.0, 3.2]),
    ("Kamakura", "Kanto", [4.6, 0.5, 2.2, 3.0, 4.2, 2.4]),
    ("Kusatsu", "Kanto", [1.0, 5.0, 2.8, 2.2, 1.4, 0.8]),
    ("Kamikochi", "Chubu", [0.2, 1.2, 5.0, 1.0, 0.6, 0.4]),
    ("Takayama", "Chubu", [2.4, 1.8, 3.1, 3.6, 4.4, 3.3]),
    ("Kanazawa", "Chubu", [2.0, 1.0, 2.6, 4.7, 3.9, 4.6]),
    ("Kyoto", "Kansai", [5.0, 0.8, 2.9, 4.2, 5.0, 4.4]),
    ("Nara", "Kansai", [4.9, 0.3, 3.4, 2.0, 4.9, 3.6]),
    ("Arima", "Kansai", [1.5, 4.6, 2.4, 2.8, 2.6, 0.9]),
    ("Osaka", "Kansai", [1.8, 0.6, 0.9, 5.0, 2.7, 3.1]),
    ("Beppu", "Kyushu", [0.9, 4.8, 3.0, 3.3, 1.1, 1.2]),
    ("Dazaifu", "Kyushu", [4.4, 1.4, 2.0, 2.3, 4.0, 1.9]),
    ("Naoshima", "Shikoku", [0.4, 0.7, 3.3, 1.6, 1.0, 5.0]),
    ("Sapporo", "Hokkaido", [0.7, 2.4, 3.5, 4.8, 1.3, 1.7]),
    ("Shiretoko", "Hokkaido", [0.1, 2.9, 5.0, 2.6, 0.5, 0.2]),
];

/// A small, deterministic catalog of Japanese destinations.
///
/// # Panics
/// Never in practice: the fixture data is statically valid.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture data is statically valid")]
pub fn sample_catalog() -> Catalog {
    let aspects = SAMPLE_ASPECTS
        .iter()
        .map(|name| Aspect::new(*name, Some(format!("Places known for {name}"))))
        .collect::<Result<Vec<_>, _>>()
        .expect("fixture aspects are valid");
    let taxonomy = Taxonomy::new(aspects).expect("fixture taxonomy is valid");
    let records = SAMPLE_ROWS
        .iter()
        .map(|(name, region, scores)| record(name, region, scores))
        .collect();
    Catalog::new(taxonomy, records).expect("fixture catalog is valid")
}

/// Build a record from a score row aligned with [`SAMPLE_ASPECTS`].
#[must_use]
pub fn record(name: &str, region: &str, scores: &[f64]) -> DestinationRecord {
    DestinationRecord {
        name: name.to_owned(),
        region: region.to_owned(),
        scores: SAMPLE_ASPECTS
            .iter()
            .map(|aspect| (*aspect).to_owned())
            .zip(scores.iter().copied())
            .collect::<BTreeMap<_, _>>(),
        url: Some(format!("https://example.com/{}", name.to_lowercase())),
    }
}

/// In-memory `CatalogStore` holding a pre-built catalog.
#[derive(Debug, Clone)]
pub struct MemoryCatalogStore {
    catalog: Catalog,
}

impl MemoryCatalogStore {
    /// Wrap an existing catalog.
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load_catalog(&self) -> Result<Catalog, CatalogStoreError> {
        Ok(self.catalog.clone())
    }
}

/// Persist `catalog` into a fresh `SQLite` database at `path`.
///
/// # Errors
/// Returns the underlying `rusqlite` error when the database cannot be
/// created or populated.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_catalog(
    path: &std::path::Path,
    catalog: &Catalog,
) -> Result<(), rusqlite::Error> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(
        "CREATE TABLE aspects (position INTEGER NOT NULL, name TEXT NOT NULL, description TEXT);
         CREATE TABLE destinations (
             position INTEGER NOT NULL,
             name TEXT NOT NULL,
             region TEXT NOT NULL,
             url TEXT
         );
         CREATE TABLE destination_scores (
             destination TEXT NOT NULL,
             aspect TEXT NOT NULL,
             score REAL NOT NULL
         );",
    )?;
    let transaction = connection.transaction()?;
    let taxonomy = catalog.taxonomy();
    for (position, aspect) in taxonomy.aspects().iter().enumerate() {
        transaction.execute(
            "INSERT INTO aspects (position, name, description) VALUES (?1, ?2, ?3)",
            (position, aspect.name(), aspect.description()),
        )?;
    }
    for (position, destination) in catalog.destinations().iter().enumerate() {
        transaction.execute(
            "INSERT INTO destinations (position, name, region, url) VALUES (?1, ?2, ?3, ?4)",
            (
                position,
                destination.name(),
                destination.region(),
                destination.url(),
            ),
        )?;
        for (aspect, score) in taxonomy.names().zip(destination.scores()) {
            transaction.execute(
                "INSERT INTO destination_scores (destination, aspect, score) VALUES (?1, ?2, ?3)",
                (destination.name(), aspect, score),
            )?;
        }
    }
    transaction.commit()
}
