//! Loading and validating CLI inputs, and writing JSON output.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use serde::Serialize;
use vantage_core::{Catalog, CatalogStore, CatalogStoreError, JsonCatalogStore, SessionRequest};

use crate::CliError;
use crate::fs::{file_is_file, open_utf8_file};

/// Storage format of a catalog file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogFormat {
    Json,
    Sqlite,
}

impl CatalogFormat {
    /// `.db` and `.sqlite` files are `SQLite`; anything else is JSON.
    pub(crate) fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(extension)
                if extension.eq_ignore_ascii_case("db")
                    || extension.eq_ignore_ascii_case("sqlite") =>
            {
                Self::Sqlite
            }
            _ => Self::Json,
        }
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load and validate the catalog at `path`.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<Catalog, CliError> {
    let catalog = match CatalogFormat::from_path(path) {
        CatalogFormat::Json => load_json_catalog(path)?,
        CatalogFormat::Sqlite => load_sqlite_catalog(path)?,
    };
    log::info!(
        "loaded catalog {path} with {} destinations over {} aspects",
        catalog.len(),
        catalog.taxonomy().len()
    );
    Ok(catalog)
}

fn store_error(path: &Utf8Path) -> impl FnOnce(CatalogStoreError) -> CliError + '_ {
    move |source| CliError::LoadCatalog {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

fn load_json_catalog(path: &Utf8Path) -> Result<Catalog, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    JsonCatalogStore::from_reader(BufReader::new(file))
        .and_then(|store| store.load_catalog())
        .map_err(store_error(path))
}

#[cfg(feature = "store-sqlite")]
fn load_sqlite_catalog(path: &Utf8Path) -> Result<Catalog, CliError> {
    vantage_core::SqliteCatalogStore::open(path.as_std_path())
        .and_then(|store| store.load_catalog())
        .map_err(store_error(path))
}

#[cfg(not(feature = "store-sqlite"))]
fn load_sqlite_catalog(_path: &Utf8Path) -> Result<Catalog, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "loading a SQLite catalog",
    })
}

/// Load a JSON-encoded [`SessionRequest`] from disk.
pub(crate) fn load_session_request(path: &Utf8Path) -> Result<SessionRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSessionRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        CliError::ParseSessionRequest {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Validate `request` against `catalog`, attributing failures to `path`.
pub(crate) fn validate_session(
    request: &SessionRequest,
    catalog: &Catalog,
    path: &Utf8Path,
) -> Result<(), CliError> {
    request
        .validate_against(catalog)
        .map_err(|source| CliError::InvalidSessionRequest {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
