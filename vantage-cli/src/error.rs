//! Error types emitted by the Vantage CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use vantage_core::{CatalogStoreError, RecommendError, SessionRequestError};
use vantage_scorer::{BalanceError, ComparisonError};

/// Errors emitted by the Vantage CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that could supply it.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature that must be enabled.
        feature: &'static str,
        /// Operation that needed it.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that was not found.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the catalog file failed.
    #[error("failed to open catalog at {path:?}: {source}")]
    OpenCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Loading or validating the catalog failed.
    #[error("failed to load catalog from {path:?}: {source}")]
    LoadCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Store error.
        #[source]
        source: Box<CatalogStoreError>,
    },
    /// Opening the session request file failed.
    #[error("failed to open session request at {path:?}: {source}")]
    OpenSessionRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Session request JSON could not be decoded.
    #[error("failed to parse session request JSON at {path:?}: {source}")]
    ParseSessionRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The session request failed validation against the catalog.
    #[error("session request in {path:?} failed validation: {source}")]
    InvalidSessionRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: SessionRequestError,
    },
    /// The engine rejected the session.
    #[error("recommendation failed: {0}")]
    Recommend(#[from] RecommendError),
    /// Comparing two conditions failed.
    #[error("comparison failed: {0}")]
    Compare(#[from] ComparisonError),
    /// Opening the assignment history failed.
    #[error("failed to open assignment history at {path:?}: {source}")]
    OpenHistory {
        /// History path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Assignment history JSON could not be decoded.
    #[error("failed to parse assignment history JSON at {path:?}: {source}")]
    ParseHistory {
        /// History path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// No condition could be assigned.
    #[error("condition assignment failed: {0}")]
    Balance(#[from] BalanceError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
