//! Test helpers for laying out catalogs and session requests on disk.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use vantage_core::test_support::sample_catalog;
use vantage_core::{CatalogDocument, Condition, SessionRequest, VisitedDestination};

/// Visited destinations of the sample catalog with one good aspect each.
pub(super) const VISITED: [(&str, &str); 5] = [
    ("Nikko", "shrine"),
    ("Hakone", "hot spring"),
    ("Kamakura", "shrine"),
    ("Kusatsu", "hot spring"),
    ("Kamikochi", "nature"),
];

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding the files a command reads.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write the sample catalog as JSON and return its path.
    pub(super) fn json_catalog(&self) -> Utf8PathBuf {
        let path = self.path("catalog.json");
        let document = CatalogDocument::from_catalog(&sample_catalog());
        let payload = serde_json::to_vec_pretty(&document).expect("serialise catalog");
        write_utf8(&path, &payload);
        path
    }

    /// Write the sample catalog as `SQLite` and return its path.
    #[cfg(feature = "store-sqlite")]
    pub(super) fn sqlite_catalog(&self) -> Utf8PathBuf {
        let path = self.path("catalog.db");
        vantage_core::test_support::write_sqlite_catalog(path.as_std_path(), &sample_catalog())
            .expect("write sqlite catalog");
        path
    }

    /// Write a five-destination request and return its path.
    pub(super) fn request(&self, condition: Condition, with_feedback: bool) -> Utf8PathBuf {
        let path = self.path("request.json");
        let request = sample_request(condition, with_feedback);
        let payload = serde_json::to_vec_pretty(&request).expect("serialise request");
        write_utf8(&path, &payload);
        path
    }
}

pub(super) fn sample_request(condition: Condition, with_feedback: bool) -> SessionRequest {
    SessionRequest {
        visited: VISITED
            .iter()
            .map(|&(name, aspect)| {
                let good: Vec<&str> = if with_feedback { vec![aspect] } else { Vec::new() };
                VisitedDestination::new(name, good)
            })
            .collect(),
        interest: ["food"].into_iter().collect(),
        condition,
    }
}
