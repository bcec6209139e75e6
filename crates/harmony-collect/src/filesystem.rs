//! Filesystem schema discovery.

use std::fs;
use std::path::PathBuf;

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

use harmony_core::Document;

use crate::{Collect, CollectError};

/// Collects every `*.json` file under the configured search paths, parsing
/// each as one schema document.
///
/// Walks raw: standard filters (gitignore, hidden-file skipping) are
/// disabled so bundled resource trees are read completely. Entries are
/// sorted by path for deterministic registration order. A missing search
/// path is skipped with a warning; an unreadable or unparseable file fails
/// the whole collect.
#[derive(Debug, Clone)]
pub struct FilesystemCollector {
    paths: Vec<PathBuf>,
}

impl FilesystemCollector {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured search paths.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Collect for FilesystemCollector {
    fn collect(&self) -> Result<Vec<Document>, CollectError> {
        let mut documents = Vec::new();

        for root in &self.paths {
            if !root.exists() {
                tracing::warn!(path = %root.display(), "schema search path does not exist");
                continue;
            }

            let mut overrides = OverrideBuilder::new(root);
            overrides.add("*.json").expect("valid include glob");

            let mut builder = WalkBuilder::new(root);
            builder
                .standard_filters(false)
                .hidden(false)
                .overrides(overrides.build().expect("valid overrides"))
                .sort_by_file_path(std::cmp::Ord::cmp);

            for entry in builder.build() {
                let entry = entry?;
                if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                    continue;
                }
                let path = entry.path();
                let raw = fs::read_to_string(path)?;
                let document: Document =
                    serde_json::from_str(&raw).map_err(|source| CollectError::Parse {
                        path: path.to_path_buf(),
                        source,
                    })?;
                tracing::debug!(path = %path.display(), "collected schema document");
                documents.push(document);
            }
        }

        Ok(documents)
    }
}
