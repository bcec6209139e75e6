//! Fixed-document collector.

use harmony_core::Document;

use crate::{Collect, CollectError};

/// Produces a fixed set of documents. Useful for tests and for embedding the
/// engine where schemas arrive from somewhere other than storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollector {
    documents: Vec<Document>,
}

impl MemoryCollector {
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl Collect for MemoryCollector {
    fn collect(&self) -> Result<Vec<Document>, CollectError> {
        Ok(self.documents.clone())
    }
}
