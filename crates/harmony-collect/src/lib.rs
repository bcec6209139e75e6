//! # harmony-collect
//!
//! Schema discovery for the Harmony engine. The [`Collect`] capability
//! produces raw schema documents for a session to register; the engine never
//! performs I/O itself. Two implementations are provided:
//!
//! - [`FilesystemCollector`]: recursively enumerates `*.json` files under
//!   configured search paths
//! - [`MemoryCollector`]: a fixed set of documents, for tests and embedding

pub mod error;
pub mod filesystem;
pub mod memory;

pub use error::CollectError;
pub use filesystem::FilesystemCollector;
pub use memory::MemoryCollector;

use harmony_core::Document;

/// Capability producing raw schema documents.
///
/// Order of the returned documents is not guaranteed by the contract; each
/// document must be a mapping carrying at least an `id` field once validated.
/// A collect call is one synchronous step; implementations may block on
/// storage, but must not retry internally.
pub trait Collect {
    /// Produce every discoverable schema document.
    ///
    /// # Errors
    ///
    /// Any failure is fatal to the whole collect call; partial results are
    /// never returned.
    fn collect(&self) -> Result<Vec<Document>, CollectError>;
}
