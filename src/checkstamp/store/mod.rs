//! # Storage Layer
//!
//! The [`DocumentStore`] trait is the only way the orchestrator reaches documents.
//! It enumerates the corpus, reads and writes document text, and exposes each
//! document's timestamps for date resolution.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: a directory tree of Markdown files
//!   - Documents are identified by their path relative to the root
//!   - Hidden directories (`.git`, `.obsidian`, ...) are skipped
//!   - Extension filter is configurable (`.md` by default)
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - No persistence
//!   - Read and write failures can be injected per document
//!
//! ## Concurrency
//!
//! Stores are shared across the concurrent tasks of a corpus run, so every method
//! takes `&self` and implementations must be `Send + Sync`. The store does not
//! serialize access to a single document; the orchestrator never has two in-flight
//! operations on the same one.

use crate::error::Result;
use crate::model::{DocumentId, DocumentMeta};

pub mod fs;
pub mod memory;

pub trait DocumentStore: Send + Sync {
    /// All documents in the corpus, in a stable order
    fn list_documents(&self) -> Result<Vec<DocumentId>>;

    fn read_text(&self, id: &DocumentId) -> Result<String>;

    /// Replace the full text of a document
    fn write_text(&self, id: &DocumentId, text: &str) -> Result<()>;

    fn metadata(&self, id: &DocumentId) -> Result<DocumentMeta>;
}
