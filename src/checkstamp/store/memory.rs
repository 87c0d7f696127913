use super::DocumentStore;
use crate::error::{Result, StampError};
use crate::model::{DocumentId, DocumentMeta};
use chrono::Local;
use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
struct MemDocument {
    text: String,
    meta: DocumentMeta,
}

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    docs: RwLock<BTreeMap<DocumentId, MemDocument>>,
    failing_reads: HashSet<DocumentId>,
    failing_writes: HashSet<DocumentId>,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: impl Into<DocumentId>, text: impl Into<String>) -> Result<()> {
        let now = Local::now();
        self.insert_with_meta(id, text, DocumentMeta::new(now, now))
    }

    pub fn insert_with_meta(
        &self,
        id: impl Into<DocumentId>,
        text: impl Into<String>,
        meta: DocumentMeta,
    ) -> Result<()> {
        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        docs.insert(
            id.into(),
            MemDocument {
                text: text.into(),
                meta,
            },
        );
        Ok(())
    }

    /// Make every read of `id` fail with an IO error.
    pub fn fail_reads(&mut self, id: impl Into<DocumentId>) {
        self.failing_reads.insert(id.into());
    }

    /// Make every write of `id` fail with an IO error.
    pub fn fail_writes(&mut self, id: impl Into<DocumentId>) {
        self.failing_writes.insert(id.into());
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn poisoned() -> StampError {
    StampError::Store("document map lock poisoned".to_string())
}

fn injected(action: &str, id: &DocumentId) -> StampError {
    StampError::Io(std::io::Error::other(format!(
        "injected {} failure for {}",
        action, id
    )))
}

impl DocumentStore for InMemoryStore {
    fn list_documents(&self) -> Result<Vec<DocumentId>> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        Ok(docs.keys().cloned().collect())
    }

    fn read_text(&self, id: &DocumentId) -> Result<String> {
        if self.failing_reads.contains(id) {
            return Err(injected("read", id));
        }
        let docs = self.docs.read().map_err(|_| poisoned())?;
        docs.get(id)
            .map(|doc| doc.text.clone())
            .ok_or_else(|| StampError::DocumentNotFound(id.to_string()))
    }

    fn write_text(&self, id: &DocumentId, text: &str) -> Result<()> {
        if self.failing_writes.contains(id) {
            return Err(injected("write", id));
        }
        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        let doc = docs
            .get_mut(id)
            .ok_or_else(|| StampError::DocumentNotFound(id.to_string()))?;
        doc.text = text.to_string();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn metadata(&self, id: &DocumentId) -> Result<DocumentMeta> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        docs.get(id)
            .map(|doc| doc.meta)
            .ok_or_else(|| StampError::DocumentNotFound(id.to_string()))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{DateTime, TimeZone};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn local(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// `count` documents named `note-NN.md`, each with `tasks` unstamped tasks.
        pub fn with_task_notes(self, count: usize, tasks: usize) -> Self {
            for i in 0..count {
                let body: String = (0..tasks)
                    .map(|t| format!("- [ ] task {} of note {}\n", t + 1, i + 1))
                    .collect();
                self.store
                    .insert(format!("note-{:02}.md", i + 1).as_str(), body)
                    .unwrap();
            }
            self
        }

        pub fn with_note(self, id: &str, text: &str) -> Self {
            self.store.insert(id, text).unwrap();
            self
        }

        pub fn with_dated_note(
            self,
            id: &str,
            text: &str,
            created: DateTime<Local>,
            modified: DateTime<Local>,
        ) -> Self {
            self.store
                .insert_with_meta(id, text, DocumentMeta::new(created, modified))
                .unwrap();
            self
        }

        pub fn failing_read(mut self, id: &str) -> Self {
            self.store.fail_reads(id);
            self
        }

        pub fn failing_write(mut self, id: &str) -> Self {
            self.store.fail_writes(id);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn roundtrip_and_write_count() {
        let fixture = StoreFixture::new().with_note("a.md", "- [ ] a");
        let id = DocumentId::from("a.md");
        fixture.store.write_text(&id, "changed").unwrap();
        assert_eq!(fixture.store.read_text(&id).unwrap(), "changed");
        assert_eq!(fixture.store.write_count(), 1);
    }

    #[test]
    fn injected_failures() {
        let fixture = StoreFixture::new()
            .with_note("r.md", "x")
            .with_note("w.md", "y")
            .failing_read("r.md")
            .failing_write("w.md");

        assert!(fixture.store.read_text(&"r.md".into()).is_err());
        assert!(fixture.store.write_text(&"w.md".into(), "z").is_err());
        assert_eq!(fixture.store.read_text(&"w.md".into()).unwrap(), "y");
    }

    #[test]
    fn unknown_document() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.metadata(&"nope.md".into()),
            Err(StampError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn task_notes_fixture() {
        let fixture = StoreFixture::new().with_task_notes(3, 2);
        let ids = fixture.store.list_documents().unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], DocumentId::from("note-01.md"));
    }
}
