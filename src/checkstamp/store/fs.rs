use super::DocumentStore;
use crate::error::{Result, StampError};
use crate::model::{DocumentId, DocumentMeta};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

const DEFAULT_EXTENSION: &str = ".md";

pub struct FileStore {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
        }
    }

    /// Store over the directory holding `path`, plus the id of `path` inside it.
    pub fn for_file(path: &Path) -> Result<(Self, DocumentId)> {
        let file_name = path.file_name().ok_or_else(|| {
            StampError::Store(format!("Not a file path: {}", path.display()))
        })?;
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((Self::new(root), DocumentId::new(file_name)))
    }

    /// Restrict enumeration to the given extensions (normalized to start with a dot).
    pub fn with_extensions<I, E>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        let exts: Vec<String> = exts
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref();
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();
        if !exts.is_empty() {
            self.extensions = exts;
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn document_path(&self, id: &DocumentId) -> PathBuf {
        self.root.join(id.as_path())
    }

    fn has_wanted_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

impl DocumentStore for FileStore {
    fn list_documents(&self) -> Result<Vec<DocumentId>> {
        if !self.root.is_dir() {
            return Err(StampError::Store(format!(
                "Not a directory: {}",
                self.root.display()
            )));
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.has_wanted_extension(entry.path()) {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                ids.push(DocumentId::new(relative));
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn read_text(&self, id: &DocumentId) -> Result<String> {
        let path = self.document_path(id);
        if !path.is_file() {
            return Err(StampError::DocumentNotFound(id.to_string()));
        }
        fs::read_to_string(path).map_err(StampError::Io)
    }

    fn write_text(&self, id: &DocumentId, text: &str) -> Result<()> {
        fs::write(self.document_path(id), text).map_err(StampError::Io)
    }

    fn metadata(&self, id: &DocumentId) -> Result<DocumentMeta> {
        let meta = fs::metadata(self.document_path(id)).map_err(StampError::Io)?;
        let modified = meta.modified().map_err(StampError::Io)?;
        // Not every filesystem records a birth time.
        let created = meta.created().unwrap_or(modified);
        Ok(DocumentMeta::new(
            DateTime::<Local>::from(created),
            DateTime::<Local>::from(modified),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) -> PathBuf {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn lists_markdown_files_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "b.md", "");
        write(&dir, "a.md", "");
        write(&dir, "notes/deep/c.md", "");
        write(&dir, "skip.txt", "");

        let store = FileStore::new(dir.path());
        let ids = store.list_documents().unwrap();
        let names: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "a.md");
        assert_eq!(names[1], "b.md");
        assert!(names[2].ends_with("c.md"));
    }

    #[test]
    fn skips_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, ".obsidian/workspace.md", "");
        write(&dir, ".git/notes.md", "");
        write(&dir, "visible.md", "");

        let ids = FileStore::new(dir.path()).list_documents().unwrap();
        assert_eq!(ids, vec![DocumentId::from("visible.md")]);
    }

    #[test]
    fn custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.md", "");
        write(&dir, "b.txt", "");
        write(&dir, "c.markdown", "");

        let store = FileStore::new(dir.path()).with_extensions(["txt", ".markdown"]);
        assert_eq!(store.extensions(), &[".txt", ".markdown"]);
        assert_eq!(store.list_documents().unwrap().len(), 2);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nope"));
        assert!(matches!(store.list_documents(), Err(StampError::Store(_))));
    }

    #[test]
    fn read_and_write_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "todo.md", "- [ ] a\n");
        let store = FileStore::new(dir.path());
        let id = DocumentId::from("todo.md");

        store.write_text(&id, "- [ ] b\n").unwrap();
        assert_eq!(store.read_text(&id).unwrap(), "- [ ] b\n");
    }

    #[test]
    fn reading_missing_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.read_text(&DocumentId::from("ghost.md")),
            Err(StampError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn metadata_reports_modified_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "old.md", "");
        // 2021-06-15T12:00:00Z
        filetime::set_file_mtime(&path, FileTime::from_unix_time(1_623_758_400, 0)).unwrap();

        let store = FileStore::new(dir.path());
        let meta = store.metadata(&DocumentId::from("old.md")).unwrap();
        assert_eq!(meta.modified_at.timestamp(), 1_623_758_400);
    }

    #[test]
    fn for_file_splits_parent_and_name() {
        let (store, id) = FileStore::for_file(Path::new("notes/today.md")).unwrap();
        assert_eq!(store.root(), Path::new("notes"));
        assert_eq!(id, DocumentId::from("today.md"));

        let (store, _) = FileStore::for_file(Path::new("today.md")).unwrap();
        assert_eq!(store.root(), Path::new("."));
    }
}
