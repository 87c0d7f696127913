//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every checkstamp operation, whatever the front end.
//!
//! It:
//! - **Dispatches** to the matching command function
//! - **Supplies the clock** (`Local::now()`), so commands stay deterministic under test
//! - **Normalizes inputs** (e.g. parsing an explicit `YYYY-MM-DD` date)
//!
//! It does not print, exit, or format anything for a terminal.
//!
//! `StampApi<S: DocumentStore>` is generic over the storage backend:
//! - Production: `StampApi<FileStore>`
//! - Testing: `StampApi<InMemoryStore>`

use crate::commands;
use crate::config::StampConfig;
use crate::date::{parse_date, today};
use crate::editor::EditorSurface;
use crate::error::{Result, StampError};
use crate::model::DocumentId;
use crate::progress::ProgressSink;
use crate::store::DocumentStore;
use chrono::Local;
use std::sync::Arc;

pub struct StampApi<S: DocumentStore + 'static> {
    store: Arc<S>,
    config: StampConfig,
    paths: commands::StampPaths,
}

impl<S: DocumentStore + 'static> StampApi<S> {
    pub fn new(store: S, config: StampConfig, paths: commands::StampPaths) -> Self {
        Self {
            store: Arc::new(store),
            config,
            paths,
        }
    }

    /// Retroactively stamp a single document.
    pub fn stamp_document(&self, id: &DocumentId) -> Result<commands::CmdResult> {
        commands::document::run(self.store.as_ref(), id, &self.config, Local::now())
    }

    /// Retroactively stamp every document in the store.
    pub async fn stamp_corpus<P: ProgressSink + ?Sized>(
        &self,
        progress: &mut P,
    ) -> Result<commands::CmdResult> {
        commands::corpus::run(Arc::clone(&self.store), &self.config, Local::now(), progress).await
    }

    /// Stamp loose text. Without an explicit date, today's date is used.
    pub fn stamp_text(&self, text: &str, date: Option<&str>) -> Result<commands::CmdResult> {
        let date = match date {
            Some(raw) => parse_date(raw).ok_or_else(|| {
                StampError::Api(format!("Invalid date: {} (expected YYYY-MM-DD)", raw))
            })?,
            None => today(Local::now()),
        };
        Ok(commands::text::run(text, date))
    }

    /// Change hook for an editor embedding this library.
    pub fn on_editor_change<E: EditorSurface + ?Sized>(
        &self,
        editor: &mut E,
    ) -> Option<commands::Insertion> {
        commands::live::on_editor_change(editor, &self.config, today(Local::now()))
    }

    /// Fire the change hook against a stored document with the cursor on `cursor_line`.
    pub fn stamp_live_document(
        &self,
        id: &DocumentId,
        cursor_line: usize,
    ) -> Result<commands::CmdResult> {
        commands::live::run(
            self.store.as_ref(),
            id,
            cursor_line,
            &self.config,
            today(Local::now()),
        )
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn store(&self) -> &S {
        self.store.as_ref()
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, CorpusReport, Insertion, MessageLevel, StampPaths};
