//! Real-time stamping.
//!
//! Runs on every change notification from a live editor. When the user presses Enter
//! at the end of a task, the cursor lands on a fresh line and the finished task is the
//! line right above it. That one line gets a stamp dated today, appended through a
//! single positional insertion. The rest of the buffer is never scanned.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::StampConfig;
use crate::date::format_date;
use crate::editor::{EditorSurface, Position, TextBuffer};
use crate::error::Result;
use crate::model::DocumentId;
use crate::stamp::{LineKind, STAMP_MARKER, classify_line, has_stamp};
use crate::store::DocumentStore;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub at: Position,
    pub text: String,
}

/// Change hook. Returns the insertion it applied, if any.
pub fn on_editor_change<E: EditorSurface + ?Sized>(
    editor: &mut E,
    config: &StampConfig,
    today: NaiveDate,
) -> Option<Insertion> {
    if !config.enable_real_time_adding {
        return None;
    }

    let cursor = editor.cursor();
    let prev_line = cursor.line.checked_sub(1)?;
    let prev_text = editor.line(prev_line)?;

    if classify_line(prev_text) != LineKind::UncheckedTask || has_stamp(prev_text) {
        return None;
    }

    let insertion = Insertion {
        at: Position::new(prev_line, prev_text.chars().count()),
        text: format!(" {} {}", STAMP_MARKER, format_date(today)),
    };
    debug!(line = prev_line, "stamping finished task");
    editor.insert(insertion.at, &insertion.text);
    Some(insertion)
}

/// Editor hook for a document held in a store: loads it into a buffer with the cursor
/// on `cursor_line`, fires the change hook once and saves only if something was inserted.
pub fn run<S: DocumentStore + ?Sized>(
    store: &S,
    id: &DocumentId,
    cursor_line: usize,
    config: &StampConfig,
    today: NaiveDate,
) -> Result<CmdResult> {
    let mut buffer = TextBuffer::new(store.read_text(id)?).with_cursor(Position::new(cursor_line, 0));
    let mut result = CmdResult::default();

    match on_editor_change(&mut buffer, config, today) {
        Some(insertion) => {
            store.write_text(id, buffer.text())?;
            result.added = 1;
            result.affected_documents.push(id.clone());
            result.add_message(CmdMessage::success(format!(
                "Stamped line {} of {}",
                insertion.at.line + 1,
                id
            )));
            result.insertion = Some(insertion);
        }
        None => {
            result.add_message(CmdMessage::info("Nothing to stamp"));
        }
    }

    Ok(result)
}
