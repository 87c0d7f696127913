//! # Live Editor Surface
//!
//! The real-time trigger talks to whatever editor hosts the buffer through
//! [`EditorSurface`]. The trait is deliberately small: cursor, line access and a
//! positional insertion. Insertions are applied in place so the host keeps one undo
//! step per stamp instead of a whole-buffer replacement.
//!
//! [`TextBuffer`] is an in-memory surface used by the CLI `live` hook and by tests.

use crate::stamp::split_lines;
use std::ops::Range;

/// A cursor or insertion point. `ch` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

pub trait EditorSurface {
    fn cursor(&self) -> Position;

    /// Content of line `index` without its terminator.
    fn line(&self, index: usize) -> Option<&str>;

    fn line_count(&self) -> usize;

    /// Insert `text` at `at` as a single edit.
    fn insert(&mut self, at: Position, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    offset: usize,
    len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    cursor: Position,
    undo: Vec<Edit>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_cursor(mut self, cursor: Position) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of edits that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Revert the most recent insertion. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(edit) => {
                self.text.replace_range(edit.offset..edit.offset + edit.len, "");
                true
            }
            None => false,
        }
    }

    fn line_span(&self, index: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for (i, (content, ending)) in split_lines(&self.text).enumerate() {
            if i == index {
                return Some(start..start + content.len());
            }
            start += content.len() + ending.len();
        }
        None
    }

    fn byte_offset(&self, at: Position) -> Option<usize> {
        let span = self.line_span(at.line)?;
        let line = &self.text[span.clone()];
        let within = line
            .char_indices()
            .nth(at.ch)
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        Some(span.start + within)
    }
}

impl EditorSurface for TextBuffer {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.line_span(index).map(|span| &self.text[span])
    }

    fn line_count(&self) -> usize {
        split_lines(&self.text).count()
    }

    fn insert(&mut self, at: Position, text: &str) {
        let Some(offset) = self.byte_offset(at) else {
            return;
        };
        self.text.insert_str(offset, text);
        self.undo.push(Edit {
            offset,
            len: text.len(),
        });
    }
}
