//! # Stamper
//!
//! Pure text transformation at the heart of checkstamp. Given a blob of note text and a
//! pre-resolved `YYYY-MM-DD` date, every unchecked checkbox line that does not already
//! carry a creation stamp gets ` ➕ <date>` appended.
//!
//! ## Line Classification
//!
//! A line is an [`LineKind::UncheckedTask`] when it reads:
//!
//! ```text
//! <indent>[-*+]<ws>[ ]<ws><rest>      or      <indent>[-*+]<ws>[ ]
//! ```
//!
//! A byte-order mark ahead of the indent is treated as indentation, so the first task of
//! a BOM-prefixed file still matches. Checked boxes (`[x]`), ordered list items and
//! plain text are [`LineKind::Other`].
//! Nothing here ever errors: text that does not look like a task simply does not match.
//!
//! ## Rewrite Rule
//!
//! A matching line is rebuilt as `<prefix> <rest> ➕ <date>`. The whitespace run after
//! `[ ]` collapses to a single space and `rest` is kept verbatim, so an empty task
//! (`- [ ]`) becomes `- [ ]  ➕ <date>` with two spaces.
//!
//! ## Counting
//!
//! [`StampOutcome::added`] is the difference between the number of stamp tokens in the
//! output and in the input. Stamp-shaped text outside task lines (a code block quoting
//! one, say) is part of both counts and cancels out.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Marker glyph that opens a creation stamp (U+2795 HEAVY PLUS SIGN).
pub const STAMP_MARKER: &str = "\u{2795}";

static TASK_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>[\s\x{FEFF}]*[-*+]\s+\[ \])(?:\s+(?P<rest>.*))?$")
        .expect("valid task line regex")
});

// Presence check is lenient about the gap between marker and date.
static STAMP_IN_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{2795}\s*[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid stamp regex"));

static STAMP_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{2795} [0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid stamp regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    UncheckedTask,
    Other,
}

/// One line of a document, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub content: &'a str,
    /// `"\n"`, `"\r\n"`, `"\r"` or `""` for a final unterminated line.
    pub ending: &'a str,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampOutcome {
    pub text: String,
    pub added: usize,
}

impl StampOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0
    }
}

pub fn classify_line(line: &str) -> LineKind {
    if TASK_LINE_RE.is_match(line) {
        LineKind::UncheckedTask
    } else {
        LineKind::Other
    }
}

/// True when a stamp appears anywhere in `line`.
pub fn has_stamp(line: &str) -> bool {
    STAMP_IN_LINE_RE.is_match(line)
}

/// Number of well-formed stamp tokens (`➕ YYYY-MM-DD`) in `text`.
pub fn count_stamps(text: &str) -> usize {
    STAMP_TOKEN_RE.find_iter(text).count()
}

/// The token appended to a task line, without the leading space.
pub fn format_stamp(date: &str) -> String {
    format!("{} {}", STAMP_MARKER, date)
}

/// Splits `text` at `\r\n`, `\n` or a lone `\r`, yielding each line with its terminator.
///
/// Like `str::split`, text that ends in a terminator yields a final empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(i) => {
                let ending_len = if current[i..].starts_with("\r\n") { 2 } else { 1 };
                let (content, tail) = current.split_at(i);
                let (ending, next) = tail.split_at(ending_len);
                rest = Some(next);
                Some((content, ending))
            }
            None => {
                rest = None;
                Some((current, ""))
            }
        }
    })
}

/// Splits `text` into classified lines, keeping track of each line terminator.
pub fn scan(text: &str) -> impl Iterator<Item = Line<'_>> {
    split_lines(text)
        .filter(|(content, ending)| !(content.is_empty() && ending.is_empty()))
        .enumerate()
        .map(|(index, (content, ending))| {
            Line {
                index,
                content,
                ending,
                kind: classify_line(content),
            }
        })
}

/// Appends a creation stamp dated `date` to every unstamped unchecked task in `text`.
pub fn stamp(text: &str, date: &str) -> StampOutcome {
    let mut out = String::with_capacity(text.len() + 16);

    for line in scan(text) {
        match stamp_line(&line, date) {
            Some(stamped) => {
                debug!(line = line.index, original = line.content, "stamping task line");
                out.push_str(&stamped);
            }
            None => out.push_str(line.content),
        }
        out.push_str(line.ending);
    }

    let before = count_stamps(text);
    let after = count_stamps(&out);
    debug!(before, after, "stamp count delta");

    StampOutcome {
        text: out,
        added: after.saturating_sub(before),
    }
}

fn stamp_line(line: &Line<'_>, date: &str) -> Option<String> {
    if line.kind != LineKind::UncheckedTask || has_stamp(line.content) {
        return None;
    }
    let caps = TASK_LINE_RE.captures(line.content)?;
    let prefix = caps.name("prefix").map_or("", |m| m.as_str());
    let rest = caps.name("rest").map_or("", |m| m.as_str());
    Some(format!("{} {} {}", prefix, rest, format_stamp(date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "2024-01-01";

    #[test]
    fn stamps_unchecked_and_skips_checked() {
        let out = stamp("- [ ] buy milk\n- [x] done\n", DATE);
        assert_eq!(out.text, "- [ ] buy milk ➕ 2024-01-01\n- [x] done\n");
        assert_eq!(out.added, 1);
    }

    #[test]
    fn already_stamped_line_is_left_alone() {
        let input = "- [ ] task ➕ 2023-05-01\n";
        let out = stamp(input, DATE);
        assert_eq!(out.text, input);
        assert_eq!(out.added, 0);
        assert!(out.is_unchanged());
    }

    #[test]
    fn empty_text_is_noop() {
        let out = stamp("", DATE);
        assert_eq!(out.text, "");
        assert_eq!(out.added, 0);
    }

    #[test]
    fn text_without_tasks_is_noop() {
        let input = "# Heading\n\nSome prose.\n1. ordered item\n- plain bullet\n";
        let out = stamp(input, DATE);
        assert_eq!(out.text, input);
        assert_eq!(out.added, 0);
    }

    #[test]
    fn empty_remainder_yields_double_space() {
        assert_eq!(stamp("- [ ]", DATE).text, "- [ ]  ➕ 2024-01-01");
        assert_eq!(stamp("- [ ] ", DATE).text, "- [ ]  ➕ 2024-01-01");
        assert_eq!(stamp("- [ ]", DATE).added, 1);
    }

    #[test]
    fn stamping_twice_adds_nothing() {
        let input = "- [ ] one\n  * [ ] two\n+ [ ] three\n- [x] four\n";
        let first = stamp(input, DATE);
        assert_eq!(first.added, 3);

        let second = stamp(&first.text, DATE);
        assert_eq!(second.added, 0);
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn different_date_does_not_restamp() {
        let first = stamp("- [ ] report\n", DATE);
        let second = stamp(&first.text, "2030-12-31");
        assert_eq!(second.text, "- [ ] report ➕ 2024-01-01\n");
        assert_eq!(second.added, 0);
    }

    #[test]
    fn keeps_indentation_and_bullet() {
        let out = stamp("    * [ ] nested\n\t+ [ ] tabbed\n", DATE);
        assert_eq!(
            out.text,
            "    * [ ] nested ➕ 2024-01-01\n\t+ [ ] tabbed ➕ 2024-01-01\n"
        );
    }

    #[test]
    fn collapses_gap_after_checkbox_and_keeps_rest_verbatim() {
        let out = stamp("- [ ]    call Bob, re: invoice!  ", DATE);
        assert_eq!(out.text, "- [ ] call Bob, re: invoice!   ➕ 2024-01-01");
    }

    #[test]
    fn preserves_crlf_and_missing_final_newline() {
        let out = stamp("- [ ] a\r\n- [ ] b", DATE);
        assert_eq!(out.text, "- [ ] a ➕ 2024-01-01\r\n- [ ] b ➕ 2024-01-01");
        assert_eq!(out.added, 2);
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let out = stamp("- [ ] a\r", DATE);
        assert_eq!(out.text, "- [ ] a ➕ 2024-01-01\r");

        let out = stamp("- [ ] a\r- [x] b\r- [ ] c", DATE);
        assert_eq!(
            out.text,
            "- [ ] a ➕ 2024-01-01\r- [x] b\r- [ ] c ➕ 2024-01-01"
        );
        assert_eq!(out.added, 2);
    }

    #[test]
    fn byte_order_mark_does_not_hide_first_task() {
        let out = stamp("\u{FEFF}- [ ] first\n- [ ] second\n", DATE);
        assert_eq!(
            out.text,
            "\u{FEFF}- [ ] first ➕ 2024-01-01\n- [ ] second ➕ 2024-01-01\n"
        );
        assert_eq!(out.added, 2);
        assert_eq!(classify_line("\u{FEFF}- [ ] first"), LineKind::UncheckedTask);
    }

    #[test]
    fn split_lines_keeps_every_terminator() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\nd").collect();
        assert_eq!(
            lines,
            vec![("a", "\r\n"), ("b", "\r"), ("c", "\n"), ("d", "")]
        );
        let trailing: Vec<_> = split_lines("a\n").collect();
        assert_eq!(trailing, vec![("a", "\n"), ("", "")]);
    }

    #[test]
    fn stamp_with_loose_spacing_counts_as_present() {
        let input = "- [ ] old ➕2022-02-02\n";
        let out = stamp(input, DATE);
        assert_eq!(out.text, input);
        assert_eq!(out.added, 0);
    }

    #[test]
    fn stamp_anywhere_in_line_counts_as_present() {
        let input = "- [ ] ➕ 2022-02-02 moved to front\n";
        assert_eq!(stamp(input, DATE).text, input);
    }

    #[test]
    fn stray_stamps_outside_tasks_do_not_skew_count() {
        let input = "```\n➕ 2020-01-01\n```\n- [ ] a\n";
        let out = stamp(input, DATE);
        assert_eq!(out.added, 1);
        assert!(out.text.starts_with("```\n➕ 2020-01-01\n```\n"));
    }

    #[test]
    fn checkbox_glued_to_text_is_not_a_task() {
        assert_eq!(classify_line("- [ ]x"), LineKind::Other);
        assert_eq!(stamp("- [ ]x\n", DATE).added, 0);
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(classify_line("- [ ] task"), LineKind::UncheckedTask);
        assert_eq!(classify_line("  + [ ]"), LineKind::UncheckedTask);
        assert_eq!(classify_line("- [x] done"), LineKind::Other);
        assert_eq!(classify_line("- [X] done"), LineKind::Other);
        assert_eq!(classify_line("1. [ ] ordered"), LineKind::Other);
        assert_eq!(classify_line("[ ] no bullet"), LineKind::Other);
        assert_eq!(classify_line("-[ ] no gap"), LineKind::Other);
        assert_eq!(classify_line("plain"), LineKind::Other);
    }

    #[test]
    fn scan_reports_indexes_and_endings() {
        let lines: Vec<_> = scan("a\r\n- [ ] b\nc").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].ending, "\r\n");
        assert_eq!(lines[1].index, 1);
        assert_eq!(lines[1].kind, LineKind::UncheckedTask);
        assert_eq!(lines[2].content, "c");
        assert_eq!(lines[2].ending, "");
    }

    #[test]
    fn added_matches_unstamped_task_count() {
        let input = "- [ ] a\n- [ ] b ➕ 2021-01-01\ntext\n- [ ] c\n- [x] d\n";
        let unstamped = scan(input)
            .filter(|l| l.kind == LineKind::UncheckedTask && !has_stamp(l.content))
            .count();
        assert_eq!(stamp(input, DATE).added, unstamped);
        assert_eq!(unstamped, 2);
    }
}
