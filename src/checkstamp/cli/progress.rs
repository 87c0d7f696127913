use checkstamp::progress::ProgressSink;
use console::{Term, style};
use std::io;
use tracing::debug;

/// Progress line on stderr, rewritten in place. Silent when stderr is not a terminal.
pub struct TerminalProgress {
    term: Term,
    visible: bool,
}

impl TerminalProgress {
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
            visible: false,
        }
    }

    fn redraw(&self, message: &str) -> io::Result<()> {
        if self.visible {
            self.term.clear_line()?;
        }
        self.term.write_str(&style(message).dim().to_string())
    }
}

impl ProgressSink for TerminalProgress {
    fn set_message(&mut self, message: &str) {
        if !self.term.is_term() {
            return;
        }
        if let Err(e) = self.redraw(message) {
            debug!(error = %e, "could not draw progress line");
        }
        self.visible = true;
    }

    fn hide(&mut self) {
        if self.visible {
            if let Err(e) = self.term.clear_line() {
                debug!(error = %e, "could not clear progress line");
            }
            self.visible = false;
        }
    }
}
