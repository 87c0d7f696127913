/// A dismissible progress message that can be rewritten in place.
///
/// Corpus runs report `processed/total` through this after every batch. The CLI
/// draws it on stderr; library callers that do not care pass [`NoProgress`].
pub trait ProgressSink {
    fn set_message(&mut self, message: &str);

    fn hide(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set_message(&mut self, _message: &str) {}

    fn hide(&mut self) {}
}

/// Keeps every message it is given. Used in tests.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    pub messages: Vec<String>,
    pub hidden: bool,
}

#[cfg(any(test, feature = "test_utils"))]
impl ProgressSink for RecordingProgress {
    fn set_message(&mut self, message: &str) {
        self.hidden = false;
        self.messages.push(message.to_string());
    }

    fn hide(&mut self) {
        self.hidden = true;
    }
}
