use crate::config::StampConfig;
use crate::model::DocumentId;
use std::path::PathBuf;

pub mod config;
pub mod corpus;
pub mod document;
pub mod helpers;
pub mod live;
pub mod text;

pub use corpus::CorpusReport;
pub use live::Insertion;

#[derive(Debug, Clone)]
pub struct StampPaths {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Stamps added by the command
    pub added: usize,
    pub affected_documents: Vec<DocumentId>,
    /// Stamped text, for commands that work on loose text
    pub text: Option<String>,
    pub insertion: Option<Insertion>,
    pub corpus: Option<CorpusReport>,
    pub config: Option<StampConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    pub fn with_added(mut self, added: usize) -> Self {
        self.added = added;
        self
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_config(mut self, config: StampConfig) -> Self {
        self.config = Some(config);
        self
    }
}
