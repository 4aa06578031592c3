use crate::config::TfilterConfig;
use crate::filter::StateKind;
use crate::torrent::TorrentInfo;
use std::path::PathBuf;

pub mod config;
pub mod counts;
pub mod list;

#[derive(Debug, Clone)]
pub struct TfilterPaths {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
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
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_torrents: Vec<TorrentInfo>,
    pub state_counts: Vec<(StateKind, usize)>,
    pub config: Option<TfilterConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_torrents(mut self, torrents: Vec<TorrentInfo>) -> Self {
        self.listed_torrents = torrents;
        self
    }

    pub fn with_state_counts(mut self, counts: Vec<(StateKind, usize)>) -> Self {
        self.state_counts = counts;
        self
    }

    pub fn with_config(mut self, config: TfilterConfig) -> Self {
        self.config = Some(config);
        self
    }
}
