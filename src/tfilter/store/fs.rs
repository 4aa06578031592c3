use super::TorrentSource;
use crate::error::{Result, TfilterError};
use crate::torrent::TorrentInfo;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

const STDIN_PATH: &str = "-";

pub struct FileSource {
    path: PathBuf,
    nested_categories: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            nested_categories: false,
        }
    }

    pub fn with_nested_categories(mut self, enabled: bool) -> Self {
        self.nested_categories = enabled;
        self
    }

    fn read_content(&self) -> Result<String> {
        if self.path.as_os_str() == STDIN_PATH {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(TfilterError::Io)?;
            return Ok(content);
        }

        if !self.path.exists() {
            return Err(TfilterError::SnapshotNotFound(self.path.clone()));
        }
        fs::read_to_string(&self.path).map_err(TfilterError::Io)
    }
}

impl TorrentSource for FileSource {
    fn list_torrents(&self) -> Result<Vec<TorrentInfo>> {
        let content = self.read_content()?;
        let torrents: Vec<TorrentInfo> =
            serde_json::from_str(&content).map_err(TfilterError::Serialization)?;

        tracing::debug!(
            "loaded {} torrents from {}",
            torrents.len(),
            self.path.display()
        );

        Ok(torrents
            .into_iter()
            .map(|t| t.with_nested_categories(self.nested_categories))
            .collect())
    }
}
