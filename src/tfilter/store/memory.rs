use super::TorrentSource;
use crate::error::Result;
use crate::torrent::TorrentInfo;

/// Fixed torrent list for testing.
#[derive(Default)]
pub struct InMemorySource {
    torrents: Vec<TorrentInfo>,
}

impl InMemorySource {
    pub fn new(torrents: Vec<TorrentInfo>) -> Self {
        Self { torrents }
    }
}

impl TorrentSource for InMemorySource {
    fn list_torrents(&self) -> Result<Vec<TorrentInfo>> {
        Ok(self.torrents.clone())
    }
}

// --- Test Fixtures ---
