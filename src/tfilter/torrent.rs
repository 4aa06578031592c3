//! # The Torrent Query Interface
//!
//! [`TorrentFilter`](crate::filter::TorrentFilter) never owns torrents. It only
//! asks them questions through the read-only [`Torrent`] trait, so any record
//! type a session hands out can be filtered without conversion.
//!
//! [`TorrentInfo`] is the record type this crate ships: a snapshot of one
//! torrent in the shape of the Web API `torrents/info` response. Its derived
//! predicates (`is_downloading`, `is_active`, ...) are computed from the
//! lifecycle state the same way the session computes them.
//!
//! ## Categories
//!
//! Categories can be flat (`movies` only contains `movies`) or nested
//! (`movies` also contains `movies/hd`). Which one applies is a session
//! setting, so it is not part of the serialized record; sources set it with
//! [`TorrentInfo::with_nested_categories`] after loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{TagSet, TorrentId, TorrentState};

/// Read-only view of a torrent, as needed by the filter.
pub trait Torrent {
    fn id(&self) -> &TorrentId;
    fn state(&self) -> TorrentState;

    fn is_downloading(&self) -> bool;
    fn is_uploading(&self) -> bool;
    fn is_completed(&self) -> bool;
    fn is_paused(&self) -> bool;
    fn is_resumed(&self) -> bool;
    fn is_active(&self) -> bool;
    fn is_inactive(&self) -> bool;
    fn is_errored(&self) -> bool;

    /// Whether the torrent is filed under `category`.
    ///
    /// An empty `category` asks for uncategorized torrents.
    fn belongs_to_category(&self, category: &str) -> bool;

    fn tags(&self) -> &TagSet;
    fn has_tag(&self, tag: &str) -> bool;
}

/// Snapshot of a single torrent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentInfo {
    pub hash: TorrentId,
    pub name: String,
    #[serde(default)]
    pub state: TorrentState,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: TagSet,
    /// Fraction downloaded, `0.0..=1.0`
    #[serde(default)]
    pub progress: f64,
    /// Upload payload rate in bytes/s
    #[serde(default)]
    pub upspeed: u64,
    /// Download payload rate in bytes/s
    #[serde(default)]
    pub dlspeed: u64,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub added_on: Option<DateTime<Utc>>,
    #[serde(skip)]
    nested_categories: bool,
}

// The Web API sends tags as one comma separated string ("a, b"), while
// hand-written snapshots tend to use a JSON array. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<TagSet, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match TagsRepr::deserialize(deserializer)? {
        TagsRepr::List(list) => list,
        TagsRepr::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

impl TorrentInfo {
    pub fn new(hash: TorrentId, name: impl Into<String>, state: TorrentState) -> Self {
        Self {
            hash,
            name: name.into(),
            state,
            category: String::new(),
            tags: TagSet::new(),
            progress: 0.0,
            upspeed: 0,
            dlspeed: 0,
            added_on: None,
            nested_categories: false,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_upspeed(mut self, upspeed: u64) -> Self {
        self.upspeed = upspeed;
        self
    }

    pub fn with_nested_categories(mut self, enabled: bool) -> Self {
        self.nested_categories = enabled;
        self
    }
}

impl Torrent for TorrentInfo {
    fn id(&self) -> &TorrentId {
        &self.hash
    }

    fn state(&self) -> TorrentState {
        self.state
    }

    fn is_downloading(&self) -> bool {
        use TorrentState::*;
        matches!(
            self.state,
            Downloading
                | DownloadingMetadata
                | ForcedDownloadingMetadata
                | StalledDownloading
                | CheckingDownloading
                | PausedDownloading
                | QueuedDownloading
                | ForcedDownloading
        )
    }

    fn is_uploading(&self) -> bool {
        use TorrentState::*;
        matches!(
            self.state,
            Uploading | StalledUploading | CheckingUploading | QueuedUploading | ForcedUploading
        )
    }

    fn is_completed(&self) -> bool {
        use TorrentState::*;
        matches!(
            self.state,
            Uploading
                | StalledUploading
                | CheckingUploading
                | PausedUploading
                | QueuedUploading
                | ForcedUploading
        )
    }

    fn is_paused(&self) -> bool {
        matches!(
            self.state,
            TorrentState::PausedDownloading | TorrentState::PausedUploading
        )
    }

    fn is_resumed(&self) -> bool {
        !self.is_paused()
    }

    fn is_active(&self) -> bool {
        use TorrentState::*;
        match self.state {
            // A stalled download still counts while it is seeding what it has.
            StalledDownloading => self.upspeed > 0,
            Downloading | DownloadingMetadata | ForcedDownloadingMetadata | ForcedDownloading
            | Uploading | ForcedUploading | Moving => true,
            _ => false,
        }
    }

    fn is_inactive(&self) -> bool {
        !self.is_active()
    }

    fn is_errored(&self) -> bool {
        matches!(self.state, TorrentState::MissingFiles | TorrentState::Error)
    }

    fn belongs_to_category(&self, category: &str) -> bool {
        if self.category == category {
            return true;
        }
        if !self.nested_categories || category.is_empty() {
            return false;
        }

        self.category
            .strip_prefix(category)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
