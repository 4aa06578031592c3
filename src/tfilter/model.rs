//! # Domain Model: Torrent Identity and Lifecycle State
//!
//! This module defines the value types every other layer speaks in:
//! [`TorrentId`], [`TorrentState`], and the two collection aliases
//! [`TorrentIdSet`] and [`TagSet`].
//!
//! ## Torrent Identity
//!
//! A torrent is identified by its SHA-1 info-hash (20 bytes). On the wire and
//! on the command line it is written as 40 hexadecimal digits:
//!
//! ```text
//! 8c4adbf9ebe66f1d804fb6a4fb9b74966c3ab609
//! ```
//!
//! Parsing is case-insensitive; rendering is always lowercase.
//!
//! ## Hash Lists
//!
//! Clients address groups of torrents with a `|`-separated list of hashes, and
//! the literal `all` to mean "every torrent". [`parse_id_set`] turns that into
//! an optional [`TorrentIdSet`], where `None` means no identity restriction.
//!
//! ## Lifecycle State
//!
//! [`TorrentState`] is the discrete phase reported by the session. Its serde
//! names follow the Web API strings (`stalledUP`, `checkingResumeData`, ...)
//! so snapshots exported from a client can be read as-is.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TfilterError};

const HASH_LEN: usize = 20;

/// SHA-1 info-hash of a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TorrentId([u8; HASH_LEN]);

/// An explicit allow-list of torrents.
pub type TorrentIdSet = HashSet<TorrentId>;

/// The tags carried by one torrent.
pub type TagSet = BTreeSet<String>;

impl TorrentId {
    pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for TorrentId {
    type Err = TfilterError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut bytes = [0u8; HASH_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| {
            tracing::trace!("rejecting torrent hash {:?}: {}", s, e);
            TfilterError::InvalidTorrentId(s.to_string())
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl TryFrom<String> for TorrentId {
    type Error = TfilterError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TorrentId> for String {
    fn from(id: TorrentId) -> Self {
        id.to_string()
    }
}

/// Parse a `|`-separated hash list.
///
/// Returns `Ok(None)` for `all` (no identity restriction). Blank segments are
/// skipped, so `"a||b|"` is read as two hashes.
pub fn parse_id_set(hashes: &str) -> Result<Option<TorrentIdSet>> {
    if hashes.trim() == "all" {
        return Ok(None);
    }

    hashes
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(TorrentId::from_str)
        .collect::<Result<TorrentIdSet>>()
        .map(Some)
}

/// Lifecycle state of a torrent as reported by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TorrentState {
    #[default]
    #[serde(rename = "unknown")]
    Unknown,

    #[serde(rename = "forcedDL")]
    ForcedDownloading,
    #[serde(rename = "downloading")]
    Downloading,
    #[serde(rename = "forcedMetaDL")]
    ForcedDownloadingMetadata,
    #[serde(rename = "metaDL")]
    DownloadingMetadata,
    #[serde(rename = "stalledDL")]
    StalledDownloading,

    #[serde(rename = "forcedUP")]
    ForcedUploading,
    #[serde(rename = "uploading")]
    Uploading,
    #[serde(rename = "stalledUP")]
    StalledUploading,

    #[serde(rename = "checkingResumeData")]
    CheckingResumeData,
    #[serde(rename = "queuedDL")]
    QueuedDownloading,
    #[serde(rename = "queuedUP")]
    QueuedUploading,
    #[serde(rename = "checkingUP")]
    CheckingUploading,
    #[serde(rename = "checkingDL")]
    CheckingDownloading,

    #[serde(rename = "pausedDL")]
    PausedDownloading,
    #[serde(rename = "pausedUP")]
    PausedUploading,

    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "missingFiles")]
    MissingFiles,
    #[serde(rename = "error")]
    Error,
}

impl TorrentState {
    pub fn is_stalled(self) -> bool {
        matches!(self, Self::StalledUploading | Self::StalledDownloading)
    }

    pub fn is_checking(self) -> bool {
        matches!(
            self,
            Self::CheckingUploading | Self::CheckingDownloading | Self::CheckingResumeData
        )
    }
}
