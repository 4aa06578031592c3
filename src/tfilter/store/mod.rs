//! # Snapshot Sources
//!
//! Torrents come from somewhere else: a running client, an exported JSON
//! dump, a test fixture. The [`TorrentSource`] trait hides which one, so the
//! command layer only ever sees a list of [`TorrentInfo`] records.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: reads a JSON array in the `torrents/info` shape
//!   from a file, or from stdin when the path is `-`
//! - [`memory::InMemorySource`]: fixed list for testing
//!
//! ## Snapshot Format
//!
//! ```text
//! [
//!   {
//!     "hash": "8c4adbf9ebe66f1d804fb6a4fb9b74966c3ab609",
//!     "name": "debian-12.iso",
//!     "state": "stalledUP",
//!     "category": "linux/iso",
//!     "tags": "distro, seed",
//!     "upspeed": 0,
//!     "added_on": 1700000000
//!   }
//! ]
//! ```
//!
//! Unknown fields are ignored so full client dumps load unchanged.

use crate::error::Result;
use crate::torrent::TorrentInfo;

pub mod fs;
pub mod memory;

/// Abstract interface for torrent snapshots.
pub trait TorrentSource {
    /// All torrents currently known to the source
    fn list_torrents(&self) -> Result<Vec<TorrentInfo>>;
}
