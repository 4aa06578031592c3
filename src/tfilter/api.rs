//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Every UI (the
//! CLI today) goes through [`TfilterApi`] rather than calling commands
//! directly.
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (filter names and hash lists into a [`TorrentFilter`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does not print, and it holds no filtering logic of its own.
//!
//! `TfilterApi<S: TorrentSource>` is generic over where torrents come from:
//! `FileSource` in production, `InMemorySource` in tests.

use crate::commands;
use crate::error::Result;
use crate::filter::{TagFilter, TorrentFilter};
use crate::model::parse_id_set;
use crate::store::TorrentSource;

pub use commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, TfilterPaths};

/// Textual filter criteria, as typed by a user or sent by a client.
///
/// Every field is optional; `None` leaves that dimension unconstrained.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    pub filter: Option<String>,
    pub hashes: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl FilterQuery {
    /// Build the filter. Unknown state names fall back to `all`; only a
    /// malformed hash is an error.
    pub fn to_filter(&self) -> Result<TorrentFilter> {
        let ids = match &self.hashes {
            Some(hashes) => parse_id_set(hashes)?,
            None => TorrentFilter::ANY_ID,
        };

        Ok(TorrentFilter::from_name(
            self.filter.as_deref().unwrap_or_default(),
            ids,
            self.category.clone(),
            self.tag.as_deref().map(TagFilter::from),
        ))
    }
}

/// The main API facade for tfilter operations.
pub struct TfilterApi<S: TorrentSource> {
    source: S,
    paths: TfilterPaths,
}

impl<S: TorrentSource> TfilterApi<S> {
    pub fn new(source: S, paths: TfilterPaths) -> Self {
        Self { source, paths }
    }

    pub fn list_torrents(&self, query: &FilterQuery) -> Result<CmdResult> {
        let filter = query.to_filter()?;
        commands::list::run(&self.source, &filter)
    }

    pub fn state_counts(&self, query: &FilterQuery) -> Result<CmdResult> {
        let filter = query.to_filter()?;
        commands::counts::run(&self.source, &filter)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}
