//! # Tfilter Architecture
//!
//! Tfilter answers one question: *which of these torrents match?* The answer
//! is a [`filter::TorrentFilter`], a small value combining four criteria
//! (lifecycle state, explicit hashes, category, tag). Everything else in the
//! crate exists to feed it torrents and show the result.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints tables/JSON, sets up logging    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Turns textual criteria into a TorrentFilter              │
//! │  - Dispatches to commands, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - list, counts, config                                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sources (store/)                                           │
//! │  - TorrentSource trait: FileSource, InMemorySource          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Filter Never Fails
//!
//! Filtering is a UI concern: an unknown filter name shows everything, and a
//! missing torrent simply doesn't match. Errors only come from the edges
//! (reading a snapshot, decoding JSON, a mistyped hash).
//!
//! ## Module Overview
//!
//! - [`filter`]: `TorrentFilter`, `StateKind`, `TagFilter`
//! - [`torrent`]: the `Torrent` query trait and the `TorrentInfo` record
//! - [`model`]: `TorrentId`, `TorrentState`, id/tag set types
//! - [`store`]: snapshot sources
//! - [`commands`]: business logic for each command
//! - [`api`]: the facade
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod store;
pub mod torrent;
