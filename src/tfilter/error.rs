use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TfilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid torrent hash: {0}")]
    InvalidTorrentId(String),

    #[error("Snapshot not found: {}", .0.display())]
    SnapshotNotFound(PathBuf),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, TfilterError>;
