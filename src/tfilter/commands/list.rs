use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::TorrentFilter;
use crate::model::TorrentId;
use crate::store::TorrentSource;
use crate::torrent::TorrentInfo;

/// List the torrents matching `filter`, in source order.
///
/// Requested hashes that are absent from the snapshot produce a warning.
pub fn run<S: TorrentSource>(source: &S, filter: &TorrentFilter) -> Result<CmdResult> {
    let torrents = source.list_torrents()?;
    let total = torrents.len();
    let unknown = unknown_hashes(filter, &torrents);

    let listed: Vec<_> = torrents
        .into_iter()
        .filter(|t| filter.matches(Some(t)))
        .collect();

    tracing::debug!(
        "filter {} kept {} of {} torrents",
        filter.kind(),
        listed.len(),
        total
    );

    let mut result = CmdResult::default();
    if !unknown.is_empty() {
        let hashes: Vec<String> = unknown.iter().map(ToString::to_string).collect();
        result.add_message(CmdMessage::warning(format!(
            "Not in snapshot: {}",
            hashes.join(", ")
        )));
    }
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No torrents match ({} checked).",
            total
        )));
    }
    Ok(result.with_listed_torrents(listed))
}

/// Requested ids with no record in `torrents`, sorted.
fn unknown_hashes(filter: &TorrentFilter, torrents: &[TorrentInfo]) -> Vec<TorrentId> {
    let Some(ids) = filter.ids() else {
        return Vec::new();
    };
    let mut unknown: Vec<TorrentId> = ids
        .iter()
        .filter(|id| !torrents.iter().any(|t| t.hash == **id))
        .copied()
        .collect();
    unknown.sort();
    unknown
}
