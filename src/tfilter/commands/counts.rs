use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::{StateKind, TorrentFilter};
use crate::store::TorrentSource;

/// Count matches for every state kind.
///
/// Each count uses `base` with only its kind replaced, so hash, category and
/// tag restrictions in `base` still apply.
pub fn run<S: TorrentSource>(source: &S, base: &TorrentFilter) -> Result<CmdResult> {
    let torrents = source.list_torrents()?;

    let counts = StateKind::VARIANTS
        .iter()
        .map(|&kind| {
            let mut filter = base.clone();
            filter.set_kind(kind);
            let count = torrents.iter().filter(|t| filter.matches(Some(*t))).count();
            (kind, count)
        })
        .collect();

    Ok(CmdResult::default().with_state_counts(counts))
}
