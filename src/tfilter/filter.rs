//! Torrent filtering.
//!
//! A [`TorrentFilter`] combines four independent criteria:
//!
//! | Dimension | Field | Absent means |
//! |-----------|-------|--------------|
//! | Lifecycle | [`StateKind`] | `StateKind::All` |
//! | Identity | `Option<TorrentIdSet>` | any hash |
//! | Category | `Option<String>` | any category |
//! | Tag | `Option<TagFilter>` | any tags |
//!
//! A torrent matches when every present criterion holds. Nothing in here
//! fails: an unknown filter name is `All`, and a missing torrent simply does
//! not match.
//!
//! ```ignore
//! let mut filter = TorrentFilter::from_name("stalled", None, Some("movies".into()), None);
//! if filter.set_tag(Some(TagFilter::Untagged)) {
//!     // criteria changed, refresh the view
//! }
//! let shown: Vec<_> = torrents.iter().filter(|t| filter.matches(Some(*t))).collect();
//! ```

use std::fmt;

use crate::model::{TorrentIdSet, TorrentState};
use crate::torrent::Torrent;

/// Lifecycle category a filter selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum StateKind {
    #[default]
    All,
    Downloading,
    Seeding,
    Completed,
    Paused,
    Resumed,
    Active,
    Inactive,
    Stalled,
    StalledUploading,
    StalledDownloading,
    Checking,
    Errored,
}

impl StateKind {
    /// Every kind, in sidebar order.
    pub const VARIANTS: [StateKind; 13] = [
        StateKind::All,
        StateKind::Downloading,
        StateKind::Seeding,
        StateKind::Completed,
        StateKind::Paused,
        StateKind::Resumed,
        StateKind::Active,
        StateKind::Inactive,
        StateKind::Stalled,
        StateKind::StalledUploading,
        StateKind::StalledDownloading,
        StateKind::Checking,
        StateKind::Errored,
    ];

    /// Map a filter name to its kind. Unrecognized names (including `""`)
    /// yield [`StateKind::All`]. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Self {
        match name {
            "downloading" => Self::Downloading,
            "seeding" => Self::Seeding,
            "completed" => Self::Completed,
            "paused" => Self::Paused,
            "resumed" => Self::Resumed,
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "stalled" => Self::Stalled,
            "stalled_uploading" => Self::StalledUploading,
            "stalled_downloading" => Self::StalledDownloading,
            "checking" => Self::Checking,
            "errored" => Self::Errored,
            _ => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Downloading => "downloading",
            Self::Seeding => "seeding",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Resumed => "resumed",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Stalled => "stalled",
            Self::StalledUploading => "stalled_uploading",
            Self::StalledDownloading => "stalled_downloading",
            Self::Checking => "checking",
            Self::Errored => "errored",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StateKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Tag criterion.
///
/// The textual empty tag is not a tag name: it stands for "no tags at all",
/// and converts to [`TagFilter::Untagged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagFilter {
    Untagged,
    Named(String),
}

impl TagFilter {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag.is_empty() {
            Self::Untagged
        } else {
            Self::Named(tag)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Untagged => "",
            Self::Named(tag) => tag,
        }
    }
}

impl From<&str> for TagFilter {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for TagFilter {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

/// Predicate over torrents: state, hash, category and tag criteria.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TorrentFilter {
    kind: StateKind,
    ids: Option<TorrentIdSet>,
    category: Option<String>,
    tag: Option<TagFilter>,
}

impl TorrentFilter {
    pub const ANY_ID: Option<TorrentIdSet> = None;
    pub const ANY_CATEGORY: Option<String> = None;
    pub const ANY_TAG: Option<TagFilter> = None;

    pub const DOWNLOADING: Self = Self::of_kind(StateKind::Downloading);
    pub const SEEDING: Self = Self::of_kind(StateKind::Seeding);
    pub const COMPLETED: Self = Self::of_kind(StateKind::Completed);
    pub const PAUSED: Self = Self::of_kind(StateKind::Paused);
    pub const RESUMED: Self = Self::of_kind(StateKind::Resumed);
    pub const ACTIVE: Self = Self::of_kind(StateKind::Active);
    pub const INACTIVE: Self = Self::of_kind(StateKind::Inactive);
    pub const STALLED: Self = Self::of_kind(StateKind::Stalled);
    pub const STALLED_UPLOADING: Self = Self::of_kind(StateKind::StalledUploading);
    pub const STALLED_DOWNLOADING: Self = Self::of_kind(StateKind::StalledDownloading);
    pub const CHECKING: Self = Self::of_kind(StateKind::Checking);
    pub const ERRORED: Self = Self::of_kind(StateKind::Errored);

    pub fn new(
        kind: StateKind,
        ids: Option<TorrentIdSet>,
        category: Option<String>,
        tag: Option<TagFilter>,
    ) -> Self {
        Self {
            kind,
            ids,
            category,
            tag,
        }
    }

    /// Build a filter from a textual state name. Never fails; see
    /// [`StateKind::from_name`].
    pub fn from_name(
        name: &str,
        ids: Option<TorrentIdSet>,
        category: Option<String>,
        tag: Option<TagFilter>,
    ) -> Self {
        Self::new(StateKind::from_name(name), ids, category, tag)
    }

    /// A filter on lifecycle state only.
    pub const fn of_kind(kind: StateKind) -> Self {
        Self {
            kind,
            ids: None,
            category: None,
            tag: None,
        }
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn ids(&self) -> Option<&TorrentIdSet> {
        self.ids.as_ref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn tag(&self) -> Option<&TagFilter> {
        self.tag.as_ref()
    }

    /// Returns `true` if the kind changed.
    pub fn set_kind(&mut self, kind: StateKind) -> bool {
        replace_if_changed(&mut self.kind, kind)
    }

    /// Returns `true` if the kind changed.
    pub fn set_kind_by_name(&mut self, name: &str) -> bool {
        self.set_kind(StateKind::from_name(name))
    }

    /// Returns `true` if the id set changed.
    pub fn set_ids(&mut self, ids: Option<TorrentIdSet>) -> bool {
        replace_if_changed(&mut self.ids, ids)
    }

    /// Returns `true` if the category changed.
    pub fn set_category(&mut self, category: Option<String>) -> bool {
        replace_if_changed(&mut self.category, category)
    }

    /// Returns `true` if the tag changed.
    pub fn set_tag(&mut self, tag: Option<TagFilter>) -> bool {
        replace_if_changed(&mut self.tag, tag)
    }

    /// Check whether `torrent` satisfies every criterion.
    ///
    /// A missing torrent never matches, whatever the criteria.
    pub fn matches<T: Torrent + ?Sized>(&self, torrent: Option<&T>) -> bool {
        let Some(torrent) = torrent else {
            return false;
        };

        self.match_state(torrent)
            && self.match_ids(torrent)
            && self.match_category(torrent)
            && self.match_tag(torrent)
    }

    fn match_state<T: Torrent + ?Sized>(&self, torrent: &T) -> bool {
        match self.kind {
            StateKind::All => true,
            StateKind::Downloading => torrent.is_downloading(),
            StateKind::Seeding => torrent.is_uploading(),
            StateKind::Completed => torrent.is_completed(),
            StateKind::Paused => torrent.is_paused(),
            StateKind::Resumed => torrent.is_resumed(),
            StateKind::Active => torrent.is_active(),
            StateKind::Inactive => torrent.is_inactive(),
            StateKind::Stalled => torrent.state().is_stalled(),
            StateKind::StalledUploading => torrent.state() == TorrentState::StalledUploading,
            StateKind::StalledDownloading => torrent.state() == TorrentState::StalledDownloading,
            StateKind::Checking => torrent.state().is_checking(),
            StateKind::Errored => torrent.is_errored(),
        }
    }

    fn match_ids<T: Torrent + ?Sized>(&self, torrent: &T) -> bool {
        match &self.ids {
            None => true,
            Some(ids) => ids.contains(torrent.id()),
        }
    }

    fn match_category<T: Torrent + ?Sized>(&self, torrent: &T) -> bool {
        match &self.category {
            None => true,
            Some(category) => torrent.belongs_to_category(category),
        }
    }

    fn match_tag<T: Torrent + ?Sized>(&self, torrent: &T) -> bool {
        match &self.tag {
            None => true,
            Some(TagFilter::Untagged) => torrent.tags().is_empty(),
            Some(TagFilter::Named(tag)) => torrent.has_tag(tag),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TagSet, TorrentId};
    use crate::torrent::TorrentInfo;

    /// A torrent whose predicates are set directly, independent of state.
    #[derive(Default)]
    struct Probe {
        state: TorrentState,
        downloading: bool,
        uploading: bool,
        completed: bool,
        paused: bool,
        resumed: bool,
        active: bool,
        inactive: bool,
        errored: bool,
        category: String,
        tags: TagSet,
    }

    const PROBE_ID: TorrentId = TorrentId::from_bytes([0; 20]);

    impl Torrent for Probe {
        fn id(&self) -> &TorrentId {
            &PROBE_ID
        }
        fn state(&self) -> TorrentState {
            self.state
        }
        fn is_downloading(&self) -> bool {
            self.downloading
        }
        fn is_uploading(&self) -> bool {
            self.uploading
        }
        fn is_completed(&self) -> bool {
            self.completed
        }
        fn is_paused(&self) -> bool {
            self.paused
        }
        fn is_resumed(&self) -> bool {
            self.resumed
        }
        fn is_active(&self) -> bool {
            self.active
        }
        fn is_inactive(&self) -> bool {
            self.inactive
        }
        fn is_errored(&self) -> bool {
            self.errored
        }
        fn belongs_to_category(&self, category: &str) -> bool {
            self.category == category
        }
        fn tags(&self) -> &TagSet {
            &self.tags
        }
        fn has_tag(&self, tag: &str) -> bool {
            self.tags.contains(tag)
        }
    }

    fn id(byte: u8) -> TorrentId {
        TorrentId::from_bytes([byte; 20])
    }

    fn info(byte: u8, state: TorrentState) -> TorrentInfo {
        TorrentInfo::new(id(byte), format!("t{}", byte), state)
    }

    fn ids(bytes: &[u8]) -> Option<TorrentIdSet> {
        Some(bytes.iter().map(|b| id(*b)).collect())
    }

    #[test]
    fn name_table_is_exact() {
        assert_eq!(StateKind::from_name("downloading"), StateKind::Downloading);
        assert_eq!(StateKind::from_name("seeding"), StateKind::Seeding);
        assert_eq!(
            StateKind::from_name("stalled_uploading"),
            StateKind::StalledUploading
        );
        assert_eq!(StateKind::from_name("errored"), StateKind::Errored);
        assert_eq!(StateKind::from_name("Downloading"), StateKind::All);
        assert_eq!(StateKind::from_name(" paused"), StateKind::All);
        assert_eq!(StateKind::from_name(""), StateKind::All);
    }

    #[test]
    fn names_render_back_to_kinds() {
        for kind in StateKind::VARIANTS {
            assert_eq!(StateKind::from_name(kind.as_str()), kind);
        }
        assert_eq!(StateKind::Checking.to_string(), "checking");
    }

    #[test]
    fn single_accessor_kinds_mirror_the_record() {
        type Setter = fn(&mut Probe);
        let cases: [(StateKind, Setter); 8] = [
            (StateKind::Downloading, |p: &mut Probe| p.downloading = true),
            (StateKind::Seeding, |p: &mut Probe| p.uploading = true),
            (StateKind::Completed, |p: &mut Probe| p.completed = true),
            (StateKind::Paused, |p: &mut Probe| p.paused = true),
            (StateKind::Resumed, |p: &mut Probe| p.resumed = true),
            (StateKind::Active, |p: &mut Probe| p.active = true),
            (StateKind::Inactive, |p: &mut Probe| p.inactive = true),
            (StateKind::Errored, |p: &mut Probe| p.errored = true),
        ];

        for (kind, set) in cases {
            let filter = TorrentFilter::of_kind(kind);
            let mut probe = Probe::default();
            assert!(!filter.matches(Some(&probe)), "{} matched a blank probe", kind);
            set(&mut probe);
            assert!(filter.matches(Some(&probe)), "{} missed its accessor", kind);
        }
    }

    #[test]
    fn stalled_kinds_read_the_state() {
        let up = info(1, TorrentState::StalledUploading);
        let down = info(2, TorrentState::StalledDownloading);
        let busy = info(3, TorrentState::Uploading);

        assert!(TorrentFilter::STALLED.matches(Some(&up)));
        assert!(TorrentFilter::STALLED.matches(Some(&down)));
        assert!(!TorrentFilter::STALLED.matches(Some(&busy)));

        assert!(TorrentFilter::STALLED_UPLOADING.matches(Some(&up)));
        assert!(!TorrentFilter::STALLED_UPLOADING.matches(Some(&down)));
        assert!(TorrentFilter::STALLED_DOWNLOADING.matches(Some(&down)));
        assert!(!TorrentFilter::STALLED_DOWNLOADING.matches(Some(&up)));
    }

    #[test]
    fn checking_covers_three_states() {
        for state in [
            TorrentState::CheckingUploading,
            TorrentState::CheckingDownloading,
            TorrentState::CheckingResumeData,
        ] {
            assert!(TorrentFilter::CHECKING.matches(Some(&info(1, state))));
        }
        assert!(!TorrentFilter::CHECKING.matches(Some(&info(1, TorrentState::QueuedDownloading))));
    }

    #[test]
    fn all_matches_every_state() {
        let filter = TorrentFilter::default();
        for state in [
            TorrentState::Unknown,
            TorrentState::Error,
            TorrentState::PausedUploading,
            TorrentState::Moving,
        ] {
            assert!(filter.matches(Some(&info(1, state))));
        }
    }

    #[test]
    fn unknown_name_behaves_like_all() {
        let bogus = TorrentFilter::from_name("bogus_name", None, None, None);
        assert_eq!(bogus, TorrentFilter::of_kind(StateKind::All));
        assert!(bogus.matches(Some(&info(1, TorrentState::Error))));

        let bogus = TorrentFilter::from_name("bogus_name", None, Some("movies".into()), None);
        assert!(!bogus.matches(Some(&info(1, TorrentState::Error))));
        assert!(bogus.matches(Some(&info(1, TorrentState::Error).with_category("movies"))));
    }

    #[test]
    fn missing_torrent_never_matches() {
        let none: Option<&TorrentInfo> = None;
        assert!(!TorrentFilter::default().matches(none));
        assert!(!TorrentFilter::ERRORED.matches(none));
        let wide = TorrentFilter::new(StateKind::All, None, None, Some(TagFilter::Untagged));
        assert!(!wide.matches(none));
    }

    #[test]
    fn id_set_restricts_regardless_of_state() {
        let filter = TorrentFilter::new(StateKind::All, ids(&[1, 2]), None, None);

        assert!(filter.matches(Some(&info(1, TorrentState::Error))));
        assert!(filter.matches(Some(&info(2, TorrentState::Uploading))));
        assert!(!filter.matches(Some(&info(3, TorrentState::Uploading))));
    }

    #[test]
    fn empty_id_set_matches_nothing() {
        let filter = TorrentFilter::new(StateKind::All, ids(&[]), None, None);
        assert!(!filter.matches(Some(&info(1, TorrentState::Uploading))));
    }

    #[test]
    fn untagged_sentinel_selects_torrents_without_tags() {
        let filter = TorrentFilter::new(StateKind::All, None, None, Some(TagFilter::from("")));
        let bare = info(1, TorrentState::Uploading);
        let tagged = info(2, TorrentState::Uploading).with_tags(["movies"]);

        assert!(filter.matches(Some(&bare)));
        assert!(!filter.matches(Some(&tagged)));
    }

    #[test]
    fn named_tag_selects_carriers() {
        let filter = TorrentFilter::new(StateKind::All, None, None, Some("movies".into()));
        let movie = info(1, TorrentState::Uploading).with_tags(["movies", "hd"]);
        let show = info(2, TorrentState::Uploading).with_tags(["shows"]);
        let bare = info(3, TorrentState::Uploading);

        assert!(filter.matches(Some(&movie)));
        assert!(!filter.matches(Some(&show)));
        assert!(!filter.matches(Some(&bare)));
    }

    #[test]
    fn category_is_delegated_to_the_record() {
        let filter = TorrentFilter::new(StateKind::All, None, Some("movies".into()), None);
        let nested = info(1, TorrentState::Uploading).with_category("movies/hd");

        assert!(!filter.matches(Some(&nested)));
        assert!(filter.matches(Some(&nested.clone().with_nested_categories(true))));
    }

    #[test]
    fn criteria_are_conjoined() {
        let filter = TorrentFilter::new(
            StateKind::Seeding,
            ids(&[1, 2, 3, 4]),
            Some("linux".into()),
            Some("iso".into()),
        );
        let hit = info(1, TorrentState::Uploading)
            .with_category("linux")
            .with_tags(["iso"]);

        assert!(filter.match_state(&hit));
        assert!(filter.match_ids(&hit));
        assert!(filter.match_category(&hit));
        assert!(filter.match_tag(&hit));
        assert!(filter.matches(Some(&hit)));

        let mut wrong_state = hit.clone();
        wrong_state.state = TorrentState::PausedUploading;
        let mut wrong_id = hit.clone();
        wrong_id.hash = id(9);
        let wrong_category = hit.clone().with_category("bsd");
        let wrong_tag = hit.clone().with_tags(["img"]);

        for miss in [wrong_state, wrong_id, wrong_category, wrong_tag] {
            let each = filter.match_state(&miss)
                && filter.match_ids(&miss)
                && filter.match_category(&miss)
                && filter.match_tag(&miss);
            assert!(!each);
            assert!(!filter.matches(Some(&miss)));
        }
    }

    #[test]
    fn matches_through_trait_objects() {
        let torrents: Vec<Box<dyn Torrent>> = vec![
            Box::new(info(1, TorrentState::StalledUploading)),
            Box::new(Probe {
                state: TorrentState::StalledDownloading,
                ..Probe::default()
            }),
            Box::new(info(2, TorrentState::Uploading)),
        ];

        let stalled = torrents
            .iter()
            .map(Box::as_ref)
            .filter(|t| TorrentFilter::STALLED.matches(Some(*t)))
            .count();
        assert_eq!(stalled, 2);
    }

    #[test]
    fn presets_carry_only_a_kind() {
        let presets = [
            (TorrentFilter::DOWNLOADING, StateKind::Downloading),
            (TorrentFilter::SEEDING, StateKind::Seeding),
            (TorrentFilter::COMPLETED, StateKind::Completed),
            (TorrentFilter::PAUSED, StateKind::Paused),
            (TorrentFilter::RESUMED, StateKind::Resumed),
            (TorrentFilter::ACTIVE, StateKind::Active),
            (TorrentFilter::INACTIVE, StateKind::Inactive),
            (TorrentFilter::STALLED, StateKind::Stalled),
            (TorrentFilter::STALLED_UPLOADING, StateKind::StalledUploading),
            (TorrentFilter::STALLED_DOWNLOADING, StateKind::StalledDownloading),
            (TorrentFilter::CHECKING, StateKind::Checking),
            (TorrentFilter::ERRORED, StateKind::Errored),
        ];

        for (preset, kind) in presets {
            assert_eq!(preset.kind(), kind);
            assert!(preset.ids().is_none());
            assert!(preset.category().is_none());
            assert!(preset.tag().is_none());
        }
    }

    #[test]
    fn mutating_a_preset_copy_leaves_the_preset_alone() {
        let mut filter = TorrentFilter::SEEDING;
        assert!(filter.set_category(Some("movies".into())));
        assert_eq!(TorrentFilter::SEEDING.category(), None);
    }

    #[test]
    fn setters_report_changes() {
        let mut filter = TorrentFilter::default();

        assert!(filter.set_category(Some("movies".into())));
        assert!(!filter.set_category(Some("movies".into())));
        assert!(filter.set_category(TorrentFilter::ANY_CATEGORY));
        assert!(!filter.set_category(None));

        assert!(!filter.set_tag(TorrentFilter::ANY_TAG));
        assert!(filter.set_tag(Some(TagFilter::Untagged)));
        assert!(!filter.set_tag(Some("".into())));
        assert!(filter.set_tag(Some("hd".into())));

        assert!(!filter.set_kind(StateKind::All));
        assert!(filter.set_kind(StateKind::Paused));
        assert!(!filter.set_kind_by_name("paused"));
        assert!(filter.set_kind_by_name("nonsense"));
        assert_eq!(filter.kind(), StateKind::All);
    }

    #[test]
    fn id_set_setter_compares_by_contents() {
        let mut filter = TorrentFilter::default();

        assert!(!filter.set_ids(TorrentFilter::ANY_ID));
        assert!(filter.set_ids(ids(&[1, 2])));
        assert!(!filter.set_ids(ids(&[2, 1])));
        assert!(filter.set_ids(ids(&[1])));
        assert!(filter.set_ids(None));
    }

    #[test]
    fn tag_filter_renders_sentinel_as_empty() {
        assert_eq!(TagFilter::new(String::new()), TagFilter::Untagged);
        assert_eq!(TagFilter::Untagged.as_str(), "");
        assert_eq!(TagFilter::from("hd").as_str(), "hd");
    }
}
