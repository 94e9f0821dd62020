//! Session state and the single transition function that drives it.
//!
//! `Session::update` mutates state and returns the side effects the caller
//! must run (storage writes, network fetches). Nothing here does I/O.

use crate::collections::{RecentlyViewed, SearchHistory, Setlist};
use crate::model::{Criteria, Song};
use crate::storage::StorageKey;

/// Top-level UI phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Loading,
    Results,
    Error,
}

/// Views available in the Results phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Results,
    Setlist,
    History,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Results => Tab::Setlist,
            Tab::Setlist => Tab::History,
            Tab::History => Tab::Results,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Results => Tab::History,
            Tab::Setlist => Tab::Results,
            Tab::History => Tab::Setlist,
        }
    }
}

/// The three persisted collections
#[derive(Debug, Clone)]
pub struct Library {
    pub history: SearchHistory,
    pub recently_viewed: RecentlyViewed,
    pub setlist: Setlist,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// New search from the form
    Submit(Criteria),
    /// Re-run a search picked from history
    Restore(Criteria),
    Loaded { request_id: u64, songs: Vec<Song> },
    Failed { request_id: u64, message: String },
    Reset,
    DismissError,
    SelectSong(Song),
    CloseDetail,
    ToggleFavorite(Song),
    SwitchTab(Tab),
    OpenSetlist,
    OpenHistory,
    ClearHistory,
}

/// Work for the caller after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Persist(StorageKey),
    Fetch { request_id: u64, criteria: Criteria },
}

#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub tab: Tab,
    pub songs: Vec<Song>,
    pub error: Option<String>,
    pub last_criteria: Option<Criteria>,
    /// Song open in the detail view
    pub selected: Option<Song>,
    pub library: Library,
    pending_request: Option<u64>,
    next_request_id: u64,
}

impl Session {
    pub fn new(library: Library) -> Self {
        Self {
            phase: Phase::Setup,
            tab: Tab::default(),
            songs: Vec::new(),
            error: None,
            last_criteria: None,
            selected: None,
            library,
            pending_request: None,
            next_request_id: 1,
        }
    }

    pub fn is_favorite(&self, song: &Song) -> bool {
        self.library.setlist.contains(song)
    }

    pub fn pending_request(&self) -> Option<u64> {
        self.pending_request
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Submit(criteria) => {
                if self.phase == Phase::Loading {
                    tracing::debug!("Ignoring submit while a request is in flight");
                    return Vec::new();
                }
                self.library.history.record(criteria.clone());
                let mut effects = vec![Effect::Persist(StorageKey::SearchHistory)];
                effects.push(self.start_search(criteria));
                effects
            }
            Action::Restore(criteria) => {
                if self.phase == Phase::Loading {
                    tracing::debug!("Ignoring restore while a request is in flight");
                    return Vec::new();
                }
                vec![self.start_search(criteria)]
            }
            Action::Loaded { request_id, songs } => {
                if !self.accepts(request_id) {
                    tracing::debug!("Dropping stale result for request {}", request_id);
                    return Vec::new();
                }
                self.pending_request = None;
                self.songs = songs;
                self.phase = Phase::Results;
                self.tab = Tab::Results;
                Vec::new()
            }
            Action::Failed { request_id, message } => {
                if !self.accepts(request_id) {
                    tracing::debug!("Dropping stale failure for request {}", request_id);
                    return Vec::new();
                }
                self.pending_request = None;
                self.error = Some(message);
                self.phase = Phase::Error;
                Vec::new()
            }
            Action::Reset => {
                self.phase = Phase::Setup;
                self.songs.clear();
                self.error = None;
                self.selected = None;
                self.pending_request = None;
                Vec::new()
            }
            Action::DismissError => {
                if self.phase == Phase::Error {
                    self.phase = Phase::Setup;
                    self.error = None;
                }
                Vec::new()
            }
            Action::SelectSong(song) => {
                self.library.recently_viewed.push_front(song.clone());
                self.selected = Some(song);
                vec![Effect::Persist(StorageKey::RecentlyViewed)]
            }
            Action::CloseDetail => {
                self.selected = None;
                Vec::new()
            }
            Action::ToggleFavorite(song) => {
                self.library.setlist.toggle(&song);
                vec![Effect::Persist(StorageKey::Setlist)]
            }
            Action::SwitchTab(tab) => {
                if self.phase == Phase::Results {
                    self.tab = tab;
                }
                Vec::new()
            }
            Action::OpenSetlist => {
                self.open_tab(Tab::Setlist);
                Vec::new()
            }
            Action::OpenHistory => {
                self.open_tab(Tab::History);
                Vec::new()
            }
            Action::ClearHistory => {
                self.library.history.clear();
                self.library.recently_viewed.clear();
                vec![
                    Effect::Persist(StorageKey::SearchHistory),
                    Effect::Persist(StorageKey::RecentlyViewed),
                ]
            }
        }
    }

    fn start_search(&mut self, criteria: Criteria) -> Effect {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request = Some(request_id);

        self.phase = Phase::Loading;
        self.error = None;
        self.tab = Tab::Results;
        self.last_criteria = Some(criteria.clone());

        Effect::Fetch { request_id, criteria }
    }

    /// Only the newest request, and only while still loading
    fn accepts(&self, request_id: u64) -> bool {
        self.phase == Phase::Loading && self.pending_request == Some(request_id)
    }

    fn open_tab(&mut self, tab: Tab) {
        if self.phase == Phase::Loading {
            return;
        }
        self.error = None;
        self.phase = Phase::Results;
        self.tab = tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{recently_viewed, search_history};
    use crate::model::fixtures::{criteria, song};

    fn session() -> Session {
        Session::new(Library {
            history: search_history(Vec::new()),
            recently_viewed: recently_viewed(Vec::new()),
            setlist: Setlist::new(),
        })
    }

    fn twelve_songs() -> Vec<Song> {
        (0..12).map(|i| song(&format!("Song {}", i), "Artist")).collect()
    }

    fn fetch_id(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Fetch { request_id, .. } => Some(*request_id),
                _ => None,
            })
            .expect("expected a fetch effect")
    }

    #[test]
    fn test_initial_state_is_setup() {
        let s = session();
        assert_eq!(s.phase, Phase::Setup);
        assert_eq!(s.tab, Tab::Results);
        assert!(s.songs.is_empty());
        assert!(s.error.is_none());
    }

    #[test]
    fn test_submit_then_success_reaches_results() {
        let mut s = session();
        let c = criteria("1980s", "Rock", "Energetic");

        let effects = s.update(Action::Submit(c.clone()));
        assert_eq!(s.phase, Phase::Loading);
        assert_eq!(effects[0], Effect::Persist(StorageKey::SearchHistory));
        assert!(matches!(&effects[1], Effect::Fetch { criteria, .. } if *criteria == c));
        assert_eq!(s.library.history.len(), 1);
        assert_eq!(s.last_criteria.as_ref(), Some(&c));

        let request_id = fetch_id(&effects);
        s.update(Action::Loaded { request_id, songs: twelve_songs() });

        assert_eq!(s.phase, Phase::Results);
        assert_eq!(s.tab, Tab::Results);
        assert_eq!(s.songs.len(), 12);
    }

    #[test]
    fn test_failure_enters_error_not_results() {
        let mut s = session();
        let effects = s.update(Action::Submit(criteria("1980s", "Rock", "Energetic")));

        s.update(Action::Failed {
            request_id: fetch_id(&effects),
            message: "Failed to read the song list".to_string(),
        });

        assert_eq!(s.phase, Phase::Error);
        assert_eq!(s.error.as_deref(), Some("Failed to read the song list"));
        assert!(s.songs.is_empty());
    }

    #[test]
    fn test_submit_clears_previous_error() {
        let mut s = session();
        let effects = s.update(Action::Submit(criteria("1980s", "Rock", "Energetic")));
        s.update(Action::Failed { request_id: fetch_id(&effects), message: "boom".to_string() });

        s.update(Action::Submit(criteria("1990s", "Pop", "Party")));
        assert_eq!(s.phase, Phase::Loading);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_resubmit_moves_history_entry_to_front() {
        let mut s = session();
        let a = criteria("1980s", "Rock", "Energetic");
        let b = criteria("1990s", "Pop", "Party");

        for c in [a.clone(), b, a.clone()] {
            let effects = s.update(Action::Submit(c));
            s.update(Action::Loaded { request_id: fetch_id(&effects), songs: Vec::new() });
        }

        assert_eq!(s.library.history.len(), 2);
        assert_eq!(s.library.history.get(0).unwrap().criteria, a);
    }

    #[test]
    fn test_restore_does_not_touch_history() {
        let mut s = session();
        let c = criteria("1980s", "Rock", "Energetic");

        let effects = s.update(Action::Restore(c.clone()));

        assert!(s.library.history.is_empty());
        assert_eq!(effects.len(), 1);
        assert!(matches!(&effects[0], Effect::Fetch { criteria, .. } if *criteria == c));
        assert_eq!(s.phase, Phase::Loading);
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let mut s = session();
        s.update(Action::Submit(criteria("1980s", "Rock", "Energetic")));

        let effects = s.update(Action::Submit(criteria("1990s", "Pop", "Party")));
        assert!(effects.is_empty());
        assert_eq!(s.library.history.len(), 1);
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut s = session();
        let first = fetch_id(&s.update(Action::Submit(criteria("1980s", "Rock", "Energetic"))));
        s.update(Action::Reset);
        let second = fetch_id(&s.update(Action::Submit(criteria("1990s", "Pop", "Party"))));
        assert_ne!(first, second);

        s.update(Action::Loaded { request_id: first, songs: twelve_songs() });
        assert_eq!(s.phase, Phase::Loading);
        assert!(s.songs.is_empty());

        s.update(Action::Loaded { request_id: second, songs: vec![song("Wannabe", "Spice Girls")] });
        assert_eq!(s.phase, Phase::Results);
        assert_eq!(s.songs.len(), 1);
    }

    #[test]
    fn test_result_after_reset_is_ignored() {
        let mut s = session();
        let id = fetch_id(&s.update(Action::Submit(criteria("1980s", "Rock", "Energetic"))));
        s.update(Action::Reset);

        s.update(Action::Loaded { request_id: id, songs: twelve_songs() });
        assert_eq!(s.phase, Phase::Setup);
        assert!(s.songs.is_empty());
    }

    #[test]
    fn test_reset_clears_songs_error_and_selection() {
        let mut s = session();
        let id = fetch_id(&s.update(Action::Submit(criteria("1980s", "Rock", "Energetic"))));
        s.update(Action::Loaded { request_id: id, songs: twelve_songs() });
        s.update(Action::SelectSong(song("Song 0", "Artist")));

        s.update(Action::Reset);

        assert_eq!(s.phase, Phase::Setup);
        assert!(s.songs.is_empty());
        assert!(s.error.is_none());
        assert!(s.selected.is_none());
    }

    #[test]
    fn test_select_song_records_recent_and_keeps_phase() {
        let mut s = session();
        let id = fetch_id(&s.update(Action::Submit(criteria("1980s", "Rock", "Energetic"))));
        s.update(Action::Loaded { request_id: id, songs: twelve_songs() });

        let effects = s.update(Action::SelectSong(song("Song 3", "Artist")));

        assert_eq!(effects, vec![Effect::Persist(StorageKey::RecentlyViewed)]);
        assert_eq!(s.phase, Phase::Results);
        assert_eq!(s.selected.as_ref().unwrap().title, "Song 3");
        assert_eq!(s.library.recently_viewed.get(0).unwrap().title, "Song 3");

        s.update(Action::CloseDetail);
        assert!(s.selected.is_none());
        assert_eq!(s.library.recently_viewed.len(), 1);
    }

    #[test]
    fn test_recently_viewed_never_exceeds_twelve() {
        let mut s = session();
        for i in 0..30 {
            s.update(Action::SelectSong(song(&format!("Song {}", i), "Artist")));
        }
        assert_eq!(s.library.recently_viewed.len(), 12);
        assert_eq!(s.library.recently_viewed.get(0).unwrap().title, "Song 29");
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let mut s = session();
        let target = song("Africa", "Toto");
        let before = s.library.setlist.clone();

        let effects = s.update(Action::ToggleFavorite(target.clone()));
        assert_eq!(effects, vec![Effect::Persist(StorageKey::Setlist)]);
        assert!(s.is_favorite(&target));

        s.update(Action::ToggleFavorite(target.clone()));
        assert!(!s.is_favorite(&target));
        assert_eq!(s.library.setlist, before);
    }

    #[test]
    fn test_dismiss_error_returns_to_setup() {
        let mut s = session();
        let id = fetch_id(&s.update(Action::Submit(criteria("1980s", "Rock", "Energetic"))));
        s.update(Action::Failed { request_id: id, message: "boom".to_string() });

        s.update(Action::DismissError);
        assert_eq!(s.phase, Phase::Setup);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_open_setlist_from_setup() {
        let mut s = session();
        s.update(Action::OpenSetlist);
        assert_eq!(s.phase, Phase::Results);
        assert_eq!(s.tab, Tab::Setlist);

        s.update(Action::Reset);
        s.update(Action::OpenHistory);
        assert_eq!(s.tab, Tab::History);
    }

    #[test]
    fn test_switch_tab_only_in_results() {
        let mut s = session();
        s.update(Action::SwitchTab(Tab::History));
        assert_eq!(s.tab, Tab::Results);

        s.update(Action::OpenSetlist);
        s.update(Action::SwitchTab(Tab::History));
        assert_eq!(s.tab, Tab::History);
    }

    #[test]
    fn test_clear_history_empties_both_lists() {
        let mut s = session();
        let id = fetch_id(&s.update(Action::Submit(criteria("1980s", "Rock", "Energetic"))));
        s.update(Action::Loaded { request_id: id, songs: twelve_songs() });
        s.update(Action::SelectSong(song("Song 1", "Artist")));
        s.update(Action::ToggleFavorite(song("Song 1", "Artist")));

        let effects = s.update(Action::ClearHistory);

        assert!(s.library.history.is_empty());
        assert!(s.library.recently_viewed.is_empty());
        assert_eq!(s.library.setlist.len(), 1);
        assert!(effects.contains(&Effect::Persist(StorageKey::SearchHistory)));
        assert!(effects.contains(&Effect::Persist(StorageKey::RecentlyViewed)));
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Results.next(), Tab::Setlist);
        assert_eq!(Tab::History.next(), Tab::Results);
        assert_eq!(Tab::Results.prev(), Tab::History);
    }
}
