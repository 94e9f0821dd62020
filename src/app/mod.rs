pub mod state;
mod navigation;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::collections::{recently_viewed, search_history, SearchHistoryEntry, Setlist};
use crate::config::Config;
use crate::model::{Criteria, Song};
use crate::recommend::{GeminiClient, RecommendError, SongRecommender};
use crate::session::{Action, Effect, Library, Session, Tab};
use crate::storage::{load_collection, save_collection, KeyValueStore, LocalStore, MemoryStore, StorageKey};
use crate::ui::Theme;

pub use state::{
    BrowseState, DialogMode, DialogState, FormField, FormState, HelpState, HistoryPane, KeyState,
    StatusMessage,
};

/// Outcome of one background recommendation request
#[derive(Debug)]
pub struct RecommendationEvent {
    pub request_id: u64,
    pub outcome: Result<Vec<Song>, RecommendError>,
}

pub struct App {
    pub session: Session,

    // View state
    pub form: FormState,
    pub browse: BrowseState,
    pub key_state: KeyState,
    pub dialog: DialogState,
    pub show_help: bool,
    pub help: HelpState,
    /// Frame counter for the loading spinner
    pub tick: usize,

    // Status bar message (for displaying errors/info)
    pub status_message: Option<StatusMessage>,

    // Configuration
    pub config: Config,
    pub theme: Theme,

    // Core components
    store: Box<dyn KeyValueStore>,
    recommender: Arc<dyn SongRecommender>,
    event_tx: UnboundedSender<RecommendationEvent>,
    event_rx: UnboundedReceiver<RecommendationEvent>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store: Box<dyn KeyValueStore> = match config.data_dir().and_then(LocalStore::new) {
            Ok(store) => {
                tracing::info!("Saving data under {}", store.data_dir().display());
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!("Could not open data directory, nothing will be saved: {:#}", e);
                Box::new(MemoryStore::new())
            }
        };

        let recommender = GeminiClient::new(&config.gemini)
            .context("Failed to build Gemini client")?;

        Ok(Self::with_parts(config, store, Arc::new(recommender)))
    }

    /// Assemble an app from explicit parts and load the saved collections
    pub fn with_parts(
        config: Config,
        store: Box<dyn KeyValueStore>,
        recommender: Arc<dyn SongRecommender>,
    ) -> Self {
        let library = load_library(store.as_ref());
        tracing::info!(
            "Loaded {} favourites, {} searches, {} recently viewed (store: {}, model: {})",
            library.setlist.len(),
            library.history.len(),
            library.recently_viewed.len(),
            store.backend_name(),
            recommender.name(),
        );

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let theme = config.theme.clone().resolve();

        Self {
            session: Session::new(library),
            form: FormState::default(),
            browse: BrowseState::default(),
            key_state: KeyState::default(),
            dialog: DialogState::default(),
            show_help: false,
            help: HelpState::default(),
            tick: 0,
            status_message: None,
            config,
            theme,
            store,
            recommender,
            event_tx,
            event_rx,
        }
    }

    pub fn recommender_name(&self) -> &str {
        self.recommender.name()
    }

    /// Advance per-frame counters (called every tick)
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.clear_expired_status();
    }

    /// Run one session transition and its side effects
    pub fn dispatch(&mut self, action: Action) {
        let effects = self.session.update(action);
        for effect in effects {
            self.run_effect(effect);
        }
        self.clamp_selection();
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Persist(key) => self.persist(key),
            Effect::Fetch { request_id, criteria } => self.spawn_fetch(request_id, criteria),
        }
    }

    fn persist(&mut self, key: StorageKey) {
        let store = self.store.as_ref();
        let library = &self.session.library;
        let saved = match key {
            StorageKey::Setlist => save_collection(store, key, library.setlist.songs()),
            StorageKey::SearchHistory => save_collection(store, key, library.history.items()),
            StorageKey::RecentlyViewed => save_collection(store, key, library.recently_viewed.items()),
        };
        if let Err(e) = saved {
            self.set_status_error(format!("Could not save {}: {:#}", key.label(), e));
        }
    }

    fn spawn_fetch(&self, request_id: u64, criteria: Criteria) {
        let recommender = Arc::clone(&self.recommender);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let outcome = recommender.recommend(&criteria).await;
            if tx.send(RecommendationEvent { request_id, outcome }).is_err() {
                tracing::debug!("App gone before request {} finished", request_id);
            }
        });
    }

    /// Drain finished requests (called every tick)
    pub fn handle_recommendation_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_recommendation(event);
        }
    }

    /// Wait for the next finished request and apply it
    pub async fn await_recommendation(&mut self) -> Option<u64> {
        let event = self.event_rx.recv().await?;
        let request_id = event.request_id;
        self.apply_recommendation(event);
        Some(request_id)
    }

    fn apply_recommendation(&mut self, event: RecommendationEvent) {
        let RecommendationEvent { request_id, outcome } = event;
        let current = self.session.pending_request() == Some(request_id);
        match outcome {
            Ok(songs) => {
                let count = songs.len();
                self.dispatch(Action::Loaded { request_id, songs });
                if current {
                    self.browse.selected_result = 0;
                    self.set_status_info(format!("Found {} songs", count));
                }
            }
            Err(e) => {
                tracing::error!("Recommendation request {} failed: {}", request_id, e);
                self.dispatch(Action::Failed { request_id, message: e.user_message() });
            }
        }
    }

    // ── User operations ─────────────────────────────────────────────

    pub fn submit_form(&mut self) {
        let criteria = self.form.criteria();
        self.form.is_editing = false;
        self.dispatch(Action::Submit(criteria));
    }

    pub fn restore_search(&mut self, index: usize) {
        let criteria = self
            .session
            .library
            .history
            .get(index)
            .map(|entry: &SearchHistoryEntry| entry.criteria.clone());
        if let Some(criteria) = criteria {
            self.dispatch(Action::Restore(criteria));
        }
    }

    pub fn open_selected_song(&mut self) {
        if let Some(song) = self.selected_song().cloned() {
            self.dispatch(Action::SelectSong(song));
            // Opening moves the song to the front of recently viewed
            if self.session.tab == Tab::History && self.browse.history_pane == HistoryPane::Recent {
                self.browse.selected_recent = 0;
            }
        }
    }

    /// Toggle favourite on the open detail view, or the selected card
    pub fn toggle_favorite(&mut self) {
        let song = self
            .session
            .selected
            .clone()
            .or_else(|| self.selected_song().cloned());

        if let Some(song) = song {
            // Set before dispatching so a failed save can replace it
            if self.session.is_favorite(&song) {
                self.set_status_info(format!("Removed '{}' from your setlist", song.title));
            } else {
                self.set_status_info(format!("Added '{}' to your setlist", song.title));
            }
            self.dispatch(Action::ToggleFavorite(song));
        }
    }

    pub fn new_search(&mut self) {
        self.dispatch(Action::Reset);
        self.browse = BrowseState::default();
    }

    pub fn confirm_clear_history(&mut self) {
        self.dialog.mode = DialogMode::None;
        self.set_status_info("History cleared".to_string());
        self.dispatch(Action::ClearHistory);
    }

    // ── Dialogs and status ─────────────────────────────────────────

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.mode != DialogMode::None
    }

    pub fn close_dialog(&mut self) {
        self.dialog.mode = DialogMode::None;
    }

    pub fn set_status_error(&mut self, msg: String) {
        tracing::warn!("{}", msg);
        self.status_message = Some(StatusMessage {
            message: msg,
            is_error: true,
            timestamp: std::time::Instant::now(),
        });
    }

    pub fn set_status_info(&mut self, msg: String) {
        self.status_message = Some(StatusMessage {
            message: msg,
            is_error: false,
            timestamp: std::time::Instant::now(),
        });
    }

    pub fn clear_expired_status(&mut self) {
        if let Some(ref msg) = self.status_message {
            if msg.timestamp.elapsed() > std::time::Duration::from_secs(5) {
                self.status_message = None;
            }
        }
    }
}

fn load_library(store: &dyn KeyValueStore) -> Library {
    let history: Vec<SearchHistoryEntry> = load_collection(store, StorageKey::SearchHistory);
    let recent: Vec<Song> = load_collection(store, StorageKey::RecentlyViewed);
    let favorites: Vec<Song> = load_collection(store, StorageKey::Setlist);

    Library {
        history: search_history(history),
        recently_viewed: recently_viewed(recent),
        setlist: Setlist::from_songs(favorites),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::fixtures::{criteria, song};
    use crate::session::Phase;
    use async_trait::async_trait;

    /// Recommender that returns a canned outcome
    pub(crate) struct MockRecommender {
        pub outcome: Result<Vec<Song>, RecommendError>,
    }

    #[async_trait]
    impl SongRecommender for MockRecommender {
        fn name(&self) -> &str {
            "mock"
        }

        async fn recommend(&self, _criteria: &Criteria) -> Result<Vec<Song>, RecommendError> {
            self.outcome.clone()
        }
    }

    pub(crate) fn twelve_songs() -> Vec<Song> {
        (1..=12).map(|i| song(&format!("Hit {}", i), "Band")).collect()
    }

    pub(crate) fn app_with(outcome: Result<Vec<Song>, RecommendError>) -> App {
        App::with_parts(
            Config::default(),
            Box::new(MemoryStore::new()),
            Arc::new(MockRecommender { outcome }),
        )
    }

    #[tokio::test]
    async fn test_submit_reaches_results_with_twelve_songs() {
        let mut app = app_with(Ok(twelve_songs()));
        assert_eq!(app.session.phase, Phase::Setup);

        app.dispatch(Action::Submit(criteria("1980s", "Rock", "Energetic")));
        assert_eq!(app.session.phase, Phase::Loading);

        app.await_recommendation().await.unwrap();

        assert_eq!(app.session.phase, Phase::Results);
        assert_eq!(app.session.tab, Tab::Results);
        assert_eq!(app.session.songs.len(), 12);
    }

    #[tokio::test]
    async fn test_parse_failure_lands_in_error() {
        let mut app = app_with(Err(RecommendError::Parse("expected value".to_string())));

        app.submit_form();
        app.await_recommendation().await.unwrap();

        assert_eq!(app.session.phase, Phase::Error);
        assert_eq!(
            app.session.error.as_deref(),
            Some(RecommendError::Parse(String::new()).user_message().as_str())
        );
        assert!(app.session.songs.is_empty());
    }

    #[tokio::test]
    async fn test_history_is_persisted_on_submit() {
        let mut app = app_with(Ok(Vec::new()));
        app.submit_form();

        let stored = app.store.read(StorageKey::SearchHistory).unwrap().unwrap();
        let entries: Vec<SearchHistoryEntry> = serde_json::from_str(&stored).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].criteria, app.form.criteria());
    }

    #[tokio::test]
    async fn test_favorites_persist_and_reload() {
        let mut app = app_with(Ok(twelve_songs()));
        app.dispatch(Action::Submit(criteria("1980s", "Rock", "Energetic")));
        app.await_recommendation().await.unwrap();

        app.browse.selected_result = 2;
        app.toggle_favorite();
        assert!(app.session.is_favorite(&song("Hit 3", "Band")));

        let library = load_library(app.store.as_ref());
        assert_eq!(library.setlist.len(), 1);
        assert_eq!(library.setlist.songs()[0].title, "Hit 3");
    }

    #[tokio::test]
    async fn test_open_selected_song_records_recently_viewed() {
        let mut app = app_with(Ok(twelve_songs()));
        app.dispatch(Action::Submit(criteria("1980s", "Rock", "Energetic")));
        app.await_recommendation().await.unwrap();

        app.browse.selected_result = 5;
        app.open_selected_song();

        assert_eq!(app.session.selected.as_ref().unwrap().title, "Hit 6");
        let stored = app.store.read(StorageKey::RecentlyViewed).unwrap().unwrap();
        assert!(stored.contains("Hit 6"));
    }

    #[test]
    fn test_corrupt_store_loads_empty_library() {
        let store = MemoryStore::new();
        store.write(StorageKey::Setlist, "not json").unwrap();
        store.write(StorageKey::SearchHistory, "[1, 2, 3]").unwrap();

        let library = load_library(&store);
        assert!(library.setlist.is_empty());
        assert!(library.history.is_empty());
        assert!(library.recently_viewed.is_empty());
    }

    #[test]
    fn test_stored_history_is_trimmed_to_ten() {
        let store = MemoryStore::new();
        let entries: Vec<SearchHistoryEntry> = (0..15)
            .map(|i| SearchHistoryEntry::new(criteria(&format!("{}", i), "Pop", "Party")))
            .collect();
        save_collection(&store, StorageKey::SearchHistory, &entries).unwrap();

        let library = load_library(&store);
        assert_eq!(library.history.len(), 10);
    }

    #[tokio::test]
    async fn test_history_stays_capped_with_old_size_settings() {
        let config: Config = toml::from_str(
            "[library]\nhistory_size = 50\nrecently_viewed_size = 50\n",
        )
        .unwrap();
        let mut app = App::with_parts(
            config,
            Box::new(MemoryStore::new()),
            Arc::new(MockRecommender { outcome: Ok(twelve_songs()) }),
        );

        for i in 0..20 {
            app.dispatch(Action::Submit(criteria(&format!("{}", 1900 + i), "Rock", "Chill")));
            app.new_search();
        }
        assert_eq!(app.session.library.history.len(), 10);

        let stored: Vec<SearchHistoryEntry> =
            load_collection(app.store.as_ref(), StorageKey::SearchHistory);
        assert_eq!(stored.len(), 10);
    }

    #[tokio::test]
    async fn test_opening_recent_song_keeps_cursor_on_it() {
        let mut app = app_with(Ok(twelve_songs()));
        app.dispatch(Action::Submit(criteria("1980s", "Rock", "Energetic")));
        app.await_recommendation().await.unwrap();
        for i in 0..4 {
            app.browse.selected_result = i;
            app.open_selected_song();
            app.dispatch(Action::CloseDetail);
        }

        app.dispatch(Action::SwitchTab(Tab::History));
        app.browse.history_pane = HistoryPane::Recent;
        app.jump_to_end();
        assert_eq!(app.selected_song().unwrap().title, "Hit 1");

        app.open_selected_song();
        app.dispatch(Action::CloseDetail);
        assert_eq!(app.selected_song().unwrap().title, "Hit 1");

        app.toggle_favorite();
        let favorites: Vec<&str> =
            app.session.library.setlist.songs().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(favorites, vec!["Hit 1"]);
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn backend_name(&self) -> &str {
            "read-only"
        }

        fn read(&self, _key: StorageKey) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&self, _key: StorageKey, _value: &str) -> Result<()> {
            anyhow::bail!("disk is read-only")
        }
    }

    #[tokio::test]
    async fn test_save_failure_shows_error_status() {
        let mut app = App::with_parts(
            Config::default(),
            Box::new(ReadOnlyStore),
            Arc::new(MockRecommender { outcome: Ok(twelve_songs()) }),
        );
        app.dispatch(Action::Submit(criteria("1980s", "Rock", "Energetic")));
        app.await_recommendation().await.unwrap();

        app.toggle_favorite();

        // In-memory state still changes
        assert_eq!(app.session.library.setlist.len(), 1);
        let status = app.status_message.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.message.contains("setlist"), "{}", status.message);
    }
}
