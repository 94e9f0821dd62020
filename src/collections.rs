// Bounded move-to-front lists for search history and recently viewed songs,
// plus the favourites set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::model::{Criteria, Song, SongKey};

/// Most searches kept in history
pub const HISTORY_LIMIT: usize = 10;

/// Most songs kept in recently viewed
pub const RECENTLY_VIEWED_LIMIT: usize = 12;

/// Newest-first list capped at `capacity`, deduplicated by an equality key.
///
/// Pushing an item whose key is already present removes the old copy and
/// reinserts the new one at the front.
#[derive(Clone)]
pub struct BoundedList<T, K> {
    items: VecDeque<T>,
    capacity: usize,
    key: fn(&T) -> K,
}

impl<T: std::fmt::Debug, K> std::fmt::Debug for BoundedList<T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedList")
            .field("items", &self.items)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T, K: PartialEq> BoundedList<T, K> {
    pub fn new(capacity: usize, key: fn(&T) -> K) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
            key,
        }
    }

    /// Rebuild from stored items, keeping the first occurrence of each key
    /// and trimming to capacity
    pub fn from_items(items: Vec<T>, capacity: usize, key: fn(&T) -> K) -> Self {
        let mut list = Self::new(capacity, key);
        for item in items {
            if list.items.len() >= capacity {
                break;
            }
            let k = key(&item);
            if !list.items.iter().any(|existing| key(existing) == k) {
                list.items.push_back(item);
            }
        }
        list
    }

    pub fn push_front(&mut self, item: T) {
        let k = (self.key)(&item);
        let key = self.key;
        self.items.retain(|existing| key(existing) != k);

        self.items.push_front(item);

        while self.items.len() > self.capacity {
            self.items.pop_back();
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// The `n` most recent items
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        self.items.iter().take(n)
    }

    pub fn items(&self) -> &VecDeque<T> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// A past search. Older stores hold bare criteria objects, which still load
/// because the timestamp defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    #[serde(flatten)]
    pub criteria: Criteria,
    #[serde(default = "Utc::now")]
    pub searched_at: DateTime<Utc>,
}

impl SearchHistoryEntry {
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            searched_at: Utc::now(),
        }
    }
}

fn history_key(entry: &SearchHistoryEntry) -> Criteria {
    entry.criteria.clone()
}

pub type SearchHistory = BoundedList<SearchHistoryEntry, Criteria>;
pub type RecentlyViewed = BoundedList<Song, SongKey>;

pub fn search_history(entries: Vec<SearchHistoryEntry>) -> SearchHistory {
    BoundedList::from_items(entries, HISTORY_LIMIT, history_key)
}

pub fn recently_viewed(songs: Vec<Song>) -> RecentlyViewed {
    BoundedList::from_items(songs, RECENTLY_VIEWED_LIMIT, Song::key)
}

impl SearchHistory {
    /// Record a submitted search, moving an identical earlier one to the front
    pub fn record(&mut self, criteria: Criteria) {
        self.push_front(SearchHistoryEntry::new(criteria));
    }
}

/// The user's favourited songs, keyed by title and artist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Setlist {
    songs: Vec<Song>,
}

impl Setlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_songs(songs: Vec<Song>) -> Self {
        let mut setlist = Self::new();
        for song in songs {
            if !setlist.contains(&song) {
                setlist.songs.push(song);
            }
        }
        setlist
    }

    pub fn contains(&self, song: &Song) -> bool {
        self.songs.iter().any(|s| s.same_song(song))
    }

    /// Flip membership; returns true when the song is now a favourite
    pub fn toggle(&mut self, song: &Song) -> bool {
        if self.contains(song) {
            self.songs.retain(|s| !s.same_song(song));
            false
        } else {
            self.songs.push(song.clone());
            true
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{criteria, song};

    #[test]
    fn test_history_resubmission_moves_to_front() {
        let mut history = search_history(Vec::new());
        history.record(criteria("1980s", "Rock", "Energetic"));
        history.record(criteria("1990s", "Pop", "Party"));
        history.record(criteria("1980s", "Rock", "Energetic"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().criteria.decade, "1980s");
        assert_eq!(history.get(1).unwrap().criteria.decade, "1990s");
    }

    #[test]
    fn test_history_caps_at_capacity() {
        let mut history = search_history(Vec::new());
        for i in 0..15 {
            history.record(criteria(&format!("{}0s", 190 + i), "Rock", "Chill"));
        }

        assert_eq!(history.len(), 10);
        // Most recent first
        assert_eq!(history.get(0).unwrap().criteria.decade, "2040s");
        assert_eq!(history.get(9).unwrap().criteria.decade, "1950s");
    }

    #[test]
    fn test_custom_request_distinguishes_history_entries() {
        let mut history = search_history(Vec::new());
        let plain = criteria("Any", "Any", "Any");
        let mut custom = plain.clone();
        custom.custom_request = Some("Disney songs".to_string());

        history.record(plain);
        history.record(custom);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_recently_viewed_dedupes_by_title_and_artist() {
        let mut recent = recently_viewed(Vec::new());
        recent.push_front(song("Africa", "Toto"));
        recent.push_front(song("Hold the Line", "Toto"));

        let mut again = song("Africa", "Toto");
        again.year = "1982".to_string();
        recent.push_front(again);

        assert_eq!(recent.len(), 2);
        assert_eq!(recent.get(0).unwrap().title, "Africa");
        assert_eq!(recent.get(0).unwrap().year, "1982");
        assert_eq!(recent.get(1).unwrap().title, "Hold the Line");
    }

    #[test]
    fn test_recently_viewed_caps_at_twelve() {
        let mut recent = recently_viewed(Vec::new());
        for i in 0..20 {
            recent.push_front(song(&format!("Song {}", i), "Artist"));
        }
        assert_eq!(recent.len(), 12);
        assert_eq!(recent.get(0).unwrap().title, "Song 19");
        assert_eq!(recent.get(11).unwrap().title, "Song 8");
    }

    #[test]
    fn test_from_items_trims_and_dedupes() {
        let songs = vec![
            song("A", "x"),
            song("B", "x"),
            song("A", "x"),
            song("C", "x"),
            song("D", "x"),
        ];
        let recent = BoundedList::from_items(songs, 3, Song::key);

        let titles: Vec<&str> = recent.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_toggle_favorite_twice_is_identity() {
        let mut setlist = Setlist::from_songs(vec![song("Africa", "Toto")]);
        let original = setlist.clone();
        let target = song("Take On Me", "a-ha");

        assert!(setlist.toggle(&target));
        assert!(setlist.contains(&target));
        assert!(!setlist.toggle(&target));

        assert_eq!(setlist, original);
    }

    #[test]
    fn test_toggle_matches_on_key_not_full_song() {
        let mut setlist = Setlist::new();
        setlist.toggle(&song("Africa", "Toto"));

        let mut variant = song("Africa", "Toto");
        variant.lyric_snippet = "It's gonna take a lot".to_string();
        assert!(!setlist.toggle(&variant));
        assert!(setlist.is_empty());
    }

    #[test]
    fn test_history_entry_loads_from_bare_criteria() {
        let json = r#"[{"vocalType":"Any","decade":"1980s","genre":"Rock","mood":"Energetic","difficulty":"Any"}]"#;
        let entries: Vec<SearchHistoryEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].criteria, criteria("1980s", "Rock", "Energetic"));
    }

    #[test]
    fn test_history_entry_serializes_flat() {
        let entry = SearchHistoryEntry::new(criteria("1980s", "Rock", "Energetic"));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["decade"], "1980s");
        assert!(value.get("searchedAt").is_some());
        assert!(value.get("customRequest").is_none());
    }
}
