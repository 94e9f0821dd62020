use serde::{Deserialize, Serialize};

/// Decade/era options offered by the criteria form
pub const DECADES: &[&str] = &[
    "Any", "2020s", "2010s", "2000s", "1990s", "1980s", "1970s", "1960s", "Oldies",
];

pub const GENRES: &[&str] = &[
    "Any",
    "Pop",
    "Rock",
    "R&B",
    "Hip-Hop",
    "Country",
    "Jazz",
    "Musical Theatre",
    "Disco",
    "Indie",
];

pub const MOODS: &[&str] = &["Any", "Party", "Romantic", "Chill", "Energetic", "Melancholic"];

/// Vocal preference labels; the label is what gets submitted
pub const VOCAL_TYPES: &[&str] = &["Female Vocals", "Male Vocals", "Duet", "Any"];
pub const DEFAULT_VOCAL_TYPE: usize = 3;

pub const DIFFICULTIES: &[&str] = &[
    "Any Difficulty",
    "Beginner Friendly",
    "Intermediate",
    "Show-off (Hard)",
];

const SPOTIFY_SEARCH_URL: &str = "https://open.spotify.com/search/";

/// A song search filter as submitted by the user.
///
/// Equality is structural over every field, which is what search history
/// uses to collapse resubmissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub vocal_type: String,
    pub decade: String,
    pub genre: String,
    pub mood: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_request: Option<String>,
}

impl Criteria {
    /// The non-empty custom request, if any
    pub fn custom_request(&self) -> Option<&str> {
        self.custom_request
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Short one-line label used by history lists
    pub fn summary(&self) -> String {
        match self.custom_request() {
            Some(request) => format!("\"{}\"", request),
            None => format!("{} {} • {}", self.decade, self.genre, self.mood),
        }
    }
}

/// Singing difficulty as rated by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommended song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub year: String,
    pub genre: String,
    pub lyric_snippet: String,
    pub difficulty: Difficulty,
    pub mood_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
}

/// Identity of a song for de-duplication: exact, case-sensitive title and artist
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongKey {
    pub title: String,
    pub artist: String,
}

impl Song {
    pub fn key(&self) -> SongKey {
        SongKey {
            title: self.title.clone(),
            artist: self.artist.clone(),
        }
    }

    pub fn same_song(&self, other: &Song) -> bool {
        self.title == other.title && self.artist == other.artist
    }

    /// Link to a streaming-service search for this song
    pub fn listen_url(&self) -> String {
        match self.spotify_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => spotify_search_url(&self.title, &self.artist),
        }
    }
}

pub fn spotify_search_url(title: &str, artist: &str) -> String {
    let query = format!("{} {}", title, artist);
    format!("{}{}", SPOTIFY_SEARCH_URL, urlencoding::encode(&query))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn song(title: &str, artist: &str) -> Song {
        Song {
            title: title.to_string(),
            artist: artist.to_string(),
            year: "1984".to_string(),
            genre: "Rock".to_string(),
            lyric_snippet: "Just a small town girl".to_string(),
            difficulty: Difficulty::Medium,
            mood_description: "Stadium singalong".to_string(),
            spotify_url: None,
        }
    }

    pub fn criteria(decade: &str, genre: &str, mood: &str) -> Criteria {
        Criteria {
            vocal_type: "Any".to_string(),
            decade: decade.to_string(),
            genre: genre.to_string(),
            mood: mood.to_string(),
            difficulty: "Any".to_string(),
            custom_request: None,
        }
    }
}
