use serde_json::{json, Value};

use crate::model::{Criteria, Difficulty};

/// Build the instruction text for one request.
///
/// A non-empty custom request is flagged as taking priority over the
/// structured fields.
pub fn build_prompt(criteria: &Criteria, song_count: usize) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an expert karaoke DJ who knows current streaming trends and music history.\n",
    );
    prompt.push_str(&format!(
        "Suggest a curated list of {} karaoke songs matching these criteria:\n",
        song_count
    ));
    prompt.push_str(&format!("- Vocal preference: {}\n", criteria.vocal_type));
    prompt.push_str(&format!("- Decade/era: {}\n", criteria.decade));
    prompt.push_str(&format!("- Genre: {}\n", criteria.genre));
    prompt.push_str(&format!("- Mood/atmosphere: {}\n", criteria.mood));
    prompt.push_str(&format!("- Difficulty level: {}\n", criteria.difficulty));

    if let Some(request) = criteria.custom_request() {
        prompt.push_str(&format!(
            "IMPORTANT - USER SPECIAL REQUEST: \"{}\". Prioritize this request over the other criteria where they conflict.\n",
            request
        ));
    }

    prompt.push_str(
        "\nFor each song give: title, artist, release year, genre, a very short iconic lyric \
         snippet (1-2 lines at most; if the lyrics are unavailable, briefly describe the hook \
         instead), a difficulty rating (Easy, Medium or Hard) and a few words describing the mood.\n",
    );
    prompt.push_str("Only pick songs popular enough that a standard karaoke machine would carry them.\n");

    prompt
}

/// Response schema: an array of song objects with every field required
pub fn response_schema() -> Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "artist": { "type": "STRING" },
                "year": { "type": "STRING" },
                "genre": { "type": "STRING" },
                "lyricSnippet": { "type": "STRING" },
                "difficulty": { "type": "STRING", "enum": difficulties },
                "moodDescription": { "type": "STRING" },
            },
            "required": [
                "title", "artist", "year", "genre", "lyricSnippet", "difficulty", "moodDescription"
            ],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::criteria;

    #[test]
    fn test_prompt_embeds_every_field() {
        let mut c = criteria("1980s", "Rock", "Energetic");
        c.vocal_type = "Duet".to_string();
        c.difficulty = "Show-off (Hard)".to_string();

        let prompt = build_prompt(&c, 12);

        assert!(prompt.contains("12 karaoke songs"));
        assert!(prompt.contains("Vocal preference: Duet"));
        assert!(prompt.contains("Decade/era: 1980s"));
        assert!(prompt.contains("Genre: Rock"));
        assert!(prompt.contains("Mood/atmosphere: Energetic"));
        assert!(prompt.contains("Difficulty level: Show-off (Hard)"));
        assert!(!prompt.contains("SPECIAL REQUEST"));
    }

    #[test]
    fn test_custom_request_is_prioritized() {
        let mut c = criteria("Any", "Any", "Any");
        c.custom_request = Some("Songs with key changes".to_string());

        let prompt = build_prompt(&c, 12);
        assert!(prompt.contains("USER SPECIAL REQUEST: \"Songs with key changes\""));
        assert!(prompt.contains("Prioritize"));
    }

    #[test]
    fn test_blank_custom_request_is_ignored() {
        let mut c = criteria("Any", "Any", "Any");
        c.custom_request = Some("  ".to_string());
        assert!(!build_prompt(&c, 12).contains("SPECIAL REQUEST"));
    }

    #[test]
    fn test_schema_requires_all_song_fields() {
        let schema = response_schema();
        let required = schema["items"]["required"].as_array().unwrap();

        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(required.len(), 7);
        assert_eq!(
            schema["items"]["properties"]["difficulty"]["enum"],
            json!(["Easy", "Medium", "Hard"])
        );
    }
}
