use crate::model::{Criteria, DECADES, DEFAULT_VOCAL_TYPE, DIFFICULTIES, GENRES, MOODS, VOCAL_TYPES};

/// Criteria form fields, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    VocalType,
    Decade,
    Genre,
    Mood,
    Difficulty,
    CustomRequest,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::VocalType,
        FormField::Decade,
        FormField::Genre,
        FormField::Mood,
        FormField::Difficulty,
        FormField::CustomRequest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::VocalType => "Vocals",
            FormField::Decade => "Decade",
            FormField::Genre => "Genre",
            FormField::Mood => "Mood",
            FormField::Difficulty => "Difficulty",
            FormField::CustomRequest => "Special request",
        }
    }

    /// Selectable options; empty for the free-text field
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            FormField::VocalType => VOCAL_TYPES,
            FormField::Decade => DECADES,
            FormField::Genre => GENRES,
            FormField::Mood => MOODS,
            FormField::Difficulty => DIFFICULTIES,
            FormField::CustomRequest => &[],
        }
    }
}

/// Criteria form state
#[derive(Debug, Clone)]
pub struct FormState {
    pub focus: usize,
    /// Option index per selector field, in `FormField::ALL` order
    pub choices: [usize; 5],
    pub custom_request: String,
    pub is_editing: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            focus: 0,
            choices: [DEFAULT_VOCAL_TYPE, 0, 0, 0, 0],
            custom_request: String::new(),
            is_editing: false,
        }
    }
}

impl FormState {
    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1).min(FormField::ALL.len() - 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Currently chosen option for a selector field
    pub fn value(&self, field: FormField) -> &'static str {
        match field {
            FormField::CustomRequest => "",
            _ => {
                let index = FormField::ALL.iter().position(|f| *f == field).unwrap_or(0);
                field.options()[self.choices[index]]
            }
        }
    }

    /// Step the focused selector by `delta`, wrapping around
    pub fn cycle(&mut self, delta: isize) {
        let field = self.focused_field();
        let len = field.options().len() as isize;
        if len == 0 {
            return;
        }
        let current = self.choices[self.focus] as isize;
        self.choices[self.focus] = (current + delta).rem_euclid(len) as usize;
    }

    pub fn criteria(&self) -> Criteria {
        let request = self.custom_request.trim();
        Criteria {
            vocal_type: self.value(FormField::VocalType).to_string(),
            decade: self.value(FormField::Decade).to_string(),
            genre: self.value(FormField::Genre).to_string(),
            mood: self.value(FormField::Mood).to_string(),
            difficulty: self.value(FormField::Difficulty).to_string(),
            custom_request: if request.is_empty() {
                None
            } else {
                Some(request.to_string())
            },
        }
    }
}

/// Which half of the History tab has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPane {
    #[default]
    Searches,
    Recent,
}

/// Selection within the result views
#[derive(Debug, Default)]
pub struct BrowseState {
    pub selected_result: usize,
    pub selected_favorite: usize,
    pub selected_search: usize,
    pub selected_recent: usize,
    pub history_pane: HistoryPane,
}

/// Vim-style key command state
#[derive(Default)]
pub struct KeyState {
    pub pending_key: Option<char>,
}

#[derive(Default)]
pub struct HelpState {
    pub scroll_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    None,
    ConfirmClearHistory,
}

#[derive(Default)]
pub struct DialogState {
    pub mode: DialogMode,
}

pub struct StatusMessage {
    pub message: String,
    pub is_error: bool,
    pub timestamp: std::time::Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_builds_any_criteria() {
        let form = FormState::default();
        let criteria = form.criteria();

        assert_eq!(criteria.vocal_type, "Any");
        assert_eq!(criteria.decade, "Any");
        assert_eq!(criteria.genre, "Any");
        assert_eq!(criteria.mood, "Any");
        assert_eq!(criteria.difficulty, "Any Difficulty");
        assert!(criteria.custom_request.is_none());
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut form = FormState::default();
        form.focus = 1; // Decade

        form.cycle(-1);
        assert_eq!(form.value(FormField::Decade), "Oldies");
        form.cycle(1);
        assert_eq!(form.value(FormField::Decade), "Any");
        form.cycle(5);
        assert_eq!(form.value(FormField::Decade), "1980s");
    }

    #[test]
    fn test_cycle_on_text_field_is_noop() {
        let mut form = FormState::default();
        form.focus = 5;
        form.cycle(1);
        assert_eq!(form.choices, FormState::default().choices);
    }

    #[test]
    fn test_custom_request_is_trimmed() {
        let mut form = FormState::default();
        form.custom_request = "  Disney songs  ".to_string();
        assert_eq!(form.criteria().custom_request.as_deref(), Some("Disney songs"));

        form.custom_request = "   ".to_string();
        assert!(form.criteria().custom_request.is_none());
    }

    #[test]
    fn test_focus_is_clamped() {
        let mut form = FormState::default();
        form.focus_prev();
        assert_eq!(form.focus, 0);
        for _ in 0..10 {
            form.focus_next();
        }
        assert_eq!(form.focused_field(), FormField::CustomRequest);
    }
}
