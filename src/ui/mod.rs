pub mod detail;
pub mod dialog;
pub mod form;
pub mod help;
pub mod history;
pub mod keybindings;
pub mod loading;
pub mod screen;
pub mod songs;
pub mod status_bar;
pub mod theme;

use ratatui::layout::Rect;

pub use detail::{render_song_detail, DetailViewState};
pub use dialog::{render_dialog, DialogRenderState};
pub use form::{render_form_view, FormViewState};
pub use help::{render_help_panel, HelpPanelState};
pub use history::{render_history_view, HistoryViewState};
pub use keybindings::help_content_height;
pub use loading::render_loading;
pub use screen::render_ui;
pub use songs::{render_song_grid, SongGridState};
pub use status_bar::{render_status_bar, StatusBarState};
pub use theme::Theme;

/// Rect of `percent_x` by `percent_y` centered inside `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y.min(100) as u32 / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Cut `s` to at most `max_len` characters, ending in "..." when shortened
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Bohemian Rhapsody", 40), "Bohemian Rhapsody");
        assert_eq!(truncate_str("Bohemian Rhapsody", 10), "Bohemia...");
        assert_eq!(truncate_str("Café del Mar", 7), "Café...");
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 90, area);
        assert_eq!(popup, Rect::new(10, 2, 80, 45));
    }
}
