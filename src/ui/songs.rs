use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::{truncate_str, Theme};
use crate::collections::Setlist;
use crate::model::Song;

/// Rows per card including borders
pub const CARD_HEIGHT: u16 = 6;

pub const FAVORITE_MARKER: &str = "♥";

pub struct SongGridState<'a> {
    pub songs: Vec<&'a Song>,
    pub selected: usize,
    pub columns: usize,
    pub setlist: &'a Setlist,
    pub empty_message: &'a str,
    /// Whether the cursor lives in this grid
    pub focused: bool,
}

pub fn render_song_grid(f: &mut Frame, state: &SongGridState, area: Rect, theme: &Theme) {
    if state.songs.is_empty() {
        let empty = Paragraph::new(state.empty_message)
            .style(Style::default().fg(theme.text_muted()))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true });
        if area.height > 0 {
            let y = area.y + area.height / 2;
            f.render_widget(empty, Rect::new(area.x, y, area.width, 1));
        }
        return;
    }

    let columns = state.columns.max(1);
    let total_rows = state.songs.len().div_ceil(columns);
    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
    let selected_row = state.selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (slot, row) in (first_row..total_rows).take(visible_rows).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_areas[slot]);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            if let Some(song) = state.songs.get(index) {
                let selected = state.focused && index == state.selected;
                let favorite = state.setlist.contains(song);
                render_card(f, song, index, selected, favorite, *cell, theme);
            }
        }
    }
}

fn render_card(
    f: &mut Frame,
    song: &Song,
    index: usize,
    selected: bool,
    favorite: bool,
    area: Rect,
    theme: &Theme,
) {
    let width = area.width.saturating_sub(4) as usize;

    let title_style = if selected {
        theme.highlight_style()
    } else {
        Style::default().fg(theme.text()).add_modifier(Modifier::BOLD)
    };

    let mut title_spans = vec![
        Span::styled(format!("{}. ", index + 1), Style::default().fg(theme.text_muted())),
        Span::styled(truncate_str(&song.title, width.saturating_sub(6)), title_style),
    ];
    if favorite {
        title_spans.push(Span::styled(
            format!(" {}", FAVORITE_MARKER),
            Style::default().fg(theme.accent()),
        ));
    }

    let lines = vec![
        Line::from(title_spans),
        Line::from(Span::styled(
            truncate_str(&song.artist, width),
            Style::default().fg(theme.primary()),
        )),
        Line::from(Span::styled(
            truncate_str(&format!("{} • {}", song.year, song.genre), width),
            Style::default().fg(theme.text_muted()),
        )),
        Line::from(Span::styled(
            song.difficulty.as_str(),
            Style::default().fg(theme.difficulty_color(song.difficulty)),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(selected));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::song;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_grid_renders_every_card() {
        let songs: Vec<Song> = (1..=12).map(|i| song(&format!("S{}", i), "Band")).collect();
        let mut setlist = Setlist::new();
        setlist.toggle(&songs[0]);

        let state = SongGridState {
            songs: songs.iter().collect(),
            selected: 0,
            columns: 4,
            setlist: &setlist,
            empty_message: "nothing",
            focused: true,
        };

        let mut terminal = Terminal::new(TestBackend::new(120, 3 * CARD_HEIGHT)).unwrap();
        terminal
            .draw(|f| render_song_grid(f, &state, f.area(), &Theme::default()))
            .unwrap();

        let text = buffer_text(&terminal);
        for i in 1..=12 {
            assert!(text.contains(&format!("{}. S{}", i, i)), "card {} missing", i);
        }
        assert_eq!(text.matches(FAVORITE_MARKER).count(), 1);
        assert!(text.contains("Medium"));
    }

    #[test]
    fn test_empty_grid_shows_message() {
        let setlist = Setlist::new();
        let state = SongGridState {
            songs: Vec::new(),
            selected: 0,
            columns: 4,
            setlist: &setlist,
            empty_message: "No songs found. Try adjusting your criteria.",
            focused: true,
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| render_song_grid(f, &state, f.area(), &Theme::default()))
            .unwrap();

        assert!(buffer_text(&terminal).contains("No songs found. Try adjusting your criteria."));
    }
}
