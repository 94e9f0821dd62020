use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::songs::{render_song_grid, SongGridState};
use super::Theme;
use crate::app::HistoryPane;
use crate::collections::{RecentlyViewed, SearchHistory, Setlist};

pub struct HistoryViewState<'a> {
    pub history: &'a SearchHistory,
    pub recently_viewed: &'a RecentlyViewed,
    pub setlist: &'a Setlist,
    pub pane: HistoryPane,
    pub selected_search: usize,
    pub selected_recent: usize,
    pub columns: usize,
}

pub fn render_history_view(f: &mut Frame, state: &HistoryViewState, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_searches(f, state, chunks[0], theme);

    let recent_focused = state.pane == HistoryPane::Recent;
    let block = Block::default()
        .title(format!(" Recently Viewed ({}) ", state.recently_viewed.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(recent_focused));
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let grid = SongGridState {
        songs: state.recently_viewed.iter().collect(),
        selected: state.selected_recent,
        columns: state.columns,
        setlist: state.setlist,
        empty_message: "Songs you open will show up here.",
        focused: recent_focused,
    };
    render_song_grid(f, &grid, inner, theme);
}

fn render_searches(f: &mut Frame, state: &HistoryViewState, area: Rect, theme: &Theme) {
    let focused = state.pane == HistoryPane::Searches;
    let block = Block::default()
        .title(format!(
            " Past Searches ({}) [Enter: search again | w: switch | C: clear] ",
            state.history.len()
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused));

    if state.history.is_empty() {
        let empty = Paragraph::new("No searches yet.")
            .style(Style::default().fg(theme.text_muted()))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .history
        .iter()
        .map(|entry| {
            let c = &entry.criteria;
            let mut spans = vec![
                Span::styled(
                    format!("{:<14}", entry.searched_at.format("%b %d %H:%M")),
                    Style::default().fg(theme.text_muted()),
                ),
                Span::styled(
                    format!("{} • {} • {} • {} • {}", c.vocal_type, c.decade, c.genre, c.mood, c.difficulty),
                    Style::default().fg(theme.text()),
                ),
            ];
            if let Some(request) = c.custom_request() {
                spans.push(Span::styled(
                    format!("  \"{}\"", request),
                    Style::default().fg(theme.accent()).add_modifier(Modifier::ITALIC),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused { theme.highlight_style() } else { Style::default() })
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_search));
    f.render_stateful_widget(list, area, &mut list_state);
}
