use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::session::{Phase, Tab};

pub struct StatusBarState {
    pub phase: Phase,
    pub tab: Tab,
    pub is_editing: bool,
    pub detail_open: bool,
    pub pending_key: Option<char>,
    pub status_message: Option<(String, bool)>, // (message, is_error)
}

fn hints(pairs: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::raw(format!(": {}", action)));
    }
    spans
}

fn mode_label(label: &'static str, style: Style) -> Vec<Span<'static>> {
    vec![
        Span::styled(label, style.add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
    ]
}

pub fn render_status_bar(
    f: &mut Frame,
    state: &StatusBarState,
    area: ratatui::layout::Rect,
    theme: &Theme,
) {
    let line = if let Some((ref msg, is_error)) = state.status_message {
        let color = if is_error { theme.error() } else { theme.warning() };
        Line::from(vec![
            Span::styled(
                if is_error { "ERROR" } else { "INFO" },
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(": "),
            Span::styled(msg.clone(), Style::default().fg(color)),
        ])
    } else if state.is_editing {
        let mut spans = mode_label("INSERT", Style::default().fg(theme.warning()));
        spans.extend(hints(&[("Enter", "find songs"), ("Esc", "stop typing")]));
        Line::from(spans)
    } else if state.pending_key == Some('g') {
        let mut spans = mode_label("g", Style::default().fg(theme.primary()));
        spans.extend(hints(&[("g", "top"), ("e", "end")]));
        Line::from(spans)
    } else if state.detail_open {
        let mut spans = mode_label("DETAIL", Style::default().fg(theme.accent()));
        spans.extend(hints(&[("f", "setlist"), ("Esc", "close"), ("?", "help")]));
        Line::from(spans)
    } else {
        let mut spans = mode_label("NORMAL", Style::default().fg(theme.success()));
        let pairs: &[(&'static str, &'static str)] = match (state.phase, state.tab) {
            (Phase::Setup, _) => &[
                ("j/k", "field"),
                ("h/l", "change"),
                ("i", "request"),
                ("Enter", "find songs"),
                ("S/H", "setlist/history"),
                ("?", "help"),
            ],
            (Phase::Error, _) => &[("Esc", "dismiss"), ("q", "quit")],
            (Phase::Loading, _) => &[("q", "quit")],
            (Phase::Results, Tab::History) => &[
                ("hjkl", "move"),
                ("w", "switch list"),
                ("Enter", "open"),
                ("C", "clear"),
                ("n", "new search"),
                ("?", "help"),
            ],
            (Phase::Results, _) => &[
                ("hjkl", "move"),
                ("Enter", "details"),
                ("f", "setlist"),
                ("Tab", "switch tab"),
                ("n", "new search"),
                ("?", "help"),
            ],
        };
        spans.extend(hints(pairs));
        Line::from(spans)
    };

    let status_bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style(false)),
    );
    f.render_widget(status_bar, area);
}
