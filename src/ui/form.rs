use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::{FormField, FormState};
use crate::collections::SearchHistoryEntry;

pub struct FormViewState<'a> {
    pub form: &'a FormState,
    /// Newest first, already limited to the quick-restore count
    pub recent_searches: Vec<&'a SearchHistoryEntry>,
    pub setlist_len: usize,
    pub history_len: usize,
}

pub fn render_form_view(f: &mut Frame, state: &FormViewState, area: Rect, theme: &Theme) {
    let recent_height = if state.recent_searches.is_empty() {
        0
    } else {
        state.recent_searches.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(FormField::ALL.len() as u16 * 2 + 2),
            Constraint::Length(recent_height),
            Constraint::Min(0),
        ])
        .split(area);

    render_shortcuts(f, state, chunks[0], theme);
    render_fields(f, state.form, chunks[1], theme);
    if !state.recent_searches.is_empty() {
        render_recent_searches(f, &state.recent_searches, chunks[2], theme);
    }
}

fn render_shortcuts(f: &mut Frame, state: &FormViewState, area: Rect, theme: &Theme) {
    let mut spans = Vec::new();
    if state.setlist_len > 0 {
        spans.push(Span::styled("S", Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(
            format!(": My Setlist ({})   ", state.setlist_len),
            Style::default().fg(theme.text_muted()),
        ));
    }
    if state.history_len > 0 {
        spans.push(Span::styled("H", Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(": History", Style::default().fg(theme.text_muted())));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_fields(f: &mut Frame, form: &FormState, area: Rect, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, field) in FormField::ALL.iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            theme.highlight_style()
        } else {
            Style::default().fg(theme.text_muted())
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.primary())),
            Span::styled(format!("{:16}", field.label()), label_style),
        ];

        if *field == FormField::CustomRequest {
            if form.is_editing {
                spans.push(Span::styled(
                    format!("{}_", form.custom_request),
                    Style::default().fg(theme.warning()).add_modifier(Modifier::BOLD),
                ));
            } else if form.custom_request.is_empty() {
                spans.push(Span::styled(
                    "e.g. \"Songs from Disney movies\" or \"Songs with a key change\"",
                    Style::default().fg(theme.text_muted()).add_modifier(Modifier::ITALIC),
                ));
            } else {
                spans.push(Span::styled(form.custom_request.clone(), Style::default().fg(theme.text())));
            }
        } else {
            let value_style = if focused {
                Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text())
            };
            let value = form.value(*field);
            if focused {
                spans.push(Span::styled("< ", Style::default().fg(theme.text_muted())));
                spans.push(Span::styled(value, value_style));
                spans.push(Span::styled(" >", Style::default().fg(theme.text_muted())));
            } else {
                spans.push(Span::styled(format!("  {}", value), value_style));
            }
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(" Find Your Karaoke Songs [j/k: field | h/l: change | i: request | Enter: search] ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(true));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_recent_searches(f: &mut Frame, entries: &[&SearchHistoryEntry], area: Rect, theme: &Theme) {
    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", i + 1),
                    Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(entry.criteria.summary(), Style::default().fg(theme.text())),
                Span::styled(
                    format!("  {}", entry.searched_at.format("%b %d %H:%M")),
                    Style::default().fg(theme.text_muted()),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Recent Searches ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(false));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
