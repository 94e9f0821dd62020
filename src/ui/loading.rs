use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::Theme;
use crate::model::Criteria;

pub const LOADING_MESSAGE: &str = "Scanning music database...";

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Loading screen; `tick` advances the spinner
pub fn render_loading(f: &mut Frame, criteria: Option<&Criteria>, tick: usize, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let mut lines = vec![Line::styled(
        format!("{} {}", SPINNER[tick % SPINNER.len()], LOADING_MESSAGE),
        Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD),
    )];
    if let Some(criteria) = criteria {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            criteria.summary(),
            Style::default().fg(theme.text_muted()),
        ));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);
}
