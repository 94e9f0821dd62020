use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::keybindings::KEYBINDING_CATEGORIES;
use super::Theme;

pub struct HelpPanelState {
    pub scroll_offset: usize,
}

pub fn render_help_panel(f: &mut Frame, state: &HelpPanelState, area: Rect, theme: &Theme) {
    let popup_area = super::centered_rect(80, 90, area);
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Keybindings",
        Style::default()
            .fg(theme.primary())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for category in KEYBINDING_CATEGORIES {
        lines.push(Line::from(Span::styled(
            category.name,
            Style::default()
                .fg(theme.warning())
                .add_modifier(Modifier::BOLD),
        )));

        for binding in category.bindings {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:16}", binding.keys),
                    Style::default().fg(theme.success()),
                ),
                Span::styled(binding.description, Style::default().fg(theme.text())),
            ]));
        }
        lines.push(Line::from(""));
    }

    let visible_lines: Vec<Line> = lines.into_iter().skip(state.scroll_offset).collect();

    let help_paragraph = Paragraph::new(visible_lines)
        .block(
            Block::default()
                .title(" Help - Press any key to close (j/k to scroll) ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border_focused())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help_paragraph, popup_area);
}
