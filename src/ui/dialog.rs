use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::DialogMode;

pub struct DialogRenderState<'a> {
    pub mode: &'a DialogMode,
    pub history_len: usize,
    pub recent_len: usize,
}

pub fn render_dialog(f: &mut Frame, state: &DialogRenderState, area: Rect, theme: &Theme) {
    match state.mode {
        DialogMode::None => {}
        DialogMode::ConfirmClearHistory => {
            render_confirm_dialog(
                f,
                "Clear History",
                &format!(
                    "Forget {} searches and {} recently viewed songs?",
                    state.history_len, state.recent_len
                ),
                area,
                theme,
            );
        }
    }
}

fn render_confirm_dialog(f: &mut Frame, title: &str, message: &str, area: Rect, theme: &Theme) {
    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 7.min(area.height);
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error()));

    f.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let msg = Paragraph::new(message)
        .style(Style::default().fg(theme.text()))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(msg, chunks[0]);

    let help_text = Paragraph::new("Enter/y: confirm | Esc/n: cancel")
        .style(Style::default().fg(theme.text_muted()))
        .alignment(Alignment::Center);
    f.render_widget(help_text, chunks[1]);
}
