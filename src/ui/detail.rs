use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::songs::FAVORITE_MARKER;
use super::Theme;
use crate::model::Song;

pub struct DetailViewState<'a> {
    pub song: &'a Song,
    pub is_favorite: bool,
}

fn field<'a>(label: &'static str, value: String, value_style: Style, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:12}", label), Style::default().fg(theme.text_muted())),
        Span::styled(value, value_style),
    ])
}

pub fn render_song_detail(f: &mut Frame, state: &DetailViewState, area: Rect, theme: &Theme) {
    let popup_area = super::centered_rect(70, 70, area);
    f.render_widget(Clear, popup_area);

    let song = state.song;
    let text_style = Style::default().fg(theme.text());

    let mut lines = vec![
        Line::from(Span::styled(
            song.title.clone(),
            Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(song.artist.clone(), Style::default().fg(theme.secondary()))),
        Line::from(""),
        field("Year", song.year.clone(), text_style, theme),
        field("Genre", song.genre.clone(), text_style, theme),
        field(
            "Difficulty",
            song.difficulty.to_string(),
            Style::default()
                .fg(theme.difficulty_color(song.difficulty))
                .add_modifier(Modifier::BOLD),
            theme,
        ),
        field("Mood", song.mood_description.clone(), text_style, theme),
        Line::from(""),
        Line::from(Span::styled("Lyric", Style::default().fg(theme.text_muted()))),
        Line::from(Span::styled(
            format!("\"{}\"", song.lyric_snippet),
            text_style.add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        field(
            "Listen",
            song.listen_url(),
            Style::default().fg(theme.primary()).add_modifier(Modifier::UNDERLINED),
            theme,
        ),
        Line::from(""),
    ];

    let favorite_line = if state.is_favorite {
        Line::from(vec![
            Span::styled(format!("{} ", FAVORITE_MARKER), Style::default().fg(theme.accent())),
            Span::styled("In your setlist (f to remove)", text_style),
        ])
    } else {
        Line::from(Span::styled(
            "f: add to your setlist",
            Style::default().fg(theme.text_muted()),
        ))
    };
    lines.push(favorite_line);

    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Song Details [Esc: close] ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style(true)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(detail, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::song;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_detail_shows_link_and_favorite_state() {
        let song = song("Africa", "Toto");
        let state = DetailViewState { song: &song, is_favorite: true };

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|f| render_song_detail(f, &state, f.area(), &Theme::default()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Africa"));
        assert!(text.contains("https://open.spotify.com/search/Africa%20Toto"));
        assert!(text.contains("In your setlist"));
    }
}
