use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::{
    render_dialog, render_form_view, render_help_panel, render_history_view, render_loading,
    render_song_detail, render_song_grid, render_status_bar, DetailViewState, DialogRenderState,
    FormViewState, HelpPanelState, HistoryViewState, SongGridState, StatusBarState, Theme,
};
use crate::app::App;
use crate::session::{Phase, Tab};

pub const EMPTY_RESULTS_MESSAGE: &str = "No songs found. Try adjusting your criteria.";
const EMPTY_SETLIST_MESSAGE: &str = "Your setlist is empty. Press f on a song to add it.";

pub fn render_ui(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let session = &app.session;

    let mut constraints = vec![Constraint::Length(3)]; // Header
    if session.phase == Phase::Results {
        constraints.push(Constraint::Length(3)); // Tabs
    }
    if session.phase == Phase::Error {
        constraints.push(Constraint::Length(4)); // Error banner
    }
    constraints.push(Constraint::Min(8)); // Main content
    constraints.push(Constraint::Length(3)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());
    let mut chunk_index = 0;

    render_header(f, app, chunks[chunk_index], theme);
    chunk_index += 1;

    if session.phase == Phase::Results {
        render_tabs(f, app, chunks[chunk_index], theme);
        chunk_index += 1;
    }

    if session.phase == Phase::Error {
        let message = session.error.as_deref().unwrap_or("Something went wrong.");
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("Oops! ", Style::default().fg(theme.error()).add_modifier(Modifier::BOLD)),
            Span::styled(message, Style::default().fg(theme.error())),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error [Esc: dismiss] ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.error())),
        );
        f.render_widget(banner, chunks[chunk_index]);
        chunk_index += 1;
    }

    render_main_content(f, app, chunks[chunk_index], theme);
    chunk_index += 1;

    let status_state = StatusBarState {
        phase: session.phase,
        tab: session.tab,
        is_editing: app.form.is_editing,
        detail_open: session.selected.is_some(),
        pending_key: app.key_state.pending_key,
        status_message: app.status_message.as_ref().map(|m| (m.message.clone(), m.is_error)),
    };
    render_status_bar(f, &status_state, chunks[chunk_index], theme);

    if let Some(ref song) = session.selected {
        let detail_state = DetailViewState {
            song,
            is_favorite: session.is_favorite(song),
        };
        render_song_detail(f, &detail_state, f.area(), theme);
    }

    // Help panel overlays everything but dialogs
    if app.show_help {
        let help_state = HelpPanelState {
            scroll_offset: app.help.scroll_offset,
        };
        render_help_panel(f, &help_state, f.area(), theme);
    }

    if app.is_dialog_open() {
        let dialog_state = DialogRenderState {
            mode: &app.dialog.mode,
            history_len: session.library.history.len(),
            recent_len: session.library.recently_viewed.len(),
        };
        render_dialog(f, &dialog_state, f.area(), theme);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let phase = match app.session.phase {
        Phase::Setup => "Find Songs",
        Phase::Loading => "Searching",
        Phase::Results => "Results",
        Phase::Error => "Error",
    };
    let header = Paragraph::new(format!("Karaoke Pal - {} ({})", phase, app.recommender_name()))
        .style(Style::default().fg(theme.primary()).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style(false)),
        );
    f.render_widget(header, area);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let session = &app.session;
    let tab_style = |tab: Tab| {
        if session.tab == tab {
            Style::default().fg(theme.warning()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted())
        }
    };

    let tabs = vec![
        Span::styled(format!(" 1 Results ({}) ", session.songs.len()), tab_style(Tab::Results)),
        Span::raw(" | "),
        Span::styled(
            format!(" 2 Setlist ({}) ", session.library.setlist.len()),
            tab_style(Tab::Setlist),
        ),
        Span::raw(" | "),
        Span::styled(
            format!(" 3 History ({}) ", session.library.history.len()),
            tab_style(Tab::History),
        ),
    ];

    let tab_line = Paragraph::new(Line::from(tabs))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style(false)),
        );
    f.render_widget(tab_line, area);
}

fn render_main_content(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let session = &app.session;
    let library = &session.library;

    match session.phase {
        Phase::Setup | Phase::Error => {
            let form_state = FormViewState {
                form: &app.form,
                recent_searches: library.history.recent(app.config.ui.quick_searches).collect(),
                setlist_len: library.setlist.len(),
                history_len: library.history.len(),
            };
            render_form_view(f, &form_state, area, theme);
        }
        Phase::Loading => {
            render_loading(f, session.last_criteria.as_ref(), app.tick, area, theme);
        }
        Phase::Results => match session.tab {
            Tab::Results => {
                let title = match session.last_criteria {
                    Some(ref criteria) => format!(" {} ", criteria.summary()),
                    None => " Results ".to_string(),
                };
                let grid = SongGridState {
                    songs: session.songs.iter().collect(),
                    selected: app.browse.selected_result,
                    columns: app.grid_columns(),
                    setlist: &library.setlist,
                    empty_message: EMPTY_RESULTS_MESSAGE,
                    focused: session.selected.is_none(),
                };
                render_grid_in_block(f, &grid, &title, area, theme);
            }
            Tab::Setlist => {
                let grid = SongGridState {
                    songs: library.setlist.songs().iter().collect(),
                    selected: app.browse.selected_favorite,
                    columns: app.grid_columns(),
                    setlist: &library.setlist,
                    empty_message: EMPTY_SETLIST_MESSAGE,
                    focused: session.selected.is_none(),
                };
                render_grid_in_block(f, &grid, " My Setlist ", area, theme);
            }
            Tab::History => {
                let history_state = HistoryViewState {
                    history: &library.history,
                    recently_viewed: &library.recently_viewed,
                    setlist: &library.setlist,
                    pane: app.browse.history_pane,
                    selected_search: app.browse.selected_search,
                    selected_recent: app.browse.selected_recent,
                    columns: app.grid_columns(),
                };
                render_history_view(f, &history_state, area, theme);
            }
        },
    }
}

fn render_grid_in_block(f: &mut Frame, grid: &SongGridState, title: &str, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(true));
    let inner = block.inner(area);
    f.render_widget(block, area);
    render_song_grid(f, grid, inner, theme);
}
