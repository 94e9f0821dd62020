use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, DialogMode, FormField, HistoryPane};
use crate::session::{Action, Phase, Tab};
use crate::ui::help_content_height;

pub enum KeyAction {
    Continue,
    Quit,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    // Handle dialogs first (highest priority)
    if app.is_dialog_open() {
        return handle_dialog_input(app, key);
    }

    // Help panel: any key dismisses it except j/k
    if app.show_help {
        match key.code {
            KeyCode::Char('j') => {
                let max_scroll = help_content_height().saturating_sub(20);
                if app.help.scroll_offset < max_scroll {
                    app.help.scroll_offset += 1;
                }
            }
            KeyCode::Char('k') => {
                app.help.scroll_offset = app.help.scroll_offset.saturating_sub(1);
            }
            _ => {
                app.show_help = false;
                app.help.scroll_offset = 0;
            }
        }
        return KeyAction::Continue;
    }

    if app.form.is_editing {
        return handle_text_input(app, key);
    }

    if app.session.selected.is_some() {
        return handle_detail_input(app, key);
    }

    if app.key_state.pending_key == Some('g') {
        return handle_g_command(app, key);
    }

    match key.code {
        KeyCode::Char('?') => {
            app.show_help = true;
            return KeyAction::Continue;
        }
        KeyCode::Char('q') => return KeyAction::Quit,
        _ => {}
    }

    match app.session.phase {
        Phase::Setup | Phase::Error => handle_form_mode(app, key),
        Phase::Loading => KeyAction::Continue,
        Phase::Results => handle_results_mode(app, key),
    }
}

fn handle_dialog_input(app: &mut App, key: KeyEvent) -> KeyAction {
    match app.dialog.mode {
        DialogMode::None => {}
        DialogMode::ConfirmClearHistory => match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.confirm_clear_history();
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                app.close_dialog();
            }
            _ => {}
        },
    }

    KeyAction::Continue
}

fn handle_text_input(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            app.submit_form();
        }
        KeyCode::Esc => {
            app.form.is_editing = false;
        }
        KeyCode::Backspace => {
            app.form.custom_request.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.custom_request.push(c);
        }
        _ => {}
    }
    KeyAction::Continue
}

fn handle_detail_input(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.dispatch(Action::CloseDetail);
        }
        KeyCode::Char('f') => app.toggle_favorite(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_g_command(app: &mut App, key: KeyEvent) -> KeyAction {
    app.key_state.pending_key = None;

    match key.code {
        KeyCode::Char('g') => app.jump_to_top(),
        KeyCode::Char('e') => app.jump_to_end(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_form_mode(app: &mut App, key: KeyEvent) -> KeyAction {
    if app.session.phase == Phase::Error && matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
        app.dispatch(Action::DismissError);
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.form.focus_next(),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.form.focus_prev(),
        KeyCode::Char('h') | KeyCode::Left => app.form.cycle(-1),
        KeyCode::Char('l') | KeyCode::Right => app.form.cycle(1),

        KeyCode::Char('i') => {
            app.form.focus = FormField::ALL.len() - 1;
            app.form.is_editing = true;
        }
        KeyCode::Enter => {
            if app.form.focused_field() == FormField::CustomRequest {
                app.form.is_editing = true;
            } else {
                app.submit_form();
            }
        }
        KeyCode::Char('s') => app.submit_form(),

        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < app.config.ui.quick_searches {
                app.restore_search(index);
            }
        }

        KeyCode::Char('S') => app.dispatch(Action::OpenSetlist),
        KeyCode::Char('H') => app.dispatch(Action::OpenHistory),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_results_mode(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        // Navigation
        KeyCode::Char('h') | KeyCode::Left => app.move_left(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('l') | KeyCode::Right => app.move_right(),
        KeyCode::Char('g') => {
            app.key_state.pending_key = Some('g');
        }
        KeyCode::Char('G') => app.jump_to_end(),

        // Tabs
        KeyCode::Char('1') => app.dispatch(Action::SwitchTab(Tab::Results)),
        KeyCode::Char('2') => app.dispatch(Action::SwitchTab(Tab::Setlist)),
        KeyCode::Char('3') => app.dispatch(Action::SwitchTab(Tab::History)),
        KeyCode::Tab => {
            let tab = app.session.tab.next();
            app.dispatch(Action::SwitchTab(tab));
        }
        KeyCode::BackTab => {
            let tab = app.session.tab.prev();
            app.dispatch(Action::SwitchTab(tab));
        }

        KeyCode::Enter => {
            if app.session.tab == Tab::History && app.browse.history_pane == HistoryPane::Searches {
                let index = app.browse.selected_search;
                app.restore_search(index);
            } else {
                app.open_selected_song();
            }
        }
        KeyCode::Char('f') => app.toggle_favorite(),

        KeyCode::Char('w') if app.session.tab == Tab::History => app.toggle_history_pane(),
        KeyCode::Char('C') if app.session.tab == Tab::History => {
            if app.session.library.history.is_empty() && app.session.library.recently_viewed.is_empty() {
                app.set_status_info("History is already empty".to_string());
            } else {
                app.dialog.mode = DialogMode::ConfirmClearHistory;
            }
        }

        KeyCode::Char('n') | KeyCode::Char('r') | KeyCode::Esc => app.new_search(),
        _ => {}
    }
    KeyAction::Continue
}
