use super::state::HistoryPane;
use super::App;
use crate::model::Song;
use crate::session::{Phase, Tab};

impl App {
    /// Cards per row in the song grids
    pub fn grid_columns(&self) -> usize {
        self.config.ui.grid_columns.max(1) as usize
    }

    fn is_grid_view(&self) -> bool {
        match self.session.tab {
            Tab::Results | Tab::Setlist => true,
            Tab::History => self.browse.history_pane == HistoryPane::Recent,
        }
    }

    /// Item count of the list the cursor is in
    pub fn current_len(&self) -> usize {
        let library = &self.session.library;
        match self.session.tab {
            Tab::Results => self.session.songs.len(),
            Tab::Setlist => library.setlist.len(),
            Tab::History => match self.browse.history_pane {
                HistoryPane::Searches => library.history.len(),
                HistoryPane::Recent => library.recently_viewed.len(),
            },
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.session.tab {
            Tab::Results => &mut self.browse.selected_result,
            Tab::Setlist => &mut self.browse.selected_favorite,
            Tab::History => match self.browse.history_pane {
                HistoryPane::Searches => &mut self.browse.selected_search,
                HistoryPane::Recent => &mut self.browse.selected_recent,
            },
        }
    }

    pub fn cursor(&self) -> usize {
        match self.session.tab {
            Tab::Results => self.browse.selected_result,
            Tab::Setlist => self.browse.selected_favorite,
            Tab::History => match self.browse.history_pane {
                HistoryPane::Searches => self.browse.selected_search,
                HistoryPane::Recent => self.browse.selected_recent,
            },
        }
    }

    /// Song under the cursor, if the current view lists songs
    pub fn selected_song(&self) -> Option<&Song> {
        if self.session.phase != Phase::Results {
            return None;
        }
        let library = &self.session.library;
        match self.session.tab {
            Tab::Results => self.session.songs.get(self.browse.selected_result),
            Tab::Setlist => library.setlist.songs().get(self.browse.selected_favorite),
            Tab::History => match self.browse.history_pane {
                HistoryPane::Searches => None,
                HistoryPane::Recent => library.recently_viewed.get(self.browse.selected_recent),
            },
        }
    }

    fn step(&mut self, delta: isize) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor_mut();
        let next = (*cursor as isize + delta).clamp(0, len as isize - 1);
        *cursor = next as usize;
    }

    pub fn move_down(&mut self) {
        let delta = if self.is_grid_view() { self.grid_columns() } else { 1 };
        self.step(delta as isize);
    }

    pub fn move_up(&mut self) {
        let delta = if self.is_grid_view() { self.grid_columns() } else { 1 };
        self.step(-(delta as isize));
    }

    pub fn move_left(&mut self) {
        if self.is_grid_view() {
            self.step(-1);
        }
    }

    /// Next card in a grid; from the past searches list, over to the grid
    pub fn move_right(&mut self) {
        if self.is_grid_view() {
            self.step(1);
        } else {
            self.browse.history_pane = HistoryPane::Recent;
        }
    }

    pub fn toggle_history_pane(&mut self) {
        self.browse.history_pane = match self.browse.history_pane {
            HistoryPane::Searches => HistoryPane::Recent,
            HistoryPane::Recent => HistoryPane::Searches,
        };
    }

    pub fn jump_to_top(&mut self) {
        *self.cursor_mut() = 0;
    }

    pub fn jump_to_end(&mut self) {
        let len = self.current_len();
        *self.cursor_mut() = len.saturating_sub(1);
    }

    /// Keep every cursor inside its list after the lists change
    pub(crate) fn clamp_selection(&mut self) {
        let library = &self.session.library;
        let limits = [
            self.session.songs.len(),
            library.setlist.len(),
            library.history.len(),
            library.recently_viewed.len(),
        ];
        let cursors = [
            &mut self.browse.selected_result,
            &mut self.browse.selected_favorite,
            &mut self.browse.selected_search,
            &mut self.browse.selected_recent,
        ];
        for (cursor, len) in cursors.into_iter().zip(limits) {
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }
}
