//! Cursor movement and view switching

use crate::config::PAGE_JUMP;

use super::core::App;
use super::types::View;

impl App {
    pub fn next_row(&mut self) {
        let len = self.active_rows().len();
        if len == 0 {
            return;
        }
        let next = (self.active_selection() + 1) % len;
        self.set_active_selection(next);
        self.needs_redraw = true;
    }

    pub fn previous_row(&mut self) {
        let len = self.active_rows().len();
        if len == 0 {
            return;
        }
        let current = self.active_selection();
        let previous = if current == 0 { len - 1 } else { current - 1 };
        self.set_active_selection(previous);
        self.needs_redraw = true;
    }

    /// Jump down a page worth of rows, clamping at the bottom.
    pub fn page_down(&mut self) {
        let len = self.active_rows().len();
        if len == 0 {
            return;
        }
        let next = (self.active_selection() + PAGE_JUMP).min(len - 1);
        self.set_active_selection(next);
        self.needs_redraw = true;
    }

    pub fn page_up(&mut self) {
        if self.active_rows().is_empty() {
            return;
        }
        let next = self.active_selection().saturating_sub(PAGE_JUMP);
        self.set_active_selection(next);
        self.needs_redraw = true;
    }

    /// Flip between the dashboard and watchlist list views.
    pub fn toggle_list_view(&mut self) {
        self.view = match self.view {
            View::Dashboard => View::Watchlist,
            View::Watchlist => View::Dashboard,
            View::Detail => return,
        };
        self.search_mode = false;
        self.needs_redraw = true;
    }
}
