//! Keyboard handling

use crossterm::event::KeyCode;

use super::core::App;
use super::types::{ChartPeriod, View};

impl App {
    pub fn handle_key(&mut self, key: KeyCode) {
        // Search mode captures every printable key before global bindings
        if self.search_mode {
            match key {
                KeyCode::Char(c) => self.add_search_char(c),
                KeyCode::Backspace => self.remove_search_char(),
                KeyCode::Esc => self.clear_search(),
                KeyCode::Enter => {
                    // Keep the query applied, just drop out of typing
                    self.search_mode = false;
                    self.needs_redraw = true;
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('r') => self.retry_current(),
            KeyCode::Up => self.previous_row(),
            KeyCode::Down => self.next_row(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Tab => self.toggle_list_view(),
            _ => match self.view {
                View::Dashboard | View::Watchlist => self.handle_list_key(key),
                View::Detail => self.handle_detail_key(key),
            },
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('/') => self.toggle_search_mode(),
            KeyCode::Char('s') if self.view == View::Dashboard => self.cycle_sort_key(),
            KeyCode::Char(' ') => self.toggle_watchlist_selected(),
            KeyCode::Enter => self.open_selected_detail(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Backspace => self.close_detail(),
            KeyCode::Char(' ') => self.toggle_watchlist_current(),
            KeyCode::Char('1') => self.set_chart_period(ChartPeriod::OneDay),
            KeyCode::Char('7') => self.set_chart_period(ChartPeriod::SevenDays),
            KeyCode::Char('3') => self.set_chart_period(ChartPeriod::ThirtyDays),
            KeyCode::Char('9') => self.set_chart_period(ChartPeriod::NinetyDays),
            _ => {}
        }
    }

    /// Watchlist toggle for the coin shown in the detail view.
    fn toggle_watchlist_current(&mut self) {
        if let Some(coin_id) = self.selected_coin_id.clone() {
            self.watchlist.toggle(&coin_id);
            self.update_watchlist_rows();
            self.needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::tests_support::app_with_named_coins;
    use super::*;
    use crate::app::types::SortKey;

    fn two_coin_app() -> App {
        app_with_named_coins(&[("bitcoin", "Bitcoin", "btc"), ("ethereum", "Ethereum", "eth")])
    }

    #[test]
    fn test_q_quits_outside_search_mode() {
        let mut app = two_coin_app();
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_search_mode_swallows_global_bindings() {
        let mut app = two_coin_app();
        app.handle_key(KeyCode::Char('/'));
        assert!(app.search_mode);

        app.handle_key(KeyCode::Char('q'));
        assert!(app.is_running());
        assert_eq!(app.search_query, "q");

        app.handle_key(KeyCode::Esc);
        assert!(!app.search_mode);
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_enter_leaves_search_mode_keeping_query() {
        let mut app = two_coin_app();
        app.handle_key(KeyCode::Char('/'));
        app.handle_key(KeyCode::Char('b'));
        app.handle_key(KeyCode::Enter);

        assert!(!app.search_mode);
        assert_eq!(app.search_query, "b");
        assert_eq!(app.filtered_coins.len(), 1);
    }

    #[test]
    fn test_s_cycles_sort_on_dashboard_only() {
        let mut app = two_coin_app();
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.sort_key, SortKey::MarketCap);

        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.sort_key, SortKey::MarketCap);
    }

    #[test]
    fn test_space_toggles_watchlist_membership() {
        let mut app = two_coin_app();
        app.handle_key(KeyCode::Char(' '));
        assert!(app.watchlist.contains("bitcoin"));

        app.handle_key(KeyCode::Char(' '));
        assert!(!app.watchlist.contains("bitcoin"));
    }

    #[tokio::test]
    async fn test_period_keys_switch_chart_range() {
        let mut app = two_coin_app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view, View::Detail);
        assert_eq!(app.chart_period, ChartPeriod::SevenDays);

        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.chart_period, ChartPeriod::ThirtyDays);

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.view, View::Dashboard);
    }
}
