//! Search functionality for the coin list

use super::core::App;

impl App {
    pub fn toggle_search_mode(&mut self) {
        self.search_mode = !self.search_mode;
        self.needs_redraw = true;
    }

    pub fn add_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_coin = 0;
        self.update_filtered_coins();
        self.needs_redraw = true;
    }

    pub fn remove_search_char(&mut self) {
        self.search_query.pop();
        self.selected_coin = 0;
        self.update_filtered_coins();
        self.needs_redraw = true;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_mode = false;
        self.selected_coin = 0;
        self.update_filtered_coins();
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::tests_support::app_with_named_coins;

    #[test]
    fn test_typing_narrows_and_clearing_restores() {
        let mut app = app_with_named_coins(&[("bitcoin", "Bitcoin", "btc"), ("cardano", "Cardano", "ada")]);
        assert_eq!(app.filtered_coins.len(), 2);

        app.add_search_char('a');
        app.add_search_char('d');
        app.add_search_char('a');
        assert_eq!(app.filtered_coins.len(), 1);

        app.clear_search();
        assert_eq!(app.filtered_coins.len(), 2);
        assert!(!app.search_mode);
    }

    #[test]
    fn test_backspace_widens_query() {
        let mut app = app_with_named_coins(&[("bitcoin", "Bitcoin", "btc"), ("cardano", "Cardano", "ada")]);
        app.add_search_char('b');
        app.add_search_char('x');
        assert!(app.filtered_coins.is_empty());

        app.remove_search_char();
        assert_eq!(app.filtered_coins.len(), 1);
    }
}
