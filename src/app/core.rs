//! Core application state and fetch plumbing

use std::time::{Duration, Instant};

use cli_log::{info, warn};
use tokio::sync::mpsc;

use crate::api::MarketClient;
use crate::data::{Coin, CoinDetail, MarketOverview, PricePoint, PriceSeries};
use crate::watchlist::Watchlist;
use super::stats::compute_overview;
use super::types::{ChartPeriod, SortKey, View};

/// Outcome of a background fetch, delivered to the event loop over the
/// result channel. Errors cross the task boundary as plain strings.
#[derive(Debug)]
pub enum FetchResult {
    Coins(Result<Vec<Coin>, String>),
    Detail {
        coin_id: String,
        result: Result<CoinDetail, String>,
    },
    Chart {
        generation: u64,
        result: Result<Vec<PricePoint>, String>,
    },
}

pub struct App {
    // Core client and data
    pub client: MarketClient,
    pub currency: String,
    pub per_page: usize,
    pub coins: Vec<Coin>,
    pub overview: MarketOverview,

    // Derived view state
    pub filtered_coins: Vec<usize>, // Indices into coins vec for filtering/sorting
    pub watchlist_rows: Vec<usize>, // Indices into coins vec, watchlist insertion order
    pub sort_key: SortKey,

    // Selection state (one cursor per list view)
    pub selected_coin: usize,
    pub selected_watch: usize,

    // View routing
    pub view: View,
    pub detail_origin: View, // Where Esc from the detail view returns to
    pub selected_coin_id: Option<String>,

    // Search functionality
    pub search_query: String,
    pub search_mode: bool,

    // Watchlist
    pub watchlist: Watchlist,

    // Detail + chart data
    pub detail: Option<CoinDetail>,
    pub chart: Option<PriceSeries>,
    pub chart_period: ChartPeriod,
    chart_generation: u64,

    // Fetch state
    pub coins_loading: bool,
    pub detail_loading: bool,
    pub chart_loading: bool,
    pub error_message: Option<String>,
    pub needs_redraw: bool,

    // Timing
    pub refresh_interval: Duration,
    pub last_refresh: Instant,
    running: bool,

    results_tx: mpsc::UnboundedSender<FetchResult>,
    results_rx: mpsc::UnboundedReceiver<FetchResult>,
}

impl App {
    pub fn new(
        client: MarketClient,
        currency: String,
        per_page: usize,
        refresh_interval: Duration,
        watchlist: Watchlist,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Self {
            client,
            currency,
            per_page,
            coins: Vec::new(),
            overview: MarketOverview::default(),
            filtered_coins: Vec::new(),
            watchlist_rows: Vec::new(),
            sort_key: SortKey::default(),
            selected_coin: 0,
            selected_watch: 0,
            view: View::Dashboard,
            detail_origin: View::Dashboard,
            selected_coin_id: None,
            search_query: String::new(),
            search_mode: false,
            watchlist,
            detail: None,
            chart: None,
            chart_period: ChartPeriod::default(),
            chart_generation: 0,
            coins_loading: false,
            detail_loading: false,
            chart_loading: false,
            error_message: None,
            needs_redraw: true,
            refresh_interval,
            last_refresh: Instant::now(),
            running: true,
            results_tx,
            results_rx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // ------------------------------------------------------------------
    // Fetch spawning
    // ------------------------------------------------------------------

    /// Kick off a coin list fetch in the background. The loading flag goes
    /// up and any stale error clears immediately; the existing list stays
    /// visible until the response lands.
    pub fn refresh_coins(&mut self) {
        self.coins_loading = true;
        self.error_message = None;
        self.last_refresh = Instant::now();
        self.needs_redraw = true;

        let client = self.client.clone();
        let currency = self.currency.clone();
        let per_page = self.per_page;
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = client
                .coin_markets(&currency, per_page)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(FetchResult::Coins(result));
        });
    }

    /// True when the periodic refresh is due. The detail view is never
    /// auto-refreshed, and an in-flight fetch is left alone.
    pub fn should_refresh_coins(&self) -> bool {
        matches!(self.view, View::Dashboard | View::Watchlist)
            && !self.coins_loading
            && self.last_refresh.elapsed() >= self.refresh_interval
    }

    /// Route to the detail view for the coin under the cursor, clearing any
    /// previous coin's data before the new fetches start.
    pub fn open_selected_detail(&mut self) {
        let Some(coin_id) = self.selected_row_coin().map(|c| c.id.clone()) else {
            return;
        };

        info!("Opening detail view for {coin_id}");
        self.detail_origin = self.view;
        self.view = View::Detail;
        self.selected_coin_id = Some(coin_id.clone());
        self.detail = None;
        self.error_message = None;
        self.request_detail(coin_id);
        self.request_chart();
    }

    /// Leave the detail view, dropping its data so nothing stale survives
    /// into the next selection.
    pub fn close_detail(&mut self) {
        self.view = self.detail_origin;
        self.selected_coin_id = None;
        self.detail = None;
        self.detail_loading = false;
        self.discard_chart();
        self.error_message = None;
        self.needs_redraw = true;
    }

    pub fn set_chart_period(&mut self, period: ChartPeriod) {
        if self.chart_period == period {
            return;
        }
        self.chart_period = period;
        self.request_chart();
    }

    /// Re-issue the fetch behind whatever the current view shows.
    pub fn retry_current(&mut self) {
        match self.view {
            View::Dashboard | View::Watchlist => self.refresh_coins(),
            View::Detail => {
                if let Some(coin_id) = self.selected_coin_id.clone() {
                    self.error_message = None;
                    self.request_detail(coin_id);
                    self.request_chart();
                }
            }
        }
    }

    fn request_detail(&mut self, coin_id: String) {
        self.detail_loading = true;
        self.needs_redraw = true;

        let client = self.client.clone();
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = client.coin_detail(&coin_id).await.map_err(|e| e.to_string());
            let _ = tx.send(FetchResult::Detail { coin_id, result });
        });
    }

    /// Fetch the price series for the current coin and period. The old
    /// series is cleared first, and the bumped generation makes the loop
    /// discard any response from a superseded request.
    fn request_chart(&mut self) {
        let Some(coin_id) = self.selected_coin_id.clone() else {
            return;
        };

        self.chart = None;
        self.chart_generation += 1;
        self.chart_loading = true;
        self.needs_redraw = true;

        let generation = self.chart_generation;
        let client = self.client.clone();
        let currency = self.currency.clone();
        let days = self.chart_period.days();
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = client
                .market_chart(&coin_id, &currency, days)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(FetchResult::Chart { generation, result });
        });
    }

    /// Drop the current series and invalidate in-flight chart requests.
    fn discard_chart(&mut self) {
        self.chart = None;
        self.chart_generation += 1;
        self.chart_loading = false;
    }

    // ------------------------------------------------------------------
    // Fetch results
    // ------------------------------------------------------------------

    /// Drain everything the background tasks have delivered since the last
    /// loop iteration.
    pub fn apply_fetch_results(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.apply_fetch_result(result);
            self.needs_redraw = true;
        }
    }

    fn apply_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Coins(Ok(coins)) => {
                info!("Loaded {} coins", coins.len());
                self.coins = coins;
                self.coins_loading = false;
                self.error_message = None;
                self.finalize_coins_loading();
            }
            FetchResult::Coins(Err(e)) => {
                // Keep the previous list on screen under the error overlay
                warn!("Coin list fetch failed: {e}");
                self.coins_loading = false;
                self.error_message = Some(format!("Failed to load coin list: {e}"));
            }
            FetchResult::Detail { coin_id, result } => {
                if self.selected_coin_id.as_deref() != Some(coin_id.as_str()) {
                    // User already navigated away from this coin
                    return;
                }
                self.detail_loading = false;
                match result {
                    Ok(detail) => {
                        info!("Loaded detail for {coin_id}");
                        self.detail = Some(detail);
                        self.error_message = None;
                    }
                    Err(e) => {
                        warn!("Detail fetch for {coin_id} failed: {e}");
                        self.error_message = Some(format!("Failed to load {coin_id}: {e}"));
                    }
                }
            }
            FetchResult::Chart { generation, result } => {
                if generation != self.chart_generation {
                    // Superseded by a later coin or period change
                    return;
                }
                self.chart_loading = false;
                match result {
                    Ok(points) => {
                        if let Some(coin_id) = self.selected_coin_id.clone() {
                            self.chart = Some(PriceSeries::new(
                                coin_id,
                                self.chart_period.days(),
                                points,
                            ));
                        }
                    }
                    Err(e) => {
                        // Chart failures are logged, never shown as an error
                        warn!("Chart fetch failed: {e}");
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Derived view
    // ------------------------------------------------------------------

    fn finalize_coins_loading(&mut self) {
        self.overview = compute_overview(&self.coins);
        self.update_filtered_coins();
        self.update_watchlist_rows();
    }

    /// Recompute the filtered, sorted index list over `coins`. Called
    /// whenever the list, the search query, or the sort key changes.
    pub fn update_filtered_coins(&mut self) {
        let coins = &self.coins;
        let mut filtered: Vec<usize> = if self.search_query.is_empty() {
            (0..coins.len()).collect()
        } else {
            let query = self.search_query.to_lowercase();
            (0..coins.len())
                .filter(|&i| {
                    coins[i].name.to_lowercase().contains(&query)
                        || coins[i].symbol.to_lowercase().contains(&query)
                })
                .collect()
        };

        let key = self.sort_key;
        filtered.sort_by(|&a, &b| compare_coins(&coins[a], &coins[b], key));
        self.filtered_coins = filtered;

        // Reset the cursor if it fell off the end
        if self.selected_coin >= self.filtered_coins.len() {
            self.selected_coin = 0;
        }
    }

    /// Map watchlisted ids to coin indices, keeping insertion order. Ids not
    /// present in the fetched page simply don't get a row.
    pub fn update_watchlist_rows(&mut self) {
        let coins = &self.coins;
        self.watchlist_rows = self
            .watchlist
            .ids()
            .iter()
            .filter_map(|id| coins.iter().position(|coin| &coin.id == id))
            .collect();

        if self.selected_watch >= self.watchlist_rows.len() {
            self.selected_watch = 0;
        }
    }

    pub fn cycle_sort_key(&mut self) {
        self.sort_key = self.sort_key.next();
        self.update_filtered_coins();
        self.needs_redraw = true;
    }

    pub fn toggle_watchlist_selected(&mut self) {
        let Some(coin_id) = self.selected_row_coin().map(|c| c.id.clone()) else {
            return;
        };
        self.watchlist.toggle(&coin_id);
        self.update_watchlist_rows();
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Row accessors for the active view
    // ------------------------------------------------------------------

    /// Rows shown by the current list view (indices into `coins`).
    pub fn active_rows(&self) -> &[usize] {
        match self.view {
            View::Watchlist => &self.watchlist_rows,
            _ => &self.filtered_coins,
        }
    }

    /// Cursor position within the current list view.
    pub fn active_selection(&self) -> usize {
        match self.view {
            View::Watchlist => self.selected_watch,
            _ => self.selected_coin,
        }
    }

    pub fn set_active_selection(&mut self, index: usize) {
        match self.view {
            View::Watchlist => self.selected_watch = index,
            _ => self.selected_coin = index,
        }
    }

    /// The coin under the cursor in the current list view.
    pub fn selected_row_coin(&self) -> Option<&Coin> {
        let rows = self.active_rows();
        rows.get(self.active_selection()).map(|&i| &self.coins[i])
    }
}

fn compare_coins(a: &Coin, b: &Coin, key: SortKey) -> std::cmp::Ordering {
    // Rank sorts ascending; missing ranks go last
    let rank = |c: &Coin| c.market_cap_rank.unwrap_or(u32::MAX);
    // Everything else sorts descending; missing metrics go last
    let desc = |xa: Option<f64>, xb: Option<f64>| {
        xb.unwrap_or(f64::NEG_INFINITY)
            .partial_cmp(&xa.unwrap_or(f64::NEG_INFINITY))
            .unwrap_or(std::cmp::Ordering::Equal)
    };

    match key {
        SortKey::Rank => rank(a).cmp(&rank(b)),
        SortKey::MarketCap => desc(a.market_cap, b.market_cap),
        SortKey::Price => desc(a.current_price, b.current_price),
        SortKey::Volume => desc(a.total_volume, b.total_volume),
        SortKey::Change => desc(
            a.price_change_percentage_24h,
            b.price_change_percentage_24h,
        ),
    }
}


#[cfg(test)]
mod tests {
    use super::tests_support::{app_with_coins, coin, test_app};
    use super::*;

    #[test]
    fn test_filter_matches_name_or_symbol_case_insensitive() {
        let mut app = app_with_coins(vec![
            coin("bitcoin", "Bitcoin", "btc", 1, 68000.0, 1.3e12),
            coin("ethereum", "Ethereum", "eth", 2, 3500.0, 4.2e11),
        ]);

        app.search_query = "BTC".to_string();
        app.update_filtered_coins();
        assert_eq!(app.filtered_coins, vec![0]);

        app.search_query = "coin".to_string();
        app.update_filtered_coins();
        assert_eq!(app.filtered_coins, vec![0]); // matches "Bitcoin" by name

        app.search_query = "ether".to_string();
        app.update_filtered_coins();
        assert_eq!(app.filtered_coins, vec![1]);
    }

    #[test]
    fn test_sort_by_price_is_descending() {
        let mut app = app_with_coins(vec![
            coin("a", "A", "a", 1, 1.0, 300.0),
            coin("b", "B", "b", 2, 5.0, 200.0),
            coin("c", "C", "c", 3, 3.0, 100.0),
        ]);
        app.sort_key = SortKey::Price;
        app.update_filtered_coins();

        let prices: Vec<f64> = app
            .filtered_coins
            .iter()
            .map(|&i| app.coins[i].current_price.unwrap())
            .collect();
        assert_eq!(prices, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_default_sort_is_rank_ascending() {
        let mut app = app_with_coins(vec![
            coin("c", "C", "c", 3, 1.0, 1.0),
            coin("a", "A", "a", 1, 1.0, 1.0),
            coin("b", "B", "b", 2, 1.0, 1.0),
        ]);
        assert_eq!(app.sort_key, SortKey::Rank);
        app.update_filtered_coins();

        let ranks: Vec<u32> = app
            .filtered_coins
            .iter()
            .map(|&i| app.coins[i].market_cap_rank.unwrap())
            .collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_rank_sorts_last() {
        let mut unranked = coin("x", "X", "x", 0, 1.0, 1.0);
        unranked.market_cap_rank = None;
        let mut app = app_with_coins(vec![unranked, coin("a", "A", "a", 1, 1.0, 1.0)]);
        app.update_filtered_coins();
        assert_eq!(app.filtered_coins, vec![1, 0]);
    }

    #[test]
    fn test_search_and_sort_scenario_over_full_page() {
        // 100 coins; three of them have "eth" in the name or symbol
        let mut coins: Vec<Coin> = (0..97)
            .map(|i| {
                coin(
                    &format!("coin{i}"),
                    &format!("Coin {i}"),
                    &format!("c{i}"),
                    i as u32 + 4,
                    1.0,
                    1000.0 - i as f64,
                )
            })
            .collect();
        coins.push(coin("ethereum", "Ethereum", "eth", 2, 3500.0, 4.2e11));
        coins.push(coin("ethereum-classic", "Ethereum Classic", "etc", 30, 25.0, 4.0e9));
        coins.push(coin("tether", "Tether", "usdt", 3, 1.0, 1.1e11));

        let mut app = app_with_coins(coins);
        app.search_query = "eth".to_string();
        app.sort_key = SortKey::MarketCap;
        app.update_filtered_coins();

        let ids: Vec<&str> = app
            .filtered_coins
            .iter()
            .map(|&i| app.coins[i].id.as_str())
            .collect();
        // "eth" matches Ethereum (name+symbol), Ethereum Classic (name), and
        // Tether (name); ordered by descending market cap
        assert_eq!(ids, vec!["ethereum", "tether", "ethereum-classic"]);
    }

    #[test]
    fn test_selection_resets_when_filter_shrinks() {
        let mut app = app_with_coins(vec![
            coin("bitcoin", "Bitcoin", "btc", 1, 68000.0, 1.3e12),
            coin("ethereum", "Ethereum", "eth", 2, 3500.0, 4.2e11),
        ]);
        app.selected_coin = 1;
        app.search_query = "btc".to_string();
        app.update_filtered_coins();
        assert_eq!(app.selected_coin, 0);
    }

    #[test]
    fn test_coin_fetch_failure_keeps_previous_list() {
        let mut app = app_with_coins(vec![coin("bitcoin", "Bitcoin", "btc", 1, 68000.0, 1.3e12)]);
        assert_eq!(app.coins.len(), 1);

        app.apply_fetch_result(FetchResult::Coins(Err("HTTP 502".to_string())));
        assert_eq!(app.coins.len(), 1); // data untouched
        assert!(app.error_message.as_deref().unwrap().contains("502"));
        assert!(!app.coins_loading);
    }

    #[test]
    fn test_stale_chart_generation_is_discarded() {
        let mut app = app_with_coins(vec![coin("bitcoin", "Bitcoin", "btc", 1, 68000.0, 1.3e12)]);
        app.selected_coin_id = Some("bitcoin".to_string());
        app.chart_generation = 5;

        // A response from generation 4 arrives after a period change
        app.apply_fetch_result(FetchResult::Chart {
            generation: 4,
            result: Ok(vec![]),
        });
        assert!(app.chart.is_none());

        app.apply_fetch_result(FetchResult::Chart {
            generation: 5,
            result: Ok(vec![]),
        });
        assert!(app.chart.is_some());
    }

    #[test]
    fn test_chart_failure_sets_no_error_message() {
        let mut app = test_app();
        app.chart_generation = 1;
        app.apply_fetch_result(FetchResult::Chart {
            generation: 1,
            result: Err("HTTP 429".to_string()),
        });
        assert!(app.error_message.is_none());
        assert!(app.chart.is_none());
    }

    #[test]
    fn test_detail_for_departed_coin_is_ignored() {
        let mut app = app_with_coins(vec![coin("bitcoin", "Bitcoin", "btc", 1, 68000.0, 1.3e12)]);
        app.selected_coin_id = Some("ethereum".to_string());

        app.apply_fetch_result(FetchResult::Detail {
            coin_id: "bitcoin".to_string(),
            result: Err("HTTP 404".to_string()),
        });
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_watchlist_rows_follow_insertion_order() {
        let mut app = app_with_coins(vec![
            coin("bitcoin", "Bitcoin", "btc", 1, 68000.0, 1.3e12),
            coin("ethereum", "Ethereum", "eth", 2, 3500.0, 4.2e11),
            coin("solana", "Solana", "sol", 5, 150.0, 7.0e10),
        ]);
        app.watchlist.toggle("solana");
        app.watchlist.toggle("bitcoin");
        app.update_watchlist_rows();

        assert_eq!(app.watchlist_rows, vec![2, 0]);

        app.view = View::Watchlist;
        assert_eq!(app.active_rows(), &[2, 0]);
        assert_eq!(app.selected_row_coin().unwrap().id, "solana");
    }

    #[test]
    fn test_derived_view_is_subset_of_coin_list() {
        let mut app = app_with_coins(vec![
            coin("bitcoin", "Bitcoin", "btc", 1, 68000.0, 1.3e12),
            coin("ethereum", "Ethereum", "eth", 2, 3500.0, 4.2e11),
        ]);
        app.search_query = "e".to_string();
        app.update_filtered_coins();
        assert!(app.filtered_coins.iter().all(|&i| i < app.coins.len()));
    }
}
