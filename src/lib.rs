// Library exports for the coinwatch market dashboard
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod ui;
pub mod utils;
pub mod watchlist;

// Re-export commonly used types
pub use api::MarketClient;
pub use app::{App, ChartPeriod, SortKey, View};
pub use cli::Cli;
pub use data::{Coin, CoinDetail, MarketOverview, PricePoint, PriceSeries};
pub use ui::render_ui;
pub use watchlist::Watchlist;
pub use utils::*;
