// Configuration constants for the application

/// API endpoints
pub const COINGECKO_API_HOST: &str = "https://api.coingecko.com";

/// Market data settings
pub const DEFAULT_VS_CURRENCY: &str = "usd";
pub const DEFAULT_PER_PAGE: usize = 100; // One page, ordered by market cap descending
pub const MAX_PER_PAGE: usize = 250; // CoinGecko hard limit per page

/// Update intervals (in milliseconds unless noted)
pub const TICK_RATE_MS: u64 = 100;
pub const UI_UPDATE_RATE_MS: u64 = 1000;
pub const DEFAULT_REFRESH_SECS: u64 = 30; // Coin list auto-refresh

/// UI settings
pub const PAGE_JUMP: usize = 10;

/// Watchlist persistence
pub const WATCHLIST_DIR: &str = ".coinwatch";
pub const WATCHLIST_FILE: &str = "watchlist.json";

/// HTTP settings
pub const HTTP_USER_AGENT: &str = concat!("coinwatch/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 15;
