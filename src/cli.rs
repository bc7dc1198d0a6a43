use clap::Parser;
use crate::config::{DEFAULT_PER_PAGE, DEFAULT_REFRESH_SECS, DEFAULT_VS_CURRENCY};

#[derive(Parser)]
#[command(name = "coinwatch")]
#[command(about = "Terminal cryptocurrency market dashboard")]
pub struct Cli {
    /// Quote currency for prices (e.g. "usd", "eur")
    #[arg(short, long, default_value = DEFAULT_VS_CURRENCY)]
    pub currency: String,

    /// Coin list auto-refresh interval in seconds
    #[arg(short, long, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh: u64,

    /// Number of coins to fetch (one page, market cap descending)
    #[arg(short, long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: usize,
}
