use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One row of the `/coins/markets` listing.
///
/// Numeric fields are nullable in the API (new or dead coins), so they come
/// through as `Option`. A fetched list is immutable and replaced wholesale on
/// every refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
}

/// Full record from `/coins/{id}`: listing fields plus nested market data
/// keyed by quote currency, and the large image variant.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<CoinImage>,
    pub market_cap_rank: Option<u32>,
    pub market_data: Option<MarketData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinImage {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub ath: HashMap<String, f64>,
    #[serde(default)]
    pub ath_change_percentage: HashMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
}

impl MarketData {
    pub fn price_in(&self, currency: &str) -> Option<f64> {
        self.current_price.get(currency).copied()
    }

    pub fn market_cap_in(&self, currency: &str) -> Option<f64> {
        self.market_cap.get(currency).copied()
    }

    pub fn volume_in(&self, currency: &str) -> Option<f64> {
        self.total_volume.get(currency).copied()
    }

    pub fn ath_in(&self, currency: &str) -> Option<f64> {
        self.ath.get(currency).copied()
    }

    pub fn ath_change_in(&self, currency: &str) -> Option<f64> {
        self.ath_change_percentage.get(currency).copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Historical price series for one coin and day window.
///
/// Tagged with the coin id and window so a response can be matched against
/// the current selection; replaced on every coin or period change.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub coin_id: String,
    pub days: u32,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(coin_id: String, days: u32, points: Vec<PricePoint>) -> Self {
        Self { coin_id, days, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn current_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    pub fn get_price_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min_price = f64::INFINITY;
        let mut max_price = f64::NEG_INFINITY;

        for point in &self.points {
            min_price = min_price.min(point.price);
            max_price = max_price.max(point.price);
        }

        // Add some padding (5% on each side)
        let range = max_price - min_price;
        let padding = range * 0.05;

        Some((min_price - padding, max_price + padding))
    }

    pub fn get_time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.points.is_empty() {
            return None;
        }

        let min_time = self.points.first()?.timestamp;
        let max_time = self.points.last()?.timestamp;

        Some((min_time, max_time))
    }
}

/// Aggregate statistics over the full (unfiltered) coin list.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketOverview {
    pub total_market_cap: f64,
    pub total_volume: f64,
    pub gainers: usize,
    pub losers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_deserializes_from_markets_row() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 68421.0,
            "market_cap": 1350000000000,
            "market_cap_rank": 1,
            "fully_diluted_valuation": 1436000000000,
            "total_volume": 35000000000,
            "price_change_percentage_24h": 2.15,
            "circulating_supply": 19700000.0,
            "ath": 73738,
            "last_updated": "2024-06-01T00:00:00.000Z"
        }"#;

        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id, "bitcoin");
        assert_eq!(coin.symbol, "btc");
        assert_eq!(coin.market_cap_rank, Some(1));
        assert_eq!(coin.current_price, Some(68421.0));
        assert_eq!(coin.price_change_percentage_24h, Some(2.15));
    }

    #[test]
    fn test_coin_tolerates_null_metrics() {
        let json = r#"{
            "id": "deadcoin",
            "symbol": "ded",
            "name": "Dead Coin",
            "image": null,
            "current_price": null,
            "market_cap": null,
            "market_cap_rank": null,
            "total_volume": null,
            "price_change_percentage_24h": null,
            "circulating_supply": null
        }"#;

        let coin: Coin = serde_json::from_str(json).unwrap();
        assert!(coin.current_price.is_none());
        assert!(coin.market_cap_rank.is_none());
    }

    #[test]
    fn test_detail_market_data_per_currency() {
        let json = r#"{
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "image": {"thumb": "t.png", "small": "s.png", "large": "l.png"},
            "market_cap_rank": 2,
            "market_data": {
                "current_price": {"usd": 3500.0, "eur": 3200.0},
                "market_cap": {"usd": 420000000000.0},
                "total_volume": {"usd": 18000000000.0},
                "ath": {"usd": 4878.26},
                "ath_change_percentage": {"usd": -28.3},
                "circulating_supply": 120000000.0
            }
        }"#;

        let detail: CoinDetail = serde_json::from_str(json).unwrap();
        let md = detail.market_data.unwrap();
        assert_eq!(md.price_in("usd"), Some(3500.0));
        assert_eq!(md.price_in("eur"), Some(3200.0));
        assert_eq!(md.price_in("gbp"), None);
        assert_eq!(md.ath_in("usd"), Some(4878.26));
        assert_eq!(md.ath_change_in("usd"), Some(-28.3));
        assert_eq!(detail.image.unwrap().large.as_deref(), Some("l.png"));
    }

    #[test]
    fn test_price_range_adds_padding() {
        let base = Utc::now();
        let series = PriceSeries::new(
            "bitcoin".into(),
            7,
            vec![
                PricePoint { timestamp: base, price: 100.0 },
                PricePoint { timestamp: base, price: 200.0 },
            ],
        );
        let (min, max) = series.get_price_range().unwrap();
        assert!(min < 100.0);
        assert!(max > 200.0);
        assert!((min - 95.0).abs() < 1e-9);
        assert!((max - 205.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_has_no_ranges() {
        let series = PriceSeries::new("bitcoin".into(), 1, Vec::new());
        assert!(series.is_empty());
        assert!(series.get_price_range().is_none());
        assert!(series.get_time_range().is_none());
        assert!(series.current_price().is_none());
    }
}
