//! Aggregate market statistics

use crate::data::{Coin, MarketOverview};

/// Compute the overview numbers across the full, unfiltered coin list.
///
/// Gainers are coins with a strictly positive 24h change, losers strictly
/// negative; a change of exactly zero (or a missing field) counts toward
/// neither. Missing caps and volumes contribute nothing to the sums.
pub fn compute_overview(coins: &[Coin]) -> MarketOverview {
    let total_market_cap = coins.iter().filter_map(|c| c.market_cap).sum();
    let total_volume = coins.iter().filter_map(|c| c.total_volume).sum();

    let mut gainers = 0;
    let mut losers = 0;
    for coin in coins {
        match coin.price_change_percentage_24h {
            Some(change) if change > 0.0 => gainers += 1,
            Some(change) if change < 0.0 => losers += 1,
            _ => {}
        }
    }

    MarketOverview {
        total_market_cap,
        total_volume,
        gainers,
        losers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, market_cap: f64, volume: f64, change: Option<f64>) -> Coin {
        Coin {
            id: id.to_string(),
            symbol: id.to_string(),
            name: id.to_string(),
            image: None,
            current_price: Some(1.0),
            market_cap: Some(market_cap),
            market_cap_rank: None,
            total_volume: Some(volume),
            price_change_percentage_24h: change,
            circulating_supply: None,
        }
    }

    #[test]
    fn test_sums_cover_all_coins() {
        let coins = vec![
            coin("a", 100.0, 10.0, Some(1.0)),
            coin("b", 200.0, 20.0, Some(-1.0)),
            coin("c", 300.0, 30.0, Some(2.5)),
        ];
        let overview = compute_overview(&coins);
        assert_eq!(overview.total_market_cap, 600.0);
        assert_eq!(overview.total_volume, 60.0);
    }

    #[test]
    fn test_zero_change_counts_toward_neither() {
        let coins = vec![
            coin("up", 1.0, 1.0, Some(0.5)),
            coin("down", 1.0, 1.0, Some(-0.5)),
            coin("flat", 1.0, 1.0, Some(0.0)),
            coin("unknown", 1.0, 1.0, None),
        ];
        let overview = compute_overview(&coins);
        assert_eq!(overview.gainers, 1);
        assert_eq!(overview.losers, 1);
        assert!(overview.gainers + overview.losers <= coins.len());
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        let overview = compute_overview(&[]);
        assert_eq!(overview.total_market_cap, 0.0);
        assert_eq!(overview.gainers, 0);
        assert_eq!(overview.losers, 0);
    }
}
