//! Type definitions for the application

/// Which screen is currently shown. `Detail` relies on
/// `App::selected_coin_id` being set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Watchlist,
    Detail,
}

/// Column the coin list is ordered by. Everything sorts descending except
/// `Rank`, which is ascending by market cap rank and doubles as the default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Rank,
    MarketCap,
    Price,
    Volume,
    Change,
}

impl SortKey {
    /// Get the next sort key, wrapping back to `Rank`.
    pub fn next(self) -> Self {
        match self {
            Self::Rank => Self::MarketCap,
            Self::MarketCap => Self::Price,
            Self::Price => Self::Volume,
            Self::Volume => Self::Change,
            Self::Change => Self::Rank,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::MarketCap => "market cap",
            Self::Price => "price",
            Self::Volume => "volume",
            Self::Change => "24h change",
        }
    }
}

/// Day window for the detail chart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChartPeriod {
    OneDay,
    #[default]
    SevenDays,
    ThirtyDays,
    NinetyDays,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 4] = [
        Self::OneDay,
        Self::SevenDays,
        Self::ThirtyDays,
        Self::NinetyDays,
    ];

    pub fn days(self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::SevenDays => "7D",
            Self::ThirtyDays => "30D",
            Self::NinetyDays => "90D",
        }
    }

    /// Intraday windows label the x-axis with time of day, longer ones with
    /// calendar dates.
    pub fn intraday(self) -> bool {
        self.days() <= 1
    }
}
