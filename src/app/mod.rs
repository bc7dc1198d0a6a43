pub mod core;
pub mod input;
pub mod navigation;
pub mod search;
pub mod stats;
pub mod types;

pub use self::core::{App, FetchResult};
pub use types::{ChartPeriod, SortKey, View};
