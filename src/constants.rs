//! Application-wide constants and fixed strings
//!
//! Thresholds, recommendation texts and user-facing messages live here so the
//! aggregation and rendering code never carries magic values inline.

use std::time::Duration;

/// Market trend classification
pub mod trend {
    /// Positive share strictly above this is bullish
    pub const BULLISH_THRESHOLD: f64 = 0.6;

    /// Negative share strictly above this is bearish (checked after bullish)
    pub const BEARISH_THRESHOLD: f64 = 0.6;

    pub const BULLISH_RECOMMENDATION: &str = "investing in growth sectors";
    pub const BEARISH_RECOMMENDATION: &str = "a defensive strategy";
    pub const NEUTRAL_RECOMMENDATION: &str = "monitoring key indicators";
}

/// Per-query insight framing. Looser than the trend thresholds and kept separate.
pub mod insight {
    pub const GROWTH_THRESHOLD: f64 = 0.5;
    pub const CAUTION_THRESHOLD: f64 = 0.5;
}

/// Backend client constants
pub mod backend {
    use super::*;

    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

    /// Ceiling applied to every backend call
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub const NEWS_PATH: &str = "/news";
    pub const PROCESS_PATH: &str = "/process";
    pub const GENERAL_QUERY_PATH: &str = "/general_query";

    /// Used when `/general_query` answers without a usable `response` field
    pub const NO_RESPONSE_PLACEHOLDER: &str = "No response available.";
}

/// Messages shown in place of data
pub mod messages {
    pub const INITIAL_LOAD_FAILED: &str = "Failed to fetch recent news. Please try again.";
    pub const QUERY_FAILED: &str = "Failed to process query. Please try again.";
    pub const NO_MARKET_DATA: &str = "No market data available.";
    pub const NO_NEWS: &str = "No news available.";
    pub const MISSING_SENTIMENT: &str = "N/A";
}

/// Dashboard server defaults
pub mod server {
    pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
    pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 256;
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
