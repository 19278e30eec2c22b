//! News Dashboard - financial news sentiment overview
//!
//! This library provides the client for the news-analysis backend, the
//! market-overview aggregation, per-query resolution and the dashboard state
//! served over HTTP.

pub mod api;
pub mod bus;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod news;
pub mod services;

// Re-export commonly used types
pub use bus::EventBus;
pub use config::AppConfig;
pub use events::DashboardEvent;
pub use news::{Article, NewsBackend, NewsClient, Sentiment, SentimentLabel};
pub use services::dashboard::Dashboard;
pub use services::overview::{compute_overview, MarketOverview, Trend};
pub use services::query::{QueryOutcome, QueryResult};

#[cfg(test)]
mod test_support;
