pub mod client;
pub mod types;

pub use client::{NewsBackend, NewsClient, NewsResult};
pub use types::{Article, Sentiment, SentimentLabel};
