//! Market overview aggregation
//!
//! Turns a set of labelled articles into sentiment ratios, a trend and a
//! recommendation. Also hosts the looser per-query insight framing.

use serde::{Deserialize, Serialize};

use crate::constants::{insight as insight_consts, trend as trend_consts};
use crate::news::{Article, SentimentLabel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// First match wins: bullish is checked before bearish.
    pub fn classify(positive_ratio: f64, negative_ratio: f64) -> Self {
        if positive_ratio > trend_consts::BULLISH_THRESHOLD {
            Trend::Bullish
        } else if negative_ratio > trend_consts::BEARISH_THRESHOLD {
            Trend::Bearish
        } else {
            Trend::Neutral
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Trend::Bullish => trend_consts::BULLISH_RECOMMENDATION,
            Trend::Bearish => trend_consts::BEARISH_RECOMMENDATION,
            Trend::Neutral => trend_consts::NEUTRAL_RECOMMENDATION,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub total_articles: usize,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
    pub trend: Trend,
    pub recommendation: String,
}

#[derive(Default)]
struct LabelCounts {
    positive: usize,
    negative: usize,
    neutral: usize,
}

impl LabelCounts {
    fn tally<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Self {
        let mut counts = Self::default();
        for article in articles {
            match article.effective_label() {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Negative => counts.negative += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Aggregate sentiment over `articles`.
///
/// Returns `None` for an empty slice: there is no overview without data, and
/// callers render a "no data" state instead.
pub fn compute_overview(articles: &[Article]) -> Option<MarketOverview> {
    let counts = LabelCounts::tally(articles);
    let total = counts.total();
    if total == 0 {
        return None;
    }

    let denom = total as f64;
    let positive_ratio = counts.positive as f64 / denom;
    let negative_ratio = counts.negative as f64 / denom;
    let neutral_ratio = counts.neutral as f64 / denom;

    let trend = Trend::classify(positive_ratio, negative_ratio);

    Some(MarketOverview {
        total_articles: total,
        positive_ratio,
        negative_ratio,
        neutral_ratio,
        trend,
        recommendation: trend.recommendation().to_string(),
    })
}

/// Framing for a single query's results. Deliberately independent of [`Trend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Insight {
    Growth,
    Caution,
    Stable,
}

impl Insight {
    pub fn text(&self, query: &str) -> String {
        match self {
            Insight::Growth => format!(
                "The news sentiment is predominantly positive, indicating potential growth opportunities for {}.",
                query
            ),
            Insight::Caution => format!(
                "The news sentiment is predominantly negative, suggesting caution for {}.",
                query
            ),
            Insight::Stable => format!(
                "The news sentiment is balanced, indicating a stable outlook for {}.",
                query
            ),
        }
    }
}

pub fn insight(overview: &MarketOverview) -> Insight {
    if overview.positive_ratio > insight_consts::GROWTH_THRESHOLD {
        Insight::Growth
    } else if overview.negative_ratio > insight_consts::CAUTION_THRESHOLD {
        Insight::Caution
    } else {
        Insight::Stable
    }
}
