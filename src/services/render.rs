//! Plain-text views of the dashboard sections.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::constants::messages;
use crate::news::Article;

use super::dashboard::{DashboardSnapshot, LoadState};
use super::overview::{insight, MarketOverview};
use super::query::{QueryOutcome, QueryResult};

const DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Display percentage, rounded half up. Ratios stay unrounded everywhere else.
pub fn percent(ratio: f64) -> i64 {
    (ratio * 100.0).round() as i64
}

/// "Jan 5, 2025, 02:30 PM"; anything unparseable is returned as-is.
pub fn format_timestamp(timestamp: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format(DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DATE_FORMAT).to_string();
    }
    if let Some(dt) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return dt.format(DATE_FORMAT).to_string();
    }
    timestamp.to_string()
}

fn distribution(overview: &MarketOverview) -> String {
    format!(
        "Positive {}% | Negative {}% | Neutral {}%",
        percent(overview.positive_ratio),
        percent(overview.negative_ratio),
        percent(overview.neutral_ratio)
    )
}

pub fn render_overview(overview: Option<&MarketOverview>) -> String {
    let Some(o) = overview else {
        return messages::NO_MARKET_DATA.to_string();
    };

    [
        distribution(o),
        format!("Market Trend: {}", o.trend.as_str().to_uppercase()),
        format!(
            "Based on the analysis of {} recent news articles, {}% of the sentiment is positive, {}% is negative, and {}% is neutral. The overall market trend appears to be {}.",
            o.total_articles,
            percent(o.positive_ratio),
            percent(o.negative_ratio),
            percent(o.neutral_ratio),
            o.trend
        ),
        format!("Recommendation: Consider {}.", o.recommendation),
    ]
    .join("\n")
}

fn render_article(article: &Article) -> String {
    let label = article
        .sentiment
        .as_ref()
        .map(|s| s.label.as_str())
        .unwrap_or(messages::MISSING_SENTIMENT);

    let mut lines = vec![format!("- {} [{}]", article.title, label)];
    if !article.text.is_empty() {
        lines.push(format!("  {}", article.text));
    }
    lines.push(format!("  {}", format_timestamp(&article.timestamp)));
    if !article.source.is_empty() {
        lines.push(format!("  Source: {}", article.source));
    }
    lines.join("\n")
}

pub fn render_news(articles: &[Article]) -> String {
    if articles.is_empty() {
        return messages::NO_NEWS.to_string();
    }
    articles.iter().map(render_article).collect::<Vec<_>>().join("\n")
}

pub fn render_query_result(result: &QueryResult) -> String {
    let header = format!("## {}", result.query);
    let body = match &result.outcome {
        QueryOutcome::Error { message } => format!("Error: {}", message),
        QueryOutcome::General { response } => response.clone(),
        QueryOutcome::News { articles, overview } => [
            "Analysis Summary".to_string(),
            format!("Total Articles Analyzed: {}", overview.total_articles),
            format!(
                "Sentiment Distribution: {}% positive, {}% negative, {}% neutral",
                percent(overview.positive_ratio),
                percent(overview.negative_ratio),
                percent(overview.neutral_ratio)
            ),
            format!("Insight: {}", insight(overview).text(&result.query)),
            String::new(),
            format!("Recent News for {}", result.query),
            render_news(articles),
        ]
        .join("\n"),
    };
    format!("{}\n{}", header, body)
}

pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut sections = Vec::new();

    match &snapshot.load {
        LoadState::Loading => {
            sections.push("# Market Overview\nLoading...".to_string());
            sections.push("# Recent News\nLoading...".to_string());
        }
        LoadState::Failed { message } => {
            sections.push(format!("# Market Overview\n{}", message));
            sections.push(format!("# Recent News\n{}", message));
        }
        LoadState::Ready { articles, overview } => {
            sections.push(format!("# Market Overview\n{}", render_overview(overview.as_ref())));
            sections.push(format!("# Recent News\n{}", render_news(articles)));
        }
    }

    if snapshot.analyzing {
        sections.push("# Analysis\nAnalyzing...".to_string());
    }
    if !snapshot.results.is_empty() {
        let results: Vec<String> = snapshot.results.iter().map(render_query_result).collect();
        sections.push(format!("# Analysis Results\n{}", results.join("\n\n")));
    }

    sections.join("\n\n")
}
