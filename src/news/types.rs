use serde::{Deserialize, Serialize};

/// Closed set of labels the backend assigns to an article
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Classifier confidence
    #[serde(default)]
    pub score: f64,
}

/// A news article as stored by the backend. Read-only on this side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    /// Body text, may be empty
    #[serde(default)]
    pub text: String,
    /// URL or empty
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

impl Article {
    /// Label used for aggregation; unlabelled articles count as neutral.
    pub fn effective_label(&self) -> SentimentLabel {
        self.sentiment
            .as_ref()
            .map(|s| s.label)
            .unwrap_or(SentimentLabel::Neutral)
    }

    /// Case-insensitive substring match on title or body.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.text.to_lowercase().contains(&needle)
    }
}
