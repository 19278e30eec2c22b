//! Shared fixtures for unit tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::NewsClientError;
use crate::news::{Article, NewsBackend, NewsResult, Sentiment, SentimentLabel};

pub fn article(id: &str, title: &str, text: &str, label: Option<SentimentLabel>) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        text: text.to_string(),
        source: format!("https://news.example.com/{}", id),
        timestamp: "2025-01-05T14:30:00Z".to_string(),
        sentiment: label.map(|label| Sentiment { label, score: 0.9 }),
    }
}

/// `pos` positive, `neg` negative, `neu` neutral and `unlabelled` articles without sentiment.
pub fn labelled(pos: usize, neg: usize, neu: usize, unlabelled: usize) -> Vec<Article> {
    let mut out = Vec::new();
    let groups = [
        (pos, Some(SentimentLabel::Positive)),
        (neg, Some(SentimentLabel::Negative)),
        (neu, Some(SentimentLabel::Neutral)),
        (unlabelled, None),
    ];
    for (count, label) in groups {
        for _ in 0..count {
            let id = out.len().to_string();
            out.push(article(&id, &format!("Headline {}", id), "", label));
        }
    }
    out
}

fn backend_down() -> NewsClientError {
    NewsClientError::Http {
        status: 503,
        body: "backend down".to_string(),
    }
}

/// In-memory backend. Records every call in order.
#[derive(Default)]
pub struct FakeBackend {
    pub articles: Mutex<Vec<Article>>,
    /// Articles appended when `/process` sees this query
    pub ingest: Mutex<Vec<(String, Vec<Article>)>>,
    pub general_answer: Mutex<Option<String>>,
    pub fail_news: Mutex<bool>,
    /// `/process` fails for these queries
    pub fail_process_for: Mutex<Vec<String>>,
    pub fail_general: Mutex<bool>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        let backend = Self::default();
        *backend.articles.lock().unwrap() = articles;
        backend
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NewsBackend for FakeBackend {
    async fn get_news(&self) -> NewsResult<Vec<Article>> {
        self.record("news".to_string());
        if *self.fail_news.lock().unwrap() {
            return Err(backend_down());
        }
        Ok(self.articles.lock().unwrap().clone())
    }

    async fn process_queries(&self, queries: &[String]) -> NewsResult<()> {
        self.record(format!("process:{}", queries.join("|")));
        let failing = self.fail_process_for.lock().unwrap();
        if queries.iter().any(|q| failing.contains(q)) {
            return Err(backend_down());
        }
        let ingest = self.ingest.lock().unwrap();
        let mut articles = self.articles.lock().unwrap();
        for (term, new_articles) in ingest.iter() {
            if queries.contains(term) {
                articles.extend(new_articles.iter().cloned());
            }
        }
        Ok(())
    }

    async fn general_query(&self, query: &str) -> NewsResult<String> {
        self.record(format!("general:{}", query));
        if *self.fail_general.lock().unwrap() {
            return Err(backend_down());
        }
        Ok(self
            .general_answer
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| format!("General answer for {}", query)))
    }
}
