use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::constants::backend;
use crate::error::{is_timeout, NewsClientError};

use super::types::Article;

pub type NewsResult<T> = Result<T, NewsClientError>;

/// The three calls the dashboard makes against the analysis backend.
#[async_trait]
pub trait NewsBackend: Send + Sync {
    /// Every article the backend knows about.
    async fn get_news(&self) -> NewsResult<Vec<Article>>;

    /// Ask the backend to ingest and analyze news for the given terms.
    async fn process_queries(&self, queries: &[String]) -> NewsResult<()>;

    /// Free-text answer for a query that matched no news.
    async fn general_query(&self, query: &str) -> NewsResult<String>;
}

/// Short reason for log lines
fn failure_reason(err: &NewsClientError) -> String {
    if is_timeout(err) {
        "request timed out".to_string()
    } else {
        err.to_string()
    }
}

#[derive(Serialize)]
struct QueriesBody<'a> {
    queries: &'a [String],
}

#[derive(Deserialize)]
struct GeneralQueryResponse {
    #[serde(default)]
    response: Option<String>,
}

/// reqwest-backed client. Stateless: no caching, retries or dedupe.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(base_url: &str, timeout: Duration) -> NewsResult<Self> {
        let parsed = url::Url::parse(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        info!("📰 [NEWS] Backend client configured for {} (timeout {:?})", parsed, timeout);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client with the standard 30s ceiling
    pub fn with_default_timeout(base_url: &str) -> NewsResult<Self> {
        Self::new(base_url, backend::REQUEST_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ensure_success(resp: Response) -> NewsResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(NewsClientError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_news(&self) -> NewsResult<Vec<Article>> {
        let resp = self.client.get(self.endpoint(backend::NEWS_PATH)).send().await?;
        let resp = Self::ensure_success(resp).await?;
        let body = resp.text().await?;

        // A null body means no data
        let articles: Option<Vec<Article>> = serde_json::from_str(&body)?;
        Ok(articles.unwrap_or_default())
    }

    async fn post_process(&self, queries: &[String]) -> NewsResult<()> {
        let resp = self
            .client
            .post(self.endpoint(backend::PROCESS_PATH))
            .json(&QueriesBody { queries })
            .send()
            .await?;
        Self::ensure_success(resp).await?;
        Ok(())
    }

    async fn post_general_query(&self, query: &str) -> NewsResult<String> {
        let queries = [query.to_string()];
        let resp = self
            .client
            .post(self.endpoint(backend::GENERAL_QUERY_PATH))
            .json(&QueriesBody { queries: &queries[..] })
            .send()
            .await?;
        let resp = Self::ensure_success(resp).await?;
        let body = resp.text().await?;
        let parsed: GeneralQueryResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .response
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| backend::NO_RESPONSE_PLACEHOLDER.to_string()))
    }
}

#[async_trait]
impl NewsBackend for NewsClient {
    async fn get_news(&self) -> NewsResult<Vec<Article>> {
        match self.fetch_news().await {
            Ok(articles) => {
                debug!("📰 [NEWS] Retrieved {} articles", articles.len());
                Ok(articles)
            }
            Err(e) => {
                error!("❌ [NEWS] Error fetching news: {}", failure_reason(&e));
                Err(e)
            }
        }
    }

    async fn process_queries(&self, queries: &[String]) -> NewsResult<()> {
        self.post_process(queries).await.map_err(|e| {
            error!("❌ [NEWS] Error processing queries {:?}: {}", queries, failure_reason(&e));
            e
        })
    }

    async fn general_query(&self, query: &str) -> NewsResult<String> {
        self.post_general_query(query).await.map_err(|e| {
            error!("❌ [NEWS] Error processing general query '{}': {}", query, failure_reason(&e));
            e
        })
    }
}
