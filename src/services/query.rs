use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

use crate::bus::EventBus;
use crate::constants::messages;
use crate::error::NewsClientError;
use crate::events::DashboardEvent;
use crate::news::{Article, NewsBackend};

use super::overview::{compute_overview, MarketOverview};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryOutcome {
    News {
        articles: Vec<Article>,
        #[serde(rename = "marketData")]
        overview: MarketOverview,
    },
    General {
        #[serde(rename = "generalResponse")]
        response: String,
    },
    Error {
        #[serde(rename = "error")]
        message: String,
    },
}

/// Which branch a query resolved to; matches the serialized `type` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    News,
    General,
    Error,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::News => "news",
            QueryKind::General => "general",
            QueryKind::Error => "error",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueryOutcome {
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryOutcome::News { .. } => QueryKind::News,
            QueryOutcome::General { .. } => QueryKind::General,
            QueryOutcome::Error { .. } => QueryKind::Error,
        }
    }
}

/// Outcome of one submitted query line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub query: String,
    #[serde(flatten)]
    pub outcome: QueryOutcome,
}

/// Split a multi-line submission into queries. Blank lines are dropped.
pub fn parse_queries(input: &str) -> Vec<String> {
    input
        .trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Articles whose title or body contains `query`, ignoring case.
pub fn filter_articles(articles: &[Article], query: &str) -> Vec<Article> {
    articles
        .iter()
        .filter(|article| article.mentions(query))
        .cloned()
        .collect()
}

async fn try_resolve(backend: &dyn NewsBackend, query: &str) -> Result<QueryOutcome, NewsClientError> {
    backend.process_queries(&[query.to_string()]).await?;

    let all_news = backend.get_news().await?;
    let matches = filter_articles(&all_news, query);

    match compute_overview(&matches) {
        Some(overview) => Ok(QueryOutcome::News {
            articles: matches,
            overview,
        }),
        None => {
            let response = backend.general_query(query).await?;
            Ok(QueryOutcome::General { response })
        }
    }
}

/// Resolve a single query. Failures become an `Error` outcome and never propagate.
pub async fn resolve_query(backend: &dyn NewsBackend, query: &str) -> QueryResult {
    let outcome = match try_resolve(backend, query).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("❌ [QUERY] Error processing query \"{}\": {}", query, e);
            QueryOutcome::Error {
                message: messages::QUERY_FAILED.to_string(),
            }
        }
    };

    QueryResult {
        query: query.to_string(),
        outcome,
    }
}

/// Resolves batches one query at a time, in submission order.
#[derive(Clone)]
pub struct QueryResolver {
    backend: Arc<dyn NewsBackend>,
    bus: EventBus,
}

impl QueryResolver {
    pub fn new(backend: Arc<dyn NewsBackend>, bus: EventBus) -> Self {
        Self { backend, bus }
    }

    pub async fn resolve_batch(&self, queries: &[String]) -> Vec<QueryResult> {
        let mut results = Vec::with_capacity(queries.len());

        for query in queries {
            let result = resolve_query(self.backend.as_ref(), query).await;
            info!("🔎 [QUERY] \"{}\" resolved as {}", query, result.outcome.kind());

            self.bus.emit(DashboardEvent::QueryResolved {
                query: query.clone(),
                kind: result.outcome.kind(),
            });
            results.push(result);
        }

        self.bus.emit(DashboardEvent::BatchCompleted {
            queries: queries.len(),
        });
        results
    }
}
