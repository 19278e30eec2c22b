use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::bus::EventBus;
use crate::constants::messages;
use crate::error::DashboardError;
use crate::events::DashboardEvent;
use crate::news::{Article, NewsBackend};

use super::overview::{compute_overview, MarketOverview};
use super::query::{QueryResolver, QueryResult};

/// What the overview and recent-news sections show.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    /// Initial load still in flight
    Loading,
    Ready {
        articles: Vec<Article>,
        /// None when the backend has no articles
        overview: Option<MarketOverview>,
    },
    /// Replaces both sections; nothing stale is shown
    Failed { message: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSnapshot {
    pub load: LoadState,
    /// Results of the latest batch, in submission order
    pub results: Vec<QueryResult>,
    pub analyzing: bool,
}

/// JSON shape served to dashboard clients
#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    pub status: &'static str,
    pub error: Option<String>,
    pub overview: Option<MarketOverview>,
    pub articles: Vec<Article>,
    pub analyzing: bool,
    pub results: Vec<QueryResult>,
}

impl From<DashboardSnapshot> for DashboardView {
    fn from(snapshot: DashboardSnapshot) -> Self {
        let (status, error, overview, articles) = match snapshot.load {
            LoadState::Loading => ("loading", None, None, Vec::new()),
            LoadState::Ready { articles, overview } => ("ready", None, overview, articles),
            LoadState::Failed { message } => ("error", Some(message), None, Vec::new()),
        };
        Self {
            status,
            error,
            overview,
            articles,
            analyzing: snapshot.analyzing,
            results: snapshot.results,
        }
    }
}

/// Resets the analyzing flag however the batch ends.
struct AnalyzingGuard<'a>(&'a AtomicBool);

impl Drop for AnalyzingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct Dashboard {
    backend: Arc<dyn NewsBackend>,
    resolver: QueryResolver,
    bus: EventBus,
    load: RwLock<LoadState>,
    results: RwLock<Vec<QueryResult>>,
    analyzing: AtomicBool,
    /// Held across fetch and swap so refreshes land in start order
    refreshing: Mutex<()>,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn NewsBackend>, bus: EventBus) -> Self {
        Self {
            resolver: QueryResolver::new(backend.clone(), bus.clone()),
            backend,
            bus,
            load: RwLock::new(LoadState::Loading),
            results: RwLock::new(Vec::new()),
            analyzing: AtomicBool::new(false),
            refreshing: Mutex::new(()),
        }
    }

    /// Consistent view of the dashboard. `analyzing` is read under the
    /// results lock, which `submit` also holds when it clears the flag.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let load = self.load.read().await;
        let results = self.results.read().await;
        DashboardSnapshot {
            load: load.clone(),
            results: results.clone(),
            analyzing: self.is_analyzing(),
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::SeqCst)
    }

    /// Fetch every article and recompute the global overview.
    ///
    /// The previous state stays visible until the new one is complete. On
    /// failure the state becomes `Failed` and the error is returned.
    /// Concurrent refreshes run one after another, so an older fetch never
    /// overwrites a newer one.
    pub async fn refresh(&self) -> Result<(), DashboardError> {
        let _refreshing = self.refreshing.lock().await;

        match self.backend.get_news().await {
            Ok(articles) => {
                let overview = compute_overview(&articles);
                let total = articles.len();
                let trend = overview.as_ref().map(|o| o.trend);

                *self.load.write().await = LoadState::Ready { articles, overview };

                info!("📰 [REFRESH] Loaded {} articles", total);
                self.bus.emit(DashboardEvent::NewsRefreshed {
                    total_articles: total,
                    trend,
                });
                Ok(())
            }
            Err(e) => {
                error!("❌ [REFRESH] Error fetching news: {}", e);
                *self.load.write().await = LoadState::Failed {
                    message: messages::INITIAL_LOAD_FAILED.to_string(),
                };
                self.bus.emit(DashboardEvent::RefreshFailed {
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Resolve a batch of queries, replace the previous results, then refresh.
    ///
    /// Only one batch runs at a time. The returned results are also what
    /// [`Dashboard::snapshot`] shows afterwards.
    pub async fn submit(&self, queries: Vec<String>) -> Result<Vec<QueryResult>, DashboardError> {
        if queries.is_empty() {
            return Err(DashboardError::EmptySubmission);
        }
        if self
            .analyzing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("⚠️ [QUERY] Batch rejected: another batch is still being analyzed");
            return Err(DashboardError::BatchInProgress);
        }
        let guard = AnalyzingGuard(&self.analyzing);

        info!("🔎 [QUERY] Analyzing batch of {} queries", queries.len());
        let results = self.resolver.resolve_batch(&queries).await;
        {
            let mut stored = self.results.write().await;
            *stored = results.clone();
            drop(guard);
        }

        // Failure is already reflected in the load state
        let _ = self.refresh().await;

        Ok(results)
    }
}
