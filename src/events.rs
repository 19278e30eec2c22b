use crate::services::overview::Trend;
use crate::services::query::QueryKind;

// Global Event Enum
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardEvent {
    NewsRefreshed {
        total_articles: usize,
        trend: Option<Trend>, // None when there are no articles
    },
    RefreshFailed {
        message: String,
    },
    QueryResolved {
        query: String,
        kind: QueryKind,
    },
    BatchCompleted {
        queries: usize,
    },
}
