use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::DashboardError;
use crate::services::dashboard::{Dashboard, DashboardView};
use crate::services::query::parse_queries;
use crate::services::render::render_dashboard;

pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub config: AppConfig,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/text", get(get_dashboard_text))
        .route("/refresh", post(refresh))
        .route("/queries", post(submit_queries))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>) -> std::io::Result<()> {
    let bind_addr = state.config.server.bind_addr.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API Server listening on {}", bind_addr);
    axum::serve(listener, app).await
}

/// Either a raw multi-line block or an explicit list of queries
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmitRequest {
    Input { input: String },
    Queries { queries: Vec<String> },
}

impl SubmitRequest {
    pub fn into_queries(self) -> Vec<String> {
        match self {
            SubmitRequest::Input { input } => parse_queries(&input),
            SubmitRequest::Queries { queries } => queries
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .collect(),
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(DashboardView::from(state.dashboard.snapshot().await))
}

async fn get_dashboard_text(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    render_dashboard(&state.dashboard.snapshot().await)
}

async fn refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // A failed load is part of the returned view, not an HTTP error
    let _ = state.dashboard.refresh().await;
    Json(DashboardView::from(state.dashboard.snapshot().await))
}

async fn submit_queries(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    let queries = request.into_queries();
    if queries.is_empty() {
        return Err(DashboardError::EmptySubmission);
    }

    // Spawned so the batch completes even if the caller goes away
    let dashboard = state.dashboard.clone();
    let batch = tokio::spawn(async move { dashboard.submit(queries).await });

    match batch.await {
        Ok(result) => {
            let results = result?;
            Ok((StatusCode::OK, Json(json!({"results": results}))))
        }
        Err(e) => {
            error!("Query batch task failed: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "Query batch failed"})),
            ))
        }
    }
}
