use news_dashboard::api::{run_server, AppState};
use news_dashboard::bus::{spawn_event_logger, EventBus};
use news_dashboard::config::AppConfig;
use news_dashboard::news::NewsClient;
use news_dashboard::services::dashboard::Dashboard;
use news_dashboard::services::refresh::RefreshService;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Load Configuration
    let config = AppConfig::load()?;

    // Setup Logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting News Dashboard...");
    info!("Loaded Configuration: {:?}", config);

    // Initialize Backend Client
    let client = NewsClient::with_default_timeout(&config.backend.base_url)?;
    info!("📰 Using news backend at {}", client.base_url());

    let bus = EventBus::new(config.event_bus_capacity);
    let _event_logger = spawn_event_logger(&bus);

    let dashboard = Arc::new(Dashboard::new(Arc::new(client), bus));

    // Initial load; a failure is shown on the dashboard rather than aborting startup
    if let Err(e) = dashboard.refresh().await {
        warn!("⚠️ Initial news load failed: {}", e);
    }

    let _scheduler = match &config.refresh_cron {
        Some(schedule) => {
            info!("📅 Using refresh schedule: {}", schedule);
            match RefreshService::new(dashboard.clone(), schedule.clone()).start().await {
                Ok(scheduler) => Some(scheduler),
                Err(e) => {
                    warn!("⚠️ Failed to start scheduled refresh: {}", e);
                    None
                }
            }
        }
        None => {
            info!("ℹ️ refresh_cron not set - scheduled refresh disabled");
            None
        }
    };

    let app_state = Arc::new(AppState { dashboard, config });

    // Start API Server
    info!("Initializing API Server...");
    run_server(app_state).await?;

    Ok(())
}
