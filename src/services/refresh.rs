//! Scheduled background refresh of the global market overview
//! Re-runs the initial load on a cron schedule so the dashboard tracks new ingestions

use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{info, warn};

use super::dashboard::Dashboard;

pub struct RefreshService {
    dashboard: Arc<Dashboard>,
    schedule: String,
}

impl RefreshService {
    /// # Arguments
    /// * `schedule` - Cron expression with seconds (e.g. "0 */5 * * * *" for every 5 minutes)
    pub fn new(dashboard: Arc<Dashboard>, schedule: impl Into<String>) -> Self {
        Self {
            dashboard,
            schedule: schedule.into(),
        }
    }

    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    /// Build the cron job without starting it.
    pub fn job(&self) -> Result<Job, JobSchedulerError> {
        let dashboard = self.dashboard.clone();

        Job::new_async(self.schedule.as_str(), move |_uuid, _l| {
            let dashboard = dashboard.clone();

            Box::pin(async move {
                match dashboard.refresh().await {
                    Ok(()) => info!("✅ [REFRESH] Scheduled refresh completed"),
                    Err(e) => warn!("⚠️ [REFRESH] Scheduled refresh failed: {}", e),
                }
            })
        })
    }

    /// Start the scheduler. The returned handle must be kept alive for the job to keep running.
    pub async fn start(&self) -> Result<JobScheduler, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;
        scheduler.add(self.job()?).await?;
        scheduler.start().await?;

        info!("🔔 [REFRESH] Cron job started with schedule: {}", self.schedule);
        Ok(scheduler)
    }
}
