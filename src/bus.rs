use crate::events::DashboardEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: DashboardEvent) -> Result<usize, broadcast::error::SendError<DashboardEvent>> {
        self.tx.send(event)
    }

    /// Publish without caring whether anyone is listening.
    pub fn emit(&self, event: DashboardEvent) {
        if self.publish(event).is_err() {
            debug!("[BUS] Event dropped: no subscribers");
        }
    }
}

/// Log every dashboard event until the bus closes.
pub fn spawn_event_logger(bus: &EventBus) -> JoinHandle<()> {
    let mut rx = bus.subscribe();

    tokio::spawn(async move {
        info!("📋 [EVENTS] Event logger started");
        loop {
            match rx.recv().await {
                Ok(DashboardEvent::NewsRefreshed { total_articles, trend }) => match trend {
                    Some(trend) => info!("📰 [EVENTS] News refreshed: {} articles, trend {}", total_articles, trend),
                    None => info!("📰 [EVENTS] News refreshed: no articles"),
                },
                Ok(DashboardEvent::RefreshFailed { message }) => {
                    warn!("⚠️ [EVENTS] Refresh failed: {}", message)
                }
                Ok(DashboardEvent::QueryResolved { query, kind }) => {
                    info!("🔎 [EVENTS] Query \"{}\" -> {}", query, kind)
                }
                Ok(DashboardEvent::BatchCompleted { queries }) => {
                    info!("✅ [EVENTS] Batch of {} queries completed", queries)
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("⚠️ [EVENTS] Logger lagged, skipped {} events", skipped)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
