//! Single poll cycle rendered to a document

use crate::api::StatusApi;
use crate::config::DashboardConfig;
use crate::dashboard::Page;
use crate::poller::DashboardPoller;
use log::warn;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Run one status and then one incidents cycle and return the page document.
///
/// The incidents endpoint goes last so its list is the one rendered.
/// Failures degrade the page exactly as in watch mode; they are only logged.
pub async fn render_once(config: &DashboardConfig, api: Arc<dyn StatusApi>) -> String {
    // Nothing consumes events for a single cycle
    let (event_sender, _) = mpsc::channel(1);
    let page = Arc::new(Mutex::new(Page::new()));
    let poller = DashboardPoller::new(config, api, Arc::clone(&page), event_sender);

    if let Err(e) = poller.fetch_status().await {
        warn!("Failed to load status: {}", e);
    }
    if let Err(e) = poller.fetch_incidents().await {
        warn!("Failed to load incidents: {}", e);
    }

    page.lock().await.document()
}
