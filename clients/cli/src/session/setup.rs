//! Session setup and initialization

use crate::api::StatusClient;
use crate::config::DashboardConfig;
use crate::consts::dashboard_consts::EVENT_QUEUE_SIZE;
use crate::dashboard::Page;
use crate::events::Event;
use crate::poller::{DashboardPoller, PollerHandle};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};

/// Session data for the watch mode
pub struct SessionData {
    /// Events emitted by the poll loops after every cycle
    pub event_receiver: mpsc::Receiver<Event>,
    /// Running poll loops
    pub poller: PollerHandle,
    /// Page the loops render into
    pub page: Arc<Mutex<Page>>,
    /// API base URL (for display purposes)
    pub base_url: String,
    pub status_interval: Duration,
    pub incidents_interval: Duration,
    /// Where to write the page document after each cycle, if anywhere
    pub output: Option<PathBuf>,
}

/// Validate the configuration, build the API client and start polling.
pub fn setup_session(
    config: &DashboardConfig,
    output: Option<PathBuf>,
) -> Result<SessionData, Box<dyn Error>> {
    config.validate()?;
    let client = StatusClient::new(config)?;

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let page = Arc::new(Mutex::new(Page::new()));
    let poller = DashboardPoller::new(config, Arc::new(client), Arc::clone(&page), event_sender);

    Ok(SessionData {
        event_receiver,
        poller: poller.spawn(),
        page,
        base_url: config.base_url.clone(),
        status_interval: config.status_interval(),
        incidents_interval: config.incidents_interval(),
        output,
    })
}
