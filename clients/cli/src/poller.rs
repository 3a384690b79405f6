//! Dashboard Poller
//!
//! Keeps a [`Page`] in sync with the guardian status API. Two independent
//! loops run on their own intervals:
//!
//! - **status**: recommended provider, provider cards, dapp cards and the
//!   incident list embedded in the status body. A failed fetch degrades the
//!   page to placeholders.
//! - **incidents**: the open-incident list. A failed fetch leaves the page
//!   untouched.
//!
//! Each loop waits for its request to settle before the next tick, so a slow
//! response never overwrites a newer one from the same endpoint. Between the
//! two loops the incident list is last-writer-wins.
//!
//! Both loops stop when [`PollerHandle::shutdown`] is called or the handle is
//! dropped.

use crate::api::StatusApi;
use crate::api::error::ApiError;
use crate::api::types::StatusResponse;
use crate::config::DashboardConfig;
use crate::consts::dashboard_consts::{PLACEHOLDER_DASH, STATUS_LOAD_FAILED};
use crate::dashboard::{
    Markup, Page, RegionId, ViewError, render_dapps, render_incidents, render_rpc,
};
use crate::events::{Event, EventSender, EventType};
use crate::logging::LogLevel;
use log::debug;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl PollError {
    pub fn log_level(&self) -> LogLevel {
        match self {
            PollError::Api(e) => e.log_level(),
            PollError::View(_) => LogLevel::Error,
        }
    }
}

/// What a successful status cycle put on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub recommended_provider: Option<String>,
    pub providers: usize,
    pub healthy_providers: usize,
    pub dapps: usize,
    pub open_incidents: usize,
}

impl StatusSummary {
    fn from_status(status: &StatusResponse) -> Self {
        let providers = status.rpc_providers.as_deref().unwrap_or_default();
        Self {
            recommended_provider: status.recommended_provider.clone(),
            providers: providers.len(),
            healthy_providers: providers.iter().filter(|p| p.healthy).count(),
            dapps: status.dapps.as_ref().map_or(0, Vec::len),
            open_incidents: status.open_incidents.len(),
        }
    }
}

impl Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "recommended {}, {}/{} providers healthy, {} dapps, {} open incidents",
            self.recommended_provider.as_deref().unwrap_or(PLACEHOLDER_DASH),
            self.healthy_providers,
            self.providers,
            self.dapps,
            self.open_incidents
        )
    }
}

pub struct DashboardPoller {
    api: Arc<dyn StatusApi>,
    page: Arc<Mutex<Page>>,
    event_sender: EventSender,
    status_interval: Duration,
    incidents_interval: Duration,
}

impl DashboardPoller {
    pub fn new(
        config: &DashboardConfig,
        api: Arc<dyn StatusApi>,
        page: Arc<Mutex<Page>>,
        event_sender: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            api,
            page,
            event_sender: EventSender::new(event_sender),
            status_interval: config.status_interval(),
            incidents_interval: config.incidents_interval(),
        }
    }

    /// Override the configured intervals.
    #[cfg(test)]
    pub fn with_intervals(mut self, status: Duration, incidents: Duration) -> Self {
        self.status_interval = status;
        self.incidents_interval = incidents;
        self
    }

    #[cfg(test)]
    pub fn page(&self) -> Arc<Mutex<Page>> {
        Arc::clone(&self.page)
    }

    /// Fetch the aggregate status and render it.
    ///
    /// On any failure the page is degraded (dash placeholder, failure notice,
    /// empty dapp region) and the error is returned.
    pub async fn fetch_status(&self) -> Result<StatusSummary, PollError> {
        let fetched = self.api.get_status().await;

        let mut page = self.page.lock().await;
        let result = match fetched {
            Ok(status) => apply_status(&mut page, &status)
                .map(|()| StatusSummary::from_status(&status))
                .map_err(PollError::from),
            Err(e) => Err(PollError::from(e)),
        };

        if result.is_err() {
            apply_status_failure(&mut page)?;
        }
        result
    }

    /// Fetch the open incidents and render them. Failures leave the page as is.
    ///
    /// Returns the number of incidents rendered.
    pub async fn fetch_incidents(&self) -> Result<usize, ApiError> {
        let payload = self.api.get_open_incidents().await?;
        let incidents = payload.as_list();

        let mut page = self.page.lock().await;
        render_incidents(page.region_mut(RegionId::IncidentsList), incidents);
        Ok(incidents.map_or(0, <[_]>::len))
    }

    /// Start both loops. Each fetches immediately, then once per interval.
    pub fn spawn(self) -> PollerHandle {
        let poller = Arc::new(self);
        let (shutdown_sender, _) = broadcast::channel(1);

        let join_handles = vec![
            tokio::spawn(Arc::clone(&poller).status_loop(shutdown_sender.subscribe())),
            tokio::spawn(poller.incidents_loop(shutdown_sender.subscribe())),
        ];

        PollerHandle {
            shutdown_sender,
            join_handles,
        }
    }

    async fn status_loop(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = interval(self.status_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut failing = false;

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    let event = match self.fetch_status().await {
                        Ok(summary) => {
                            let event = if failing {
                                Event::status_poller_with_level(
                                    format!("Status recovered: {}", summary),
                                    EventType::Success,
                                    LogLevel::Info,
                                )
                            } else {
                                Event::status_poller_with_level(
                                    summary.to_string(),
                                    EventType::Refresh,
                                    LogLevel::Debug,
                                )
                            };
                            failing = false;
                            event
                        }
                        Err(e) => {
                            failing = true;
                            debug!("status fetch failed: {:?}", e);
                            Event::status_poller_with_level(
                                format!("Failed to load status: {}", e),
                                EventType::Error,
                                e.log_level(),
                            )
                        }
                    };
                    self.event_sender.send_event(event).await;
                }
            }
        }
        debug!("status poller stopped");
    }

    async fn incidents_loop(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = interval(self.incidents_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    let event = match self.fetch_incidents().await {
                        Ok(count) => Event::incidents_poller_with_level(
                            format!("{} open incidents", count),
                            EventType::Refresh,
                            LogLevel::Debug,
                        ),
                        // Previously rendered incidents stay on the page
                        Err(e) => Event::incidents_poller_with_level(
                            format!("Failed to load incidents: {}", e),
                            EventType::Error,
                            e.log_level().min(LogLevel::Warn),
                        ),
                    };
                    self.event_sender.send_event(event).await;
                }
            }
        }
        debug!("incidents poller stopped");
    }
}

/// Running poll loops. Dropping the handle also stops them.
pub struct PollerHandle {
    shutdown_sender: broadcast::Sender<()>,
    join_handles: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signal both loops and wait for them to finish their current cycle.
    pub async fn shutdown(self) {
        let _ = self.shutdown_sender.send(());
        for handle in self.join_handles {
            let _ = handle.await;
        }
    }
}

fn apply_status(page: &mut Page, status: &StatusResponse) -> Result<(), ViewError> {
    let recommended = status
        .recommended_provider
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(PLACEHOLDER_DASH);
    page.require_mut(RegionId::RecommendedRpc)?
        .set_text(recommended);

    render_rpc(page.region_mut(RegionId::RpcCards), Some(status));
    render_dapps(page.region_mut(RegionId::DappCards), Some(status));
    render_incidents(
        page.region_mut(RegionId::IncidentsList),
        Some(status.open_incidents.as_slice()),
    );
    Ok(())
}

fn apply_status_failure(page: &mut Page) -> Result<(), ViewError> {
    page.require_mut(RegionId::RecommendedRpc)?
        .set_text(PLACEHOLDER_DASH);

    if let Some(rpc_cards) = page.region_mut(RegionId::RpcCards) {
        rpc_cards.set_markup(Markup::element(
            "p",
            Some("muted"),
            Markup::text(STATUS_LOAD_FAILED),
        ));
    }
    if let Some(dapp_cards) = page.region_mut(RegionId::DappCards) {
        dapp_cards.clear();
    }
    Ok(())
}
