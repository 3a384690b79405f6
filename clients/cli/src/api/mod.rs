use crate::api::error::ApiError;
use crate::api::types::{IncidentsPayload, StatusResponse};

pub(crate) mod client;
pub use client::StatusClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait StatusApi: Send + Sync {
    /// Fetch the aggregate status: recommended provider, providers, dapps and open incidents.
    async fn get_status(&self) -> Result<StatusResponse, ApiError>;

    /// Fetch the list of currently open incidents.
    async fn get_open_incidents(&self) -> Result<IncidentsPayload, ApiError>;
}
