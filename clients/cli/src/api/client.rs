//! Status API Client
//!
//! Plain JSON-over-HTTP GETs against the guardian status API.

use crate::api::StatusApi;
use crate::api::error::ApiError;
use crate::api::types::{IncidentsPayload, StatusResponse};
use crate::config::DashboardConfig;
use log::debug;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// User-Agent string with the dashboard version
const USER_AGENT: &str = concat!("guardian-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    status_url: String,
    incidents_url: String,
}

impl StatusClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(config.request_timeout())
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            status_url: config.status_url(),
            incidents_url: config.incidents_url(),
        })
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl StatusApi for StatusClient {
    async fn get_status(&self) -> Result<StatusResponse, ApiError> {
        self.get_request(&self.status_url).await
    }

    async fn get_open_incidents(&self) -> Result<IncidentsPayload, ApiError> {
        self.get_request(&self.incidents_url).await
    }
}
