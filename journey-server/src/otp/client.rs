//! Trip-planner HTTP client.
//!
//! Provides an async method for querying the planner's `plan` endpoint.
//! Handles URL construction, status mapping and body decoding.

use tracing::debug;

use crate::domain::{Coordinate, TransitMode};

use super::error::OtpError;
use super::types::PlanResponse;

/// Default base URL, the planner's path prefix on a local deployment.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/otp";

/// Default router id.
const DEFAULT_ROUTER_ID: &str = "default";

/// Default number of itineraries to ask for.
const DEFAULT_NUM_ITINERARIES: u8 = 3;

/// Configuration for the trip-planner client.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Base URL including any path prefix (defaults to a local planner)
    pub base_url: String,
    /// Router to query
    pub router_id: String,
    /// Itineraries requested per query
    pub num_itineraries: u8,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OtpConfig {
    /// Create a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the router id.
    pub fn with_router_id(mut self, id: impl Into<String>) -> Self {
        self.router_id = id.into();
        self
    }

    /// Set the number of itineraries requested.
    pub fn with_num_itineraries(mut self, n: u8) -> Self {
        self.num_itineraries = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            router_id: DEFAULT_ROUTER_ID.to_string(),
            num_itineraries: DEFAULT_NUM_ITINERARIES,
            timeout_secs: 30,
        }
    }
}

/// One request to the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Enabled modes, in the order they are sent.
    pub modes: Vec<TransitMode>,
    pub max_transfers: u32,
}

impl PlanRequest {
    /// Comma-joined mode list, e.g. `WALK,RAIL,BUS`.
    pub fn mode_param(&self) -> String {
        self.modes
            .iter()
            .map(TransitMode::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Trip-planner API client.
#[derive(Debug, Clone)]
pub struct OtpClient {
    http: reqwest::Client,
    base_url: String,
    router_id: String,
    num_itineraries: u8,
}

impl OtpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OtpConfig) -> Result<Self, OtpError> {
        if config.num_itineraries == 0 {
            return Err(OtpError::InvalidConfig(
                "num_itineraries must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            router_id: config.router_id,
            num_itineraries: config.num_itineraries,
        })
    }

    /// URL of the plan endpoint.
    pub fn plan_url(&self) -> String {
        format!("{}/routers/{}/plan", self.base_url, self.router_id)
    }

    /// Query parameters for a request.
    pub fn query_params(&self, request: &PlanRequest) -> Vec<(&'static str, String)> {
        vec![
            ("fromPlace", request.from.to_string()),
            ("toPlace", request.to.to_string()),
            ("mode", request.mode_param()),
            ("maxTransfers", request.max_transfers.to_string()),
            ("numItineraries", self.num_itineraries.to_string()),
        ]
    }

    /// Ask the planner for itineraries.
    ///
    /// A success status with no plan is not an error here; the caller
    /// decides what an empty plan means.
    pub async fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, OtpError> {
        let url = self.plan_url();
        debug!(%url, modes = %request.mode_param(), "requesting trip plan");

        let response = self
            .http
            .get(&url)
            .query(&self.query_params(request))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OtpError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_plan_body(&body)
    }
}

/// Decode a plan response body.
pub(crate) fn parse_plan_body(body: &str) -> Result<PlanResponse, OtpError> {
    serde_json::from_str(body).map_err(|e| OtpError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}
