//! Mock trip planner for running without a planner deployment.
//!
//! Serves one canned plan response from a JSON file for every request,
//! as if it were the live API.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::client::{PlanRequest, parse_plan_body};
use super::error::OtpError;
use super::types::PlanResponse;

/// Mock planner that answers every request with the same stored plan.
///
/// This is useful for development and testing without a running planner.
#[derive(Clone)]
pub struct MockOtpClient {
    response: Arc<RwLock<PlanResponse>>,
}

impl MockOtpClient {
    /// Load a plan response from a JSON file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, OtpError> {
        let response = load(path.as_ref())?;
        Ok(Self {
            response: Arc::new(RwLock::new(response)),
        })
    }

    /// Build a mock from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, OtpError> {
        Ok(Self {
            response: Arc::new(RwLock::new(parse_plan_body(json)?)),
        })
    }

    /// Return the stored plan. Request parameters are ignored.
    pub async fn plan(&self, _request: &PlanRequest) -> Result<PlanResponse, OtpError> {
        Ok(self.response.read().await.clone())
    }

    /// Number of itineraries in the stored plan.
    pub async fn itinerary_count(&self) -> usize {
        self.response.read().await.raw_itineraries().len()
    }

    /// Reload the plan from disk (useful for development).
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<(), OtpError> {
        let response = load(path.as_ref())?;
        *self.response.write().await = response;
        Ok(())
    }
}

fn load(path: &Path) -> Result<PlanResponse, OtpError> {
    let json = std::fs::read_to_string(path).map_err(|e| OtpError::InvalidConfig(format!(
        "failed to read mock plan {}: {e}",
        path.display()
    )))?;
    parse_plan_body(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, TransitMode};

    fn request() -> PlanRequest {
        PlanRequest {
            from: Coordinate::new(18.9398, 72.8355),
            to: Coordinate::new(19.186, 72.9756),
            modes: vec![TransitMode::Walk, TransitMode::Rail],
            max_transfers: 0,
        }
    }

    #[tokio::test]
    async fn load_sample_plan() {
        let client = MockOtpClient::new("data/mock_plan.json").unwrap();
        assert_eq!(client.itinerary_count().await, 3);

        let response = client.plan(&request()).await.unwrap();
        assert_eq!(response.raw_itineraries().len(), 3);
    }

    #[tokio::test]
    async fn missing_file_is_error() {
        let result = MockOtpClient::new("data/does_not_exist.json");
        assert!(matches!(result, Err(OtpError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn reload_replaces_plan() {
        let client = MockOtpClient::from_json(r#"{ "plan": { "itineraries": [] } }"#).unwrap();
        assert_eq!(client.itinerary_count().await, 0);

        client.reload("data/mock_plan.json").await.unwrap();
        assert_eq!(client.itinerary_count().await, 3);
    }
}
