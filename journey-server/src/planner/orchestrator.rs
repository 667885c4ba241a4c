//! Route query orchestration.
//!
//! One query in, one ranked result set out: validate, ask the trip
//! planner once, normalize each itinerary, tag the survivors.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::domain::{LastMile, Query, Route, RouteId, TransitMode};
use crate::otp::{MockOtpClient, OtpClient, OtpError, PlanRequest, PlanResponse};

use super::config::PlannerConfig;
use super::normalize::{decode_itinerary, normalize_itinerary};
use super::rank::rank_routes;

/// Error from planning a query.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The query cannot be sent; nothing was requested
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The trip planner could not be reached or refused the request
    #[error("trip planner unavailable: {0}")]
    BackendUnavailable(#[source] OtpError),
}

/// Source of raw itineraries.
///
/// This abstraction allows the orchestrator to be tested with mock data.
pub trait TripPlanner {
    /// Issue one plan request.
    ///
    /// A successful response may hold no itineraries; transport failures
    /// and non-success statuses are `Err`.
    fn plan_trip(
        &self,
        request: &PlanRequest,
    ) -> impl Future<Output = Result<PlanResponse, OtpError>> + Send;
}

impl TripPlanner for OtpClient {
    fn plan_trip(
        &self,
        request: &PlanRequest,
    ) -> impl Future<Output = Result<PlanResponse, OtpError>> + Send {
        self.plan(request)
    }
}

impl TripPlanner for MockOtpClient {
    fn plan_trip(
        &self,
        request: &PlanRequest,
    ) -> impl Future<Output = Result<PlanResponse, OtpError>> + Send {
        self.plan(request)
    }
}

/// Composes planner request, normalization and ranking.
#[derive(Debug, Clone)]
pub struct RouteQueryOrchestrator<P> {
    planner: P,
    config: PlannerConfig,
}

impl<P: TripPlanner> RouteQueryOrchestrator<P> {
    pub fn new(planner: P, config: PlannerConfig) -> Self {
        Self { planner, config }
    }

    /// Plan a query into a tagged route list in planner order.
    ///
    /// An empty list is a successful "no routes found", whether the
    /// planner returned nothing or every itinerary was unusable.
    ///
    /// # Errors
    ///
    /// `InvalidQuery` if an endpoint is missing or out of range, if no
    /// transit mode is active, or if AUTO or CAB is asked for as a travel
    /// mode; the planner is not called. `BackendUnavailable` if the
    /// planner call fails.
    pub async fn plan(&self, query: &Query) -> Result<Vec<Route>, PlannerError> {
        let request = build_request(query)?;

        let response = self
            .planner
            .plan_trip(&request)
            .await
            .map_err(PlannerError::BackendUnavailable)?;

        if let Some(message) = &response.error {
            info!(reason = message.describe(), "trip planner reported no plan");
        }

        let routes = normalize_all(&response, query.last_mile, &self.config);
        debug!(
            received = response.raw_itineraries().len(),
            kept = routes.len(),
            "normalized itineraries"
        );

        Ok(rank_routes(routes))
    }
}

/// Validate a query and turn it into a planner request.
fn build_request(query: &Query) -> Result<PlanRequest, PlannerError> {
    let from = query
        .origin
        .ok_or_else(|| PlannerError::InvalidQuery("origin is required".to_string()))?;
    let to = query
        .destination
        .ok_or_else(|| PlannerError::InvalidQuery("destination is required".to_string()))?;

    from.validate()
        .map_err(|e| PlannerError::InvalidQuery(format!("origin: {e}")))?;
    to.validate()
        .map_err(|e| PlannerError::InvalidQuery(format!("destination: {e}")))?;

    if let Some(mode) = query.active_modes.iter().find(|m| m.is_last_mile()) {
        return Err(PlannerError::InvalidQuery(format!(
            "{mode} is a last-mile choice, not a travel mode"
        )));
    }
    if !query.active_modes.iter().any(TransitMode::is_transit) {
        return Err(PlannerError::InvalidQuery(
            "at least one transit mode (RAIL or BUS) must be active".to_string(),
        ));
    }

    Ok(PlanRequest {
        from,
        to,
        modes: query.mode_filter(),
        max_transfers: query.max_transfers,
    })
}

/// Normalize every itinerary in a response, dropping the unusable ones.
///
/// Ids are the itinerary's position in the planner response, so a
/// dropped itinerary leaves a gap.
pub fn normalize_all(
    response: &PlanResponse,
    last_mile: LastMile,
    config: &PlannerConfig,
) -> Vec<Route> {
    response
        .raw_itineraries()
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let result = decode_itinerary(raw)
                .and_then(|it| normalize_itinerary(&it, RouteId(index), last_mile, config));

            match result {
                Ok(route) => Some(route),
                Err(e) => {
                    warn!(index, error = %e, "dropping itinerary");
                    None
                }
            }
        })
        .collect()
}
