//! Application state for the web layer.

use std::future::Future;
use std::sync::Arc;

use crate::otp::{MockOtpClient, OtpClient, OtpError, PlanRequest, PlanResponse};
use crate::planner::{PlannerConfig, RouteQueryOrchestrator, TripPlanner};
use crate::stations::StationDirectory;

/// The trip planner requests are sent to.
#[derive(Clone)]
pub enum PlannerBackend {
    /// A running planner deployment
    Live(OtpClient),

    /// Canned plan read from disk
    Mock(MockOtpClient),
}

impl TripPlanner for PlannerBackend {
    fn plan_trip(
        &self,
        request: &PlanRequest,
    ) -> impl Future<Output = Result<PlanResponse, OtpError>> + Send {
        async move {
            match self {
                PlannerBackend::Live(client) => client.plan_trip(request).await,
                PlannerBackend::Mock(mock) => mock.plan_trip(request).await,
            }
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Query pipeline over the configured planner
    pub orchestrator: Arc<RouteQueryOrchestrator<PlannerBackend>>,

    /// Station labels and coordinates
    pub stations: Arc<StationDirectory>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(backend: PlannerBackend, config: PlannerConfig, stations: StationDirectory) -> Self {
        Self {
            orchestrator: Arc::new(RouteQueryOrchestrator::new(backend, config)),
            stations: Arc::new(stations),
        }
    }
}
