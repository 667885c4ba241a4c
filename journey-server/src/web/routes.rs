//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{Coordinate, Query as RouteQuery};
use crate::otp::OtpError;
use crate::planner::PlannerError;
use crate::polyline::{self, MalformedPolyline};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/routes/plan", post(plan_routes))
        .route("/api/polyline", get(decode_polyline))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations, in file order.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .stations
        .entries()
        .iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationsResponse { stations })
}

/// Plan routes between two endpoints.
async fn plan_routes(
    State(state): State<AppState>,
    Json(req): Json<PlanRouteRequest>,
) -> Result<Json<PlanRouteResponse>, AppError> {
    let origin = resolve_endpoint(&state, "origin", &req.from)?;
    let destination = resolve_endpoint(&state, "destination", &req.to)?;

    let query = RouteQuery {
        origin,
        destination,
        active_modes: req.modes.into_iter().collect(),
        max_transfers: req.max_transfers,
        last_mile: req.last_mile,
    };

    let routes = state.orchestrator.plan(&query).await?;
    Ok(Json(PlanRouteResponse::from_routes(&routes)))
}

/// Resolve a station label or `"lat,lon"`.
///
/// A blank endpoint stays unresolved so the planner reports it as missing;
/// text that matches nothing is rejected here.
fn resolve_endpoint(
    state: &AppState,
    which: &str,
    input: &str,
) -> Result<Option<Coordinate>, AppError> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    state
        .stations
        .resolve(input)
        .map(Some)
        .ok_or_else(|| AppError::BadRequest {
            message: format!("unknown {which}: {input}"),
        })
}

/// Decode an encoded polyline into `[lat, lon]` pairs.
async fn decode_polyline(
    Query(req): Query<PolylineRequest>,
) -> Result<Json<PolylineResponse>, AppError> {
    let points = polyline::decode(&req.points)?;
    Ok(Json(PolylineResponse::from_coordinates(&points)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<PlannerError> for AppError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::InvalidQuery(message) => AppError::BadRequest { message },
            // A broken mock file is our fault, not the planner's
            PlannerError::BackendUnavailable(OtpError::InvalidConfig(message)) => {
                AppError::Internal { message }
            }
            PlannerError::BackendUnavailable(source) => AppError::BadGateway {
                message: format!("trip planner unavailable: {source}"),
            },
        }
    }
}

impl From<MalformedPolyline> for AppError {
    fn from(e: MalformedPolyline) -> Self {
        AppError::BadRequest {
            message: format!("malformed polyline: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otp::{MockOtpClient, OtpClient, OtpConfig};
    use crate::planner::PlannerConfig;
    use crate::stations::StationDirectory;
    use crate::web::state::PlannerBackend;
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn stations() -> StationDirectory {
        StationDirectory::load("data/stations.json").unwrap()
    }

    fn mock_app() -> Router {
        let mock = MockOtpClient::new("data/mock_plan.json").unwrap();
        let state = AppState::new(PlannerBackend::Mock(mock), PlannerConfig::default(), stations());
        create_router(state)
    }

    fn empty_plan_app() -> Router {
        let mock = MockOtpClient::from_json(r#"{ "plan": { "itineraries": [] } }"#).unwrap();
        let state = AppState::new(PlannerBackend::Mock(mock), PlannerConfig::default(), stations());
        create_router(state)
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn plan_request(body: Value) -> Request<Body> {
        Request::post("/api/routes/plan")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_ok() {
        let response = mock_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn stations_listed() {
        let response = mock_app()
            .oneshot(Request::get("/api/stations").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        let stations = json["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 10);
        assert_eq!(stations[7]["label"], "Thane");
        assert_eq!(stations[7]["value"], "19.186,72.9756");
    }

    #[tokio::test]
    async fn plan_by_label() {
        let response = mock_app()
            .oneshot(plan_request(json!({
                "from": "Chhatrapati Shivaji Maharaj Terminus",
                "to": "thane",
                "last_mile": "CAB"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        let routes = json["routes"].as_array().unwrap();
        assert_eq!(routes.len(), 3);
        assert!(json.get("message").is_none());

        // 15 * 1.5 + 100
        assert_eq!(routes[0]["cost_rupees"], 123);
        assert_eq!(routes[0]["legs"].as_array().unwrap().last().unwrap()["mode"], "CAB");
        assert_eq!(
            routes[0]["tags"],
            json!(["fastest", "cheapest", "leastTransfers"])
        );
    }

    #[tokio::test]
    async fn plan_empty_has_message() {
        let response = empty_plan_app()
            .oneshot(plan_request(json!({ "from": "18.9398,72.8355", "to": "Thane" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["routes"], json!([]));
        assert_eq!(json["message"], "No routes found");
    }

    #[tokio::test]
    async fn plan_unknown_station_is_bad_request() {
        let response = mock_app()
            .oneshot(plan_request(json!({ "from": "Atlantis", "to": "Thane" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["error"], "unknown origin: Atlantis");
    }

    #[tokio::test]
    async fn plan_without_modes_is_bad_request() {
        let response = mock_app()
            .oneshot(plan_request(json!({ "from": "Dadar", "to": "Thane", "modes": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = mock_app()
            .oneshot(plan_request(json!({ "from": "", "to": "Thane" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn last_mile_mode_as_travel_mode_is_bad_request() {
        let response = mock_app()
            .oneshot(plan_request(json!({ "from": "Dadar", "to": "Thane", "modes": ["RAIL", "CAB"] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(
            json["error"],
            "CAB is a last-mile choice, not a travel mode"
        );
    }

    #[tokio::test]
    async fn unreachable_planner_is_bad_gateway() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = OtpClient::new(
            OtpConfig::new(format!("http://127.0.0.1:{port}/otp")).with_timeout(2),
        )
        .unwrap();
        let state = AppState::new(PlannerBackend::Live(client), PlannerConfig::default(), stations());

        let response = create_router(state)
            .oneshot(plan_request(json!({ "from": "Dadar", "to": "Thane" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = read_json(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("trip planner unavailable"));
    }

    #[tokio::test]
    async fn polyline_decoded() {
        let response = mock_app()
            .oneshot(
                Request::get("/api/polyline?points=_p~iF~ps%7CU_ulLnnqC")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["points"], json!([[38.5, -120.2], [40.7, -120.95]]));
    }

    #[tokio::test]
    async fn malformed_polyline_is_bad_request() {
        let response = mock_app()
            .oneshot(
                Request::get("/api/polyline?points=_p~iF")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("malformed polyline"));
    }

    #[test]
    fn planner_errors_map_to_status() {
        let bad = AppError::from(PlannerError::InvalidQuery("origin is required".into()));
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        let gateway = AppError::from(PlannerError::BackendUnavailable(OtpError::Api {
            status: 500,
            message: "boom".into(),
        }));
        assert_eq!(gateway.into_response().status(), StatusCode::BAD_GATEWAY);

        let internal = AppError::from(PlannerError::BackendUnavailable(OtpError::InvalidConfig(
            "missing mock file".into(),
        )));
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
