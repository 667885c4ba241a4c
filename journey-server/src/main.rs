use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use journey_server::config::AppConfig;
use journey_server::otp::{MockOtpClient, OtpClient};
use journey_server::stations::StationDirectory;
use journey_server::web::{AppState, PlannerBackend, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let backend = match &config.mock_plan_path {
        Some(path) => {
            let mock = MockOtpClient::new(path)?;
            info!(
                path = %path.display(),
                itineraries = mock.itinerary_count().await,
                "serving canned trip plan"
            );
            PlannerBackend::Mock(mock)
        }
        None => {
            info!(
                base_url = %config.otp.base_url,
                router = %config.otp.router_id,
                "using trip planner"
            );
            PlannerBackend::Live(OtpClient::new(config.otp.clone())?)
        }
    };

    let stations = StationDirectory::load(&config.stations_path)?;
    info!(
        count = stations.len(),
        path = %config.stations_path.display(),
        "loaded stations"
    );

    let state = AppState::new(backend, config.planner.clone(), stations);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, currency = %config.planner.currency, "journey planner listening");
    info!("  GET  /health          - Health check");
    info!("  GET  /api/stations    - Station list");
    info!("  POST /api/routes/plan - Plan routes");
    info!("  GET  /api/polyline    - Decode leg geometry");

    axum::serve(listener, app).await?;
    Ok(())
}
