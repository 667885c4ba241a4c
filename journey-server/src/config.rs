//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::otp::OtpConfig;
use crate::planner::PlannerConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default station list location, relative to the working directory.
pub const DEFAULT_STATIONS_PATH: &str = "data/stations.json";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub otp: OtpConfig,
    pub planner: PlannerConfig,
    pub stations_path: PathBuf,

    /// Serve this canned plan instead of calling the planner
    pub mock_plan_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `JOURNEY_BIND_ADDR` | `127.0.0.1:3000` |
    /// | `OTP_BASE_URL` | `http://localhost:8080/otp` |
    /// | `OTP_ROUTER_ID` | `default` |
    /// | `OTP_NUM_ITINERARIES` | `3` |
    /// | `OTP_TIMEOUT_SECS` | `30` |
    /// | `OTP_MOCK_FILE` | unset |
    /// | `STATIONS_PATH` | `data/stations.json` |
    /// | `FARE_CURRENCY` | `INR` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(
            "JOURNEY_BIND_ADDR",
            get("JOURNEY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let mut otp = match get("OTP_BASE_URL") {
            Some(url) => OtpConfig::new(url),
            None => OtpConfig::default(),
        };
        if let Some(id) = get("OTP_ROUTER_ID") {
            otp = otp.with_router_id(id);
        }
        if let Some(value) = get("OTP_NUM_ITINERARIES") {
            otp = otp.with_num_itineraries(parse("OTP_NUM_ITINERARIES", value)?);
        }
        if let Some(value) = get("OTP_TIMEOUT_SECS") {
            otp = otp.with_timeout(parse("OTP_TIMEOUT_SECS", value)?);
        }

        let planner = match get("FARE_CURRENCY") {
            Some(currency) => PlannerConfig::new(currency.trim().to_uppercase()),
            None => PlannerConfig::default(),
        };

        Ok(Self {
            bind_addr,
            otp,
            planner,
            stations_path: get("STATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIONS_PATH)),
            mock_plan_path: get("OTP_MOCK_FILE").map(PathBuf::from),
        })
    }
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}
