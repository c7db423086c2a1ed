use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use stagehand_core::{ActorIdentity, AppError};
use stagehand_infrastructure::TokioLatencySimulator;
use tracing_subscriber::EnvFilter;

/// Simulated round-trip delays per request class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub read: Duration,
    pub write: Duration,
    pub delete: Duration,
}

impl LatencyConfig {
    pub fn simulator(&self) -> TokioLatencySimulator {
        TokioLatencySimulator::new(self.read, self.write, self.delete)
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub latency: LatencyConfig,
    pub seed_data: bool,
    pub default_actor: ActorIdentity,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = parse_port(env::var("API_PORT").ok())?;

        let latency = LatencyConfig {
            read: parse_millis(
                "MOCK_READ_LATENCY_MS",
                env::var("MOCK_READ_LATENCY_MS").ok(),
                TokioLatencySimulator::DEFAULT_READ,
            )?,
            write: parse_millis(
                "MOCK_WRITE_LATENCY_MS",
                env::var("MOCK_WRITE_LATENCY_MS").ok(),
                TokioLatencySimulator::DEFAULT_WRITE,
            )?,
            delete: parse_millis(
                "MOCK_DELETE_LATENCY_MS",
                env::var("MOCK_DELETE_LATENCY_MS").ok(),
                TokioLatencySimulator::DEFAULT_DELETE,
            )?,
        };

        let seed_data = parse_flag("MOCK_SEED_DATA", env::var("MOCK_SEED_DATA").ok(), true)?;

        let fallback_actor = ActorIdentity::default();
        let default_actor = ActorIdentity::new(
            non_empty_env("MOCK_ACTOR_ID").unwrap_or_else(|| fallback_actor.actor_id().to_owned()),
            non_empty_env("MOCK_ACTOR_NAME")
                .unwrap_or_else(|| fallback_actor.display_name().to_owned()),
        );

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            latency,
            seed_data,
            default_actor,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_port(value: Option<String>) -> Result<u16, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(3001),
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|error| AppError::Validation(format!("invalid API_PORT '{raw}': {error}"))),
    }
}

fn parse_millis(name: &str, value: Option<String>, default: Duration) -> Result<Duration, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|error| AppError::Validation(format!("invalid {name} '{raw}': {error}"))),
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> Result<bool, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) if raw.eq_ignore_ascii_case("true") || raw == "1" => Ok(true),
        Some(raw) if raw.eq_ignore_ascii_case("false") || raw == "0" => Ok(false),
        Some(raw) => Err(AppError::Validation(format!(
            "{name} must be 'true' or 'false', got '{raw}'"
        ))),
    }
}
