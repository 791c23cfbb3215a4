use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use rolekeeper_application::FormSettings;
use rolekeeper_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_SUCCESS_REDIRECT_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub success_redirect_delay: Option<Duration>,
    pub seed_directory: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .map(|value| {
                value
                    .trim()
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(3001);

        let redirect_delay_ms = lookup("FORM_SUCCESS_REDIRECT_DELAY_MS")
            .map(|value| {
                value.trim().parse::<u64>().map_err(|error| {
                    AppError::Validation(format!("invalid FORM_SUCCESS_REDIRECT_DELAY_MS: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_SUCCESS_REDIRECT_DELAY_MS);
        let success_redirect_delay =
            (redirect_delay_ms > 0).then(|| Duration::from_millis(redirect_delay_ms));

        let seed_directory = lookup("DEV_SEED_DIRECTORY")
            .map(|value| parse_flag("DEV_SEED_DIRECTORY", value.as_str()))
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            success_redirect_delay,
            seed_directory,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    pub fn form_settings(&self) -> FormSettings {
        FormSettings {
            success_redirect_delay: self.success_redirect_delay,
        }
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

fn parse_flag(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::Validation(format!(
            "{name} must be 'true' or 'false', got '{other}'"
        ))),
    }
}
