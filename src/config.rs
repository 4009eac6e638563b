use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub app_env: AppEnv,
    /// The only origin allowed to read responses from a browser.
    pub frontend_origin: String,
    /// Upper bound on a single provider round trip. `None` waits forever.
    pub provider_timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".into(),
            app_env: AppEnv::Development,
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.into(),
            provider_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        // Server config
        let port = match env::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|_| AppError::ConfigError("Invalid PORT".into()))?,
            Err(_) => defaults.port,
        };

        let host = env::var("HOST").unwrap_or(defaults.host);

        let app_env_str = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let app_env = match app_env_str.to_lowercase().as_str() {
            "production" => AppEnv::Production,
            "test" => AppEnv::Test,
            _ => AppEnv::Development,
        };

        // CORS
        let frontend_origin = env::var("FRONTEND_ORIGIN").unwrap_or(defaults.frontend_origin);

        // Provider
        let provider_timeout = match env::var("PROVIDER_TIMEOUT") {
            Ok(raw) => Some(
                parse_duration(&raw)
                    .map_err(|_| AppError::ConfigError("Invalid PROVIDER_TIMEOUT format".into()))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            port,
            host,
            app_env,
            frontend_origin,
            provider_timeout,
        })
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.app_env {
            AppEnv::Production => "info",
            AppEnv::Development | AppEnv::Test => "debug",
        }
    }
}

fn parse_duration(duration_str: &str) -> Result<Duration, &'static str> {
    let duration_str = duration_str.trim();

    if duration_str.is_empty() {
        return Err("Duration string is empty");
    }

    // Extract the number and unit parts
    let len = duration_str.len();
    let (num_part, unit_part) = duration_str.split_at(
        duration_str
            .chars()
            .position(|c| !c.is_ascii_digit())
            .unwrap_or(len)
    );

    let num = num_part.parse::<u64>().map_err(|_| "Invalid number")?;

    let unit_secs: u64 = match unit_part {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 60 * 60 * 24,
        _ => return Err("Unknown time unit, use s, m, h, or d"),
    };

    num.checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or("Duration too large")
}
