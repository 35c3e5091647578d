use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8080";
const DEFAULT_FILTER_STORE_DIR: &str = "./data/preferences";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Largest UTC offset (in minutes) the calendar accepts, one minute short of a day.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 23 * 60 + 59;

pub fn is_valid_utc_offset(minutes: &i32) -> bool {
    (-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(minutes)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_api_url: String,
    pub jwt_secret: String,
    pub filter_store_dir: PathBuf,
    pub calendar_utc_offset_minutes: i32,
    pub backend_timeout_secs: u64,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_api_url: env::var("BACKEND_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("BACKEND_API_URL not set, using default");
                    DEFAULT_BACKEND_API_URL.to_string()
                }),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            filter_store_dir: env::var("FILTER_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("FILTER_STORE_DIR not set, using default");
                    PathBuf::from(DEFAULT_FILTER_STORE_DIR)
                }),
            calendar_utc_offset_minutes: parse_or_default(
                "CALENDAR_UTC_OFFSET_MINUTES",
                0,
                is_valid_utc_offset,
            ),
            backend_timeout_secs: parse_or_default(
                "BACKEND_TIMEOUT_SECS",
                DEFAULT_BACKEND_TIMEOUT_SECS,
                |secs: &u64| *secs > 0,
            ),
            server_port: parse_or_default("SERVER_PORT", DEFAULT_SERVER_PORT, |_| true),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_api_url.is_empty() && !self.jwt_secret.is_empty()
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

fn parse_or_default<T, F>(key: &str, default: T, valid: F) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
    F: Fn(&T) -> bool,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if valid(&value) => value,
            _ => {
                warn!("{} has invalid value {:?}, using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
