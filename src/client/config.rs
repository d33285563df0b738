use std::fmt;
use std::time::Duration;

use crate::domain::{DEFAULT_COST_PER_SMS, ValidationError};

pub const DEFAULT_BASE_URL: &str = "https://bulksmsbd.net/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 0.5;

pub const ENV_API_KEY: &str = "BULKSMS_API_KEY";
pub const ENV_SENDER_ID: &str = "BULKSMS_SENDER_ID";
pub const ENV_BASE_URL: &str = "BULKSMS_BASE_URL";
pub const ENV_TIMEOUT: &str = "BULKSMS_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "BULKSMS_MAX_RETRIES";
pub const ENV_BACKOFF_FACTOR: &str = "BULKSMS_BACKOFF_FACTOR";
pub const ENV_VERIFY_SSL: &str = "BULKSMS_VERIFY_SSL";
pub const ENV_COST_PER_SMS: &str = "BULKSMS_BASE_COST_PER_SMS";

#[derive(Debug, thiserror::Error)]
/// The client could not be constructed from the supplied settings.
pub enum ConfigError {
    #[error("API key is required; set BULKSMS_API_KEY or pass it to the builder")]
    MissingApiKey,

    #[error("sender ID is required; set BULKSMS_SENDER_ID or pass it to the builder")]
    MissingSenderId,

    #[error("invalid default sender ID: {0}")]
    InvalidSenderId(#[source] ValidationError),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Clone, PartialEq)]
/// Client settings before validation.
///
/// Credentials are optional here; the builder fails with
/// [`ConfigError::MissingApiKey`] / [`ConfigError::MissingSenderId`] when
/// neither the builder nor this struct provides them.
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub sender_id: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Seconds; the n-th retry waits `backoff_factor * 2^n`.
    pub backoff_factor: f64,
    pub verify_ssl: bool,
    /// Price of one SMS segment in BDT, used for cost estimates.
    pub cost_per_sms: f64,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            sender_id: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            verify_ssl: true,
            cost_per_sms: DEFAULT_COST_PER_SMS,
            user_agent: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("sender_id", &self.sender_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff_factor", &self.backoff_factor)
            .field("verify_ssl", &self.verify_ssl)
            .field("cost_per_sms", &self.cost_per_sms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Resolve settings from `BULKSMS_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary key lookup over the defaults.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.api_key = get(ENV_API_KEY);
        config.sender_id = get(ENV_SENDER_ID);
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(value) = get(ENV_TIMEOUT) {
            config.timeout = parse_timeout(&value)?;
        }
        if let Some(value) = get(ENV_MAX_RETRIES) {
            config.max_retries = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_MAX_RETRIES,
                value: value.clone(),
                reason: "expected a non-negative integer",
            })?;
        }
        if let Some(value) = get(ENV_BACKOFF_FACTOR) {
            config.backoff_factor = parse_non_negative(ENV_BACKOFF_FACTOR, &value)?;
        }
        if let Some(value) = get(ENV_VERIFY_SSL) {
            config.verify_ssl = parse_bool(ENV_VERIFY_SSL, &value)?;
        }
        if let Some(value) = get(ENV_COST_PER_SMS) {
            config.cost_per_sms = parse_non_negative(ENV_COST_PER_SMS, &value)?;
        }

        Ok(config)
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: ENV_TIMEOUT,
        value: value.to_owned(),
        reason: "expected a positive number of seconds",
    };
    let secs: f64 = value.trim().parse().map_err(|_| invalid())?;
    if secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

fn parse_non_negative(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
            reason: "expected a non-negative number",
        }),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
            reason: "expected true/false",
        }),
    }
}
