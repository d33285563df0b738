//! Client layer: configuration, HTTP execution with retries, and the public facade.

mod config;
mod executor;
#[cfg(test)]
mod fake;
mod http;
mod retry;

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use url::Url;

pub use config::{
    ClientConfig, ConfigError, DEFAULT_BACKOFF_FACTOR, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT,
};
pub use retry::RetryPolicy;

use crate::domain::{
    ApiError, ApiKey, ApiResponse, BulkMessage, CostEstimate, ErrorCategory, MessageText,
    PhoneNumber, SendBulkSms, SendSms, SenderId, ValidationError, estimate_cost,
};
use http::{HttpRequest, HttpTransport, ReqwestTransport};
use retry::RetryingTransport;

const SEND_SMS_PATH: &str = "smsapi";
const SEND_MANY_PATH: &str = "smsapimany";
const BALANCE_PATH: &str = "getBalanceApi";

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`BulkSmsClient`].
///
/// - configuration and validation failures are raised before anything is sent,
/// - network failures (`Timeout`, `Transport`, `HttpStatus`) have already been
///   retried according to the client's [`RetryPolicy`],
/// - API failures are explicit gateway rejections and are never retried.
pub enum BulkSmsError {
    /// Missing or malformed client settings.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// One of the caller-supplied values failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        timeout: Duration,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Connection or other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// HTTP status >= 400. The body is kept verbatim and not interpreted.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: String },

    /// The gateway rejected the request with a non-success code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The bulk message list could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl BulkSmsError {
    /// Transport-level failure (timeouts included).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Transport(_) | Self::HttpStatus { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether resending could succeed. Gateway rejections never qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => RetryPolicy::is_retryable_status(*status),
            other => other.is_network(),
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Category of a gateway rejection; `None` for every other failure.
    pub fn category(&self) -> Option<ErrorCategory> {
        self.api_error().map(|err| err.category)
    }
}

/// Recipient input accepted by [`BulkSmsClient::send_sms`]: one number or many.
pub trait Recipients {
    fn into_recipients(self) -> Vec<String>;
}

impl Recipients for &str {
    fn into_recipients(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl Recipients for String {
    fn into_recipients(self) -> Vec<String> {
        vec![self]
    }
}

impl Recipients for &String {
    fn into_recipients(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>> Recipients for Vec<S> {
    fn into_recipients(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>> Recipients for &[S] {
    fn into_recipients(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> Recipients for [S; N] {
    fn into_recipients(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

/// Per-call sender. Empty or blank overrides fall back to the client default.
fn sender_override(sender_id: Option<&str>) -> Result<Option<SenderId>, ValidationError> {
    sender_id
        .filter(|sender| !sender.trim().is_empty())
        .map(SenderId::new)
        .transpose()
}

#[derive(Debug, Clone)]
struct Endpoints {
    send_sms: Url,
    send_many: Url,
    balance: Url,
}

impl Endpoints {
    fn from_base(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |source| ConfigError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source,
        };
        let mut base = Url::parse(base_url).map_err(invalid)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            send_sms: base.join(SEND_SMS_PATH).map_err(invalid)?,
            send_many: base.join(SEND_MANY_PATH).map_err(invalid)?,
            balance: base.join(BALANCE_PATH).map_err(invalid)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`BulkSmsClient`].
///
/// Values set directly on the builder take precedence over the
/// [`ClientConfig`] passed to [`BulkSmsClientBuilder::config`], which in
/// turn takes precedence over the defaults.
pub struct BulkSmsClientBuilder {
    config: ClientConfig,
    api_key: Option<String>,
    sender_id: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    backoff_factor: Option<f64>,
    verify_ssl: Option<bool>,
    cost_per_sms: Option<f64>,
    user_agent: Option<String>,
}

impl BulkSmsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base settings, typically [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Default sender used when an operation is not given one.
    pub fn sender_id(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Override the API base URL (default `https://bulksmsbd.net/api`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Total timeout applied to each HTTP attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Backoff factor in seconds.
    pub fn backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = Some(backoff_factor);
        self
    }

    /// Disable only against test gateways with self-signed certificates.
    pub fn verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = Some(verify_ssl);
        self
    }

    pub fn cost_per_sms(mut self, cost_per_sms: f64) -> Self {
        self.cost_per_sms = Some(cost_per_sms);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`BulkSmsClient`].
    ///
    /// Fails with [`BulkSmsError::Configuration`] when the API key or sender
    /// ID is missing, or when any other setting is unusable.
    pub fn build(self) -> Result<BulkSmsClient, BulkSmsError> {
        let config = self.config;

        let api_key = self
            .api_key
            .or(config.api_key)
            .and_then(|key| ApiKey::new(key).ok())
            .ok_or(ConfigError::MissingApiKey)?;

        let sender_id = self
            .sender_id
            .or(config.sender_id)
            .filter(|sender| !sender.trim().is_empty())
            .ok_or(ConfigError::MissingSenderId)?;
        let sender_id = SenderId::new(sender_id).map_err(ConfigError::InvalidSenderId)?;

        let base_url = self.base_url.unwrap_or(config.base_url);
        let endpoints = Endpoints::from_base(&base_url)?;

        let timeout = self.timeout.unwrap_or(config.timeout);
        let policy = RetryPolicy::new(
            self.max_retries.unwrap_or(config.max_retries),
            self.backoff_factor.unwrap_or(config.backoff_factor),
        );

        let mut builder = reqwest::Client::builder().timeout(timeout);
        if !self.verify_ssl.unwrap_or(config.verify_ssl) {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(user_agent) = self.user_agent.or(config.user_agent) {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(ConfigError::HttpClient)?;

        info!(
            sender_id = sender_id.as_str(),
            base_url = %base_url,
            max_retries = policy.max_retries(),
            "BulkSMS client initialized"
        );

        Ok(BulkSmsClient {
            api_key,
            sender_id,
            endpoints,
            timeout,
            cost_per_sms: self.cost_per_sms.unwrap_or(config.cost_per_sms),
            http: Arc::new(RetryingTransport::new(ReqwestTransport::new(client), policy)),
        })
    }
}

#[derive(Clone)]
/// High-level BulkSMSBD client.
///
/// Every operation validates its inputs, normalizes phone numbers to the
/// canonical `8801XXXXXXXXX` form and performs a single logical HTTP call
/// (retried on transient network failures). The underlying connection pool
/// is shared by clones of the client.
pub struct BulkSmsClient {
    api_key: ApiKey,
    sender_id: SenderId,
    endpoints: Endpoints,
    timeout: Duration,
    cost_per_sms: f64,
    http: Arc<dyn HttpTransport>,
}

impl BulkSmsClient {
    /// Create a client with explicit credentials and default settings.
    pub fn new(
        api_key: impl Into<String>,
        sender_id: impl Into<String>,
    ) -> Result<Self, BulkSmsError> {
        Self::builder().api_key(api_key).sender_id(sender_id).build()
    }

    /// Create a client from `BULKSMS_*` environment variables.
    pub fn from_env() -> Result<Self, BulkSmsError> {
        Self::builder().config(ClientConfig::from_env()?).build()
    }

    pub fn builder() -> BulkSmsClientBuilder {
        BulkSmsClientBuilder::new()
    }

    /// Default sender ID.
    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    /// Send one message to one or many recipients (`smsapi`).
    ///
    /// The message and sender are validated once, every recipient is
    /// validated and formatted, and all recipients travel in one request.
    ///
    /// Errors:
    /// - [`BulkSmsError::Validation`] for invalid input (nothing is sent),
    /// - network variants once retries are exhausted,
    /// - [`BulkSmsError::Api`] when the gateway answers with an error code.
    pub async fn send_sms(
        &self,
        recipients: impl Recipients,
        message: &str,
        sender_id: Option<&str>,
    ) -> Result<ApiResponse, BulkSmsError> {
        let message = MessageText::new(message)?;
        let sender_id = sender_override(sender_id)?;
        let recipients = recipients
            .into_recipients()
            .into_iter()
            .map(PhoneNumber::parse)
            .collect::<Result<Vec<_>, _>>()?;

        self.send(SendSms::new(recipients, message, sender_id)?)
            .await
    }

    /// Send an already validated one-to-many request.
    pub async fn send(&self, request: SendSms) -> Result<ApiResponse, BulkSmsError> {
        let sender_id = request.sender_id().unwrap_or(&self.sender_id);
        let form = crate::transport::encode_send_sms_form(&self.api_key, sender_id, &request);

        info!(
            recipients = request.recipients().len(),
            parts = request.message().parts(),
            "sending SMS"
        );

        self.execute(HttpRequest::post_form(self.endpoints.send_sms.clone(), form))
            .await
    }

    /// Send differing messages to differing recipients in one call (`smsapimany`).
    ///
    /// Fails with [`BulkSmsError::Validation`] when `messages` is empty or any
    /// pair is invalid; nothing is sent in that case.
    pub async fn send_bulk_sms<I, T, M>(
        &self,
        messages: I,
        sender_id: Option<&str>,
    ) -> Result<ApiResponse, BulkSmsError>
    where
        I: IntoIterator<Item = (T, M)>,
        T: AsRef<str>,
        M: AsRef<str>,
    {
        let messages: Vec<(T, M)> = messages.into_iter().collect();
        if messages.is_empty() {
            return Err(ValidationError::Empty { field: "messages" }.into());
        }
        let sender_id = sender_override(sender_id)?;
        let pairs = messages
            .iter()
            .map(|(to, message)| BulkMessage::parse(to.as_ref(), message.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        self.send_bulk(SendBulkSms::new(pairs, sender_id)?).await
    }

    /// Send an already validated many-to-many request.
    pub async fn send_bulk(&self, request: SendBulkSms) -> Result<ApiResponse, BulkSmsError> {
        let sender_id = request.sender_id().unwrap_or(&self.sender_id);
        let form = crate::transport::encode_send_bulk_sms_form(&self.api_key, sender_id, &request)
            .map_err(BulkSmsError::Encode)?;

        info!(recipients = request.messages().len(), "sending bulk SMS");

        self.execute(HttpRequest::post_form(self.endpoints.send_many.clone(), form))
            .await
    }

    /// Query the account balance (`getBalanceApi`).
    ///
    /// The reply is returned as-is; see [`ApiResponse::balance`].
    pub async fn get_balance(&self) -> Result<ApiResponse, BulkSmsError> {
        info!("checking account balance");
        let query = crate::transport::encode_balance_query(&self.api_key);
        self.execute(HttpRequest::get(self.endpoints.balance.clone(), query))
            .await
    }

    /// Send `"Your {brand_name} OTP is {code}"` to a single recipient.
    pub async fn send_otp(
        &self,
        recipient: &str,
        code: &str,
        brand_name: &str,
        sender_id: Option<&str>,
    ) -> Result<ApiResponse, BulkSmsError> {
        let message = format!("Your {brand_name} OTP is {code}");
        self.send_sms(recipient, &message, sender_id).await
    }

    /// Check credentials and connectivity with a balance query.
    ///
    /// Any failure is logged and reported as `false`.
    pub async fn test_connection(&self) -> bool {
        match self.get_balance().await {
            Ok(_) => true,
            Err(err) => {
                error!(error = %err, "connection test failed");
                false
            }
        }
    }

    /// Estimate the cost of sending `message` to `recipient_count` numbers
    /// at the configured per-SMS price.
    pub fn estimate_cost(&self, message: &str, recipient_count: u32) -> CostEstimate {
        estimate_cost(message, recipient_count, self.cost_per_sms)
    }

    async fn execute(&self, request: HttpRequest) -> Result<ApiResponse, BulkSmsError> {
        executor::execute(self.http.as_ref(), request, self.timeout).await
    }
}
