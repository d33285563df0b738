//! Typed Rust client for the BulkSMSBD.net HTTP API.
//!
//! The crate is split into a domain layer of strong types and validation
//! rules, a transport layer for wire-format quirks, and a small client layer
//! that executes requests with retries and maps gateway error codes.
//!
//! ```rust,no_run
//! use bulksmsbd::BulkSmsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bulksmsbd::BulkSmsError> {
//!     let client = BulkSmsClient::new("your_api_key", "YourBrand")?;
//!     let response = client.send_sms("01712345678", "Hello World!", None).await?;
//!     println!("{}", response.raw());
//!
//!     let balance = client.get_balance().await?;
//!     println!("balance: {:?}", balance.balance());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BulkSmsClient, BulkSmsClientBuilder, BulkSmsError, ClientConfig, ConfigError, Recipients,
    RetryPolicy,
};
pub use domain::{
    ApiError, ApiKey, ApiResponse, BulkMessage, CostEstimate, ErrorCategory, MessageText,
    PhoneNumber, ResponseCode, SendBulkSms, SendSms, SenderId, ValidationError, estimate_cost,
    format_phone_number, is_bengali_text, sanitize_message, validate_message,
    validate_otp_format, validate_phone_number, validate_sender_id,
};
