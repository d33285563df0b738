use std::fmt;

use crate::domain::response::ApiResponse;
use crate::domain::value::ResponseCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How a rejected request should be treated by the caller.
pub enum ErrorCategory {
    /// Unknown user or caller IP not whitelisted.
    Authentication,
    /// Balance insufficient or its validity expired.
    Balance,
    /// Recipient number rejected by the gateway.
    InvalidNumber,
    /// Account, sender id or gateway setup problem on the provider side.
    Configuration,
    /// Anything else, including codes this crate does not know.
    Generic,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::Balance => "balance",
            Self::InvalidNumber => "invalid number",
            Self::Configuration => "configuration",
            Self::Generic => "API",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One row of the gateway error-code table.
pub struct KnownCode {
    pub code: i64,
    pub category: ErrorCategory,
    pub description: &'static str,
}

const fn known(code: i64, category: ErrorCategory, description: &'static str) -> KnownCode {
    KnownCode {
        code,
        category,
        description,
    }
}

/// Error codes documented by BulkSMSBD, sorted by code.
pub const KNOWN_CODES: &[KnownCode] = &[
    known(1001, ErrorCategory::InvalidNumber, "Invalid Number"),
    known(
        1002,
        ErrorCategory::Configuration,
        "Sender ID not correct/sender ID is disabled",
    ),
    known(
        1003,
        ErrorCategory::Configuration,
        "Please Required all fields/Contact Your System Administrator",
    ),
    known(1005, ErrorCategory::Generic, "Internal Error"),
    known(1006, ErrorCategory::Balance, "Balance Validity Not Available"),
    known(1007, ErrorCategory::Balance, "Balance Insufficient"),
    known(1011, ErrorCategory::Authentication, "User ID not found"),
    known(
        1012,
        ErrorCategory::Generic,
        "Masking SMS must be sent in Bengali",
    ),
    known(
        1013,
        ErrorCategory::Configuration,
        "Sender ID has not found Gateway by api key",
    ),
    known(
        1014,
        ErrorCategory::Configuration,
        "Sender Type Name not found using this sender by api key",
    ),
    known(
        1015,
        ErrorCategory::Configuration,
        "Sender ID has not found Any Valid Gateway by api key",
    ),
    known(
        1016,
        ErrorCategory::Configuration,
        "Sender Type Name Active Price Info not found by this sender id",
    ),
    known(
        1017,
        ErrorCategory::Configuration,
        "Sender Type Name Price Info not found by this sender id",
    ),
    known(
        1018,
        ErrorCategory::Configuration,
        "The Owner of this (username) Account is disabled",
    ),
    known(
        1019,
        ErrorCategory::Configuration,
        "The (sender type name) Price of this (username) Account is disabled",
    ),
    known(
        1020,
        ErrorCategory::Configuration,
        "The parent of this account is not found",
    ),
    known(
        1021,
        ErrorCategory::Configuration,
        "The parent active (sender type name) price of this account is not found",
    ),
    known(
        1031,
        ErrorCategory::Configuration,
        "Your Account Not Verified, Please Contact Administrator",
    ),
    known(1032, ErrorCategory::Authentication, "IP Not whitelisted"),
];

/// Description of the success sentinel (`202`).
pub const SUCCESS_DESCRIPTION: &str = "SMS Submitted Successfully";

const UNKNOWN_ERROR: &str = "Unknown API error";

impl ResponseCode {
    /// Table row for this code, if the gateway documents it.
    pub fn known(&self) -> Option<&'static KnownCode> {
        let code = self.as_i64()?;
        KNOWN_CODES
            .binary_search_by_key(&code, |entry| entry.code)
            .ok()
            .map(|idx| &KNOWN_CODES[idx])
    }

    /// Failure category for this code; `None` only for the success sentinel.
    pub fn category(&self) -> Option<ErrorCategory> {
        if self.is_success() {
            return None;
        }
        Some(self.known().map_or(ErrorCategory::Generic, |k| k.category))
    }

    /// Table description for this code, if documented.
    pub fn description(&self) -> Option<&'static str> {
        if self.is_success() {
            return Some(SUCCESS_DESCRIPTION);
        }
        self.known().map(|k| k.description)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{category} error: {message} (code {code})")]
/// The gateway explicitly rejected a request.
///
/// Never retried: resending would repeat an already rejected request.
pub struct ApiError {
    pub category: ErrorCategory,
    pub code: ResponseCode,
    pub message: String,
    pub response: ApiResponse,
}

impl ApiError {
    /// Map a non-success envelope to its typed failure.
    ///
    /// The provider's own message wins; the table description is the fallback.
    pub fn from_response(code: ResponseCode, response: ApiResponse) -> Self {
        let category = code.category().unwrap_or(ErrorCategory::Generic);
        let message = response
            .message()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_owned)
            .or_else(|| code.description().map(str::to_owned))
            .unwrap_or_else(|| UNKNOWN_ERROR.to_owned());

        Self {
            category,
            code,
            message,
            response,
        }
    }

    /// Table description for [`ApiError::code`], if documented.
    pub fn description(&self) -> Option<&'static str> {
        self.code.description()
    }

    pub fn is_authentication(&self) -> bool {
        self.category == ErrorCategory::Authentication
    }

    pub fn is_balance(&self) -> bool {
        self.category == ErrorCategory::Balance
    }

    pub fn is_invalid_number(&self) -> bool {
        self.category == ErrorCategory::InvalidNumber
    }

    pub fn is_configuration(&self) -> bool {
        self.category == ErrorCategory::Configuration
    }
}
