use std::fmt;

use crate::domain::format::format_phone_number;
use crate::domain::validation::{
    ValidationError, validate_message, validate_phone_number, validate_sender_id,
};

/// Upper character bound of each segment count: index `i` holds the limit for `i + 1` parts.
const SEGMENT_BREAKPOINTS: [usize; 10] = [160, 306, 459, 612, 765, 918, 1071, 1224, 1377, 1530];

/// Number of SMS segments a message of this length is billed as.
///
/// Messages longer than 1530 characters report 11, which the gateway never accepts.
pub fn message_parts(message: &str) -> u8 {
    let len = message.chars().count();
    SEGMENT_BREAKPOINTS
        .iter()
        .position(|limit| len <= *limit)
        .map_or(11, |idx| idx as u8 + 1)
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// BulkSMSBD `api_key` credential.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Form/query field name used by BulkSMSBD (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message originator shown to recipients (`senderid`).
///
/// Invariant: 1..=20 characters of letters, digits, space, hyphen or dot.
pub struct SenderId(String);

impl SenderId {
    /// Form field name used by BulkSMSBD (`senderid`).
    pub const FIELD: &'static str = "senderid";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_sender_id(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: not blank, at most 1530 characters. The value is preserved as provided.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by BulkSMSBD (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_message(&value)?;
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of billed SMS segments, see [`message_parts`].
    pub fn parts(&self) -> u8 {
        message_parts(&self.0)
    }
}

#[derive(Debug, Clone)]
/// Validated Bangladesh mobile number.
///
/// Keeps both the caller's input and the canonical wire form (`8801XXXXXXXXX`).
/// Equality and ordering follow the canonical form.
pub struct PhoneNumber {
    canonical: String,
    raw: String,
}

impl PhoneNumber {
    /// Form field name used by BulkSMSBD (`number`).
    pub const FIELD: &'static str = "number";

    /// Validate and normalize a phone number.
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = input.into();
        validate_phone_number(&raw)?;
        Ok(Self {
            canonical: format_phone_number(&raw),
            raw,
        })
    }

    /// Input as provided by the caller.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Canonical wire form: digits only with the `880` prefix.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Response code from the gateway envelope.
///
/// Integer codes (including integral floats and numeric strings) are kept as
/// [`ResponseCode::Numeric`]; any other present value is kept verbatim as
/// [`ResponseCode::Unrecognized`] and is never a success.
pub enum ResponseCode {
    Numeric(i64),
    /// JSON text of a code that is not an integer (`"ERR"`, `true`, `1.5`, ...).
    Unrecognized(String),
}

impl ResponseCode {
    /// The only code that signals a successfully submitted request.
    pub const SUCCESS: Self = Self::Numeric(202);

    pub fn new(code: i64) -> Self {
        Self::Numeric(code)
    }

    /// Integer value, when the code has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(code) => Some(*code),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(code) => write!(f, "{code}"),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}
