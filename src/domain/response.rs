use serde_json::Value;

use crate::domain::value::ResponseCode;

#[derive(Debug, Clone, PartialEq)]
/// Parsed gateway reply.
///
/// The envelope usually carries a numeric `code` and a `message`; every other
/// field is passed through untouched in [`ApiResponse::payload`].
pub struct ApiResponse {
    payload: Value,
    raw: String,
    balance: Option<String>,
}

impl ApiResponse {
    pub(crate) fn new(payload: Value, raw: impl Into<String>) -> Self {
        Self {
            payload,
            raw: raw.into(),
            balance: None,
        }
    }

    pub(crate) fn with_balance(mut self, balance: Option<String>) -> Self {
        self.balance = balance;
        self
    }

    /// Envelope `code`, when present.
    ///
    /// Only a missing field or `null` counts as absent. Integers, integral
    /// floats and numeric strings become [`ResponseCode::Numeric`]; any other
    /// value is kept as [`ResponseCode::Unrecognized`].
    pub fn code(&self) -> Option<ResponseCode> {
        let value = self.payload.get("code")?;
        let code = match value {
            Value::Null => return None,
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(integral_f64)),
            Value::String(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        };
        Some(code.map_or_else(
            || ResponseCode::Unrecognized(value.to_string()),
            ResponseCode::Numeric,
        ))
    }

    /// Envelope `message`, when it is a string.
    pub fn message(&self) -> Option<&str> {
        self.payload.get("message").and_then(Value::as_str)
    }

    /// Account balance as reported by the balance endpoint.
    ///
    /// The gateway returns it either as a JSON string or number; numbers keep
    /// their original formatting (`10.00` stays `"10.00"`).
    pub fn balance(&self) -> Option<&str> {
        self.balance.as_deref()
    }

    /// Look up any other field of the envelope.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    /// The full parsed payload.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Body exactly as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

/// `1007.0` is code 1007; fractional or out-of-range values have no integer form.
fn integral_f64(value: f64) -> Option<i64> {
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&value);
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}
