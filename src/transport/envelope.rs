use serde_json::{Map, Value};

use super::money::decode_balance_field;
use crate::domain::ApiResponse;

/// Parse a gateway reply body.
///
/// Bodies that are not JSON become `{"message": <body>, "code": null}` so that
/// plain-text replies still reach the caller.
pub fn decode_envelope(body: &str) -> ApiResponse {
    let payload = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) => {
            let mut envelope = Map::new();
            envelope.insert("message".to_owned(), Value::String(body.to_owned()));
            envelope.insert("code".to_owned(), Value::Null);
            Value::Object(envelope)
        }
    };

    let balance = if payload.is_object() {
        decode_balance_field(body)
    } else {
        None
    };

    ApiResponse::new(payload, body).with_balance(balance)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::ResponseCode;

    #[test]
    fn decodes_json_envelope() {
        let body = r#"{"response_code":202,"message_id":42,"success_message":"SMS Submitted Successfully","error_message":"","code":202,"message":"ok"}"#;
        let resp = decode_envelope(body);
        assert_eq!(resp.code(), Some(ResponseCode::new(202)));
        assert_eq!(resp.message(), Some("ok"));
        assert_eq!(resp.get("message_id"), Some(&json!(42)));
        assert_eq!(resp.raw(), body);
    }

    #[test]
    fn plain_text_body_becomes_minimal_envelope() {
        let resp = decode_envelope("Gateway says hello");
        assert_eq!(resp.code(), None);
        assert_eq!(resp.message(), Some("Gateway says hello"));
        assert_eq!(
            resp.payload(),
            &json!({"message": "Gateway says hello", "code": null})
        );
    }

    #[test]
    fn balance_is_extracted_from_object_bodies() {
        let resp = decode_envelope(r#"{"response_code":202,"balance":"1520.50"}"#);
        assert_eq!(resp.balance(), Some("1520.50"));
        assert_eq!(resp.code(), None);

        let resp = decode_envelope("123.45");
        assert_eq!(resp.balance(), None);
        assert_eq!(resp.payload(), &json!(123.45));
    }
}
