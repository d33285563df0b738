use serde::Serialize;

use crate::domain::{ApiKey, MessageText, PhoneNumber, SendBulkSms, SendSms, SenderId};

#[derive(Debug, Serialize)]
struct TransportBulkMessage<'a> {
    to: &'a str,
    message: &'a str,
}

fn push_credentials(params: &mut Vec<(String, String)>, api_key: &ApiKey, sender_id: &SenderId) {
    params.push((ApiKey::FIELD.to_owned(), api_key.as_str().to_owned()));
    params.push((SenderId::FIELD.to_owned(), sender_id.as_str().to_owned()));
}

/// Form body for `smsapi`: canonical recipients joined with commas.
pub fn encode_send_sms_form(
    api_key: &ApiKey,
    sender_id: &SenderId,
    request: &SendSms,
) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_credentials(&mut params, api_key, sender_id);

    let number = request
        .recipients()
        .iter()
        .map(PhoneNumber::canonical)
        .collect::<Vec<_>>()
        .join(",");
    params.push((PhoneNumber::FIELD.to_owned(), number));
    params.push((
        MessageText::FIELD.to_owned(),
        request.message().as_str().to_owned(),
    ));

    params
}

/// Form body for `smsapimany`: the pairs travel as one JSON-encoded `messages` field.
pub fn encode_send_bulk_sms_form(
    api_key: &ApiKey,
    sender_id: &SenderId,
    request: &SendBulkSms,
) -> Result<Vec<(String, String)>, serde_json::Error> {
    let mut params = Vec::<(String, String)>::new();
    push_credentials(&mut params, api_key, sender_id);

    let messages = request
        .messages()
        .iter()
        .map(|pair| TransportBulkMessage {
            to: pair.to().canonical(),
            message: pair.message().as_str(),
        })
        .collect::<Vec<_>>();
    params.push(("messages".to_owned(), serde_json::to_string(&messages)?));

    Ok(params)
}
