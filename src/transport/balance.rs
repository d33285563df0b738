use crate::domain::ApiKey;

pub fn encode_balance_query(api_key: &ApiKey) -> Vec<(String, String)> {
    vec![(ApiKey::FIELD.to_owned(), api_key.as_str().to_owned())]
}
