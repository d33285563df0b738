use crate::domain::validation::strip_phone_separators;

/// Country calling code for Bangladesh, as required on the wire.
pub const COUNTRY_CODE: &str = "880";

/// Normalize a phone number to the canonical wire form (`8801XXXXXXXXX`).
///
/// Removes whitespace, hyphens and a leading `+`, then prepends the country code
/// to national (`01...`) numbers. This does not validate; run
/// [`validate_phone_number`](crate::domain::validate_phone_number) first.
pub fn format_phone_number(input: &str) -> String {
    let digits = strip_phone_separators(input);
    match digits.strip_prefix('0') {
        Some(national) if national.starts_with('1') => format!("{COUNTRY_CODE}{national}"),
        _ => digits,
    }
}
