//! Domain layer: strong types, validation rules and the gateway code table (no I/O).

mod cost;
mod error_code;
mod format;
mod request;
mod response;
mod text;
mod validation;
mod value;

pub use cost::{CURRENCY, CostEstimate, DEFAULT_COST_PER_SMS, estimate_cost};
pub use error_code::{ApiError, ErrorCategory, KNOWN_CODES, KnownCode, SUCCESS_DESCRIPTION};
pub use format::{COUNTRY_CODE, format_phone_number};
pub use request::{BulkMessage, SendBulkSms, SendSms};
pub use response::ApiResponse;
pub use text::{is_bengali_text, sanitize_message};
pub use validation::{
    BRAND_NAME_MAX_LEN, MESSAGE_MAX_LEN, SENDER_ID_MAX_LEN, ValidationError, validate_message,
    validate_otp_format, validate_phone_number, validate_sender_id,
};
pub use value::{ApiKey, MessageText, PhoneNumber, ResponseCode, SenderId, message_parts};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_inputs_validate_and_format_to_canonical_form() {
        for (input, expected) in [
            ("01712345678", "8801712345678"),
            ("+8801812345678", "8801812345678"),
            ("880 1912-345678", "8801912345678"),
            ("+880-13-1234-5678", "8801312345678"),
        ] {
            assert_eq!(validate_phone_number(input), Ok(()));
            let formatted = format_phone_number(input);
            assert_eq!(formatted, expected);
            assert_eq!(format_phone_number(&formatted), formatted);
        }
    }

    #[test]
    fn message_boundaries_line_up_with_segments() {
        assert!(validate_message(&"m".repeat(1531)).is_err());
        let max = "m".repeat(1530);
        assert_eq!(validate_message(&max), Ok(()));
        assert_eq!(message_parts(&max), 10);
    }

    #[test]
    fn otp_template_fits_a_single_segment() {
        let msg = MessageText::new(format!("Your {} OTP is {}", "MyApp", "123456")).unwrap();
        assert_eq!(msg.parts(), 1);
    }
}
