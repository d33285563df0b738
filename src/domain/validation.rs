use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Bangladesh mobile number, national (`01XNNNNNNNN`) or with country code (`8801XNNNNNNNN`).
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:88)?01[3-9][0-9]{8}$").expect("phone pattern is valid")
});

static SENDER_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9 .\-]+$").expect("sender id pattern is valid")
});

static OTP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4,8}$").expect("otp pattern is valid")
});

/// Maximum sender id length accepted by the gateway.
pub const SENDER_ID_MAX_LEN: usize = 20;

/// Maximum concatenated message length (10 segments).
pub const MESSAGE_MAX_LEN: usize = 1530;

/// Maximum brand name length for OTP messages.
pub const BRAND_NAME_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    Blank { field: &'static str },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidCharacters { field: &'static str, input: String },
    InvalidPhoneNumber { input: String },
    InvalidOtp { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::Blank { field } => write!(f, "{field} must not be only whitespace"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidCharacters { field, input } => write!(
                f,
                "{field} contains invalid characters: {input:?} (allowed: letters, digits, spaces, hyphens, dots)"
            ),
            Self::InvalidPhoneNumber { input } => write!(
                f,
                "invalid Bangladesh phone number: {input:?} (expected 01XXXXXXXXX, 8801XXXXXXXXX or +8801XXXXXXXXX)"
            ),
            Self::InvalidOtp { input } => write!(f, "OTP must be 4-8 digits, got {input:?}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Strip separators and an optional leading `+`, leaving the bare digits to match against.
pub(crate) fn strip_phone_separators(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    match cleaned.strip_prefix('+') {
        Some(rest) => rest.to_owned(),
        None => cleaned,
    }
}

/// Check that `input` is a Bangladesh mobile number.
///
/// Spaces and hyphens anywhere and a single leading `+` are ignored.
pub fn validate_phone_number(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::Empty { field: "number" });
    }

    if PHONE_PATTERN.is_match(&strip_phone_separators(input)) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhoneNumber {
            input: input.to_owned(),
        })
    }
}

/// Check a sender id: 1..=20 characters of letters, digits, space, hyphen or dot.
pub fn validate_sender_id(input: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "senderid";

    if input.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }
    let len = input.chars().count();
    if len > SENDER_ID_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD,
            max: SENDER_ID_MAX_LEN,
            actual: len,
        });
    }
    if !SENDER_ID_PATTERN.is_match(input) {
        return Err(ValidationError::InvalidCharacters {
            field: FIELD,
            input: input.to_owned(),
        });
    }
    Ok(())
}

/// Check message content: not empty, not only whitespace, at most 1530 characters.
pub fn validate_message(input: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "message";

    if input.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }
    if input.trim().is_empty() {
        return Err(ValidationError::Blank { field: FIELD });
    }
    let len = input.chars().count();
    if len > MESSAGE_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD,
            max: MESSAGE_MAX_LEN,
            actual: len,
        });
    }
    Ok(())
}

/// Check an OTP code (4-8 digits) and the brand name it is sent under.
pub fn validate_otp_format(otp: &str, brand_name: &str) -> Result<(), ValidationError> {
    if otp.is_empty() {
        return Err(ValidationError::Empty { field: "otp" });
    }
    if brand_name.is_empty() {
        return Err(ValidationError::Empty { field: "brand_name" });
    }
    if !OTP_PATTERN.is_match(otp) {
        return Err(ValidationError::InvalidOtp {
            input: otp.to_owned(),
        });
    }
    let len = brand_name.chars().count();
    if len > BRAND_NAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: "brand_name",
            max: BRAND_NAME_MAX_LEN,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_national_and_international_numbers() {
        for input in [
            "01712345678",
            "8801712345678",
            "+8801712345678",
            "01312345678",
            "01912345678",
            "0171-234-5678",
            "+880 1712 345678",
            "880-17-1234-5678",
        ] {
            assert_eq!(validate_phone_number(input), Ok(()), "{input}");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for input in [
            "0171234567",
            "017123456789",
            "01012345678",
            "01212345678",
            "8801012345678",
            "abc01712345678",
            "123456789",
            "++8801712345678",
            "8801712345678+",
            "invalid_phone",
        ] {
            assert!(
                matches!(
                    validate_phone_number(input),
                    Err(ValidationError::InvalidPhoneNumber { .. })
                ),
                "{input}"
            );
        }
        assert_eq!(
            validate_phone_number(""),
            Err(ValidationError::Empty { field: "number" })
        );
    }

    #[test]
    fn rejects_non_ascii_digits() {
        for input in ["017১২৩৪৫৬৭৮", "০১৭১২৩৪৫৬৭৮", "88017١٢٣٤٥٦٧٨"] {
            assert!(
                matches!(
                    validate_phone_number(input),
                    Err(ValidationError::InvalidPhoneNumber { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn sender_id_length_boundary() {
        assert_eq!(validate_sender_id(&"A".repeat(20)), Ok(()));
        assert_eq!(
            validate_sender_id(&"A".repeat(21)),
            Err(ValidationError::TooLong {
                field: "senderid",
                max: 20,
                actual: 21
            })
        );
        assert!(matches!(
            validate_sender_id(""),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn sender_id_character_set() {
        assert_eq!(validate_sender_id("My Shop-1.bd"), Ok(()));
        assert_eq!(validate_sender_id("a"), Ok(()));
        for input in ["my_shop", "shop#1", "shop\t1"] {
            assert!(
                matches!(
                    validate_sender_id(input),
                    Err(ValidationError::InvalidCharacters { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn message_bounds() {
        assert_eq!(validate_message("Hello"), Ok(()));
        assert_eq!(validate_message(&"x".repeat(1530)), Ok(()));
        assert_eq!(
            validate_message(""),
            Err(ValidationError::Empty { field: "message" })
        );
        assert_eq!(
            validate_message(" \n\t "),
            Err(ValidationError::Blank { field: "message" })
        );
        assert!(matches!(
            validate_message(&"x".repeat(1531)),
            Err(ValidationError::TooLong { actual: 1531, .. })
        ));
    }

    #[test]
    fn message_length_counts_characters_not_bytes() {
        let bengali = "অ".repeat(1530);
        assert!(bengali.len() > MESSAGE_MAX_LEN);
        assert_eq!(validate_message(&bengali), Ok(()));
    }

    #[test]
    fn otp_format_rules() {
        assert_eq!(validate_otp_format("1234", "MyApp"), Ok(()));
        assert_eq!(validate_otp_format("12345678", "MyApp"), Ok(()));
        assert!(matches!(
            validate_otp_format("123", "MyApp"),
            Err(ValidationError::InvalidOtp { .. })
        ));
        assert!(matches!(
            validate_otp_format("12a4", "MyApp"),
            Err(ValidationError::InvalidOtp { .. })
        ));
        assert!(matches!(
            validate_otp_format("", "MyApp"),
            Err(ValidationError::Empty { field: "otp" })
        ));
        assert!(matches!(
            validate_otp_format("1234", ""),
            Err(ValidationError::Empty { field: "brand_name" })
        ));
        assert!(matches!(
            validate_otp_format("1234", &"b".repeat(51)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "number" };
        assert_eq!(err.to_string(), "number must not be empty");

        let err = ValidationError::TooLong {
            field: "senderid",
            max: 20,
            actual: 21,
        };
        assert_eq!(
            err.to_string(),
            "senderid is too long: 21 characters (max 20)"
        );
    }
}
