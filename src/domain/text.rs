/// Clean message text before sending.
///
/// Typographic quotes become ASCII quotes, control characters other than tab,
/// newline and carriage return are dropped, whitespace runs collapse to one
/// space and the result is trimmed.
pub fn sanitize_message(message: &str) -> String {
    let replaced = message.chars().filter_map(|c| match c {
        '\u{201C}' | '\u{201D}' => Some('"'),
        '\u{2018}' | '\u{2019}' => Some('\''),
        '\t' | '\n' | '\r' => Some(c),
        c if c.is_control() => None,
        c => Some(c),
    });

    let mut out = String::with_capacity(message.len());
    let mut pending_space = false;
    for c in replaced {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

/// Bengali script block.
const BENGALI: std::ops::RangeInclusive<char> = '\u{0980}'..='\u{09FF}';

/// Whether the text contains any Bengali character.
pub fn is_bengali_text(text: &str) -> bool {
    text.chars().any(|c| BENGALI.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_normalizes_quotes_and_whitespace() {
        assert_eq!(
            sanitize_message("  \u{201C}Hi\u{201D}   it\u{2019}s\n\nme  "),
            "\"Hi\" it's me"
        );
    }

    #[test]
    fn sanitize_drops_control_characters() {
        assert_eq!(sanitize_message("a\u{0000}b\u{0007}c\u{007F}"), "abc");
        assert_eq!(sanitize_message("a\tb"), "a b");
    }

    #[test]
    fn sanitize_keeps_bengali() {
        assert_eq!(sanitize_message(" হ্যালো  বিশ্ব "), "হ্যালো বিশ্ব");
    }

    #[test]
    fn detects_bengali_script() {
        assert!(is_bengali_text("হ্যালো বিশ্ব!"));
        assert!(is_bengali_text("OTP: ১২৩৪"));
        assert!(!is_bengali_text("Hello World!"));
        assert!(!is_bengali_text(""));
    }
}
