//! Codepoint sequence conversion.
//!
//! # Responsibility
//! - Turn stored codepoint token text (`U+1F680 U+1F315`) into display-ready
//!   characters.
//! - Produce the canonical `U+XXXX` token text for a character string.
//!
//! # Invariants
//! - `convert` never fails; tokens that cannot be decoded are dropped.
//! - Output character count never exceeds input token count.
//! - Character order follows token order.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9A-Fa-f]+").expect("valid non-hex regex"));

/// Converts whitespace-separated codepoint tokens into a character string.
///
/// Accepted token shapes are `U+1F680`, `u+1f680`, `\u1F680`, `\U0001F680`
/// and bare `1F680`. Every non-hex character left after prefix removal is
/// discarded. Tokens with no hex digits, values that overflow, or values that
/// are not Unicode scalar values are skipped silently.
pub fn convert(sequence: &str) -> String {
    let mut output = String::new();

    for raw in sequence.split_whitespace() {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }

        let payload = hex_payload(strip_prefix(token));
        if payload.is_empty() {
            continue;
        }

        let Ok(value) = u32::from_str_radix(&payload, 16) else {
            continue;
        };
        let Some(ch) = char::from_u32(value) else {
            continue;
        };
        output.push(ch);
    }

    output
}

/// Same as [`convert`], treating absent input as empty.
pub fn convert_opt(sequence: Option<&str>) -> String {
    sequence.map(convert).unwrap_or_default()
}

/// Encodes every character of `text` as an uppercase `U+XXXX` token.
///
/// Tokens are joined by a single space and padded to at least four digits.
pub fn encode(text: &str) -> String {
    text.chars()
        .map(|ch| format!("U+{:04X}", u32::from(ch)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_prefix(token: &str) -> &str {
    let mut chars = token.chars();
    let first = chars.next();
    let second = chars.next();

    match (first, second) {
        (Some('u' | 'U'), Some('+')) => &token[2..],
        // Strips every leading `\`, `u`, `U`, so `\uu1F680` loses both `u`s.
        (Some('\\'), Some('u' | 'U')) => token.trim_start_matches(['\\', 'u', 'U']),
        _ => token,
    }
}

fn hex_payload(text: &str) -> String {
    NON_HEX_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::{convert, convert_opt, encode, strip_prefix};

    const ROCKET: &str = "\u{1F680}";
    const FULL_MOON: &str = "\u{1F315}";

    #[test]
    fn empty_and_blank_input_yield_empty_string() {
        assert_eq!(convert(""), "");
        assert_eq!(convert("   \t\n "), "");
        assert_eq!(convert_opt(None), "");
    }

    #[test]
    fn single_prefixed_token_maps_to_one_char() {
        assert_eq!(convert("U+1F680"), ROCKET);
        assert_eq!(convert("u+1f680"), ROCKET);
    }

    #[test]
    fn sequence_preserves_token_order() {
        assert_eq!(convert("U+1F680 U+1F315"), format!("{ROCKET}{FULL_MOON}"));
        assert_eq!(convert("U+1F315 U+1F680"), format!("{FULL_MOON}{ROCKET}"));
    }

    #[test]
    fn prefix_is_optional() {
        assert_eq!(convert("1F680"), convert("U+1F680"));
    }

    #[test]
    fn backslash_prefixes_are_accepted() {
        assert_eq!(convert(r"\u1F680"), ROCKET);
        assert_eq!(convert(r"\U0001F680"), ROCKET);
        assert_eq!(convert(r"\u1F680 \U0001F315"), format!("{ROCKET}{FULL_MOON}"));
    }

    #[test]
    fn backslash_prefix_strips_every_leading_marker_char() {
        assert_eq!(strip_prefix(r"\uu1F680"), "1F680");
        assert_eq!(strip_prefix(r"\\Uu00E9"), r"\\Uu00E9");
        assert_eq!(strip_prefix(r"\U\U00E9"), "00E9");
        assert_eq!(convert(r"\uu1F680"), ROCKET);
    }

    #[test]
    fn token_without_hex_digits_is_skipped() {
        assert_eq!(convert("U+ZZZZ"), "");
        assert_eq!(convert("!!! xyz"), "");
    }

    #[test]
    fn garbage_tokens_contribute_nothing_around_valid_token() {
        assert_eq!(convert("xyz U+1F680 !!!"), ROCKET);
    }

    #[test]
    fn non_hex_characters_are_filtered_anywhere_in_payload() {
        assert_eq!(convert("U+1F-6_80"), ROCKET);
        assert_eq!(convert("garbage"), "\u{ABAE}");
    }

    #[test]
    fn out_of_range_values_are_skipped() {
        assert_eq!(convert("U+110000"), "");
        assert_eq!(convert("U+D800"), "");
        assert_eq!(convert("U+FFFFFFFFFF U+41"), "A");
    }

    #[test]
    fn multi_codepoint_emoji_survive_conversion() {
        let detective = "\u{1F575}\u{FE0F}\u{200D}\u{2642}\u{FE0F}";
        assert_eq!(convert("U+1F575 U+FE0F U+200D U+2642 U+FE0F"), detective);
    }

    #[test]
    fn encode_pads_to_four_uppercase_digits() {
        assert_eq!(encode("A"), "U+0041");
        assert_eq!(encode("\u{1F680}\u{1F315}"), "U+1F680 U+1F315");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn encode_then_convert_reproduces_input() {
        let samples = [
            "\u{1F3A5}\u{1F575}\u{FE0F}\u{200D}\u{2642}\u{FE0F}",
            "\u{1F604}\u{1F3AC}",
            "plain text",
        ];
        for sample in samples {
            assert_eq!(convert(&encode(sample)), sample);
        }
    }

    #[test]
    fn conversion_is_deterministic() {
        let first = convert("U+1F680");
        for _ in 0..10 {
            assert_eq!(convert("U+1F680"), first);
        }
    }

    #[test]
    fn output_never_exceeds_token_count() {
        let input = "U+41 zz U+110000 42 \\u43";
        let tokens = input.split_whitespace().count();
        let output = convert(input);
        assert!(output.chars().count() <= tokens);
        assert_eq!(output, "ABC");
    }
}
