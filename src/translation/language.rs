//! Language code validation and supported languages.

use anyhow::Result;

use crate::ui::Style;

/// Supported language codes (ISO 639-1) and their names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Returns the English name for a supported code.
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Supported codes starting with `input`, in sorted order.
pub fn similar_codes(input: &str) -> Vec<&'static str> {
    if input.is_empty() {
        return Vec::new();
    }
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, _)| *code)
        .filter(|code| code.starts_with(input))
        .collect()
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes (ISO 639-1)"));
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates that the given language code is supported.
///
/// # Errors
///
/// Returns an error listing prefix matches when the code is unknown.
pub fn validate_language(lang: &str) -> Result<()> {
    if language_name(lang).is_some() {
        return Ok(());
    }

    let mut message = format!("Invalid language code: '{lang}'");
    let similar = similar_codes(lang);
    if !similar.is_empty() {
        message.push_str("\n\nDid you mean:");
        for code in similar {
            let name = language_name(code).unwrap_or_default();
            message.push_str(&format!("\n  {code} - {name}"));
        }
    }
    message.push_str("\n\nRun 'doc languages' to see all supported codes.");
    anyhow::bail!(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_valid() {
        assert!(validate_language("ja").is_ok());
        assert!(validate_language("en").is_ok());
        assert!(validate_language("tl").is_ok());
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("invalid").is_err());
        assert!(validate_language("").is_err());
        assert!(validate_language("JA").is_err());
    }

    #[test]
    fn test_invalid_language_suggests_prefix_matches() {
        let Err(err) = validate_language("e") else {
            panic!("expected an error");
        };
        let message = err.to_string();
        assert!(message.contains("Did you mean"));
        assert!(message.contains("el - Greek"));
        assert!(message.contains("et - Estonian"));
    }

    #[test]
    fn test_similar_codes() {
        assert_eq!(similar_codes("s"), vec!["sk", "sl", "sv", "sw"]);
        assert!(similar_codes("xx").is_empty());
        assert!(similar_codes("").is_empty());
    }

    #[test]
    fn test_codes_are_sorted_and_unique() {
        let codes: Vec<_> = SUPPORTED_LANGUAGES.iter().map(|(c, _)| *c).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }
}
