//! Regex-driven redaction

use fancy_regex::Regex;

use crate::{MaskError, Result};

/// Character written in place of every match
pub const MASK_CHAR: char = '*';

/// Mask `value` with a regex given as source text.
///
/// Absent or blank values produce an empty string, so `null` markers never
/// reach the logs.
///
/// ```
/// use execlog_mask::{mask, MaskedType};
///
/// assert_eq!(mask("12345678911", MaskedType::Document.regex()).unwrap(), "********911");
/// assert_eq!(mask(None, r"\S").unwrap(), "");
/// ```
pub fn mask<'a>(value: impl Into<Option<&'a str>>, regex: &str) -> Result<String> {
    let value = match value.into() {
        Some(value) if !is_blank(value) => value,
        _ => return Ok(String::new()),
    };

    let compiled = Regex::new(regex).map_err(|source| MaskError::InvalidRegex {
        regex: regex.to_string(),
        source: Box::new(source),
    })?;

    mask_with(value, &compiled)
}

/// Mask `value` with an already compiled regex.
///
/// Matching is global and unanchored. Each match is replaced by one
/// [`MASK_CHAR`] and the search resumes where the match ended.
pub fn mask_with(value: &str, regex: &Regex) -> Result<String> {
    if is_blank(value) {
        return Ok(String::new());
    }

    let mut masked = String::with_capacity(value.len());
    let mut last = 0;

    for found in regex.find_iter(value) {
        let found = found.map_err(|source| MaskError::Matching {
            regex: regex.as_str().to_string(),
            source: Box::new(source),
        })?;
        masked.push_str(&value[last..found.start()]);
        masked.push(MASK_CHAR);
        last = found.end();
    }
    masked.push_str(&value[last..]);

    Ok(masked)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaskedType;

    fn mask_as(value: &str, masked_type: MaskedType) -> String {
        mask(value, masked_type.regex()).unwrap()
    }

    #[test]
    fn test_mask_all() {
        assert_eq!(
            mask_as("john.doe@gmail.com", MaskedType::All),
            "******************"
        );
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_as("john.doe@gmail.com", MaskedType::Email), "**.doe***.com");
    }

    #[test]
    fn test_mask_document() {
        assert_eq!(mask_as("12345678911", MaskedType::Document), "********911");
    }

    #[test]
    fn test_mask_name() {
        assert_eq!(mask_as("John Doe", MaskedType::Name), "*hn*oe");
    }

    #[test]
    fn test_mask_date() {
        assert_eq!(mask_as("1986-04-08", MaskedType::Date), "***4-08");
    }

    #[test]
    fn test_mask_address() {
        assert_eq!(
            mask_as("Rua Flamengo 745, RJ", MaskedType::Address),
            "*a****o**, RJ"
        );
    }

    #[test]
    fn test_mask_zip_code() {
        assert_eq!(mask_as("20720011", MaskedType::ZipCode), "***11");
    }

    #[test]
    fn test_mask_number() {
        assert_eq!(mask_as("150000", MaskedType::Number), "******");
    }

    #[test]
    fn test_mask_telephone() {
        assert_eq!(mask_as("99999-9999", MaskedType::Telephone), "**9**9");
    }

    #[test]
    fn test_blank_values() {
        for masked_type in MaskedType::VARIANTS {
            assert_eq!(mask(None, masked_type.regex()).unwrap(), "");
            assert_eq!(mask("", masked_type.regex()).unwrap(), "");
            assert_eq!(mask("   ", masked_type.regex()).unwrap(), "");
        }
    }

    #[test]
    fn test_blank_value_skips_regex_compilation() {
        assert_eq!(mask("", "(unclosed").unwrap(), "");
    }

    #[test]
    fn test_whitespace_is_kept_by_all() {
        assert_eq!(mask_as("a b\tc", MaskedType::All), "* *\t*");
    }

    #[test]
    fn test_no_match_leaves_value() {
        assert_eq!(mask_as("no digits here", MaskedType::Number), "no digits here");
    }

    #[test]
    fn test_short_values_keep_tail() {
        assert_eq!(mask_as("ab", MaskedType::Document), "ab");
        assert_eq!(mask_as("abcd", MaskedType::Document), "*bcd");
    }

    #[test]
    fn test_custom_regex() {
        assert_eq!(mask("secret-42", "[a-z]").unwrap(), "******-42");
    }

    #[test]
    fn test_empty_matches_insert_mask() {
        assert_eq!(mask("abc", "x*").unwrap(), "*a*b*c*");
    }

    #[test]
    fn test_invalid_regex() {
        let err = mask("value", "(unclosed").unwrap_err();
        assert!(matches!(err, MaskError::InvalidRegex { ref regex, .. } if regex == "(unclosed"));
    }

    #[test]
    fn test_deterministic() {
        let first = mask_as("Rua Flamengo 745, RJ", MaskedType::Address);
        let second = mask_as("Rua Flamengo 745, RJ", MaskedType::Address);
        assert_eq!(first, second);
    }
}
