//! Built-in masking pattern catalog

use std::fmt;
use std::str::FromStr;

use fancy_regex::Regex;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::MaskError;

/// Named masking strategy, each bound to one fixed regex.
///
/// Every match of the regex is replaced by a single mask character, so the
/// lookahead-based patterns keep the tail (or the separators) of a value
/// readable while hiding the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaskedType {
    /// Every character except ASCII whitespace.
    #[default]
    All,
    Email,
    /// Everything except the last three characters.
    Document,
    Name,
    Date,
    Address,
    ZipCode,
    /// Every ASCII digit.
    Number,
    Telephone,
}

lazy_static! {
    // Same order as `MaskedType::VARIANTS`
    static ref CATALOG: Vec<Regex> = MaskedType::VARIANTS
        .iter()
        .map(|masked_type| Regex::new(masked_type.regex()).unwrap())
        .collect();
}

impl MaskedType {
    pub const VARIANTS: [MaskedType; 9] = [
        MaskedType::All,
        MaskedType::Email,
        MaskedType::Document,
        MaskedType::Name,
        MaskedType::Date,
        MaskedType::Address,
        MaskedType::ZipCode,
        MaskedType::Number,
        MaskedType::Telephone,
    ];

    /// Regex source bound to this pattern.
    ///
    /// Whitespace and digit classes are spelled out as ASCII sets since `\s`
    /// and `\d` are Unicode-aware here.
    pub const fn regex(self) -> &'static str {
        match self {
            MaskedType::All => r"[^ \t\n\x0B\f\r]",
            MaskedType::Email => r".(?=.{4})(?=[^@])(?=[^@]{4}).",
            MaskedType::Document => r".(?=.{3})",
            MaskedType::Name => r".(?=[^ ])(?=[^ ]{2}).",
            MaskedType::Date => r".(?=[^ \\/.-].{3}).",
            MaskedType::Address => r".(?=.{3})[^, ]",
            MaskedType::ZipCode => r".(?=.{3})[^-]",
            MaskedType::Number => r"[0-9]",
            MaskedType::Telephone => r".(?=.{2})[^-]",
        }
    }

    /// Compiled regex, shared process-wide
    pub fn compiled(self) -> &'static Regex {
        &CATALOG[self as usize]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MaskedType::All => "ALL",
            MaskedType::Email => "EMAIL",
            MaskedType::Document => "DOCUMENT",
            MaskedType::Name => "NAME",
            MaskedType::Date => "DATE",
            MaskedType::Address => "ADDRESS",
            MaskedType::ZipCode => "ZIP_CODE",
            MaskedType::Number => "NUMBER",
            MaskedType::Telephone => "TELEPHONE",
        }
    }
}

impl fmt::Display for MaskedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaskedType {
    type Err = MaskError;

    /// Case-insensitive; `zip_code`, `zip-code` and `zipcode` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        MaskedType::VARIANTS
            .into_iter()
            .find(|masked_type| masked_type.as_str().replace('_', "") == normalized)
            .ok_or_else(|| MaskError::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_compiles() {
        for masked_type in MaskedType::VARIANTS {
            assert_eq!(masked_type.compiled().as_str(), masked_type.regex());
        }
    }

    #[test]
    fn test_default_is_all() {
        assert_eq!(MaskedType::default(), MaskedType::All);
        assert_eq!(MaskedType::default().regex(), MaskedType::All.regex());
    }

    #[test]
    fn test_classes_are_ascii_only() {
        // U+00A0 is not ASCII whitespace, so it is masked
        let masked = crate::mask("a\u{a0}b c", MaskedType::All.regex()).unwrap();
        assert_eq!(masked, "*** *");

        let masked = crate::mask("tab\there", MaskedType::All.regex()).unwrap();
        assert_eq!(masked, "***\t****");

        // Arabic-Indic digits are left alone
        let masked = crate::mask("\u{661}\u{662}3", MaskedType::Number.regex()).unwrap();
        assert_eq!(masked, "\u{661}\u{662}*");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("email".parse::<MaskedType>().unwrap(), MaskedType::Email);
        assert_eq!("ZIP_CODE".parse::<MaskedType>().unwrap(), MaskedType::ZipCode);
        assert_eq!("zip-code".parse::<MaskedType>().unwrap(), MaskedType::ZipCode);
        assert_eq!(" Telephone ".parse::<MaskedType>().unwrap(), MaskedType::Telephone);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "passport".parse::<MaskedType>().unwrap_err();
        assert!(matches!(err, MaskError::UnknownPattern(ref name) if name == "passport"));
    }

    #[test]
    fn test_display_round_trips() {
        for masked_type in MaskedType::VARIANTS {
            let parsed: MaskedType = masked_type.to_string().parse().unwrap();
            assert_eq!(parsed, masked_type);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&MaskedType::ZipCode).unwrap();
        assert_eq!(json, "\"ZIP_CODE\"");
    }
}
