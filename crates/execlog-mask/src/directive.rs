//! Per-field mask directives

use std::borrow::Cow;

use fancy_regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{MaskError, MaskedType, Result, engine};

/// Masking metadata attached to a field.
///
/// A non-blank `custom_regex` always wins over `pattern`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskDirective {
    #[serde(default)]
    pub pattern: MaskedType,

    #[serde(default)]
    pub custom_regex: Option<Cow<'static, str>>,
}

impl MaskDirective {
    pub const fn new(pattern: MaskedType) -> Self {
        Self {
            pattern,
            custom_regex: None,
        }
    }

    pub fn with_regex(mut self, regex: impl Into<Cow<'static, str>>) -> Self {
        self.custom_regex = Some(regex.into());
        self
    }

    /// Build from loosely typed input (CLI flags, config entries)
    pub fn from_parts(pattern: Option<&str>, custom_regex: Option<String>) -> Result<Self> {
        let pattern = match pattern {
            Some(name) => name.parse()?,
            None => MaskedType::default(),
        };

        Ok(Self {
            pattern,
            custom_regex: custom_regex.map(Cow::Owned),
        })
    }

    fn custom(&self) -> Option<&str> {
        self.custom_regex
            .as_deref()
            .filter(|regex| !regex.trim().is_empty())
    }

    /// Regex that applies to this directive
    pub fn resolve_regex(&self) -> &str {
        self.custom().unwrap_or_else(|| self.pattern.regex())
    }

    /// Mask `value` with the resolved regex.
    ///
    /// Catalog patterns reuse their precompiled regex; custom ones are compiled
    /// per call.
    pub fn apply(&self, value: &str) -> Result<String> {
        match self.custom() {
            Some(regex) => {
                if value.trim().is_empty() {
                    return Ok(String::new());
                }
                let compiled = Regex::new(regex).map_err(|source| MaskError::InvalidRegex {
                    regex: regex.to_string(),
                    source: Box::new(source),
                })?;
                engine::mask_with(value, &compiled)
            }
            None => engine::mask_with(value, self.pattern.compiled()),
        }
    }
}

impl From<MaskedType> for MaskDirective {
    fn from(pattern: MaskedType) -> Self {
        Self::new(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_to_all() {
        assert_eq!(MaskDirective::default().resolve_regex(), MaskedType::All.regex());
    }

    #[test]
    fn test_pattern_regex() {
        let directive = MaskDirective::new(MaskedType::Document);
        assert_eq!(directive.resolve_regex(), MaskedType::Document.regex());
    }

    #[test]
    fn test_custom_regex_wins() {
        let directive = MaskDirective::new(MaskedType::Email).with_regex(r"\d");
        assert_eq!(directive.resolve_regex(), r"\d");
        assert_eq!(directive.apply("ab12").unwrap(), "ab**");
    }

    #[test]
    fn test_blank_custom_regex_falls_back() {
        let empty = MaskDirective::new(MaskedType::Number).with_regex("");
        let spaces = MaskDirective::new(MaskedType::Number).with_regex("   ");

        assert_eq!(empty.resolve_regex(), MaskedType::Number.regex());
        assert_eq!(spaces.resolve_regex(), MaskedType::Number.regex());
        assert_eq!(spaces.apply("a1b2").unwrap(), "a*b*");
    }

    #[test]
    fn test_apply_blank_value() {
        let directive = MaskDirective::default().with_regex("x");
        assert_eq!(directive.apply("  ").unwrap(), "");
        assert_eq!(MaskDirective::default().apply("").unwrap(), "");
    }

    #[test]
    fn test_invalid_custom_regex() {
        let directive = MaskDirective::default().with_regex("[");
        assert!(matches!(
            directive.apply("value"),
            Err(MaskError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_from_parts() {
        let directive = MaskDirective::from_parts(Some("zip_code"), None).unwrap();
        assert_eq!(directive.pattern, MaskedType::ZipCode);
        assert!(directive.custom_regex.is_none());

        let directive = MaskDirective::from_parts(None, Some("[0-9]".to_string())).unwrap();
        assert_eq!(directive.pattern, MaskedType::All);
        assert_eq!(directive.resolve_regex(), "[0-9]");
    }

    #[test]
    fn test_from_parts_unknown_pattern() {
        let err = MaskDirective::from_parts(Some("ssn"), None).unwrap_err();
        assert!(matches!(err, MaskError::UnknownPattern(_)));
    }

    #[test]
    fn test_deserialize() {
        let directive: MaskDirective =
            serde_json::from_str(r#"{"pattern":"TELEPHONE"}"#).unwrap();
        assert_eq!(directive, MaskDirective::new(MaskedType::Telephone));
    }
}
