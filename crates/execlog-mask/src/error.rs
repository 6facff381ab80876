//! Error types for execlog-mask

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MaskError>;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Invalid mask regex `{regex}`: {source}")]
    InvalidRegex {
        regex: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("Regex `{regex}` failed while matching: {source}")]
    Matching {
        regex: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("Unknown masking pattern: {0}")]
    UnknownPattern(String),

    #[error("Failed to read field `{field}` of `{type_name}`: {source}")]
    FieldRead {
        type_name: &'static str,
        field: &'static str,
        #[source]
        source: Box<MaskError>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] time::error::Format),
}
