//! Field-level masking for execution logs
//!
//! This crate contains:
//! - The masking pattern catalog ([`MaskedType`])
//! - The redaction engine ([`mask`], [`mask_with`])
//! - Per-field directives and the eligibility rules for masking
//! - `TypeName{field=value}` rendering of masked objects ([`LogMask`])

// Lets `#[derive(LogMask)]` expand inside this crate's own tests.
extern crate self as execlog_mask;

pub mod directive;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod render;
pub mod value;

pub use directive::MaskDirective;
pub use engine::{MASK_CHAR, mask, mask_with};
pub use error::{MaskError, Result};
pub use pattern::MaskedType;
pub use render::{FieldEntry, LogMask, Masked, render};
pub use value::{Json, LogValue, MASKABLE_KINDS, ValueKind, is_maskable};

#[cfg(feature = "derive")]
pub use execlog_macros::LogMask;
