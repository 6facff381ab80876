//! Execution logging for method calls
//!
//! This crate contains:
//! - Interception of calls with init/finish records ([`Interceptor`])
//! - Call-site metadata and per-site options ([`CallSite`], [`LogOptions`])
//! - Record destinations ([`TracingSink`], [`MemorySink`])
//! - Global logging of HTTP handlers ([`HttpLogLayer`])
//! - The `#[log_execution]` attribute for annotating functions

// Lets `#[log_execution]` expand inside this crate's own tests.
extern crate self as execlog_intercept;

pub mod http;
pub mod interceptor;
pub mod record;
pub mod site;
pub mod sink;

pub use http::{HttpLog, HttpLogLayer};
pub use interceptor::{Interceptor, intercept, try_intercept};
pub use record::{InterceptionRecord, Stage};
pub use site::{CallSite, LogOptions, render_for_log, short_type_name};
pub use sink::{MemorySink, RecordSink, TracingSink};

pub use execlog_macros::log_execution;
pub use execlog_mask::{LogMask, LogValue, Masked};

/// Masking crate, for `#[derive(LogMask)]` with
/// `#[mask(crate = "execlog_intercept::mask")]` when `execlog-mask` is not a
/// direct dependency
pub use execlog_mask as mask;
