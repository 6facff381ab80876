//! Call-site metadata and per-site options

use execlog_config::HttpMethodConfig;
use execlog_mask::LogValue;
use tracing::warn;

/// What to include in the records of a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    pub log_return: bool,
    pub log_parameters: bool,
}

impl LogOptions {
    pub const fn new(log_return: bool, log_parameters: bool) -> Self {
        Self {
            log_return,
            log_parameters,
        }
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl From<&HttpMethodConfig> for LogOptions {
    fn from(config: &HttpMethodConfig) -> Self {
        Self::new(config.log_return, config.log_parameters)
    }
}

/// An intercepted call: method name, declaring type and arguments.
///
/// Arguments are rendered when added, so the call itself is free to consume
/// them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    method: String,
    class: String,
    arguments: Vec<String>,
}

impl CallSite {
    pub fn new(method: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            class: class.into(),
            arguments: Vec::new(),
        }
    }

    pub fn arg<V: LogValue + ?Sized>(mut self, value: &V) -> Self {
        self.arguments.push(render_for_log(value));
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Argument list as logged, e.g. `[5, abc]`
    pub fn parameters(&self) -> String {
        format!("[{}]", self.arguments.join(", "))
    }
}

/// String form of a value for a log record.
///
/// A value that cannot be rendered must not change the outcome of the call it
/// belongs to, so the failure is logged and replaced by a placeholder.
pub fn render_for_log<V: LogValue + ?Sized>(value: &V) -> String {
    match value.log_string() {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!(target: "execlog", error = %e, "Value could not be rendered for logging");
            format!("<unrenderable: {}>", e)
        }
    }
}

/// Simple name of `T`: last path segment, generic arguments dropped
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(index) => &base[index + 2..],
        None => base,
    }
}

/// Last `::` segment of a module path, used as the class of free functions
pub fn last_segment(path: &'static str) -> &'static str {
    path.rsplit("::").next().unwrap_or(path)
}
