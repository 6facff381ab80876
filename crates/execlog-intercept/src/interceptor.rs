//! Timing wrapper around intercepted calls
//!
//! Every call produces an `init` record before it runs and a `finish` record
//! after it returns. A call that fails (an `Err` from the `try_` variants, or a
//! panic) propagates unchanged and leaves no `finish` record.

use std::future::Future;
use std::time::{Duration, Instant};

use execlog_mask::LogValue;

use crate::site::render_for_log;
use crate::{CallSite, InterceptionRecord, LogOptions, RecordSink, Stage, TracingSink};

/// Wraps calls with init/finish records sent to `S`
#[derive(Debug, Clone, Default)]
pub struct Interceptor<S = TracingSink> {
    sink: S,
}

impl Interceptor {
    pub fn tracing() -> Self {
        Self::default()
    }
}

impl<S: RecordSink> Interceptor<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emit the `init` record of `site`
    pub fn enter(&self, site: &CallSite, options: LogOptions) {
        self.sink.emit(&InterceptionRecord {
            stage: Stage::Init,
            method: site.method().to_string(),
            class: site.class().to_string(),
            parameters: options.log_parameters.then(|| site.parameters()),
            result: None,
            elapsed_ms: None,
        });
    }

    /// Emit the `finish` record of `site`.
    ///
    /// `result` is only rendered when the options ask for it.
    pub fn finish(
        &self,
        site: &CallSite,
        options: LogOptions,
        result: Option<&dyn LogValue>,
        elapsed: Duration,
    ) {
        let result = if options.log_return {
            result.map(render_for_log)
        } else {
            None
        };

        self.sink.emit(&InterceptionRecord {
            stage: Stage::Finish,
            method: site.method().to_string(),
            class: site.class().to_string(),
            parameters: options.log_parameters.then(|| site.parameters()),
            result,
            elapsed_ms: Some(elapsed_millis(elapsed)),
        });
    }

    /// Run `call` once between an init and a finish record
    pub fn intercept<T, F>(&self, site: &CallSite, options: LogOptions, call: F) -> T
    where
        T: LogValue,
        F: FnOnce() -> T,
    {
        self.enter(site, options);
        let started = Instant::now();
        let result = call();
        self.finish(site, options, Some(&result), started.elapsed());
        result
    }

    /// [`Interceptor::intercept`] with parameters and return value logged
    pub fn log_execution<T, F>(&self, site: &CallSite, call: F) -> T
    where
        T: LogValue,
        F: FnOnce() -> T,
    {
        self.intercept(site, LogOptions::default(), call)
    }

    /// Like [`Interceptor::intercept`], for fallible calls.
    ///
    /// An `Err` is returned untouched and no finish record is written.
    pub fn try_intercept<T, E, F>(
        &self,
        site: &CallSite,
        options: LogOptions,
        call: F,
    ) -> Result<T, E>
    where
        T: LogValue,
        F: FnOnce() -> Result<T, E>,
    {
        self.enter(site, options);
        let started = Instant::now();
        let value = call()?;
        self.finish(site, options, Some(&value), started.elapsed());
        Ok(value)
    }

    pub async fn intercept_async<T, Fut>(
        &self,
        site: &CallSite,
        options: LogOptions,
        call: Fut,
    ) -> T
    where
        T: LogValue,
        Fut: Future<Output = T>,
    {
        self.enter(site, options);
        let started = Instant::now();
        let result = call.await;
        self.finish(site, options, Some(&result), started.elapsed());
        result
    }

    pub async fn try_intercept_async<T, E, Fut>(
        &self,
        site: &CallSite,
        options: LogOptions,
        call: Fut,
    ) -> Result<T, E>
    where
        T: LogValue,
        Fut: Future<Output = Result<T, E>>,
    {
        self.enter(site, options);
        let started = Instant::now();
        let value = call.await?;
        self.finish(site, options, Some(&value), started.elapsed());
        Ok(value)
    }
}

/// Intercept `call` with records written to `tracing`
pub fn intercept<T, F>(site: &CallSite, options: LogOptions, call: F) -> T
where
    T: LogValue,
    F: FnOnce() -> T,
{
    Interceptor::tracing().intercept(site, options, call)
}

/// Fallible form of [`intercept`]
pub fn try_intercept<T, E, F>(site: &CallSite, options: LogOptions, call: F) -> Result<T, E>
where
    T: LogValue,
    F: FnOnce() -> Result<T, E>,
{
    Interceptor::tracing().try_intercept(site, options, call)
}

fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
