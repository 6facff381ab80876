//! Global interception of HTTP handlers
//!
//! [`HttpLogLayer`] wraps a tower service (an axum `Router`, typically) and
//! logs every `GET`, `POST`, `PUT`, `PATCH` and `DELETE` request it serves.
//! Other methods pass through untouched.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{Method, Request, Response, StatusCode};
use execlog_config::{Config, HttpMethodConfig};
use execlog_mask::{LogValue, ValueKind};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::{CallSite, Interceptor, LogOptions, RecordSink, TracingSink};

/// Tower layer logging the requests handled by the wrapped service
#[derive(Debug, Clone)]
pub struct HttpLogLayer<S = TracingSink> {
    interceptor: Interceptor<S>,
    options: LogOptions,
    service_name: Arc<str>,
    enabled: bool,
}

impl HttpLogLayer {
    pub fn new(service_name: impl Into<Arc<str>>) -> Self {
        Self {
            interceptor: Interceptor::tracing(),
            options: LogOptions::default(),
            service_name: service_name.into(),
            enabled: true,
        }
    }

    pub fn from_config(config: &HttpMethodConfig) -> Self {
        Self::new(config.service_name.as_str())
            .options(LogOptions::from(config))
            .enabled(config.enabled)
    }

    /// Layer configured from the installed [`Config`]
    pub fn from_global() -> Self {
        Self::from_config(&Config::global().http_method)
    }
}

impl<S> HttpLogLayer<S> {
    pub fn with_sink<T: RecordSink>(self, sink: T) -> HttpLogLayer<T> {
        HttpLogLayer {
            interceptor: Interceptor::new(sink),
            options: self.options,
            service_name: self.service_name,
            enabled: self.enabled,
        }
    }

    pub fn options(mut self, options: LogOptions) -> Self {
        self.options = options;
        self
    }

    /// A disabled layer forwards every request without logging
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl<Svc, S: Clone> Layer<Svc> for HttpLogLayer<S> {
    type Service = HttpLog<Svc, S>;

    fn layer(&self, inner: Svc) -> Self::Service {
        HttpLog {
            inner,
            layer: self.clone(),
        }
    }
}

/// Service produced by [`HttpLogLayer`]
#[derive(Debug, Clone)]
pub struct HttpLog<Svc, S = TracingSink> {
    inner: Svc,
    layer: HttpLogLayer<S>,
}

impl<Svc, S, ReqBody, ResBody> Service<Request<ReqBody>> for HttpLog<Svc, S>
where
    Svc: Service<Request<ReqBody>, Response = Response<ResBody>>,
    Svc::Future: Send + 'static,
    S: RecordSink + Clone + 'static,
{
    type Response = Svc::Response;
    type Error = Svc::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        if !self.layer.enabled || !is_logged(request.method()) {
            return Box::pin(self.inner.call(request));
        }

        let site = CallSite::new(
            format!("{} {}", request.method(), request.uri().path()),
            &*self.layer.service_name,
        )
        .arg(&request.uri().to_string());
        let interceptor = self.layer.interceptor.clone();
        let options = self.layer.options;

        interceptor.enter(&site, options);
        let started = Instant::now();
        let response = self.inner.call(request);

        Box::pin(async move {
            let response = response.await?;
            interceptor.finish(
                &site,
                options,
                Some(&Status(response.status())),
                started.elapsed(),
            );
            Ok(response)
        })
    }
}

fn is_logged(method: &Method) -> bool {
    *method == Method::GET
        || *method == Method::POST
        || *method == Method::PUT
        || *method == Method::PATCH
        || *method == Method::DELETE
}

/// Response status as logged, e.g. `200 OK`
struct Status(StatusCode);

impl LogValue for Status {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn log_string(&self) -> execlog_mask::Result<String> {
        Ok(self.0.to_string())
    }
}
