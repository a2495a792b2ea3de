//! The narrow seam between the harness and an HTTP client.
//!
//! Everything the harness needs from a transport is "send request, get
//! status + headers + body". [`HttpTransport`] is the reqwest-backed
//! implementation; [`LoggingTransport`] decorates any transport with
//! request/response tracing. No retries, no redirect policy, no timeouts
//! are imposed here; whatever the underlying client does by default is
//! what a scenario gets.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    codec::RequestBody,
    response::Response,
    trace::Trace,
};

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The method text was not a valid HTTP method.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    /// The underlying HTTP client failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One outgoing request, fully resolved.
#[derive(Clone, Debug)]
pub struct RequestParts {
    /// HTTP method, as written in the step text.
    pub method: String,
    /// Absolute URL.
    pub url: String,
    /// Header names and values, sent exactly as given.
    pub headers: Vec<(String, String)>,
    /// Encoded body.
    pub body: RequestBody,
}

/// Sends a request and returns the captured response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one exchange. This is the single blocking operation of a
    /// scenario; there is no cancellation once a send is issued.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request cannot be built or
    /// the exchange fails below the HTTP layer.
    async fn send(&self, request: RequestParts) -> Result<Response, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create a transport around a preconfigured client, e.g. one with a
    /// custom timeout.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self { Self { client } }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestParts) -> Result<Response, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.clone()))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            RequestBody::Bytes(bytes) => builder.body(bytes),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Empty => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?;
        Ok(Response::new(status, headers, body))
    }
}

/// Decorator observing each exchange without altering it.
#[derive(Clone, Debug)]
pub struct LoggingTransport<T> {
    inner: T,
    trace: Trace,
}

/// Wrap `transport` so every request and response is recorded in `trace`.
pub fn with_logging<T: Transport>(transport: T, trace: Trace) -> LoggingTransport<T> {
    LoggingTransport {
        inner: transport,
        trace,
    }
}

#[async_trait]
impl<T: Transport> Transport for LoggingTransport<T> {
    async fn send(&self, request: RequestParts) -> Result<Response, TransportError> {
        self.trace.log_request(&request);
        let response = self.inner.send(request).await?;
        self.trace.log_response(&response);
        Ok(response)
    }
}
