//! Send orchestration: from accumulated scenario state to a stored
//! response.
//!
//! A "send" step resolves the target URL against the configured base,
//! fixes the effective content type, encodes the payload (or takes the
//! raw body verbatim), performs the exchange, and stores the response
//! back into the scenario context. Encoding and configuration failures
//! propagate to the step boundary where they fail the scenario.

use crate::{
    codec::{PayloadCodec, RequestBody},
    config::Config,
    context::{DEFAULT_CONTENT_TYPE, ScenarioContext},
    error::HarnessError,
    transport::{RequestParts, Transport},
};

/// Executes send steps for one test run.
///
/// The client is scenario-agnostic: all per-scenario state lives in the
/// [`ScenarioContext`] passed to each call, so one client instance can
/// serve many scenarios in sequence or in parallel.
#[derive(Debug)]
pub struct ScenarioClient<T> {
    config: Config,
    transport: T,
    codec: PayloadCodec,
}

impl<T: Transport> ScenarioClient<T> {
    /// Create a client with the default codec (XML root `booking`).
    #[must_use]
    pub fn new(config: Config, transport: T) -> Self {
        Self::with_codec(config, transport, PayloadCodec::default())
    }

    /// Create a client with an explicit codec.
    #[must_use]
    pub fn with_codec(config: Config, transport: T, codec: PayloadCodec) -> Self {
        Self {
            config,
            transport,
            codec,
        }
    }

    /// The run configuration.
    #[must_use]
    pub fn config(&self) -> &Config { &self.config }

    /// Encode the accumulated payload and send it to `endpoint`.
    ///
    /// The full content-type override (parameters included) is sent as
    /// the literal header while only its media type selects the codec
    /// path. The response replaces any earlier one in the context.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the base URL is not configured, the
    /// payload cannot be encoded, or the exchange fails.
    pub async fn send_payload(
        &self,
        ctx: &mut ScenarioContext,
        method: &str,
        endpoint: &str,
    ) -> Result<(), HarnessError> {
        let media_type = ctx.media_type(DEFAULT_CONTENT_TYPE);
        let body = self.codec.encode(ctx.payload(), &media_type)?;
        self.execute(ctx, method, endpoint, body).await
    }

    /// Send the raw body byte-for-byte, bypassing the codec entirely.
    ///
    /// With no raw body set the request goes out empty. The declared
    /// content type is still sent verbatim, whatever the bytes contain.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the base URL is not configured or
    /// the exchange fails.
    pub async fn send_raw(
        &self,
        ctx: &mut ScenarioContext,
        method: &str,
        endpoint: &str,
    ) -> Result<(), HarnessError> {
        let body = match ctx.raw_body() {
            Some(raw) => RequestBody::Bytes(raw.as_bytes().to_vec().into()),
            None => RequestBody::Empty,
        };
        self.execute(ctx, method, endpoint, body).await
    }

    async fn execute(
        &self,
        ctx: &mut ScenarioContext,
        method: &str,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<(), HarnessError> {
        let url = format!("{}{endpoint}", self.config.base_url()?);
        let mut headers = ctx.headers().to_vec();
        headers.push((
            "Content-Type".to_owned(),
            ctx.content_type_or(DEFAULT_CONTENT_TYPE).to_owned(),
        ));

        tracing::debug!(target: "httpsteps::client", method, url = %url, "dispatching request");
        let request = RequestParts {
            method: method.to_owned(),
            url,
            headers,
            body,
        };
        let response = self.transport.send(request).await?;
        ctx.set_response(response);
        Ok(())
    }
}
