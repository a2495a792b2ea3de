#![doc(html_root_url = "https://docs.rs/httpsteps/latest")]
//! Public API for the `httpsteps` library.
//!
//! This crate provides the core of a scenario-driven HTTP test harness:
//! parsing step arguments into typed payload values, accumulating
//! per-scenario request state, encoding payloads as JSON, XML, or form
//! data, sending them through a narrow transport seam, and exposing the
//! captured response for assertions. Step matching, test reporting, and
//! the HTTP stack itself stay outside; the harness composes them through
//! [`Transport`] and a plain [`Config`] object.

pub mod client;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod response;
pub mod trace;
pub mod transport;
pub mod value;

pub use client::ScenarioClient;
pub use codec::{CodecError, PayloadCodec, RequestBody};
pub use config::{Config, ConfigError};
pub use context::{ContextError, DEFAULT_CONTENT_TYPE, ScenarioContext};
pub use error::HarnessError;
pub use response::{Response, ResponseError};
pub use trace::{Trace, escape_xml, render_request, render_response};
pub use transport::{
    HttpTransport,
    LoggingTransport,
    RequestParts,
    Transport,
    TransportError,
    with_logging,
};
pub use value::{FieldValue, ParsedValue, Payload, parse_value, repeated_string};
