//! Captured HTTP responses and typed read accessors.
//!
//! A [`Response`] is the transport's view of one completed exchange: status,
//! headers, content type, and the raw body bytes. The accessor methods are
//! read-only projections used by assertion steps; JSON access fails loudly
//! on a malformed body so "the response was not JSON" is never silently
//! conflated with "the field is absent".

use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by response accessors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The body could not be parsed as JSON.
    #[error("response body is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),
    /// A JSON field that must carry a string value did not.
    #[error("response field '{path}' is missing or not a string")]
    NotAString {
        /// Dotted path that was looked up.
        path: String,
    },
}

/// One HTTP response as captured from the transport.
#[derive(Clone, Debug, Default)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Response {
    /// Build a response from its parts.
    #[must_use]
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 { self.status }

    /// All response headers in arrival order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// Look up a header by name, ASCII case-insensitively.
    ///
    /// Absence is a legitimate, assertable outcome; steps verify both that
    /// headers are present and that they are not.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `Content-Type` header, if the server sent one.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> { self.header("Content-Type") }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes { &self.body }

    /// Body as trimmed text. Safe for any body; invalid UTF-8 is replaced.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_owned()
    }

    /// Parse the whole body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::NotJson`] when the body is not well-formed
    /// JSON. Callers that care whether the body was meant to be JSON check
    /// [`Response::content_type`] first.
    pub fn json(&self) -> Result<Value, ResponseError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Look up a JSON field by dotted path (`booking.firstname`).
    ///
    /// An empty path yields the whole document. `Ok(None)` means the body
    /// parsed but the field is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::NotJson`] when the body is not JSON at all.
    pub fn json_field(&self, path: &str) -> Result<Option<Value>, ResponseError> {
        let root = self.json()?;
        if path.is_empty() {
            return Ok(Some(root));
        }
        let mut current = &root;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current.clone()))
    }

    /// Read a JSON field that must exist and be representable as a string.
    ///
    /// Numbers and booleans are rendered with their JSON text, matching how
    /// stored ids and tokens are compared across steps.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::NotJson`] for a malformed body and
    /// [`ResponseError::NotAString`] when the field is absent or has no
    /// scalar representation.
    pub fn json_string(&self, path: &str) -> Result<String, ResponseError> {
        let value = self
            .json_field(path)?
            .ok_or_else(|| ResponseError::NotAString {
                path: path.to_owned(),
            })?;
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(ResponseError::NotAString {
                path: path.to_owned(),
            }),
        }
    }
}
