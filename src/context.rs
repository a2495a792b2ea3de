//! Per-scenario mutable state.
//!
//! A fresh [`ScenarioContext`] is constructed for every scenario and
//! discarded at its end; nothing leaks across scenario boundaries and no
//! reset hook is needed. Steps accumulate payload fields, headers, and
//! overrides here, the send step consumes them, and the latest response is
//! stored back for assertion steps to read.

use thiserror::Error;

use crate::{
    response::Response,
    value::{FieldValue, Payload},
};

/// Default request content type when no step overrides it.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Errors for scenario-scoped data bookkeeping.
#[derive(Debug, Error)]
pub enum ContextError {
    /// A step tried to remember a value that was not actually present.
    #[error("cannot store scenario data '{0}': value is missing")]
    StoreMissing(String),
    /// A step read back a key that no earlier step stored.
    #[error("scenario data '{0}' was never stored")]
    NeverStored(String),
    /// An accessor ran before any request was sent.
    #[error("no response has been received yet")]
    NoResponse,
}

/// Mutable state owned by one running scenario.
#[derive(Debug, Default)]
pub struct ScenarioContext {
    payload: Payload,
    raw_body: Option<String>,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
    data: Vec<(String, String)>,
    response: Option<Response>,
}

impl ScenarioContext {
    /// Create an empty context for a new scenario.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Upsert one payload field. `None` (a resolved `<missing>` sentinel)
    /// removes the field, including a value set by an earlier step.
    pub fn set_field(&mut self, name: &str, value: Option<FieldValue>) {
        match value {
            Some(value) => {
                self.payload.insert(name.to_owned(), value);
            }
            None => {
                self.payload.shift_remove(name);
            }
        }
    }

    /// Replace the whole payload, e.g. with a structured booking entity.
    pub fn replace_payload(&mut self, payload: Payload) { self.payload = payload; }

    /// Deep-override one field by dotted path (`bookingdates.checkin`).
    ///
    /// Intermediate maps are created as needed; an intermediate that holds
    /// a scalar is replaced by a fresh map so later structured overrides
    /// always win over earlier flat fields.
    pub fn set_path(&mut self, path: &str, value: FieldValue) {
        let mut segments = path.split('.').peekable();
        let mut current = &mut self.payload;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current.insert(segment.to_owned(), value);
                return;
            }
            let entry = current
                .entry(segment.to_owned())
                .or_insert_with(|| FieldValue::Map(Payload::new()));
            if !matches!(entry, FieldValue::Map(_)) {
                *entry = FieldValue::Map(Payload::new());
            }
            let FieldValue::Map(next) = entry else {
                unreachable!("entry was just coerced to a map");
            };
            current = next;
        }
    }

    /// The accumulated payload fields.
    #[must_use]
    pub fn payload(&self) -> &Payload { &self.payload }

    /// Set the raw request body, bypassing payload encoding on raw sends.
    pub fn set_raw_body(&mut self, body: impl Into<String>) { self.raw_body = Some(body.into()); }

    /// The raw body override, if a step set one.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> { self.raw_body.as_deref() }

    /// Override the outgoing Content-Type header, parameters included.
    pub fn set_content_type(&mut self, value: impl Into<String>) {
        self.content_type = Some(value.into());
    }

    /// The full Content-Type to send: the override if set, else `default`.
    #[must_use]
    pub fn content_type_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.content_type.as_deref().unwrap_or(default)
    }

    /// The media type used for codec dispatch: the part before any `;`,
    /// trimmed and lowercased. The full value still goes out as the
    /// literal header.
    #[must_use]
    pub fn media_type(&self, default: &str) -> String {
        self.content_type_or(default)
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase()
    }

    /// Add one extra request header. Keys are sent exactly as given; no
    /// normalization, later duplicates are sent in addition.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Extra request headers in the order steps added them.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// Remember a scenario-scoped value (token, booking id) for a later
    /// comparison step.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::StoreMissing`] when `value` is `None`;
    /// storing an absent token is always a test defect worth failing fast
    /// on.
    pub fn remember(&mut self, key: &str, value: Option<String>) -> Result<(), ContextError> {
        let value = value.ok_or_else(|| ContextError::StoreMissing(key.to_owned()))?;
        if let Some(slot) = self.data.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.data.push((key.to_owned(), value));
        }
        Ok(())
    }

    /// Read back a remembered value.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NeverStored`] naming the key when no
    /// earlier step stored it.
    pub fn recall(&self, key: &str) -> Result<&str, ContextError> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| ContextError::NeverStored(key.to_owned()))
    }

    /// Store the response of the latest send, discarding any previous one.
    pub fn set_response(&mut self, response: Response) { self.response = Some(response); }

    /// The latest response.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NoResponse`] before the first send.
    pub fn response(&self) -> Result<&Response, ContextError> {
        self.response.as_ref().ok_or(ContextError::NoResponse)
    }
}
