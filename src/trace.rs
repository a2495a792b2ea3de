//! Human-readable request/response tracing.
//!
//! Every exchange is captured as two text records: the outgoing request
//! before transmission and the response after it, regardless of content
//! type. The records feed the scenario report; they are also mirrored as
//! `tracing` debug events. Tracing never alters the exchange and never
//! fails on an absent body or header set.

use std::sync::{Arc, Mutex};

use crate::{
    codec::RequestBody,
    response::Response,
    transport::RequestParts,
};

/// Shared handle onto a scenario's trace records.
///
/// Cloning is cheap; the transport decorator and the step layer hold the
/// same underlying record list.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    records: Arc<Mutex<Vec<String>>>,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Append one record and emit it as a debug event.
    pub fn log(&self, record: impl Into<String>) {
        let record = record.into();
        tracing::debug!(target: "httpsteps::trace", "{record}");
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    /// Snapshot of all records so far, in order.
    #[must_use]
    pub fn records(&self) -> Vec<String> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Record an outgoing request.
    pub fn log_request(&self, request: &RequestParts) {
        self.log(render_request(request));
    }

    /// Record a completed response.
    pub fn log_response(&self, response: &Response) {
        self.log(render_response(response));
    }
}

/// Render the request record: method, URL, headers, and the body decoded
/// to text and XML-escaped so it embeds safely in a report.
#[must_use]
pub fn render_request(request: &RequestParts) -> String {
    let mut out = String::new();
    out.push_str("[REQUEST]\n");
    out.push_str(&format!("{} {}\n", request.method, request.url));
    out.push_str("Headers:\n");
    for (name, value) in &request.headers {
        out.push_str(&format!("  {name}: {value}\n"));
    }
    match &request.body {
        RequestBody::Bytes(bytes) if !bytes.is_empty() => {
            let text = String::from_utf8_lossy(bytes);
            out.push_str("Body:\n");
            out.push_str(&escape_xml(&text));
        }
        RequestBody::Form(pairs) => {
            out.push_str("Form:\n");
            for (name, value) in pairs {
                out.push_str(&format!("  {name}={}\n", escape_xml(value)));
            }
        }
        RequestBody::Bytes(_) | RequestBody::Empty => {}
    }
    out
}

/// Render the response record: status, headers, and the body
/// pretty-printed when the content type indicates JSON, raw otherwise.
#[must_use]
pub fn render_response(response: &Response) -> String {
    let mut out = String::new();
    out.push_str("[RESPONSE]\n");
    out.push_str(&format!("Status: {}\n", response.status()));
    out.push_str("Headers:\n");
    for (name, value) in response.headers() {
        out.push_str(&format!("  {name}: {value}\n"));
    }
    let body = response.body_text();
    if !body.is_empty() {
        out.push_str("Body:\n");
        let is_json = response
            .content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
        if is_json {
            match response.json() {
                Ok(value) => out.push_str(
                    &serde_json::to_string_pretty(&value).unwrap_or(body),
                ),
                Err(_) => out.push_str(&escape_xml(&body)),
            }
        } else {
            out.push_str(&escape_xml(&body));
        }
    }
    out
}

/// Escape `&`, `<`, `>`, and `"` for safe embedding in an XML report.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
