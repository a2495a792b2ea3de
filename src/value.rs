//! Typed payload values and the step-argument parser.
//!
//! Feature files carry every argument as text. [`parse_value`] turns that
//! text into a [`ParsedValue`]: either a sentinel (`<missing>`, `<valid>`)
//! or a typed literal. Payload fields themselves are held as the closed
//! [`FieldValue`] variant so each wire format can match on the value shape
//! exhaustively instead of inspecting types at runtime.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{Config, ConfigError};

/// Ordered field-name to value mapping forming a request payload.
///
/// Insertion order is not semantically significant, but keeping it stable
/// makes serialized bodies and trace output deterministic.
pub type Payload = IndexMap<String, FieldValue>;

/// A single payload field value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Plain text.
    Str(String),
    /// Boolean literal (`true`/`false` in step text).
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating-point literal (step text contained a `.`).
    Float(f64),
    /// Nested object, e.g. `bookingdates` inside a booking.
    Map(Payload),
}

impl FieldValue {
    /// Render the value as plain text, as it appears in a form-encoded
    /// pair or an XML text node.
    ///
    /// Nested maps are rendered as their JSON text; form encoding has no
    /// nesting support and a server receiving one will reject it downstream.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Map(map) => {
                serde_json::to_string(map).unwrap_or_else(|_| String::from("{}"))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self { FieldValue::Str(s.to_owned()) }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self { FieldValue::Str(s) }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self { FieldValue::Bool(b) }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self { FieldValue::Int(i) }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self { FieldValue::Float(f) }
}

/// Outcome of parsing one raw step argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedValue {
    /// `<missing>`: the field must be omitted from the payload entirely.
    Absent,
    /// `<valid>`: the field takes its configured canonical value.
    Lookup(String),
    /// A typed literal taken from the step text.
    Literal(FieldValue),
}

impl ParsedValue {
    /// Resolve the parsed value against the scenario configuration.
    ///
    /// `Absent` resolves to `None` (omit the field), `Lookup` reads the
    /// canonical value for the field name from `config`, and `Literal`
    /// passes through.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when a `<valid>` sentinel refers
    /// to a field with no configured canonical value.
    pub fn resolve(self, config: &Config) -> Result<Option<FieldValue>, ConfigError> {
        match self {
            ParsedValue::Absent => Ok(None),
            ParsedValue::Lookup(field) => {
                Ok(Some(FieldValue::Str(config.resolve(&field)?.to_owned())))
            }
            ParsedValue::Literal(value) => Ok(Some(value)),
        }
    }
}

/// Parse a raw step argument into a [`ParsedValue`].
///
/// Resolution order, first match wins:
/// 1. `<missing>` (case-insensitive) — omit the field.
/// 2. `<valid>` (case-insensitive) — look up the canonical value for
///    `field`.
/// 3. A double-quoted string is unquoted and never coerced further.
/// 4. `true`/`false` (case-insensitive) become booleans.
/// 5. Numeric text becomes a float when it contains a `.`, an integer
///    otherwise; malformed numbers such as `1.2.3` fall through.
/// 6. Anything else is the verbatim string.
#[must_use]
pub fn parse_value(raw: &str, field: &str) -> ParsedValue {
    if raw.eq_ignore_ascii_case("<missing>") {
        return ParsedValue::Absent;
    }
    if raw.eq_ignore_ascii_case("<valid>") {
        return ParsedValue::Lookup(field.to_owned());
    }

    // A quoted argument forces string semantics; `""` is the empty string.
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return ParsedValue::Literal(FieldValue::Str(raw[1..raw.len() - 1].to_owned()));
    }

    if raw.eq_ignore_ascii_case("true") {
        return ParsedValue::Literal(FieldValue::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return ParsedValue::Literal(FieldValue::Bool(false));
    }

    if raw.contains('.') {
        if let Ok(f) = raw.parse::<f64>() {
            return ParsedValue::Literal(FieldValue::Float(f));
        }
    } else if let Ok(i) = raw.parse::<i64>() {
        return ParsedValue::Literal(FieldValue::Int(i));
    }

    ParsedValue::Literal(FieldValue::Str(raw.to_owned()))
}

/// Generate a string of `len` repeated `A` characters.
///
/// Used by steps that build deliberately oversized field values.
#[must_use]
pub fn repeated_string(len: usize) -> String { "A".repeat(len) }
