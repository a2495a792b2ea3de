//! Payload encoding for the supported wire formats.
//!
//! The codec turns the scenario's accumulated fields into a request body
//! matching the effective media type: form pairs, an XML document, or JSON
//! bytes. The JSON path is also the deliberate default for unrecognised
//! media types, so a scenario can claim `Content-Type: application/json`
//! while sending whatever bytes it likes; the header literal is never
//! second-guessed here.

use bytes::Bytes;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use thiserror::Error;

use crate::value::{FieldValue, Payload};

/// Encoding failures.
///
/// These propagate to the step boundary and fail the scenario; the codec
/// never substitutes a placeholder body for a payload it could not encode.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON serialization failed.
    #[error("failed to serialize payload as JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// XML writing failed.
    #[error("failed to serialize payload as XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// A request body ready for the transport.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// Raw bytes sent verbatim.
    Bytes(Bytes),
    /// Form pairs for `application/x-www-form-urlencoded` requests; the
    /// transport performs the percent-encoding.
    Form(Vec<(String, String)>),
    /// No body at all.
    Empty,
}

/// Encodes payload fields into wire-format bodies.
#[derive(Clone, Debug)]
pub struct PayloadCodec {
    xml_root: String,
}

impl Default for PayloadCodec {
    fn default() -> Self { Self::new("booking") }
}

impl PayloadCodec {
    /// Create a codec whose XML documents use `xml_root` as root element.
    #[must_use]
    pub fn new(xml_root: impl Into<String>) -> Self {
        Self {
            xml_root: xml_root.into(),
        }
    }

    /// Encode `payload` for the given media type (lowercase, without
    /// parameters).
    ///
    /// Form encoding takes only top-level pairs; XML nests maps as child
    /// elements under the fixed root; every other media type gets the
    /// payload as JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when serialization fails. The error reaches
    /// the step boundary and fails the scenario.
    pub fn encode(&self, payload: &Payload, media_type: &str) -> Result<RequestBody, CodecError> {
        match media_type {
            "application/x-www-form-urlencoded" => Ok(RequestBody::Form(
                payload
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_text()))
                    .collect(),
            )),
            "text/xml" | "application/xml" => {
                Ok(RequestBody::Bytes(self.encode_xml(payload)?.into()))
            }
            _ => Ok(RequestBody::Bytes(serde_json::to_vec(payload)?.into())),
        }
    }

    fn encode_xml(&self, payload: &Payload) -> Result<Vec<u8>, CodecError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, &self.xml_root, payload)?;
        Ok(writer.into_inner())
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    payload: &Payload,
) -> Result<(), CodecError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for (field, value) in payload {
        match value {
            FieldValue::Map(nested) => write_element(writer, field, nested)?,
            scalar => {
                writer.write_event(Event::Start(BytesStart::new(field.as_str())))?;
                writer.write_event(Event::Text(BytesText::new(&scalar.to_text())))?;
                writer.write_event(Event::End(BytesEnd::new(field.as_str())))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
