//! Steps that build and send requests, plus inspection of what went out
//! on the wire.

use cucumber::{gherkin::Step, given, then, when};
use httpsteps::{FieldValue, RequestBody, parse_value, repeated_string};

use crate::world::{HarnessWorld, StepResult};

#[given(expr = "the request body contains a {int}KB string for the {word} field")]
fn oversized_field(world: &mut HarnessWorld, size_kb: usize, field: String) {
    let data = repeated_string(size_kb * 1024);
    world.ctx.set_field(&field, Some(FieldValue::Str(data)));
}

#[given(expr = "I set field {word} to {word}")]
fn set_field(world: &mut HarnessWorld, field: String, raw: String) -> StepResult {
    let value = parse_value(&raw, &field).resolve(world.client.config())?;
    world.ctx.set_field(&field, value);
    Ok(())
}

#[given(expr = "I override field {word} with {string}")]
fn override_field(world: &mut HarnessWorld, field: String, value: String) {
    world.ctx.set_field(&field, Some(FieldValue::Str(value)));
}

#[given("the request body is set to:")]
fn raw_body(world: &mut HarnessWorld, step: &Step) {
    let body = step.docstring.as_deref().unwrap_or_default().trim();
    world.ctx.set_raw_body(body);
}

#[given(expr = "the request Content-Type is set to {string}")]
fn content_type(world: &mut HarnessWorld, mime: String) {
    world.ctx.set_content_type(mime);
}

#[given(expr = "the request header {string} is set to {string}")]
fn extra_header(world: &mut HarnessWorld, name: String, value: String) {
    world.ctx.set_header(name, value);
}

#[when(expr = "I {word} payload to {string}")]
async fn send_payload(world: &mut HarnessWorld, method: String, endpoint: String) -> StepResult {
    world.flush_stub();
    world.client.send_payload(&mut world.ctx, &method, &endpoint).await?;
    Ok(())
}

#[when(expr = "I {word} raw to {string}")]
async fn send_raw(world: &mut HarnessWorld, method: String, endpoint: String) -> StepResult {
    world.flush_stub();
    world.client.send_raw(&mut world.ctx, &method, &endpoint).await?;
    Ok(())
}

#[then(expr = "the request field {word} should be {string}")]
fn request_field_is(world: &mut HarnessWorld, path: String, expected: String) {
    let body = world.last_request_json();
    let mut current = &body;
    for segment in path.split('.') {
        current = current
            .get(segment)
            .unwrap_or_else(|| panic!("request body has no field '{path}': {body}"));
    }
    let actual = match current {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    assert_eq!(actual, expected, "request field '{path}' mismatch");
}

#[then(expr = "the request field {word} should have length {int}")]
fn request_field_length(world: &mut HarnessWorld, path: String, expected: usize) {
    let body = world.last_request_json();
    let value = body
        .get(&path)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_else(|| panic!("request body has no string field '{path}'"));
    assert_eq!(value.len(), expected, "length of request field '{path}'");
}

#[then(expr = "the request body should not contain field {word}")]
fn request_field_absent(world: &mut HarnessWorld, field: String) {
    let body = world.last_request_json();
    assert!(
        body.get(&field).is_none(),
        "field '{field}' should have been omitted, body was {body}"
    );
}

#[then(expr = "the request body should contain {string}")]
fn request_body_contains(world: &mut HarnessWorld, needle: String) {
    let request = world.mock.last_request();
    let RequestBody::Bytes(bytes) = &request.body else {
        panic!("last request did not carry a byte body: {:?}", request.body);
    };
    let text = String::from_utf8_lossy(bytes);
    assert!(
        text.contains(&needle),
        "request body did not contain '{needle}': {text}"
    );
}

#[then(expr = "the request form field {word} should be {string}")]
fn request_form_field(world: &mut HarnessWorld, field: String, expected: String) {
    let request = world.mock.last_request();
    let RequestBody::Form(pairs) = &request.body else {
        panic!("last request was not form-encoded: {:?}", request.body);
    };
    let actual = pairs
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, value)| value.as_str())
        .unwrap_or_else(|| panic!("form body has no field '{field}': {pairs:?}"));
    assert_eq!(actual, expected, "form field '{field}' mismatch");
}

#[then(expr = "the request should carry header {string} with value {string}")]
fn request_header_sent(world: &mut HarnessWorld, name: String, expected: String) {
    let request = world.mock.last_request();
    let actual = request
        .headers
        .iter()
        .find(|(header, _)| *header == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or_else(|| panic!("request carried no '{name}' header: {:?}", request.headers));
    assert_eq!(actual, expected, "request header '{name}' mismatch");
}

#[then(expr = "the request Content-Type header should be {string}")]
fn request_content_type_literal(world: &mut HarnessWorld, expected: String) {
    let request = world.mock.last_request();
    let actual = request
        .headers
        .iter()
        .find(|(name, _)| name == "Content-Type")
        .map(|(_, value)| value.as_str())
        .expect("request carried no Content-Type header");
    assert_eq!(actual, expected);
}
