//! Response assertion steps over the latest captured response.

use std::collections::BTreeSet;

use cucumber::then;

use crate::world::{HarnessWorld, StepResult};

#[then(expr = "the response status code should be {int}")]
fn status_code(world: &mut HarnessWorld, expected: u16) -> StepResult {
    let actual = world.ctx.response()?.status();
    assert_eq!(actual, expected, "unexpected response status");
    Ok(())
}

#[then(expr = "the response header {string} should be present")]
fn header_present(world: &mut HarnessWorld, name: String) -> StepResult {
    let response = world.ctx.response()?;
    assert!(
        response.header(&name).is_some(),
        "header '{name}' was not found in the response"
    );
    Ok(())
}

#[then(expr = "the response header {string} should not be present")]
fn header_absent(world: &mut HarnessWorld, name: String) -> StepResult {
    let response = world.ctx.response()?;
    if let Some(value) = response.header(&name) {
        panic!("header '{name}' was expected to be missing, but was found with value: {value}");
    }
    Ok(())
}

#[then(expr = "the response header {string} should contain {string}")]
fn header_contains(world: &mut HarnessWorld, name: String, expected: String) -> StepResult {
    let response = world.ctx.response()?;
    let actual = response
        .header(&name)
        .unwrap_or_else(|| panic!("header '{name}' was not found in the response"));
    assert!(
        actual.contains(&expected),
        "header '{name}' value did not contain '{expected}'; actual: {actual}"
    );
    Ok(())
}

#[then(expr = "the response body should be plain text {string}")]
fn plain_text_body(world: &mut HarnessWorld, expected: String) -> StepResult {
    let response = world.ctx.response()?;
    let content_type = response.content_type().unwrap_or_default();
    assert!(
        content_type.to_ascii_lowercase().starts_with("text/plain"),
        "expected Content-Type 'text/plain', but found: {content_type}"
    );
    assert_eq!(response.body_text(), expected, "response body content mismatch");
    Ok(())
}

#[then(expr = "the response body should only contain keys: {string}")]
fn only_keys(world: &mut HarnessWorld, expected_list: String) -> StepResult {
    let document = world
        .ctx
        .response()?
        .json_field("")?
        .expect("whole document is always present for a JSON body");
    let object = document
        .as_object()
        .expect("response body is not a JSON object");

    let actual: BTreeSet<String> = object.keys().cloned().collect();
    let expected: BTreeSet<String> = expected_list
        .split(',')
        .map(|key| key.trim().to_owned())
        .collect();

    for key in &expected {
        assert!(actual.contains(key), "missing expected key: {key}");
    }
    let unexpected: Vec<_> = actual.difference(&expected).collect();
    assert!(
        unexpected.is_empty(),
        "unexpected extra key(s) found in response body: {unexpected:?}"
    );
    Ok(())
}
