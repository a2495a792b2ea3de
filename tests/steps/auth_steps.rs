//! Authentication steps: credentials via sentinels and token bookkeeping.

use cucumber::{given, then};

use crate::world::{HarnessWorld, StepResult};
use httpsteps::parse_value;

#[given(expr = "I have username {word} and password {word}")]
fn username_and_password(world: &mut HarnessWorld, username: String, password: String) -> StepResult {
    let config = world.client.config().clone();
    let username = parse_value(&username, "username").resolve(&config)?;
    world.ctx.set_field("username", username);
    let password = parse_value(&password, "password").resolve(&config)?;
    world.ctx.set_field("password", password);
    Ok(())
}

#[then(expr = "I store the token as {string}")]
fn store_token(world: &mut HarnessWorld, key: String) -> StepResult {
    let token = world.ctx.response()?.json_string("token")?;
    world.ctx.remember(&key, Some(token))?;
    Ok(())
}

#[then(expr = "the stored value {string} is different from {string}")]
fn stored_values_differ(world: &mut HarnessWorld, key1: String, key2: String) -> StepResult {
    let first = world.ctx.recall(&key1)?.to_owned();
    let second = world.ctx.recall(&key2)?.to_owned();
    assert_ne!(
        first, second,
        "'{key1}' and '{key2}' hold the same value: {first}"
    );
    Ok(())
}
