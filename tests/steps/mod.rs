//! Step definitions for the behavioural suite.
//!
//! Each module mirrors one concern of the harness: building requests,
//! stubbing the mock server, authentication flows, booking payloads, and
//! response assertions. All steps are thin wrappers over the library
//! API; scenario state lives in `HarnessWorld`.

mod assert_steps;
mod auth_steps;
mod request_steps;
