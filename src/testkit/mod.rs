//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`api`] — [`ScriptedApi`](api::ScriptedApi), a mock [`Api`](crate::api::Api)
//!   with per-operation scripted responses, optional completion delays, and
//!   a call log recording the credential seen by each call.
//! - [`domain`] — Builders for domain values: users, wallets, transactions,
//!   advice, portfolios.

pub mod api;
pub mod domain;
