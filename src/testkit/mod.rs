//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! - [`executor`] - [`ScriptedExecutor`](executor::ScriptedExecutor), an
//!   in-memory [`CommandExecutor`](crate::port::CommandExecutor) with scripted
//!   results and a call log.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod executor;
