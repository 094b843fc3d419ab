//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!               ┌──────────────────────┐
//!               │     Provisioner      │
//!               │  domain + port only  │
//!               └──────────┬───────────┘
//!                          │ CommandExecutor
//!              ┌───────────┴───────────┐
//!              ▼                       ▼
//!     ┌─────────────────┐     ┌─────────────────┐
//!     │ ProcessExecutor │     │ScriptedExecutor │
//!     │ (child process) │     │   (testkit)     │
//!     └─────────────────┘     └─────────────────┘
//! ```

mod executor;

pub use executor::CommandExecutor;
