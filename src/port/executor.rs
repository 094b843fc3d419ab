//! Command executor port.
//!
//! The process boundary is injected into the provisioner as a capability so
//! provisioning logic can be exercised against scripted results.

use async_trait::async_trait;

use crate::domain::{CommandResult, CommandSpec};

/// Runs one external command.
///
/// Implementations must:
/// - merge stdout and stderr into one text, in arrival order;
/// - echo output as it arrives when `stream_output` is set;
/// - report a non-zero status for a failing command instead of erroring;
/// - report a synthetic non-zero status with a diagnostic message when the
///   process itself cannot be spawned or read.
///
/// Deciding whether a non-zero status is fatal is left to the caller.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &CommandSpec, stream_output: bool) -> CommandResult;
}
