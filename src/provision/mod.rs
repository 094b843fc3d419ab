//! Cluster provisioning and teardown.
//!
//! The [`Provisioner`] sequences machine-tool commands through an injected
//! [`CommandExecutor`]. Commands run in one of two tiers:
//!
//! - **fatal**: a non-zero status becomes [`Error::Command`] and aborts the
//!   current call chain (already spawned node tasks keep running);
//! - **allow-failure**: a non-zero status is logged as a warning and handed
//!   back as a [`CommandFailure`] for the caller to record, never raised.
//!
//! There are no retries; every command is attempted exactly once.

mod cluster;
mod files;
mod info;
mod kv_store;
mod target;
mod teardown;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::adapter::MachineTool;
use crate::config::Config;
use crate::domain::{extract_ipv4, CommandSpec, TARGET_NAME};
use crate::error::{CommandFailure, Error, Result};
use crate::port::CommandExecutor;

pub use files::WrittenConfig;

/// Orchestrates creation and teardown of the benchmarking cluster.
///
/// Cheap to clone; each concurrent node task holds its own clone.
#[derive(Clone)]
pub struct Provisioner {
    config: Arc<Config>,
    tool: MachineTool,
    executor: Arc<dyn CommandExecutor>,
    launch_spacing: Duration,
    stream_output: bool,
}

impl Provisioner {
    pub fn new(config: Arc<Config>, executor: Arc<dyn CommandExecutor>) -> Self {
        let tool = MachineTool::from_config(&config);
        let launch_spacing = config.provisioning.launch_spacing();
        Self {
            config,
            tool,
            executor,
            launch_spacing,
            stream_output: true,
        }
    }

    /// Override the pause between successive agent launches.
    #[must_use]
    pub fn with_launch_spacing(mut self, spacing: Duration) -> Self {
        self.launch_spacing = spacing;
        self
    }

    /// Echo the output of long-running commands as it arrives.
    #[must_use]
    pub fn with_streaming(mut self, stream_output: bool) -> Self {
        self.stream_output = stream_output;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tool(&self) -> &MachineTool {
        &self.tool
    }

    /// Run a command in the fatal tier and return its output.
    async fn run(&self, command: &CommandSpec, stream_output: bool) -> Result<String> {
        debug!(command = %command, "running");
        let result = self.executor.execute(command, stream_output).await;
        if result.success() {
            return Ok(result.output);
        }
        Err(Error::Command(CommandFailure {
            command: command.to_string(),
            status: result.status,
            output: result.output,
        }))
    }

    /// Run a command in the allow-failure tier.
    ///
    /// The failure carries the captured output, which callers may still
    /// inspect.
    async fn run_allowing_failure(
        &self,
        command: &CommandSpec,
        stream_output: bool,
    ) -> std::result::Result<String, CommandFailure> {
        debug!(command = %command, "running (failure tolerated)");
        let result = self.executor.execute(command, stream_output).await;
        if result.success() {
            return Ok(result.output);
        }
        let failure = CommandFailure {
            command: command.to_string(),
            status: result.status,
            output: result.output,
        };
        warn!(
            command = %failure.command,
            status = failure.status,
            output = %failure.output.trim(),
            "command failed; continuing"
        );
        Err(failure)
    }

    /// Resolve a machine's address with a fatal `ip` lookup.
    pub async fn resolve_ip(&self, machine: &str) -> Result<Ipv4Addr> {
        let output = self.run(&self.tool.ip(machine), false).await?;
        extract_ipv4(&output).ok_or_else(|| Error::Unresolved {
            machine: machine.to_string(),
            output: output.trim().to_string(),
        })
    }

    /// The benchmark target's address: configured, or looked up from the
    /// machine this tool created.
    pub async fn target_ip(&self) -> Result<Ipv4Addr> {
        match self.config.benchmark_target.ip {
            Some(ip) => Ok(ip),
            None => self.resolve_ip(TARGET_NAME).await,
        }
    }
}
