//! Child-process implementation of [`CommandExecutor`].

use std::io::Write;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::domain::{CommandResult, CommandSpec, SIGNAL_STATUS, TIMEOUT_STATUS};
use crate::port::CommandExecutor;

const CHUNK_SIZE: usize = 1024;

/// Spawns each command as a child process with stdout and stderr piped.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    /// `timeout` bounds every command; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, command: &CommandSpec, stream_output: bool) -> CommandResult {
        debug!(command = %command, "spawning");

        let mut child = match Command::new(command.program())
            .args(command.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return CommandResult::io_failure(&e),
        };

        if stream_output {
            println!();
        }

        let mut combined = Vec::new();
        let collected = match self.timeout {
            Some(limit) => {
                let bounded =
                    tokio::time::timeout(limit, pump(&mut child, &mut combined, stream_output))
                        .await;
                match bounded {
                    Ok(collected) => collected,
                    Err(_) => {
                        warn!(command = %command, timeout_secs = limit.as_secs(), "command timed out");
                        let _ = child.start_kill();
                        let _ = child.wait().await;
                        let mut output = String::from_utf8_lossy(&combined).into_owned();
                        output.push_str(&format!(
                            "\ncommand timed out after {}s and was killed",
                            limit.as_secs()
                        ));
                        return CommandResult::new(TIMEOUT_STATUS, output);
                    }
                }
            }
            None => pump(&mut child, &mut combined, stream_output).await,
        };

        match collected {
            Ok(status) => CommandResult::new(
                status.code().unwrap_or(SIGNAL_STATUS),
                String::from_utf8_lossy(&combined).into_owned(),
            ),
            Err(e) => {
                let _ = child.start_kill();
                CommandResult::io_failure(&e)
            }
        }
    }
}

/// Drain both pipes into `combined` in arrival order, then reap the child.
async fn pump(
    child: &mut Child,
    combined: &mut Vec<u8>,
    stream_output: bool,
) -> std::io::Result<ExitStatus> {
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("stdout not captured"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("stderr not captured"))?;

    let mut out_buf = [0u8; CHUNK_SIZE];
    let mut err_buf = [0u8; CHUNK_SIZE];
    let (mut out_open, mut err_open) = (true, true);

    while out_open || err_open {
        tokio::select! {
            read = stdout.read(&mut out_buf), if out_open => match read? {
                0 => out_open = false,
                n => append(combined, &out_buf[..n], stream_output),
            },
            read = stderr.read(&mut err_buf), if err_open => match read? {
                0 => err_open = false,
                n => append(combined, &err_buf[..n], stream_output),
            },
        }
    }

    child.wait().await
}

fn append(combined: &mut Vec<u8>, chunk: &[u8], stream_output: bool) {
    combined.extend_from_slice(chunk);
    if stream_output {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(chunk);
        let _ = out.flush();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::IO_FAILURE_STATUS;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn merges_stdout_and_stderr() {
        let executor = ProcessExecutor::new(None);
        let result = executor
            .execute(&sh("echo out; echo err 1>&2"), false)
            .await;

        assert!(result.success());
        assert!(result.output.contains("out"));
        assert!(result.output.contains("err"));
    }

    #[tokio::test]
    async fn reports_nonzero_status_without_erroring() {
        let executor = ProcessExecutor::new(None);
        let result = executor.execute(&sh("echo nope; exit 3"), false).await;

        assert_eq!(result.status, 3);
        assert_eq!(result.output.trim(), "nope");
    }

    #[tokio::test]
    async fn missing_program_is_a_synthetic_failure() {
        let executor = ProcessExecutor::new(None);
        let result = executor
            .execute(&CommandSpec::new("swarm-bench-no-such-program"), false)
            .await;

        assert_eq!(result.status, IO_FAILURE_STATUS);
        assert!(!result.output.is_empty());
    }

    #[tokio::test]
    async fn kills_commands_that_exceed_the_timeout() {
        let executor = ProcessExecutor::new(Some(Duration::from_millis(200)));
        let result = executor.execute(&sh("echo started; sleep 5"), false).await;

        assert_eq!(result.status, TIMEOUT_STATUS);
        assert!(result.output.contains("started"));
        assert!(result.output.contains("timed out"));
    }

    #[tokio::test]
    async fn arguments_are_not_shell_interpreted() {
        let executor = ProcessExecutor::new(None);
        let cmd = CommandSpec::new("echo").arg("$(whoami); rm -rf /");
        let result = executor.execute(&cmd, false).await;

        assert!(result.success());
        assert_eq!(result.output.trim(), "$(whoami); rm -rf /");
    }
}
