//! Structured external commands and their results.
//!
//! Commands are argument vectors handed directly to the process spawner, so
//! configuration values never pass through a shell. Arguments carrying
//! credentials are marked secret and masked whenever the command is
//! displayed or logged.

use std::fmt;

const REDACTED: &str = "***";

/// Status reported when the process could not be driven at all.
pub const IO_FAILURE_STATUS: i32 = 1;
/// Status reported when a command exceeded its timeout.
pub const TIMEOUT_STATUS: i32 = 124;
/// Status reported when the process was terminated by a signal.
pub const SIGNAL_STATUS: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Arg {
    value: String,
    shown: Option<String>,
}

/// A program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<Arg>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a plain argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            shown: None,
        });
        self
    }

    /// Append several plain arguments.
    #[must_use]
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self = self.arg(value);
        }
        self
    }

    /// Append `{flag}={secret}`, shown as `{flag}=***`.
    #[must_use]
    pub fn secret_flag(mut self, flag: &str, secret: &str) -> Self {
        self.args.push(Arg {
            value: format!("{flag}={secret}"),
            shown: Some(format!("{flag}={REDACTED}")),
        });
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The real argument values, secrets included.
    pub fn argv(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.value.as_str()).collect()
    }

    /// First argument, which for the machine tool is the subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(|a| a.value.as_str())
    }

    /// Last argument, which for most machine-tool commands is the machine name.
    pub fn last_arg(&self) -> Option<&str> {
        self.args.last().map(|a| a.value.as_str())
    }

    pub fn has_arg(&self, value: &str) -> bool {
        self.args.iter().any(|a| a.value == value)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let shown = arg.shown.as_deref().unwrap_or(&arg.value);
            if shown.is_empty() || shown.contains(char::is_whitespace) {
                write!(f, " \"{shown}\"")?;
            } else {
                write!(f, " {shown}")?;
            }
        }
        Ok(())
    }
}

/// Exit status plus merged stdout/stderr of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: i32,
    pub output: String,
}

impl CommandResult {
    pub fn new(status: i32, output: impl Into<String>) -> Self {
        Self {
            status,
            output: output.into(),
        }
    }

    pub fn ok(output: impl Into<String>) -> Self {
        Self::new(0, output)
    }

    /// Synthetic result for a failure to spawn or talk to the process.
    pub fn io_failure(err: &std::io::Error) -> Self {
        Self::new(IO_FAILURE_STATUS, format!("{}: {err}", err.kind()))
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_masks_secrets_but_argv_keeps_them() {
        let cmd = CommandSpec::new("docker-machine")
            .arg("create")
            .secret_flag("--digitalocean-access-token", "s3cr3t")
            .arg("bench-master");

        let shown = cmd.to_string();
        assert_eq!(
            shown,
            "docker-machine create --digitalocean-access-token=*** bench-master"
        );
        assert!(!shown.contains("s3cr3t"));
        assert!(cmd.has_arg("--digitalocean-access-token=s3cr3t"));
    }

    #[test]
    fn display_quotes_arguments_with_whitespace() {
        let cmd = CommandSpec::new("echo").args(["a b", "c"]);
        assert_eq!(cmd.to_string(), "echo \"a b\" c");
    }

    #[test]
    fn subcommand_and_last_arg() {
        let cmd = CommandSpec::new("docker-machine").args(["ip", "bench-kv-store"]);
        assert_eq!(cmd.subcommand(), Some("ip"));
        assert_eq!(cmd.last_arg(), Some("bench-kv-store"));
        assert_eq!(CommandSpec::new("true").subcommand(), None);
    }

    #[test]
    fn io_failure_is_nonzero() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let result = CommandResult::io_failure(&err);
        assert_eq!(result.status, IO_FAILURE_STATUS);
        assert!(!result.success());
        assert!(result.output.contains("no such file"));
    }
}
