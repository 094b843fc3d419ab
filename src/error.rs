use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_yaml::Error),
}

/// A provisioning command that exited unsuccessfully.
///
/// Returned as an error from fatal invocations and recorded in node outcomes
/// for allow-failure invocations. `command` is the redacted command line.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("failure executing command '{command}' (exit status {status}):\n{output}")]
pub struct CommandFailure {
    pub command: String,
    pub status: i32,
    pub output: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandFailure),

    #[error("could not resolve an IPv4 address for {machine}: {output:?}")]
    Unresolved { machine: String, output: String },

    #[error("template rendering error: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to read template {}: {source}", .path.display())]
    TemplateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
