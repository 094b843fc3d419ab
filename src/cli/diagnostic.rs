//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration parse errors are shown against the offending file with a
//! labeled span, the rest fall back to plain error lines.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(swarm_bench::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic for a YAML parse failure in `path`.
    ///
    /// Returns `None` for other errors, or when the error carries no location
    /// or the file can no longer be read.
    pub fn from_error(path: &Path, err: &Error) -> Option<Self> {
        let Error::Config(ConfigError::Parse(parse)) = err else {
            return None;
        };
        let location = parse.location()?;
        let src = std::fs::read_to_string(path).ok()?;
        let offset = location.index().min(src.len());
        Some(
            Self::new(
                format!("failed to parse config: {parse}"),
                path.display().to_string(),
                src,
                offset,
                1,
            )
            .with_help("see config.yml.example for the expected layout"),
        )
    }
}

/// Print an error, with source context when it points into the config file.
pub fn report(config_path: &Path, err: &Error) {
    match ConfigDiagnostic::from_error(config_path, err) {
        Some(diagnostic) => eprintln!("{:?}", miette::Report::new(diagnostic)),
        None => super::output::error(&err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_parse_errors_have_no_diagnostic() {
        let err = Error::Config(ConfigError::MissingField { field: "workers" });
        assert!(ConfigDiagnostic::from_error(Path::new("config.yml"), &err).is_none());
    }

    #[test]
    fn parse_errors_point_into_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yml");
        let content = "workers: [unclosed\n";
        std::fs::write(&path, content).expect("write");

        let err = crate::config::Config::load(&path).expect_err("malformed yaml");
        let diagnostic = ConfigDiagnostic::from_error(&path, &err).expect("diagnostic");
        assert!(diagnostic.span.offset() <= content.len());
        assert!(diagnostic.message.contains("failed to parse config"));
    }
}
