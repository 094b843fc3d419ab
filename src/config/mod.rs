//! Application configuration loading and validation.
//!
//! Configuration is loaded once from a YAML file (`config.yml` by default) and
//! validated eagerly, so a missing field fails at startup rather than halfway
//! through provisioning. The provider access token is read from the `DO_TOKEN`
//! environment variable, falling back to `digital_ocean_token` in the file.
//!
//! # Example
//!
//! ```no_run
//! use swarm_bench::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.yml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

mod logging;
mod machine;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

pub use logging::LoggingConfig;
pub use machine::{BenchmarkTargetConfig, MachineSpec};

/// Environment variable holding the DigitalOcean access token.
pub const TOKEN_ENV: &str = "DO_TOKEN";

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// DigitalOcean API token. Overridden by `DO_TOKEN` when set.
    #[serde(default)]
    pub digital_ocean_token: String,

    /// Number of swarm agents (`bench-agent-1..=workers`).
    ///
    /// Must not change between `up` and `down`: teardown rebuilds the machine
    /// list from this value.
    pub workers: u32,

    /// Settings for the Consul key-value store node.
    pub kv_store: MachineSpec,

    /// Settings shared by the swarm master and every agent.
    pub worker: MachineSpec,

    /// Settings for the benchmark target host.
    #[serde(default)]
    pub benchmark_target: BenchmarkTargetConfig,

    /// Tsung scenario parameters.
    #[serde(default, alias = "tsung")]
    pub load_test: LoadTestConfig,

    /// External tool invocation settings.
    #[serde(default)]
    pub provisioning: ProvisioningConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the machine-provisioning tool is invoked.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisioningConfig {
    /// Provisioning executable.
    #[serde(default = "default_program")]
    pub program: String,
    /// Upper bound on any single command, in seconds. `0` disables the bound.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
    /// Pause between launching successive agent creations (milliseconds).
    #[serde(default = "default_launch_spacing_ms")]
    pub launch_spacing_ms: u64,
}

fn default_program() -> String {
    "docker-machine".to_string()
}

fn default_command_timeout_secs() -> u64 {
    1800 // 30 minutes
}

fn default_launch_spacing_ms() -> u64 {
    1000
}

impl ProvisioningConfig {
    /// Timeout applied to each external command, if any.
    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_secs > 0).then(|| Duration::from_secs(self.command_timeout_secs))
    }

    #[must_use]
    pub fn launch_spacing(&self) -> Duration {
        Duration::from_millis(self.launch_spacing_ms)
    }
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            command_timeout_secs: default_command_timeout_secs(),
            launch_spacing_ms: default_launch_spacing_ms(),
        }
    }
}

/// Load-test scenario parameters rendered into `tsung.xml` and the compose file.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadTestConfig {
    /// Scenario template read at render time instead of the built-in one.
    ///
    /// Rendered with Jinja syntax against the same fields as the built-in
    /// scenario: `master`, `agents`, `target_ip`, `target_port`,
    /// `duration_minutes`, `arrival_rate`, `max_users`.
    #[serde(default)]
    pub template: Option<PathBuf>,
    /// Container image running Tsung on the swarm.
    #[serde(default = "default_tsung_image")]
    pub image: String,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    /// New users per second.
    #[serde(default = "default_arrival_rate")]
    pub arrival_rate: u32,
    /// Maximum concurrent users per agent.
    #[serde(default = "default_max_users")]
    pub max_users: u64,
}

fn default_tsung_image() -> String {
    "ddragosd/tsung-docker:1.6.0".to_string()
}

fn default_duration_minutes() -> u32 {
    10
}

fn default_arrival_rate() -> u32 {
    100
}

fn default_max_users() -> u64 {
    100_000
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            template: None,
            image: default_tsung_image(),
            duration_minutes: default_duration_minutes(),
            arrival_rate: default_arrival_rate(),
            max_users: default_max_users(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, applying the `DO_TOKEN` override.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content, std::env::var(TOKEN_ENV).ok())
    }

    /// Parse configuration from YAML content.
    ///
    /// `env_token`, when present and non-empty, replaces the token from the
    /// file.
    pub fn parse(content: &str, env_token: Option<String>) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            config.digital_ocean_token = token;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.digital_ocean_token.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "digital_ocean_token",
            }
            .into());
        }
        self.kv_store
            .validate("kv_store.size", "kv_store.region", "kv_store.image")?;
        self.worker
            .validate("worker.size", "worker.region", "worker.image")?;
        self.benchmark_target.validate()?;

        if self.provisioning.program.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "provisioning.program",
            }
            .into());
        }
        if self.load_test.arrival_rate == 0 {
            return Err(ConfigError::InvalidValue {
                field: "load_test.arrival_rate",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        if self
            .load_test
            .template
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "load_test.template",
                reason: "must be a file path".to_string(),
            }
            .into());
        }
        if self.load_test.duration_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "load_test.duration_minutes",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.init(verbose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const MINIMAL: &str = r#"
digital_ocean_token: file-token
workers: 2
kv_store: { size: 512mb, region: fra1, image: ubuntu-14-04-x64 }
worker: { size: 2gb, region: fra1, image: ubuntu-14-04-x64 }
benchmark_target: { size: 8gb, region: fra1, image: ubuntu-14-04-x64 }
"#;

    #[test]
    fn applies_defaults_for_optional_sections() {
        let config = Config::parse(MINIMAL, None).expect("parse");
        assert_eq!(config.workers, 2);
        assert_eq!(config.provisioning.program, "docker-machine");
        assert_eq!(
            config.provisioning.command_timeout(),
            Some(Duration::from_secs(1800))
        );
        assert_eq!(config.provisioning.launch_spacing(), Duration::from_secs(1));
        assert_eq!(config.load_test.arrival_rate, 100);
        assert_eq!(config.logging.level, "info");
        assert!(!config.benchmark_target.is_external());
        assert_eq!(
            config.benchmark_target.setup_script,
            std::path::PathBuf::from("files/setup_chat.sh")
        );
    }

    #[test]
    fn env_token_overrides_file_token() {
        let config = Config::parse(MINIMAL, Some("env-token".into())).expect("parse");
        assert_eq!(config.digital_ocean_token, "env-token");
    }

    #[test]
    fn blank_env_token_falls_back_to_file() {
        let config = Config::parse(MINIMAL, Some("  ".into())).expect("parse");
        assert_eq!(config.digital_ocean_token, "file-token");
    }

    #[test]
    fn zero_timeout_disables_the_bound() {
        let yaml = format!("{MINIMAL}provisioning: {{ command_timeout_secs: 0 }}\n");
        let config = Config::parse(&yaml, None).expect("parse");
        assert_eq!(config.provisioning.command_timeout(), None);
    }

    #[test]
    fn rejects_missing_token() {
        let yaml = MINIMAL.replace("digital_ocean_token: file-token", "");
        match Config::parse(&yaml, None) {
            Err(Error::Config(ConfigError::MissingField {
                field: "digital_ocean_token",
            })) => {}
            other => panic!("expected missing token, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_worker_region() {
        let yaml = MINIMAL.replace("worker: { size: 2gb, region: fra1", "worker: { size: 2gb, region: \"\"");
        match Config::parse(&yaml, None) {
            Err(Error::Config(ConfigError::MissingField {
                field: "worker.region",
            })) => {}
            other => panic!("expected missing worker.region, got {other:?}"),
        }
    }

    #[test]
    fn external_target_needs_no_machine_settings() {
        let yaml = MINIMAL.replace(
            "benchmark_target: { size: 8gb, region: fra1, image: ubuntu-14-04-x64 }",
            "benchmark_target: { ip: 1.2.3.4 }",
        );
        let config = Config::parse(&yaml, None).expect("parse");
        assert_eq!(
            config.benchmark_target.ip,
            Some(std::net::Ipv4Addr::new(1, 2, 3, 4))
        );
        assert!(config.benchmark_target.is_external());
    }

    #[test]
    fn rejects_unparseable_target_ip() {
        let yaml = MINIMAL.replace(
            "benchmark_target: { size: 8gb, region: fra1, image: ubuntu-14-04-x64 }",
            "benchmark_target: { ip: not-an-ip }",
        );
        assert!(matches!(
            Config::parse(&yaml, None),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn accepts_tsung_alias_for_load_test() {
        let yaml = format!("{MINIMAL}tsung: {{ arrival_rate: 7 }}\n");
        let config = Config::parse(&yaml, None).expect("parse");
        assert_eq!(config.load_test.arrival_rate, 7);
    }

    #[test]
    fn reads_template_path_from_tsung_block() {
        let yaml = format!("{MINIMAL}tsung: {{ template: templates/custom.xml }}\n");
        let config = Config::parse(&yaml, None).expect("parse");
        assert_eq!(
            config.load_test.template,
            Some(PathBuf::from("templates/custom.xml"))
        );
    }

    #[test]
    fn builtin_scenario_is_the_default() {
        let config = Config::parse(MINIMAL, None).expect("parse");
        assert!(config.load_test.template.is_none());
    }

    #[test]
    fn rejects_zero_arrival_rate() {
        let yaml = format!("{MINIMAL}load_test: {{ arrival_rate: 0 }}\n");
        match Config::parse(&yaml, None) {
            Err(Error::Config(ConfigError::InvalidValue {
                field: "load_test.arrival_rate",
                ..
            })) => {}
            other => panic!("expected invalid arrival_rate, got {other:?}"),
        }
    }
}
