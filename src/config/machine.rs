//! Per-role machine settings.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Droplet settings for one machine role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MachineSpec {
    /// Droplet size slug (e.g. `2gb`).
    #[serde(default)]
    pub size: String,
    /// Region slug (e.g. `fra1`).
    #[serde(default)]
    pub region: String,
    /// Image slug (e.g. `ubuntu-14-04-x64`).
    #[serde(default)]
    pub image: String,
}

impl MachineSpec {
    pub fn new(size: impl Into<String>, region: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            region: region.into(),
            image: image.into(),
        }
    }

    pub(crate) fn validate(
        &self,
        size: &'static str,
        region: &'static str,
        image: &'static str,
    ) -> Result<()> {
        for (field, value) in [(size, &self.size), (region, &self.region), (image, &self.image)] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }
        Ok(())
    }
}

/// Benchmark target settings.
///
/// When `ip` is set the target is treated as pre-provisioned: it is never
/// created or destroyed by this tool, and the machine settings may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkTargetConfig {
    #[serde(flatten)]
    pub machine: MachineSpec,

    /// Address of an existing target host.
    #[serde(default)]
    pub ip: Option<Ipv4Addr>,

    /// Local script copied to the target and executed after creation.
    #[serde(default = "default_setup_script")]
    pub setup_script: PathBuf,
}

fn default_setup_script() -> PathBuf {
    PathBuf::from("files/setup_chat.sh")
}

impl BenchmarkTargetConfig {
    /// True when the target was provisioned outside this tool.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.ip.is_some()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.is_external() {
            return Ok(());
        }
        self.machine.validate(
            "benchmark_target.size",
            "benchmark_target.region",
            "benchmark_target.image",
        )?;
        if self.setup_script.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "benchmark_target.setup_script",
            }
            .into());
        }
        Ok(())
    }
}

impl Default for BenchmarkTargetConfig {
    fn default() -> Self {
        Self {
            machine: MachineSpec::default(),
            ip: None,
            setup_script: default_setup_script(),
        }
    }
}
