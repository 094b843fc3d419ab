use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::Provisioner;
use crate::domain::MASTER_NAME;
use crate::error::Result;
use crate::render::{self, COMPOSE_FILE, REMOTE_SCENARIO_PATH, SCENARIO_FILE};

/// Paths of the generated files.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenConfig {
    pub compose: PathBuf,
    pub scenario: PathBuf,
    pub target_ip: Ipv4Addr,
}

impl Provisioner {
    /// Render the compose descriptor and the load-test scenario into `dir`,
    /// then copy the scenario onto the swarm master.
    ///
    /// The target address is taken from configuration when present, so a
    /// pre-provisioned target needs no lookup. The copy is fatal.
    pub async fn write_config(&self, dir: &Path) -> Result<WrittenConfig> {
        let compose = dir.join(COMPOSE_FILE);
        std::fs::write(&compose, render::render_compose(&self.config)?)?;
        info!(path = %compose.display(), "wrote compose file");

        let target_ip = self.target_ip().await?;
        let scenario = dir.join(SCENARIO_FILE);
        std::fs::write(&scenario, render::render_scenario(&self.config, target_ip)?)?;
        info!(path = %scenario.display(), %target_ip, "wrote load-test scenario");

        let copy = self.tool.scp(
            &scenario.to_string_lossy(),
            &format!("{MASTER_NAME}:{REMOTE_SCENARIO_PATH}"),
        );
        self.run(&copy, self.stream_output).await?;

        Ok(WrittenConfig {
            compose,
            scenario,
            target_ip,
        })
    }
}
