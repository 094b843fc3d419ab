use tracing::info;

use super::Provisioner;
use crate::domain::{NodeOutcome, ProvisioningTarget, TeardownReport, TARGET_NAME};

const REMOTE_DIR: &str = "/root";

impl Provisioner {
    /// Create and set up the benchmark target.
    ///
    /// Returns `None` without running anything when the target address is
    /// configured. Otherwise creates the machine, copies the setup script and
    /// runs it; each step's failure is tolerated and recorded.
    pub async fn create_target(&self) -> Option<NodeOutcome> {
        let settings = &self.config.benchmark_target;
        if let Some(ip) = settings.ip {
            info!(%ip, "benchmark target is pre-provisioned");
            return None;
        }

        let target = ProvisioningTarget::benchmark_target(settings.machine.clone());
        let mut outcome = NodeOutcome::new(target.name(), target.role());
        info!(machine = target.name(), "creating benchmark target");

        let script_name = settings
            .setup_script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "setup.sh".to_string());
        let remote_script = format!("{REMOTE_DIR}/{script_name}");

        let steps = [
            self.tool.create(&target, None),
            self.tool.scp(
                &settings.setup_script.to_string_lossy(),
                &format!("{TARGET_NAME}:{remote_script}"),
            ),
            self.tool.ssh(TARGET_NAME, [remote_script.as_str()]),
        ];

        for step in &steps {
            if let Err(failure) = self.run_allowing_failure(step, self.stream_output).await {
                outcome.record(failure);
            }
        }
        Some(outcome)
    }

    /// Remove the benchmark target.
    ///
    /// Returns `None` when the target address is configured: a target this
    /// tool did not create is never destroyed by it.
    pub async fn teardown_target(&self) -> Option<TeardownReport> {
        if let Some(ip) = self.config.benchmark_target.ip {
            info!(%ip, "benchmark target is pre-provisioned; leaving it alone");
            return None;
        }

        let machines = vec![TARGET_NAME.to_string()];
        info!(machine = TARGET_NAME, "removing benchmark target");
        let failure = self
            .run_allowing_failure(&self.tool.remove(&machines), self.stream_output)
            .await
            .err();
        Some(TeardownReport { machines, failure })
    }
}
