use tracing::info;

use super::Provisioner;
use crate::domain::{cluster_machine_names, TeardownReport};

impl Provisioner {
    /// Remove the store, master and agents with one forced `rm`.
    ///
    /// The machine list comes from the configured worker count, not from a
    /// record of what was created, so names that no longer exist are
    /// expected and their failure is tolerated.
    pub async fn teardown(&self) -> TeardownReport {
        let machines = cluster_machine_names(self.config.workers);
        info!(count = machines.len(), "removing cluster machines");

        let failure = self
            .run_allowing_failure(&self.tool.remove(&machines), self.stream_output)
            .await
            .err();
        TeardownReport { machines, failure }
    }
}
