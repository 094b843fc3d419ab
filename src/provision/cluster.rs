use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::Provisioner;
use crate::domain::{
    ClusterReport, ClusterTopology, KvStoreAddress, NodeOutcome, ProvisioningTarget, Role,
    IO_FAILURE_STATUS,
};
use crate::error::CommandFailure;

struct Launched {
    name: String,
    role: Role,
    command: String,
    handle: JoinHandle<NodeOutcome>,
}

impl Provisioner {
    /// Create the swarm master and every agent concurrently.
    ///
    /// Takes the resolved store address, so no swarm node can be created
    /// before [`ensure_kv_store`](Self::ensure_kv_store) has succeeded.
    /// Agent launches are spaced by the configured interval to stay under
    /// the provider's API rate limits. Returns once every task has finished,
    /// with exactly one outcome per node in launch order; failed nodes are
    /// left as they are.
    pub async fn create_cluster(&self, kv_store: &KvStoreAddress) -> ClusterReport {
        let topology = ClusterTopology {
            kv_store: *kv_store,
            workers: self.config.workers,
        };
        let mut launched = Vec::with_capacity(topology.node_count());

        launched.push(self.launch(ProvisioningTarget::master(self.config.worker.clone()), kv_store));

        for index in 1..=topology.workers {
            if index > 1 && !self.launch_spacing.is_zero() {
                tokio::time::sleep(self.launch_spacing).await;
            }
            let target = ProvisioningTarget::agent(index, self.config.worker.clone());
            launched.push(self.launch(target, kv_store));
        }

        let outcomes = join_all(launched.into_iter().map(|node| async move {
            match node.handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(machine = %node.name, error = %e, "node task did not complete");
                    let mut outcome = NodeOutcome::new(node.name, node.role);
                    outcome.record(CommandFailure {
                        command: node.command,
                        status: IO_FAILURE_STATUS,
                        output: format!("task aborted: {e}"),
                    });
                    outcome
                }
            }
        }))
        .await;

        ClusterReport { topology, outcomes }
    }

    fn launch(&self, target: ProvisioningTarget, kv_store: &KvStoreAddress) -> Launched {
        let name = target.name().to_string();
        let role = target.role();
        let command = self.tool.create(&target, Some(kv_store)).to_string();
        let this = self.clone();
        let kv_store = *kv_store;
        let handle = tokio::spawn(async move { this.create_node(&target, &kv_store).await });
        Launched {
            name,
            role,
            command,
            handle,
        }
    }

    /// Create one swarm node.
    ///
    /// Failure is tolerated so one bad droplet does not sink the batch; it is
    /// recorded in the returned outcome.
    pub async fn create_node(
        &self,
        target: &ProvisioningTarget,
        kv_store: &KvStoreAddress,
    ) -> NodeOutcome {
        info!(machine = target.name(), role = %target.role(), "creating swarm node");
        let mut outcome = NodeOutcome::new(target.name(), target.role());
        let command = self.tool.create(target, Some(kv_store));

        match self.run_allowing_failure(&command, self.stream_output).await {
            Ok(_) => info!(machine = target.name(), "swarm node created"),
            Err(failure) => {
                warn!(machine = target.name(), "swarm node creation failed");
                outcome.record(failure);
            }
        }
        outcome
    }
}
