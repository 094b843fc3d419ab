//! Machine roles, names and creation targets.

use std::fmt;

use serde::Serialize;

use crate::config::MachineSpec;

/// Name of the Consul key-value store machine.
pub const KV_STORE_NAME: &str = "bench-kv-store";
/// Name of the swarm master machine.
pub const MASTER_NAME: &str = "bench-master";
/// Name of the benchmark target machine.
pub const TARGET_NAME: &str = "bench-target";

/// Name of the `index`-th swarm agent (1-based).
#[must_use]
pub fn agent_name(index: u32) -> String {
    format!("bench-agent-{index}")
}

/// Names of every agent for a given worker count, in launch order.
#[must_use]
pub fn agent_names(workers: u32) -> Vec<String> {
    (1..=workers).map(agent_name).collect()
}

/// The machines removed by a cluster teardown.
///
/// Rebuilt from the worker count alone; there is no record of which
/// machines were actually created.
#[must_use]
pub fn cluster_machine_names(workers: u32) -> Vec<String> {
    let mut names = Vec::with_capacity(workers as usize + 2);
    names.push(KV_STORE_NAME.to_string());
    names.push(MASTER_NAME.to_string());
    names.extend(agent_names(workers));
    names
}

/// What a machine is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    KvStore,
    SwarmMaster,
    SwarmAgent,
    BenchmarkTarget,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::KvStore => "kv-store",
            Role::SwarmMaster => "swarm-master",
            Role::SwarmAgent => "swarm-agent",
            Role::BenchmarkTarget => "benchmark-target",
        };
        f.write_str(label)
    }
}

/// One machine to create.
///
/// Built just before its creation command is issued and dropped once the
/// command completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningTarget {
    name: String,
    role: Role,
    index: Option<u32>,
    machine: MachineSpec,
    private_networking: bool,
}

impl ProvisioningTarget {
    #[must_use]
    pub fn kv_store(machine: MachineSpec) -> Self {
        Self {
            name: KV_STORE_NAME.to_string(),
            role: Role::KvStore,
            index: None,
            machine,
            private_networking: true,
        }
    }

    #[must_use]
    pub fn master(machine: MachineSpec) -> Self {
        Self {
            name: MASTER_NAME.to_string(),
            role: Role::SwarmMaster,
            index: None,
            machine,
            private_networking: true,
        }
    }

    #[must_use]
    pub fn agent(index: u32, machine: MachineSpec) -> Self {
        Self {
            name: agent_name(index),
            role: Role::SwarmAgent,
            index: Some(index),
            machine,
            private_networking: true,
        }
    }

    #[must_use]
    pub fn benchmark_target(machine: MachineSpec) -> Self {
        Self {
            name: TARGET_NAME.to_string(),
            role: Role::BenchmarkTarget,
            index: None,
            machine,
            private_networking: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn machine(&self) -> &MachineSpec {
        &self.machine
    }

    pub fn private_networking(&self) -> bool {
        self.private_networking
    }

    /// Whether this machine joins the swarm.
    pub fn is_swarm_member(&self) -> bool {
        matches!(self.role, Role::SwarmMaster | Role::SwarmAgent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_names_cover_kv_master_and_agents() {
        assert_eq!(
            cluster_machine_names(3),
            vec![
                "bench-kv-store",
                "bench-master",
                "bench-agent-1",
                "bench-agent-2",
                "bench-agent-3",
            ]
        );
    }

    #[test]
    fn zero_workers_still_tears_down_kv_and_master() {
        assert_eq!(
            cluster_machine_names(0),
            vec!["bench-kv-store", "bench-master"]
        );
    }

    #[test]
    fn only_agents_carry_an_index() {
        let spec = MachineSpec::new("2gb", "fra1", "ubuntu");
        assert_eq!(ProvisioningTarget::agent(4, spec.clone()).index(), Some(4));
        assert_eq!(ProvisioningTarget::master(spec.clone()).index(), None);
        assert_eq!(ProvisioningTarget::agent(4, spec).name(), "bench-agent-4");
    }

    #[test]
    fn target_is_not_a_swarm_member_and_has_no_private_networking() {
        let target = ProvisioningTarget::benchmark_target(MachineSpec::default());
        assert!(!target.is_swarm_member());
        assert!(!target.private_networking());
        assert_eq!(target.role(), Role::BenchmarkTarget);
    }
}
