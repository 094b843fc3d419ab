//! Provisioning domain types: machines, commands, addresses, outcomes.

mod address;
mod command;
mod machine;
mod outcome;

pub use address::{extract_ipv4, KvStoreAddress, CONSUL_PORT};
pub use command::{
    CommandResult, CommandSpec, IO_FAILURE_STATUS, SIGNAL_STATUS, TIMEOUT_STATUS,
};
pub use machine::{
    agent_name, agent_names, cluster_machine_names, ProvisioningTarget, Role, KV_STORE_NAME,
    MASTER_NAME, TARGET_NAME,
};
pub use outcome::{ClusterReport, ClusterTopology, NodeOutcome, TeardownReport};
