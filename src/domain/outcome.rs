//! Results of provisioning batches.

use serde::Serialize;

use super::address::KvStoreAddress;
use super::machine::Role;
use crate::error::CommandFailure;

/// The cluster shape a creation batch works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterTopology {
    pub kv_store: KvStoreAddress,
    pub workers: u32,
}

impl ClusterTopology {
    /// Master plus agents.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.workers as usize + 1
    }
}

/// What happened to one machine during a provisioning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeOutcome {
    pub name: String,
    pub role: Role,
    /// Tolerated failures, in the order the commands ran.
    pub failures: Vec<CommandFailure>,
}

impl NodeOutcome {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, failure: CommandFailure) {
        self.failures.push(failure);
    }

    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One outcome per launched node-creation task.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub topology: ClusterTopology,
    pub outcomes: Vec<NodeOutcome>,
}

impl ClusterReport {
    pub fn failed(&self) -> impl Iterator<Item = &NodeOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Result of a batched removal.
#[derive(Debug, Clone, Serialize)]
pub struct TeardownReport {
    pub machines: Vec<String>,
    pub failure: Option<CommandFailure>,
}
