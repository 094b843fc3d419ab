//! `docker-machine` command construction.
//!
//! Every command is built as an argument vector. The access token is passed
//! as a secret flag so it never shows up in logs or error messages.

use crate::config::Config;
use crate::domain::{CommandSpec, KvStoreAddress, ProvisioningTarget, Role, KV_STORE_NAME};

/// Provider driver used for every machine.
pub const DRIVER: &str = "digitalocean";
/// Interface and port each swarm engine advertises to the cluster store.
pub const CLUSTER_ADVERTISE: &str = "eth1:2376";
/// Image run on the key-value store node.
pub const CONSUL_IMAGE: &str = "progrium/consul";

/// Builds commands for the machine-provisioning tool.
#[derive(Clone)]
pub struct MachineTool {
    program: String,
    token: String,
}

impl std::fmt::Debug for MachineTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineTool")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl MachineTool {
    pub fn new(program: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.provisioning.program.clone(),
            config.digital_ocean_token.clone(),
        )
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(self.program.clone())
    }

    /// `create` for one machine.
    ///
    /// Swarm members get swarm mode, discovery and cluster-store options
    /// pointing at `kv_store`; the master additionally gets `--swarm-master`.
    /// `kv_store` is ignored for machines outside the swarm.
    pub fn create(
        &self,
        target: &ProvisioningTarget,
        kv_store: Option<&KvStoreAddress>,
    ) -> CommandSpec {
        let machine = target.machine();
        let mut cmd = self
            .command()
            .arg("create")
            .arg(format!("--driver={DRIVER}"))
            .secret_flag("--digitalocean-access-token", &self.token)
            .arg(format!("--digitalocean-size={}", machine.size))
            .arg(format!("--digitalocean-region={}", machine.region))
            .arg(format!("--digitalocean-image={}", machine.image));

        if target.private_networking() {
            cmd = cmd.arg("--digitalocean-private-networking=true");
        }

        if let (true, Some(kv)) = (target.is_swarm_member(), kv_store) {
            let consul = kv.consul_url();
            cmd = cmd.arg("--swarm");
            if target.role() == Role::SwarmMaster {
                cmd = cmd.arg("--swarm-master");
            }
            cmd = cmd
                .arg("--swarm-discovery")
                .arg(consul.clone())
                .arg("--engine-opt")
                .arg(format!("cluster-store={consul}"))
                .arg("--engine-opt")
                .arg(format!("cluster-advertise={CLUSTER_ADVERTISE}"));
        }

        cmd.arg(target.name())
    }

    /// `ip <name>`.
    pub fn ip(&self, name: &str) -> CommandSpec {
        self.command().args(["ip", name])
    }

    /// `ssh <name> <remote...>`.
    pub fn ssh<I, S>(&self, name: &str, remote: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command().args(["ssh", name]).args(remote)
    }

    /// `scp <from> <to>`; remote paths use the `machine:path` form.
    pub fn scp(&self, from: &str, to: &str) -> CommandSpec {
        self.command().args(["scp", from, to])
    }

    /// Forced, non-interactive `rm` of every named machine in one command.
    pub fn remove<S: AsRef<str>>(&self, names: &[S]) -> CommandSpec {
        self.command()
            .args(["rm", "-f", "-y"])
            .args(names.iter().map(|n| n.as_ref().to_string()))
    }

    /// Start a single-node Consul server inside the key-value store machine.
    pub fn bootstrap_consul(&self) -> CommandSpec {
        self.ssh(
            KV_STORE_NAME,
            [
                "docker",
                "run",
                "-d",
                "--net=host",
                CONSUL_IMAGE,
                "-server",
                "-bootstrap-expect",
                "1",
            ],
        )
    }
}
