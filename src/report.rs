//! Operator report printed once the cluster is up.

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::domain::{MASTER_NAME, TARGET_NAME};
use crate::render::{APPLICATION_PORT, COMPOSE_FILE};

/// Port of the Tsung controller web UI on the swarm master.
pub const CONTROLLER_PORT: u16 = 8091;

const PHOENIX_SERVER: &str = "cd chat; MIX_ENV=prod PORT=4000 iex --name bench@127.0.0.1 \
--cookie 123 --erl '+P 5000000 -kernel inet_dist_listen_min 9001 inet_dist_listen_max 9001' \
-S mix phoenix.server";

/// Where to look and what to run next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorReport {
    pub controller_url: String,
    pub application_url: String,
    pub next_steps: Vec<String>,
}

impl OperatorReport {
    /// `external_target` selects plain `ssh` for a target this tool did not
    /// create, since the machine tool does not know about it.
    pub fn new(
        program: &str,
        master_ip: Ipv4Addr,
        target_ip: Ipv4Addr,
        external_target: bool,
    ) -> Self {
        let start_server = if external_target {
            format!("ssh root@{target_ip} \"{PHOENIX_SERVER}\"")
        } else {
            format!("{program} ssh {TARGET_NAME} \"{PHOENIX_SERVER}\"")
        };

        Self {
            controller_url: format!("http://{master_ip}:{CONTROLLER_PORT}"),
            application_url: format!("http://{target_ip}:{APPLICATION_PORT}"),
            next_steps: vec![
                start_server,
                format!("eval $({program} env --swarm {MASTER_NAME})"),
                format!("docker-compose -f {COMPOSE_FILE} up"),
            ],
        }
    }
}
