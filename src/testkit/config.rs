//! Canonical test configurations.
//!
//! Single source of truth for config used across tests. Built from YAML so
//! tests go through the same validation as a real `config.yml`.

use std::net::Ipv4Addr;

use crate::config::Config;

/// Token used by every test configuration.
pub const TOKEN: &str = "test-token";

fn yaml(workers: u32, target: &str) -> String {
    format!(
        r#"
digital_ocean_token: {TOKEN}
workers: {workers}
kv_store: {{ size: 512mb, region: fra1, image: ubuntu-14-04-x64 }}
worker: {{ size: 2gb, region: fra1, image: ubuntu-14-04-x64 }}
benchmark_target: {target}
provisioning: {{ launch_spacing_ms: 0 }}
"#
    )
}

/// Config with `workers` agents and a target this tool creates.
pub fn config(workers: u32) -> Config {
    let target = "{ size: 8gb, region: fra1, image: ubuntu-14-04-x64, setup_script: files/setup_chat.sh }";
    Config::parse(&yaml(workers, target), None).expect("valid test config")
}

/// Config with `workers` agents and a pre-provisioned target at `ip`.
pub fn config_with_target_ip(workers: u32, ip: Ipv4Addr) -> Config {
    let target = format!("{{ ip: {ip} }}");
    Config::parse(&yaml(workers, &target), None).expect("valid test config")
}
