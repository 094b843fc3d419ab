use std::path::Path;

use crate::cli::output;
use crate::config::{Config, TOKEN_ENV};
use crate::domain::cluster_machine_names;
use crate::error::{ConfigError, Result};

/// Validate the configuration file without touching any machine.
pub fn execute_config(config_path: &Path) -> Result<()> {
    output::section(&format!("Checking configuration: {}", config_path.display()));

    if !config_path.exists() {
        output::hint("create one by copying the example: cp config.yml.example config.yml");
        return Err(ConfigError::ReadFile(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", config_path.display()),
        ))
        .into());
    }

    let config = Config::load(config_path)?;
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Tool", &config.provisioning.program);
    output::field("Workers", config.workers);
    output::field(
        "KV store",
        format!(
            "{} / {} / {}",
            config.kv_store.size, config.kv_store.region, config.kv_store.image
        ),
    );
    output::field(
        "Worker",
        format!(
            "{} / {} / {}",
            config.worker.size, config.worker.region, config.worker.image
        ),
    );
    match config.benchmark_target.ip {
        Some(ip) => output::field("Target", format!("{ip} (pre-provisioned)")),
        None => output::field(
            "Target",
            format!(
                "{} / {} / {}",
                config.benchmark_target.machine.size,
                config.benchmark_target.machine.region,
                config.benchmark_target.machine.image
            ),
        ),
    }
    match config.provisioning.command_timeout() {
        Some(limit) => output::field("Timeout", format!("{}s per command", limit.as_secs())),
        None => output::field("Timeout", "none"),
    }
    match &config.load_test.template {
        Some(path) => {
            output::field("Scenario", path.display());
            if !path.exists() {
                output::warning(&format!(
                    "scenario template {} not found; rendering will fail",
                    path.display()
                ));
            }
        }
        None => output::field("Scenario", "built-in"),
    }
    output::field(
        "Machines",
        cluster_machine_names(config.workers).join(" "),
    );

    if std::env::var(TOKEN_ENV).is_ok_and(|t| !t.trim().is_empty()) {
        output::success(&format!("Access token taken from {TOKEN_ENV}"));
    } else {
        output::success("Access token taken from config file");
    }

    if !config.benchmark_target.is_external() && !config.benchmark_target.setup_script.exists() {
        output::warning(&format!(
            "setup script {} not found; target setup will fail",
            config.benchmark_target.setup_script.display()
        ));
    }
    Ok(())
}
