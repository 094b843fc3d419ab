//! Generated configuration files.
//!
//! Templates are compiled in from `templates/` with askama. HTML escaping is
//! disabled: the outputs are YAML and XML fed to tools, not browsers, and
//! the scenario embeds literal JSON.
//!
//! A scenario template configured at `load_test.template` replaces the
//! built-in one and is rendered at runtime with minijinja against the same
//! [`LoadTestScenario`] fields.

use std::net::Ipv4Addr;
use std::path::Path;

use askama::Template;
use serde::Serialize;

use crate::config::Config;
use crate::domain::{agent_names, MASTER_NAME};
use crate::error::{Error, Result};

/// File name of the rendered compose descriptor.
pub const COMPOSE_FILE: &str = "docker-compose.yml";
/// File name of the rendered load-test scenario.
pub const SCENARIO_FILE: &str = "tsung.xml";
/// Where the scenario is copied on the swarm master.
pub const REMOTE_SCENARIO_PATH: &str = "/root/tsung.xml";
/// Port the Phoenix chat application listens on.
pub const APPLICATION_PORT: u16 = 4000;

/// Compose descriptor: a Tsung controller on the master and one Tsung
/// agent container pinned to each swarm agent.
#[derive(Template)]
#[template(path = "docker-compose.yml", escape = "none")]
pub struct ComposeFile {
    pub image: String,
    pub master: String,
    pub agents: Vec<String>,
}

impl ComposeFile {
    pub fn from_config(config: &Config) -> Self {
        Self {
            image: config.load_test.image.clone(),
            master: MASTER_NAME.to_string(),
            agents: agent_names(config.workers),
        }
    }
}

/// Tsung scenario driving websocket chat sessions against the target.
#[derive(Template, Serialize)]
#[template(path = "tsung.xml", escape = "none")]
pub struct LoadTestScenario {
    pub master: String,
    pub agents: Vec<String>,
    pub target_ip: Ipv4Addr,
    pub target_port: u16,
    pub duration_minutes: u32,
    pub arrival_rate: u32,
    pub max_users: u64,
}

impl LoadTestScenario {
    pub fn new(config: &Config, target_ip: Ipv4Addr) -> Self {
        Self {
            master: MASTER_NAME.to_string(),
            agents: agent_names(config.workers),
            target_ip,
            target_port: APPLICATION_PORT,
            duration_minutes: config.load_test.duration_minutes,
            arrival_rate: config.load_test.arrival_rate,
            max_users: config.load_test.max_users,
        }
    }
}

pub fn render_compose(config: &Config) -> Result<String> {
    Ok(ComposeFile::from_config(config).render()?)
}

/// Render the load-test scenario, from the configured template when set.
pub fn render_scenario(config: &Config, target_ip: Ipv4Addr) -> Result<String> {
    let scenario = LoadTestScenario::new(config, target_ip);
    match &config.load_test.template {
        Some(path) => render_template_file(path, &scenario),
        None => Ok(scenario.render()?),
    }
}

fn render_template_file(path: &Path, scenario: &LoadTestScenario) -> Result<String> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::TemplateFile {
        path: path.to_path_buf(),
        source,
    })?;
    minijinja::Environment::new()
        .render_str(&source, scenario)
        .map_err(|source| Error::Template {
            path: path.to_path_buf(),
            source,
        })
}
