//! swarm-bench - Provision a docker-machine swarm for load testing.
//!
//! This crate brings up a benchmarking cluster on DigitalOcean through the
//! `docker-machine` CLI: a Consul key-value store, a swarm master with N
//! agents running Tsung, and a separate target host running the application
//! under test. It also renders the compose descriptor and Tsung scenario and
//! tears everything down again.
//!
//! # Architecture
//!
//! - **`port`** - The [`CommandExecutor`](port::CommandExecutor) seam every
//!   external command goes through
//! - **`adapter`** - Process-backed executor and the `docker-machine`
//!   command builder
//! - **`provision`** - [`Provisioner`](provision::Provisioner): store
//!   bootstrap, concurrent node fan-out, target setup, teardown
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from YAML files
//! - [`domain`] - Machine names, roles, command specs, addresses, outcomes
//! - [`error`] - Error types for the crate
//! - [`render`] - `docker-compose.yml` and `tsung.xml` templates
//! - [`report`] - Operator-facing URLs and next steps
//! - [`cli`] - Command-line handlers
//!
//! # Features
//!
//! - `testkit` - Scripted executor and canonical configs for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use swarm_bench::adapter::ProcessExecutor;
//! use swarm_bench::config::Config;
//! use swarm_bench::provision::Provisioner;
//!
//! # async fn run() -> swarm_bench::error::Result<()> {
//! let config = Config::load("config.yml")?;
//! let executor = Arc::new(ProcessExecutor::new(config.provisioning.command_timeout()));
//! let provisioner = Provisioner::new(Arc::new(config), executor);
//!
//! let kv_store = provisioner.ensure_kv_store().await?;
//! let report = provisioner.create_cluster(&kv_store).await;
//! assert_eq!(report.outcomes.len(), report.topology.node_count());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod provision;
pub mod render;
pub mod report;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
