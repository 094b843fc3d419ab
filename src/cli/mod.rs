//! Command-line interface definitions.
//!
//! Defines the CLI structure using `clap` and dispatches each subcommand to
//! its handler. Handlers load configuration, initialize logging and build a
//! [`Provisioner`] over the real process executor.

pub mod check;
pub mod diagnostic;
pub mod down;
pub mod info;
pub mod output;
pub mod render;
pub mod up;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::adapter::ProcessExecutor;
use crate::config::Config;
use crate::error::Result;
use crate::provision::Provisioner;

/// Provision a docker-machine swarm for load testing
#[derive(Parser, Debug)]
#[command(name = "swarm-bench")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.yml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the key-value store, the swarm and the benchmark target, then
    /// write the load-test configuration
    Up(UpArgs),

    /// Remove the swarm machines
    Down(DownArgs),

    /// Render docker-compose.yml and tsung.xml and copy the scenario to the master
    Render(RenderArgs),

    /// Show controller and application URLs with next steps
    Info,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `swarm-bench check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config,
}

/// Arguments for the `up` subcommand.
#[derive(Parser, Debug)]
pub struct UpArgs {
    /// Directory the generated files are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip creating the benchmark target
    #[arg(long)]
    pub skip_target: bool,
}

/// Arguments for the `down` subcommand.
#[derive(Parser, Debug)]
pub struct DownArgs {
    /// Also remove the benchmark target (never removes a configured target IP)
    #[arg(long)]
    pub target: bool,

    /// Skip confirmation prompt (required together with --json)
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `render` subcommand.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Directory the generated files are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Load configuration, start logging and build the provisioner.
pub(crate) fn provisioner(cli: &Cli) -> Result<Provisioner> {
    let config = Config::load(&cli.config)?;
    config.init_logging(output::verbosity());

    let executor = Arc::new(ProcessExecutor::new(config.provisioning.command_timeout()));
    let streaming = !(output::is_json() || output::is_quiet());
    Ok(Provisioner::new(Arc::new(config), executor).with_streaming(streaming))
}

/// Execute the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match &cli.command {
        Commands::Up(args) => up::execute(&cli, args).await,
        Commands::Down(args) => down::execute(&cli, args).await,
        Commands::Render(args) => render::execute(&cli, args).await,
        Commands::Info => info::execute(&cli).await,
        Commands::Check(CheckCommand::Config) => check::execute_config(&cli.config),
    }
}
