//! Handler for the `up` command.

use tabled::{Table, Tabled};

use crate::cli::{info, output, Cli, UpArgs};
use crate::domain::{ClusterReport, NodeOutcome};
use crate::error::Result;

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Machine")]
    machine: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&NodeOutcome> for NodeRow {
    fn from(outcome: &NodeOutcome) -> Self {
        let status = match outcome.failures.first() {
            None => "created".to_string(),
            Some(failure) => format!("failed (exit {})", failure.status),
        };
        Self {
            machine: outcome.name.clone(),
            role: outcome.role.to_string(),
            status,
        }
    }
}

/// Print node outcomes as a table, or as one JSON line.
pub(crate) fn print_outcomes(kind: &str, outcomes: &[NodeOutcome]) -> Result<()> {
    if output::is_json() {
        output::json_output(kind, serde_json::to_value(outcomes)?);
        return Ok(());
    }

    let table = Table::new(outcomes.iter().map(NodeRow::from)).to_string();
    output::lines(&table);
    for outcome in outcomes.iter().filter(|o| !o.succeeded()) {
        for failure in &outcome.failures {
            output::warning(&format!("{}: {}", outcome.name, failure.command));
            output::lines(&output::muted(failure.output.trim()));
        }
    }
    Ok(())
}

fn print_cluster(report: &ClusterReport) -> Result<()> {
    print_outcomes("cluster", &report.outcomes)?;
    let failed = report.failed().count();
    if failed > 0 {
        output::warning(&format!(
            "{failed} of {} swarm nodes failed; the cluster is left as is",
            report.outcomes.len()
        ));
        output::hint("rerun `swarm-bench down` then `swarm-bench up` to start over");
    }
    Ok(())
}

/// Execute the up command.
pub async fn execute(cli: &Cli, args: &UpArgs) -> Result<()> {
    let provisioner = super::provisioner(cli)?;
    let workers = provisioner.config().workers;
    tracing::info!(workers, "bringing cluster up");
    output::header(env!("CARGO_PKG_VERSION"));

    output::action("Ensuring", "key-value store");
    let kv_store = provisioner.ensure_kv_store().await?;
    output::action_done("Ready", &format!("key-value store at {kv_store}"));

    output::action(
        "Creating",
        &format!("swarm master and {workers} agent(s)"),
    );
    let cluster = provisioner.create_cluster(&kv_store).await;
    print_cluster(&cluster)?;

    if args.skip_target {
        output::field("Skipped", "benchmark target (--skip-target)");
    } else {
        output::action("Creating", "benchmark target");
        match provisioner.create_target().await {
            Some(outcome) => print_outcomes("target", std::slice::from_ref(&outcome))?,
            None => output::success("benchmark target is pre-provisioned"),
        }
    }

    output::action("Writing", "load-test configuration");
    let written = provisioner.write_config(&args.output_dir).await?;
    output::action_done("Wrote", &written.compose.display().to_string());
    output::action_done("Wrote", &written.scenario.display().to_string());

    let operator = provisioner.operator_report().await?;
    info::print_report(&operator)
}
