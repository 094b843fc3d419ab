//! Handler for the `info` command.

use crate::cli::{output, Cli};
use crate::error::Result;
use crate::report::OperatorReport;

/// Print the operator report.
pub(crate) fn print_report(report: &OperatorReport) -> Result<()> {
    if output::is_json() {
        output::json_output("report", serde_json::to_value(report)?);
        return Ok(());
    }

    output::section("Benchmark cluster");
    output::field("Tsung controller", output::highlight(&report.controller_url));
    output::field("Phoenix chat application", output::highlight(&report.application_url));

    output::section("Run the following commands to start the benchmark");
    for step in &report.next_steps {
        output::lines(step);
    }
    println!();
    Ok(())
}

/// Execute the info command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let provisioner = super::provisioner(cli)?;
    let report = provisioner.operator_report().await?;
    print_report(&report)
}
