//! Handler for the `down` command.

use dialoguer::Confirm;

use crate::cli::{output, Cli, DownArgs};
use crate::domain::{cluster_machine_names, TeardownReport};
use crate::error::{Error, Result};

fn print_teardown(kind: &str, report: &TeardownReport) -> Result<()> {
    if output::is_json() {
        output::json_output(kind, serde_json::to_value(report)?);
        return Ok(());
    }

    match &report.failure {
        None => output::action_done("Removed", &report.machines.join(" ")),
        Some(failure) => {
            output::warning(&format!(
                "removal exited with status {}; some machines may not have existed",
                failure.status
            ));
            output::lines(&output::muted(failure.output.trim()));
        }
    }
    Ok(())
}

/// JSON mode cannot prompt, so removal there needs an explicit `--yes`.
fn require_consent(args: &DownArgs, json: bool) -> Result<()> {
    if json && !args.yes {
        return Err(Error::Prompt(
            "refusing to remove machines without confirmation; pass --yes with --json"
                .to_string(),
        ));
    }
    Ok(())
}

/// Execute the down command.
pub async fn execute(cli: &Cli, args: &DownArgs) -> Result<()> {
    require_consent(args, output::is_json())?;
    let provisioner = super::provisioner(cli)?;
    let config = provisioner.config();

    let mut doomed = cluster_machine_names(config.workers);
    if args.target && !config.benchmark_target.is_external() {
        doomed.push(crate::domain::TARGET_NAME.to_string());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {}?", doomed.join(", ")))
            .default(false)
            .interact()?;
        if !confirmed {
            output::warning("aborted");
            return Ok(());
        }
    }

    output::action("Removing", "swarm machines");
    let report = provisioner.teardown().await;
    print_teardown("teardown", &report)?;

    if args.target {
        match provisioner.teardown_target().await {
            Some(report) => print_teardown("teardown_target", &report)?,
            None => output::hint("benchmark target IP is configured; leaving the target alone"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(yes: bool) -> DownArgs {
        DownArgs { target: false, yes }
    }

    #[test]
    fn json_mode_requires_yes() {
        match require_consent(&args(false), true) {
            Err(Error::Prompt(message)) => assert!(message.contains("--yes")),
            other => panic!("expected refusal, got {other:?}"),
        }
        assert!(require_consent(&args(true), true).is_ok());
    }

    #[test]
    fn interactive_mode_defers_to_the_prompt() {
        assert!(require_consent(&args(false), false).is_ok());
    }
}
