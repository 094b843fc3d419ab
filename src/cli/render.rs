//! Handler for the `render` command.

use crate::cli::{output, Cli, RenderArgs};
use crate::error::Result;

/// Execute the render command.
pub async fn execute(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let provisioner = super::provisioner(cli)?;

    output::action("Writing", "load-test configuration");
    let written = provisioner.write_config(&args.output_dir).await?;

    if output::is_json() {
        output::json_output("render", serde_json::to_value(&written)?);
        return Ok(());
    }

    output::action_done("Wrote", &written.compose.display().to_string());
    output::action_done("Wrote", &written.scenario.display().to_string());
    output::field("Target", written.target_ip);
    Ok(())
}
