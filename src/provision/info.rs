use super::Provisioner;
use crate::domain::MASTER_NAME;
use crate::error::Result;
use crate::report::OperatorReport;

impl Provisioner {
    /// Resolve the controller and application addresses for the operator.
    ///
    /// Both lookups are fatal; a configured target address skips its lookup.
    pub async fn operator_report(&self) -> Result<OperatorReport> {
        let master_ip = self.resolve_ip(MASTER_NAME).await?;
        let target_ip = self.target_ip().await?;
        Ok(OperatorReport::new(
            &self.config.provisioning.program,
            master_ip,
            target_ip,
            self.config.benchmark_target.is_external(),
        ))
    }
}
