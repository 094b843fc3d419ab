use tracing::info;

use super::Provisioner;
use crate::domain::{extract_ipv4, KvStoreAddress, ProvisioningTarget, KV_STORE_NAME};
use crate::error::Result;

impl Provisioner {
    /// Make sure the key-value store node exists and return its address.
    ///
    /// The first lookup tolerates failure: an unknown machine simply means
    /// the store must be created. The lookup after bootstrapping is fatal, as
    /// is creation itself. Rerunning against an existing store issues no
    /// creation commands.
    pub async fn ensure_kv_store(&self) -> Result<KvStoreAddress> {
        let lookup = self.tool.ip(KV_STORE_NAME);
        let existing = match self.run_allowing_failure(&lookup, false).await {
            Ok(output) => output,
            Err(failure) => failure.output,
        };

        if let Some(ip) = extract_ipv4(&existing) {
            info!(%ip, "key-value store already running");
            return Ok(KvStoreAddress::new(ip));
        }

        info!(machine = KV_STORE_NAME, "creating key-value store");
        let target = ProvisioningTarget::kv_store(self.config.kv_store.clone());
        self.run(&self.tool.create(&target, None), self.stream_output)
            .await?;
        self.run(&self.tool.bootstrap_consul(), self.stream_output)
            .await?;

        let ip = self.resolve_ip(KV_STORE_NAME).await?;
        info!(%ip, "key-value store ready");
        Ok(KvStoreAddress::new(ip))
    }
}
