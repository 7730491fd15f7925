pub mod catalog;
pub mod fingerprint;
pub mod id;
pub mod serve;
pub mod streams;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use vidbridge::{BridgeConfig, SiteClient};

/// Flags shared by every subcommand.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub target_url: Option<String>,
}

impl GlobalOptions {
    /// Load, override and validate the configuration.
    pub fn load_config(&self) -> Result<BridgeConfig> {
        let mut config =
            BridgeConfig::load(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(target) = &self.target_url {
            config.target_url.clone_from(target);
            config.normalize();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Shared config plus a site client built from it.
pub fn build_client(config: BridgeConfig) -> Result<(Arc<BridgeConfig>, Arc<SiteClient>)> {
    let client = SiteClient::new(&config).context("failed to build HTTP client")?;
    Ok((Arc::new(config), Arc::new(client)))
}
