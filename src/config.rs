//! Process configuration loaded from `~/.config/vidbridge/config.toml`.
//!
//! Layering: built-in defaults, then the TOML file, then environment
//! variables (`TARGET_URL`, `PORT`, `PUBLIC_URL`, `VIDBRIDGE_BIND`). The CLI
//! applies its own flags on top and calls [`BridgeConfig::validate`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{BridgeError, Result};

/// Listing page the site serves when no query or page is requested.
pub const DEFAULT_TARGET_URL: &str = "https://www.wow.xxx/es/";

/// Observed listing granularity of the target site. Not a documented contract.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 24;

/// The one quality label promoted to the front of a stream list.
pub const DEFAULT_PREFERRED_QUALITY: &str = "720p";

/// Path fragment present in every directly playable file URL on the site.
pub const DEFAULT_FILE_MARKER: &str = "get_file";

/// Immutable process-wide configuration, shared behind an `Arc`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Base URL of the listing site. Always ends with `/` after [`normalize`](Self::normalize).
    pub target_url: String,
    pub items_per_page: u32,
    pub preferred_quality: String,
    pub file_marker: String,
    pub fetch_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Explicit user agents to rotate through. Empty means generated browser profiles.
    pub user_agents: Vec<String>,
    /// Resolve ids pointing at hosts other than the target site.
    pub allow_foreign_hosts: bool,
    pub bind: String,
    pub port: u16,
    pub public_url: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            preferred_quality: DEFAULT_PREFERRED_QUALITY.to_string(),
            file_marker: DEFAULT_FILE_MARKER.to_string(),
            fetch_timeout_secs: 8,
            connect_timeout_secs: 5,
            user_agents: Vec::new(),
            allow_foreign_hosts: false,
            bind: "127.0.0.1".to_string(),
            port: 7000,
            public_url: None,
        }
    }
}

impl BridgeConfig {
    /// Defaults with a different target site. Used by tests and mirrors.
    #[must_use]
    pub fn for_target(target_url: &str) -> Self {
        let mut config = Self {
            target_url: target_url.to_string(),
            ..Self::default()
        };
        config.normalize();
        config
    }

    /// Load the config file (if any) and apply environment overrides.
    ///
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.normalize();
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
            .map_err(|e| BridgeError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.normalize();
        Ok(config)
    }

    /// Apply environment overrides through `lookup` so tests need not touch the real env.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(target) = lookup("TARGET_URL").filter(|v| !v.trim().is_empty()) {
            self.target_url = target;
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse().ok()) {
            self.port = port;
        }
        if let Some(public) = lookup("PUBLIC_URL").filter(|v| !v.trim().is_empty()) {
            self.public_url = Some(public);
        }
        if let Some(bind) = lookup("VIDBRIDGE_BIND").filter(|v| !v.trim().is_empty()) {
            self.bind = bind;
        }
    }

    /// Trim the target URL and make sure it ends with `/` so relative joins keep the path.
    pub fn normalize(&mut self) {
        let trimmed = self.target_url.trim();
        self.target_url = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
    }

    /// Reject configurations the extractors cannot work with.
    pub fn validate(&self) -> Result<()> {
        let url = self.target_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BridgeError::Config(format!(
                "target_url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.items_per_page == 0 {
            return Err(BridgeError::Config("items_per_page must be positive".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(BridgeError::Config("fetch_timeout_secs must be positive".into()));
        }
        if self.file_marker.is_empty() {
            return Err(BridgeError::Config("file_marker must not be empty".into()));
        }
        Ok(())
    }

    /// The target base URL, parsed.
    pub fn target_url(&self) -> Result<Url> {
        Url::parse(&self.target_url)
            .map_err(|e| BridgeError::Config(format!("target_url {}: {e}", self.target_url)))
    }

    /// Refuse URLs outside the target site (its host or a subdomain, leading
    /// `www.` ignored) unless `allow_foreign_hosts` is set.
    pub fn check_host(&self, url: &str) -> Result<()> {
        if self.allow_foreign_hosts {
            return Ok(());
        }
        let target = self.target_url()?;
        let candidate = Url::parse(url)
            .map_err(|e| BridgeError::MalformedIdentifier(format!("{url}: {e}")))?;

        let same_site = match (target.host_str(), candidate.host_str()) {
            (Some(t), Some(c)) => {
                let t = t.trim_start_matches("www.");
                let c = c.trim_start_matches("www.");
                c == t || c.ends_with(&format!(".{t}"))
            }
            _ => false,
        };
        if same_site && matches!(candidate.scheme(), "http" | "https") {
            Ok(())
        } else {
            Err(BridgeError::MalformedIdentifier(format!(
                "{url} is not on {}",
                self.target_url
            )))
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// URL the add-on is reachable at, for the startup banner.
    pub fn public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

/// Return the path to the default config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidbridge")
        .join("config.toml")
}
