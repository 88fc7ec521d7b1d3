use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_GRANT_SOURCE: &str = "client";

// Authorization configuration sourced from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Permission-set source name for delegated grant results.
    pub grant_source: String,
}

#[derive(Debug, Deserialize)]
struct AuthzConfigOverride {
    log_filter: Option<String>,
    grant_source: Option<String>,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            grant_source: DEFAULT_GRANT_SOURCE.to_string(),
        }
    }
}

impl AuthzConfig {
    pub fn from_env() -> Result<Self> {
        let log_filter = std::env::var("PODGATE_LOG_FILTER")
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        let grant_source = std::env::var("PODGATE_GRANT_SOURCE")
            .unwrap_or_else(|_| DEFAULT_GRANT_SOURCE.to_string());
        if grant_source.trim().is_empty() {
            anyhow::bail!("PODGATE_GRANT_SOURCE must not be empty");
        }
        Ok(Self {
            log_filter,
            grant_source,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("PODGATE_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read PODGATE_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: AuthzConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse podgate config yaml")?;
        if let Some(value) = override_cfg.log_filter {
            self.log_filter = value;
        }
        if let Some(value) = override_cfg.grant_source {
            if value.trim().is_empty() {
                anyhow::bail!("grant_source must not be empty");
            }
            self.grant_source = value;
        }
        Ok(())
    }
}
