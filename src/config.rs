// ============================================================================
// src/config.rs – strict config loader
// ============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Internal API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCfg {
    /// Endpoint root: `http://`, `https://` or `http+unix://<socket path>`.
    pub url: String,

    /// Shared secret sent (base64-encoded) with every request.
    #[serde(default)]
    pub secret: Option<String>,

    /// Optional basic-auth pair for the TCP transport.
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

/// Per-command switch between the legacy engine and the rewritten handlers.
/// Loaded once at startup and never mutated during a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Migration {
    #[serde(default)]
    pub enabled: bool,

    /// Operation tokens routed to the rewritten handlers when `enabled`.
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogCfg {
    /// tracing filter directive; GATESHELL_LOG overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiCfg,
    #[serde(default)]
    pub migration: Migration,
    #[serde(default)]
    pub log: LogCfg,
}

impl Config {
    pub fn load<P: AsRef<Path>>(p: P) -> Result<Self> {
        let s = fs::read_to_string(&p)
            .with_context(|| format!("read config: {}", p.as_ref().display()))?;
        let cfg: Self = if p.as_ref().extension().and_then(|e| e.to_str()) == Some("toml") {
            toml::from_str(&s).context("toml parse")?
        } else {
            serde_yaml::from_str(&s).context("yaml parse")?
        };
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn yaml_config_with_migration_block() {
        let mut f = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(
            f,
            "api:\n  url: \"http://127.0.0.1:8080\"\n  secret: \"s3cr3t\"\nmigration:\n  enabled: true\n  features: [\"2fa_recovery_codes\"]"
        )
        .unwrap();

        let cfg = Config::load(f.path()).unwrap();
        assert_eq!(cfg.api.url, "http://127.0.0.1:8080");
        assert_eq!(cfg.api.secret.as_deref(), Some("s3cr3t"));
        assert_eq!(cfg.api.timeout_secs, 300);
        assert!(cfg.migration.enabled);
        assert_eq!(cfg.migration.features, vec!["2fa_recovery_codes"]);
    }

    #[test]
    fn toml_config_by_extension() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            f,
            "[api]\nurl = \"http+unix:///var/run/internal.sock\"\ntimeout_secs = 5"
        )
        .unwrap();

        let cfg = Config::load(f.path()).unwrap();
        assert_eq!(cfg.api.url, "http+unix:///var/run/internal.sock");
        assert_eq!(cfg.api.timeout_secs, 5);
        assert!(!cfg.migration.enabled);
        assert!(cfg.migration.features.is_empty());
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn missing_api_section_is_rejected() {
        let mut f = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(f, "migration:\n  enabled: false").unwrap();
        assert!(Config::load(f.path()).is_err());
    }
}
