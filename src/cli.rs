// ============================================================================
// src/cli.rs – command-line surface
// ============================================================================

use clap::Parser;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/gateshell/config.yml";

/// Gateshell -- restricted SSH forced-command shell.
///
/// sshd invokes this binary through the authorized_keys command option; the
/// actual operation arrives in SSH_ORIGINAL_COMMAND, not in argv.
#[derive(Parser, Debug)]
#[command(name = "gateshell", version, about)]
pub struct Cli {
    /// Key descriptor from the authorized_keys entry (e.g. key-100).
    pub key_descriptor: Option<String>,

    /// Config file path (default /etc/gateshell/config.yml).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// --config wins, then GATESHELL_CONFIG, then the packaged default.
    pub fn config_path(&self) -> PathBuf {
        if let Some(path) = &self.config {
            return path.clone();
        }
        if let Some(path) = env::var_os("GATESHELL_CONFIG") {
            return PathBuf::from(path);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_key_descriptor() {
        let cli = Cli::parse_from(["gateshell", "key-100"]);
        assert_eq!(cli.key_descriptor.as_deref(), Some("key-100"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn explicit_config_flag_wins() {
        let cli = Cli::parse_from(["gateshell", "--config", "/tmp/g.yml", "key-1"]);
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/g.yml"));
    }
}
