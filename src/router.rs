// ============================================================================
// src/router.rs – operation registry and migration switch
// ============================================================================

use crate::config::Config;
use crate::errors::ShellError;
use crate::session::ForcedCommand;

/// Every operation this shell registers. The wire token is what the SSH
/// layer puts in the forced command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    TwoFactorRecoveryCodes,
}

impl Operation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "2fa_recovery_codes" => Some(Operation::TwoFactorRecoveryCodes),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Operation::TwoFactorRecoveryCodes => "2fa_recovery_codes",
        }
    }
}

/// Which implementation serves the operation. Both speak the same
/// stdin/stdout protocol; selection never changes within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplPath {
    Legacy,
    Migrated,
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub op: Operation,
    pub path: ImplPath,
}

/// Pure function of (operation token, migration config); performs no I/O.
/// An operation goes to the rewritten handler only when the migration
/// switch is on AND its token is listed as a feature.
pub fn resolve(command: &ForcedCommand, config: &Config) -> Result<Route, ShellError> {
    let token = command.operation();
    let op = Operation::from_token(token)
        .ok_or_else(|| ShellError::UnknownCommand(token.to_string()))?;

    let migrated = config.migration.enabled
        && config.migration.features.iter().any(|f| f == op.token());
    let path = if migrated {
        ImplPath::Migrated
    } else {
        ImplPath::Legacy
    };

    Ok(Route { op, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiCfg, Migration};

    fn config(enabled: bool, features: &[&str]) -> Config {
        Config {
            api: ApiCfg {
                url: "http://127.0.0.1:1".into(),
                secret: None,
                user: None,
                password: None,
                timeout_secs: 1,
            },
            migration: Migration {
                enabled,
                features: features.iter().map(|f| f.to_string()).collect(),
            },
            log: Default::default(),
        }
    }

    fn forced(raw: &str) -> ForcedCommand {
        ForcedCommand::parse(raw).unwrap()
    }

    #[test]
    fn migrated_when_enabled_and_listed() {
        let route = resolve(
            &forced("2fa_recovery_codes"),
            &config(true, &["2fa_recovery_codes"]),
        )
        .unwrap();
        assert_eq!(route.path, ImplPath::Migrated);
        assert_eq!(route.op, Operation::TwoFactorRecoveryCodes);
    }

    #[test]
    fn legacy_when_switch_is_off() {
        let route = resolve(
            &forced("2fa_recovery_codes"),
            &config(false, &["2fa_recovery_codes"]),
        )
        .unwrap();
        assert_eq!(route.path, ImplPath::Legacy);
    }

    #[test]
    fn legacy_when_feature_not_listed() {
        let route = resolve(&forced("2fa_recovery_codes"), &config(true, &[])).unwrap();
        assert_eq!(route.path, ImplPath::Legacy);
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = resolve(&forced("rm -rf /"), &config(true, &[])).unwrap_err();
        assert!(matches!(err, ShellError::UnknownCommand(token) if token == "rm"));
    }

    #[test]
    fn arguments_do_not_affect_routing() {
        let route = resolve(
            &forced("2fa_recovery_codes --verbose"),
            &config(true, &["2fa_recovery_codes"]),
        )
        .unwrap();
        assert_eq!(route.path, ImplPath::Migrated);
    }
}
